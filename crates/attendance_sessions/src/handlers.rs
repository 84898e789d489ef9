// File: crates/attendance_sessions/src/handlers.rs
use crate::form::SessionForm;
use crate::service::AttendanceService;
use attendance_common::models::{
    ActionDescriptor, ActivityId, EventId, Session, SessionId, UserId,
};
use attendance_common::{AttendanceError, HttpStatusCode};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

// Shared state needed by the attendance handlers
#[derive(Clone)]
pub struct SessionsState {
    pub service: Arc<AttendanceService>,
}

#[derive(Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::IntoParams, utoipa::ToSchema))]
#[cfg_attr(feature = "openapi", into_params(parameter_in = Query))]
pub struct ActionQuery {
    /// User the calendar is rendered for
    pub user_id: i64,
}

#[derive(Serialize, Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ActionResponse {
    /// `null` when the event offers no action to this user
    pub action: Option<ActionDescriptor>,
}

#[derive(Serialize, Deserialize, Debug)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AddSessionsResponse {
    pub sessions: Vec<Session>,
}

fn to_http_error(err: AttendanceError) -> (StatusCode, String) {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!("Attendance request failed: {}", err);
    } else {
        info!("Attendance request rejected: {}", err);
    }
    (status, err.to_string())
}

/// Handler adding sessions to an attendance activity.
#[axum::debug_handler]
pub async fn add_sessions_handler(
    State(state): State<Arc<SessionsState>>,
    Path(activity_id): Path<i64>,
    Json(form): Json<SessionForm>,
) -> Result<(StatusCode, Json<AddSessionsResponse>), (StatusCode, String)> {
    let sessions = state
        .service
        .add_sessions(ActivityId(activity_id), &form)
        .map_err(to_http_error)?;
    Ok((StatusCode::CREATED, Json(AddSessionsResponse { sessions })))
}

/// Handler returning the calendar action of an event for a user.
#[axum::debug_handler]
pub async fn event_action_handler(
    State(state): State<Arc<SessionsState>>,
    Path(event_id): Path<i64>,
    Query(query): Query<ActionQuery>,
) -> Result<Json<ActionResponse>, (StatusCode, String)> {
    let action = state
        .service
        .resolve_action(EventId(event_id), UserId(query.user_id))
        .map_err(to_http_error)?;
    Ok(Json(ActionResponse { action }))
}

/// Handler deleting a session and its calendar event.
#[axum::debug_handler]
pub async fn delete_session_handler(
    State(state): State<Arc<SessionsState>>,
    Path(session_id): Path<i64>,
) -> Result<StatusCode, (StatusCode, String)> {
    let deleted = state
        .service
        .delete_session(SessionId(session_id))
        .map_err(to_http_error)?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((
            StatusCode::NOT_FOUND,
            format!("Not found: session {}", session_id),
        ))
    }
}
