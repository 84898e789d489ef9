// --- File: crates/attendance_sessions/src/routes.rs ---

use crate::handlers::{
    add_sessions_handler, delete_session_handler, event_action_handler, SessionsState,
};
use crate::service::AttendanceService;
use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

/// Creates a router containing all attendance session routes.
pub fn routes(service: Arc<AttendanceService>) -> Router {
    let state = Arc::new(SessionsState { service });

    Router::new()
        .route(
            "/attendance/activities/{activity_id}/sessions",
            post(add_sessions_handler),
        )
        .route(
            "/attendance/events/{event_id}/action",
            get(event_action_handler),
        )
        .route(
            "/attendance/sessions/{session_id}",
            delete(delete_session_handler),
        )
        .with_state(state)
}
