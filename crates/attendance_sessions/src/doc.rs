// File: crates/attendance_sessions/src/doc.rs

#![allow(dead_code)]
#![cfg(feature = "openapi")]
use utoipa::OpenApi;

use crate::form::{RepeatRule, SessionForm, SessionTimeOfDay};
use crate::handlers::{ActionQuery, ActionResponse, AddSessionsResponse};
use attendance_common::models::{
    ActionDescriptor, DescriptionFormat, NetworkRestriction, Session, SessionDescription,
    SessionFlags, SessionType,
};

#[utoipa::path(
    post,
    path = "/attendance/activities/{activity_id}/sessions",
    params(
        ("activity_id" = i64, Path, description = "Attendance activity the sessions belong to", example = 3)
    ),
    request_body(content = SessionForm, example = json!({
        "session_type": "GROUP",
        "groups": [11],
        "session_date": "2025-09-15",
        "course_start_date": "2025-09-01T00:00:00Z",
        "time": {"start_hour": 9, "start_minute": 0, "end_hour": 10, "end_minute": 30},
        "description": {"text": "Lab session", "format": "html"},
        "calendar_event": true,
        "absentee_report": true,
        "use_default_subnet": true
    })),
    responses(
        (status = 201, description = "Sessions created", body = AddSessionsResponse),
        (status = 400, description = "Invalid session form", body = String),
        (status = 404, description = "Unknown attendance activity", body = String),
        (status = 500, description = "Internal error", body = String)
    ),
    tag = "Attendance"
)]
fn doc_add_sessions_handler() {}

#[utoipa::path(
    get,
    path = "/attendance/events/{event_id}/action",
    params(
        ("event_id" = i64, Path, description = "Calendar event of a session", example = 5),
        ActionQuery
    ),
    responses(
        (status = 200, description = "Calendar action, or null when the activity is hidden", body = ActionResponse,
         example = json!({
             "action": {
                 "url": "/mod/attendance/view.php?id=7",
                 "label": "Take attendance",
                 "item_count": 1
             }
         })
        ),
        (status = 404, description = "Unknown calendar event", body = String),
        (status = 500, description = "Event without session or activity, or visibility unavailable", body = String)
    ),
    tag = "Attendance"
)]
fn doc_event_action_handler() {}

#[utoipa::path(
    delete,
    path = "/attendance/sessions/{session_id}",
    params(
        ("session_id" = i64, Path, description = "Session to delete", example = 9)
    ),
    responses(
        (status = 204, description = "Session and its calendar event deleted"),
        (status = 404, description = "Unknown session", body = String)
    ),
    tag = "Attendance"
)]
fn doc_delete_session_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        doc_add_sessions_handler,
        doc_event_action_handler,
        doc_delete_session_handler
    ),
    components(schemas(
        SessionForm,
        SessionTimeOfDay,
        RepeatRule,
        ActionQuery,
        ActionResponse,
        AddSessionsResponse,
        ActionDescriptor,
        Session,
        SessionType,
        SessionDescription,
        DescriptionFormat,
        SessionFlags,
        NetworkRestriction
    )),
    tags(
        (name = "Attendance", description = "Attendance sessions and calendar actions")
    )
)]
pub struct AttendanceApiDoc;
