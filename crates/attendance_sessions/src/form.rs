// --- File: crates/attendance_sessions/src/form.rs ---
//! Form-like input accepted when adding sessions to an activity.

use attendance_common::models::{GroupId, SessionDescription, SessionType};
use chrono::{DateTime, NaiveDate, Utc, Weekday};
use serde::{Deserialize, Serialize};

/// Start and end of a session on its day, in the configured timezone.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTimeOfDay {
    #[cfg_attr(feature = "openapi", schema(example = 9))]
    pub start_hour: u32,
    #[cfg_attr(feature = "openapi", schema(example = 0))]
    pub start_minute: u32,
    #[cfg_attr(feature = "openapi", schema(example = 10))]
    pub end_hour: u32,
    #[cfg_attr(feature = "openapi", schema(example = 30))]
    pub end_minute: u32,
}

/// Repeat a session on the given weekdays every `period_weeks` weeks,
/// up to and including `SessionForm::session_end_date`.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepeatRule {
    #[cfg_attr(feature = "openapi", schema(value_type = Vec<String>, example = json!(["Mon", "Thu"])))]
    pub weekdays: Vec<Weekday>,
    #[serde(default = "default_period")]
    pub period_weeks: u32,
}

fn default_period() -> u32 {
    1
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionForm {
    pub session_type: SessionType,
    /// Target groups, required for `GROUP` sessions.
    #[serde(default)]
    pub groups: Vec<GroupId>,
    #[cfg_attr(feature = "openapi", schema(example = "2025-09-15"))]
    pub session_date: NaiveDate,
    /// Last day a repeating session may fall on.
    #[serde(default)]
    pub session_end_date: Option<NaiveDate>,
    pub course_start_date: DateTime<Utc>,
    pub time: SessionTimeOfDay,
    #[serde(default)]
    pub description: SessionDescription,
    #[serde(default)]
    pub calendar_event: bool,
    #[serde(default)]
    pub absentee_report: bool,
    #[serde(default)]
    pub auto_mark: bool,
    #[serde(default)]
    pub subnet: String,
    #[serde(default)]
    pub use_default_subnet: bool,
    #[serde(default)]
    pub prevent_shared_ip: bool,
    #[serde(default)]
    pub prevent_shared_ip_seconds: u32,
    /// Status set the session is taken with. 0 is the activity's default set.
    #[serde(default)]
    pub status_set: u32,
    #[serde(default)]
    pub repeat: Option<RepeatRule>,
}
