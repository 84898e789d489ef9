// --- File: crates/attendance_common/src/models.rs ---
//! Shared data structures for attendance sessions and their calendar events.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

id_type!(
    /// A user of the learning-management system.
    UserId
);
id_type!(
    /// A group of users inside a course.
    GroupId
);
id_type!(CourseId);
id_type!(
    /// A course-module handle; visibility is tracked per module.
    ModuleId
);
id_type!(
    /// An attendance activity instance.
    ActivityId
);
id_type!(SessionId);
id_type!(EventId);

/// Who a session is taken for.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionType {
    Individual,
    Group,
    All,
}

/// Text format of a session description.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptionFormat {
    #[default]
    Html,
    Plain,
    Markdown,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionDescription {
    pub text: String,
    #[serde(default)]
    pub format: DescriptionFormat,
    /// Draft area holding embedded files, if any.
    #[serde(default)]
    pub attachment_ref: Option<i64>,
}

#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionFlags {
    pub creates_calendar_event: bool,
    pub generates_absentee_report: bool,
    pub auto_marks_present: bool,
}

/// Where students may self-mark from.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NetworkRestriction {
    /// Comma separated list of addresses or CIDR blocks. Empty means unrestricted.
    pub cidr: String,
    pub use_default: bool,
    pub prevent_shared_ip: bool,
    pub grace_seconds: u32,
}

/// The attendance activity that owns sessions.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    pub course_ref: CourseId,
    pub module_ref: ModuleId,
    pub name: String,
    /// Subnet applied to sessions created with `use_default_subnet`.
    #[serde(default)]
    pub default_subnet: String,
}

/// A session that has been constructed but not stored yet.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewSession {
    pub activity_ref: ActivityId,
    pub session_type: SessionType,
    pub target_group_refs: BTreeSet<GroupId>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub course_start_date: DateTime<Utc>,
    pub description: SessionDescription,
    pub flags: SessionFlags,
    pub network_restriction: NetworkRestriction,
    pub status_set: u32,
}

/// One scheduled attendance-taking instance within an activity.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub activity_ref: ActivityId,
    pub session_type: SessionType,
    pub target_group_refs: BTreeSet<GroupId>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub course_start_date: DateTime<Utc>,
    pub description: SessionDescription,
    pub flags: SessionFlags,
    pub network_restriction: NetworkRestriction,
    /// Attendance status set used when taking this session.
    pub status_set: u32,
    /// Set once the session's calendar event exists.
    pub calendar_event_ref: Option<EventId>,
    pub modified_at: DateTime<Utc>,
}

impl Session {
    pub fn from_new(id: SessionId, new: NewSession, modified_at: DateTime<Utc>) -> Self {
        Self {
            id,
            activity_ref: new.activity_ref,
            session_type: new.session_type,
            target_group_refs: new.target_group_refs,
            start_time: new.start_time,
            end_time: new.end_time,
            course_start_date: new.course_start_date,
            description: new.description,
            flags: new.flags,
            network_restriction: new.network_restriction,
            status_set: new.status_set,
            calendar_event_ref: None,
            modified_at,
        }
    }

    pub fn duration_seconds(&self) -> i64 {
        (self.end_time - self.start_time).num_seconds()
    }
}

/// Calendar event data handed to the calendar store.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCalendarEvent {
    pub owning_session_ref: SessionId,
    pub name: String,
    pub course_ref: CourseId,
    pub group_ref: Option<GroupId>,
    pub visible: bool,
    pub scheduled_time: DateTime<Utc>,
    pub duration_seconds: i64,
    pub description: String,
    pub event_type: String,
}

/// A scheduling-system record representing a session's date and time.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: EventId,
    pub owning_session_ref: SessionId,
    pub name: String,
    pub course_ref: CourseId,
    pub group_ref: Option<GroupId>,
    /// Visibility of the owning activity when the event was created.
    pub visible: bool,
    pub scheduled_time: DateTime<Utc>,
    pub duration_seconds: i64,
    pub description: String,
    pub event_type: String,
}

impl CalendarEvent {
    pub fn from_new(id: EventId, new: NewCalendarEvent) -> Self {
        Self {
            id,
            owning_session_ref: new.owning_session_ref,
            name: new.name,
            course_ref: new.course_ref,
            group_ref: new.group_ref,
            visible: new.visible,
            scheduled_time: new.scheduled_time,
            duration_seconds: new.duration_seconds,
            description: new.description,
            event_type: new.event_type,
        }
    }
}

/// A link, label and count shown next to a calendar event. Never persisted.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDescriptor {
    #[cfg_attr(feature = "openapi", schema(example = "/mod/attendance/view.php?id=7"))]
    pub url: String,
    #[cfg_attr(feature = "openapi", schema(example = "Take attendance"))]
    pub label: String,
    pub item_count: u32,
}
