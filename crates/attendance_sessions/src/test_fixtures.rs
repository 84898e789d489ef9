//! Shared fixtures for the unit tests of this crate.

use crate::form::{SessionForm, SessionTimeOfDay};
use crate::logic::ScheduleSettings;
use crate::service::AttendanceService;
use crate::store::{InMemoryCalendarStore, InMemoryModuleRegistry, InMemorySessionStore};
use attendance_common::models::{
    Activity, ActivityId, CourseId, DescriptionFormat, GroupId, ModuleId, SessionDescription,
    SessionType,
};
use attendance_common::ConfiguredPresentation;
use attendance_config::CalendarConfig;
use chrono::{NaiveDate, TimeZone, Utc};
use std::sync::Arc;

pub const ACTIVITY: ActivityId = ActivityId(1);
pub const MODULE: ModuleId = ModuleId(10);
pub const COURSE: CourseId = CourseId(100);

pub fn activity() -> Activity {
    Activity {
        id: ACTIVITY,
        course_ref: COURSE,
        module_ref: MODULE,
        name: "Weekly attendance".to_string(),
        default_subnet: "10.0.0.0/8".to_string(),
    }
}

/// A Monday well after the course start.
pub fn session_day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 3, 4).unwrap()
}

/// A single group session from 00:13 to 15:00 with a calendar event.
pub fn group_form(groups: &[i64]) -> SessionForm {
    SessionForm {
        session_type: SessionType::Group,
        groups: groups.iter().copied().map(GroupId).collect(),
        session_date: session_day(),
        session_end_date: Some(session_day()),
        course_start_date: Utc.with_ymd_and_hms(2030, 3, 1, 0, 0, 0).unwrap(),
        time: SessionTimeOfDay {
            start_hour: 0,
            start_minute: 13,
            end_hour: 15,
            end_minute: 0,
        },
        description: SessionDescription {
            text: "Something about nothing".to_string(),
            format: DescriptionFormat::Html,
            attachment_ref: Some(0),
        },
        calendar_event: true,
        absentee_report: true,
        auto_mark: false,
        subnet: String::new(),
        use_default_subnet: true,
        prevent_shared_ip: false,
        prevent_shared_ip_seconds: 0,
        status_set: 0,
        repeat: None,
    }
}

pub struct Harness {
    pub sessions: Arc<InMemorySessionStore>,
    pub calendar: Arc<InMemoryCalendarStore>,
    pub modules: Arc<InMemoryModuleRegistry>,
    pub service: Arc<AttendanceService>,
}

/// In-memory stores holding [`activity`] with its module shown or hidden.
pub fn harness(module_visible: bool) -> Harness {
    let sessions = Arc::new(InMemorySessionStore::new());
    let calendar = Arc::new(InMemoryCalendarStore::new());
    let modules = Arc::new(InMemoryModuleRegistry::new());
    sessions.add_activity(activity()).unwrap();
    modules.register(MODULE, module_visible).unwrap();

    let service = Arc::new(AttendanceService::new(
        sessions.clone(),
        calendar.clone(),
        modules.clone(),
        Arc::new(ConfiguredPresentation::new(&CalendarConfig::default())),
        ScheduleSettings::default(),
    ));
    Harness {
        sessions,
        calendar,
        modules,
        service,
    }
}
