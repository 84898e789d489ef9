// --- File: crates/attendance_common/src/services.rs ---
//! Service abstractions for the collaborators the attendance logic relies on.
//!
//! The activity registry, calendar store, session store and presentation layer
//! belong to the host system. These traits decouple the session and calendar
//! logic from any concrete implementation, so tests and the backend can plug in
//! their own.

use crate::error::Result;
use crate::models::{
    Activity, ActivityId, CalendarEvent, EventId, ModuleId, NewCalendarEvent, NewSession,
    Session, SessionId, UserId,
};
use attendance_config::{CalendarConfig, TAKE_ATTENDANCE_KEY};

/// Activity/module registry: answers whether a course module is shown.
pub trait ModuleRegistry: Send + Sync {
    /// Whether the module is visible in its course.
    fn is_visible(&self, module: ModuleId) -> Result<bool>;

    /// Whether the module is visible to a particular user.
    ///
    /// Registries that track per-user availability override this.
    fn is_visible_to(&self, module: ModuleId, _user: UserId) -> Result<bool> {
        self.is_visible(module)
    }
}

/// Calendar store holding session events.
pub trait CalendarStore: Send + Sync {
    fn load_event(&self, event_id: EventId) -> Result<Option<CalendarEvent>>;

    fn create_event(&self, event: NewCalendarEvent) -> Result<CalendarEvent>;

    /// Returns `true` if an event was removed.
    fn delete_event(&self, event_id: EventId) -> Result<bool>;
}

/// Session store holding activities and their sessions.
pub trait SessionStore: Send + Sync {
    /// Persist constructed sessions, assigning ids in input order.
    fn create_sessions(&self, sessions: Vec<NewSession>) -> Result<Vec<Session>>;

    fn get_session(&self, session_id: SessionId) -> Result<Option<Session>>;

    fn update_session(&self, session: Session) -> Result<Session>;

    /// Returns the removed session, if there was one.
    fn delete_session(&self, session_id: SessionId) -> Result<Option<Session>>;

    fn get_activity(&self, activity_id: ActivityId) -> Result<Option<Activity>>;

    /// The course module of the activity owning `session`.
    fn get_owning_activity(&self, session: &Session) -> Result<Option<ModuleId>>;
}

/// Localization and url service producing the user-facing parts of an action.
pub trait PresentationService: Send + Sync {
    /// Localized string for `key`.
    fn label(&self, key: &str) -> String;

    /// Url of the activity view endpoint for `module`.
    fn view_url(&self, module: ModuleId) -> String;
}

/// Presentation driven by the `[calendar]` configuration section.
#[derive(Debug, Clone)]
pub struct ConfiguredPresentation {
    base_url: String,
    view_path: String,
    strings: std::collections::HashMap<String, String>,
}

impl ConfiguredPresentation {
    pub fn new(config: &CalendarConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            view_path: config.view_path.clone(),
            strings: config.strings.clone(),
        }
    }
}

impl PresentationService for ConfiguredPresentation {
    fn label(&self, key: &str) -> String {
        if let Some(value) = self.strings.get(key) {
            return value.clone();
        }
        match key {
            TAKE_ATTENDANCE_KEY => "Take attendance".to_string(),
            other => format!("[[{}]]", other),
        }
    }

    fn view_url(&self, module: ModuleId) -> String {
        format!("{}{}?id={}", self.base_url, self.view_path, module)
    }
}
