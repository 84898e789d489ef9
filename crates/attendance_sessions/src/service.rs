// --- File: crates/attendance_sessions/src/service.rs ---
//! Attendance session service.
//!
//! Composes the session store, calendar store, module registry and presentation
//! service: adds sessions with their calendar events, removes them again, and
//! answers calendar action requests.

use crate::action;
use crate::form::SessionForm;
use crate::logic::{construct_sessions, ScheduleSettings};
use attendance_common::logging::log_result;
use attendance_common::models::{
    ActionDescriptor, Activity, ActivityId, CalendarEvent, EventId, NewCalendarEvent, Session,
    SessionId, SessionType, UserId,
};
use attendance_common::{
    not_found, CalendarStore, ModuleRegistry, PresentationService, Result, SessionStore,
};
use attendance_config::AppConfig;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Event type recorded on calendar events created for sessions.
pub const ATTENDANCE_EVENT_TYPE: &str = "attendance";

pub struct AttendanceService {
    sessions: Arc<dyn SessionStore>,
    calendar: Arc<dyn CalendarStore>,
    modules: Arc<dyn ModuleRegistry>,
    presentation: Arc<dyn PresentationService>,
    settings: ScheduleSettings,
    calendar_enabled: bool,
}

impl AttendanceService {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        calendar: Arc<dyn CalendarStore>,
        modules: Arc<dyn ModuleRegistry>,
        presentation: Arc<dyn PresentationService>,
        settings: ScheduleSettings,
    ) -> Self {
        Self {
            sessions,
            calendar,
            modules,
            presentation,
            settings,
            calendar_enabled: true,
        }
    }

    /// Builds a service whose settings and calendar switch come from `config`.
    pub fn from_config(
        config: &AppConfig,
        sessions: Arc<dyn SessionStore>,
        calendar: Arc<dyn CalendarStore>,
        modules: Arc<dyn ModuleRegistry>,
        presentation: Arc<dyn PresentationService>,
    ) -> Result<Self> {
        let settings = ScheduleSettings::from_config(config)?;
        Ok(Self::new(sessions, calendar, modules, presentation, settings)
            .with_calendar_enabled(config.calendar.enabled))
    }

    /// Turns calendar event creation on or off for the whole site.
    pub fn with_calendar_enabled(mut self, enabled: bool) -> Self {
        self.calendar_enabled = enabled;
        self
    }

    pub fn settings(&self) -> &ScheduleSettings {
        &self.settings
    }

    /// Constructs the sessions described by `form`, stores them and creates a
    /// calendar event for each one that asks for it.
    ///
    /// # Errors
    ///
    /// * `NotFoundError` if the activity does not exist
    /// * `ValidationError` if the form is rejected
    /// * store and registry errors are passed through; sessions and events
    ///   stored by this call are removed again first
    pub fn add_sessions(&self, activity_id: ActivityId, form: &SessionForm) -> Result<Vec<Session>> {
        let activity = self
            .sessions
            .get_activity(activity_id)?
            .ok_or_else(|| not_found(format!("attendance activity {}", activity_id)))?;

        let new_sessions = construct_sessions(form, &activity, &self.settings)?;
        let wants_events = self.calendar_enabled
            && new_sessions
                .iter()
                .any(|session| session.flags.creates_calendar_event);
        // Resolve before storing; a registry failure must not leave sessions behind.
        let event_visible = if wants_events {
            Some(self.modules.is_visible(activity.module_ref)?)
        } else {
            None
        };

        let stored = self.sessions.create_sessions(new_sessions)?;
        let stored_ids: Vec<SessionId> = stored.iter().map(|session| session.id).collect();
        let mut created_events = Vec::new();
        let mut added = Vec::with_capacity(stored.len());
        for session in stored {
            let session = match event_visible {
                Some(visible) if session.flags.creates_calendar_event => {
                    match self.attach_calendar_event(&activity, session, visible, &mut created_events)
                    {
                        Ok(session) => session,
                        Err(err) => {
                            self.roll_back(&stored_ids, &created_events);
                            return Err(err);
                        }
                    }
                }
                _ => session,
            };
            added.push(session);
        }

        info!(
            "Added {} session(s) to activity {} ({})",
            added.len(),
            activity.id,
            activity.name
        );
        Ok(added)
    }

    /// Creates the event for `session` and links it. Created event ids are
    /// recorded in `created_events` even if linking fails afterwards.
    fn attach_calendar_event(
        &self,
        activity: &Activity,
        mut session: Session,
        visible: bool,
        created_events: &mut Vec<EventId>,
    ) -> Result<Session> {
        let group_ref = match session.session_type {
            SessionType::Group => session.target_group_refs.iter().next().copied(),
            SessionType::Individual | SessionType::All => None,
        };

        let event = self.calendar.create_event(NewCalendarEvent {
            owning_session_ref: session.id,
            name: activity.name.clone(),
            course_ref: activity.course_ref,
            group_ref,
            visible,
            scheduled_time: session.start_time,
            duration_seconds: session.duration_seconds(),
            description: session.description.text.clone(),
            event_type: ATTENDANCE_EVENT_TYPE.to_string(),
        })?;
        created_events.push(event.id);
        debug!("Created calendar event {} for session {}", event.id, session.id);

        session.calendar_event_ref = Some(event.id);
        session.modified_at = Utc::now();
        self.sessions.update_session(session)
    }

    /// Removes what a failed `add_sessions` call stored. Failures here are logged
    /// and do not replace the error that triggered the roll back.
    fn roll_back(&self, sessions: &[SessionId], events: &[EventId]) {
        for event_id in events {
            if let Err(err) = self.calendar.delete_event(*event_id) {
                warn!("Could not roll back calendar event {}: {}", event_id, err);
            }
        }
        for session_id in sessions {
            if let Err(err) = self.sessions.delete_session(*session_id) {
                warn!("Could not roll back session {}: {}", session_id, err);
            }
        }
        warn!(
            "Rolled back {} session(s) and {} calendar event(s)",
            sessions.len(),
            events.len()
        );
    }

    pub fn load_event(&self, event_id: EventId) -> Result<CalendarEvent> {
        self.calendar
            .load_event(event_id)?
            .ok_or_else(|| not_found(format!("calendar event {}", event_id)))
    }

    /// Loads the event and resolves its action for `viewing_user`.
    pub fn resolve_action(
        &self,
        event_id: EventId,
        viewing_user: UserId,
    ) -> Result<Option<ActionDescriptor>> {
        let event = self.load_event(event_id)?;
        self.resolve_event_action(&event, viewing_user)
    }

    /// Resolves the action of an already loaded event for `viewing_user`.
    pub fn resolve_event_action(
        &self,
        event: &CalendarEvent,
        viewing_user: UserId,
    ) -> Result<Option<ActionDescriptor>> {
        log_result(
            action::resolve_action(
                event,
                viewing_user,
                self.sessions.as_ref(),
                self.modules.as_ref(),
                self.presentation.as_ref(),
            ),
            &format!("Resolved action for event {}", event.id),
            &format!("Failed to resolve action for event {}", event.id),
        )
    }

    /// Removes a session and its calendar event. Returns `false` if there was no such session.
    pub fn delete_session(&self, session_id: SessionId) -> Result<bool> {
        let Some(session) = self.sessions.delete_session(session_id)? else {
            return Ok(false);
        };
        if let Some(event_id) = session.calendar_event_ref {
            if !self.calendar.delete_event(event_id)? {
                warn!(
                    "Calendar event {} of session {} was already gone",
                    event_id, session_id
                );
            }
        }
        info!("Deleted session {}", session_id);
        Ok(true)
    }
}
