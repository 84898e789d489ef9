// --- File: crates/attendance_sessions/src/store.rs ---
//! In-memory implementations of the collaborator traits.
//!
//! Used by the backend binary and by tests. Ids are handed out from counters
//! starting at 1.

use attendance_common::models::{
    Activity, ActivityId, CalendarEvent, EventId, ModuleId, NewCalendarEvent, NewSession,
    Session, SessionId,
};
use attendance_common::{
    not_found, store_error, visibility_unavailable, CalendarStore, ModuleRegistry, Result,
    SessionStore,
};
use chrono::Utc;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

fn read<'a, T>(lock: &'a RwLock<T>, name: &str) -> Result<RwLockReadGuard<'a, T>> {
    lock.read()
        .map_err(|_| store_error(format!("{} lock poisoned", name)))
}

fn write<'a, T>(lock: &'a RwLock<T>, name: &str) -> Result<RwLockWriteGuard<'a, T>> {
    lock.write()
        .map_err(|_| store_error(format!("{} lock poisoned", name)))
}

/// Module visibility keyed by course-module id.
#[derive(Debug, Default)]
pub struct InMemoryModuleRegistry {
    modules: RwLock<HashMap<ModuleId, bool>>,
}

impl InMemoryModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `module` or replaces its visibility.
    pub fn register(&self, module: ModuleId, visible: bool) -> Result<()> {
        write(&self.modules, "module registry")?.insert(module, visible);
        Ok(())
    }

    /// Shows or hides an already registered module.
    pub fn set_visible(&self, module: ModuleId, visible: bool) -> Result<()> {
        let mut modules = write(&self.modules, "module registry")?;
        let entry = modules
            .get_mut(&module)
            .ok_or_else(|| not_found(format!("course module {}", module)))?;
        *entry = visible;
        Ok(())
    }
}

impl ModuleRegistry for InMemoryModuleRegistry {
    fn is_visible(&self, module: ModuleId) -> Result<bool> {
        read(&self.modules, "module registry")?
            .get(&module)
            .copied()
            .ok_or_else(|| visibility_unavailable(module, "module is not registered"))
    }
}

#[derive(Debug)]
pub struct InMemoryCalendarStore {
    events: RwLock<HashMap<EventId, CalendarEvent>>,
    next_id: AtomicI64,
}

impl InMemoryCalendarStore {
    pub fn new() -> Self {
        Self {
            events: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn len(&self) -> Result<usize> {
        Ok(read(&self.events, "calendar")?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }
}

impl Default for InMemoryCalendarStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CalendarStore for InMemoryCalendarStore {
    fn load_event(&self, event_id: EventId) -> Result<Option<CalendarEvent>> {
        Ok(read(&self.events, "calendar")?.get(&event_id).cloned())
    }

    fn create_event(&self, event: NewCalendarEvent) -> Result<CalendarEvent> {
        let id = EventId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let event = CalendarEvent::from_new(id, event);
        write(&self.events, "calendar")?.insert(id, event.clone());
        Ok(event)
    }

    fn delete_event(&self, event_id: EventId) -> Result<bool> {
        Ok(write(&self.events, "calendar")?.remove(&event_id).is_some())
    }
}

/// Activities and their sessions.
#[derive(Debug)]
pub struct InMemorySessionStore {
    activities: RwLock<HashMap<ActivityId, Activity>>,
    sessions: RwLock<BTreeMap<SessionId, Session>>,
    next_id: AtomicI64,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            activities: RwLock::new(HashMap::new()),
            sessions: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub fn add_activity(&self, activity: Activity) -> Result<()> {
        write(&self.activities, "activities")?.insert(activity.id, activity);
        Ok(())
    }

    /// Removes an activity, leaving its sessions orphaned.
    pub fn remove_activity(&self, activity_id: ActivityId) -> Result<Option<Activity>> {
        Ok(write(&self.activities, "activities")?.remove(&activity_id))
    }

    pub fn sessions_for(&self, activity_id: ActivityId) -> Result<Vec<Session>> {
        Ok(read(&self.sessions, "sessions")?
            .values()
            .filter(|s| s.activity_ref == activity_id)
            .cloned()
            .collect())
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for InMemorySessionStore {
    fn create_sessions(&self, sessions: Vec<NewSession>) -> Result<Vec<Session>> {
        let now = Utc::now();
        let mut stored = write(&self.sessions, "sessions")?;
        let created: Vec<Session> = sessions
            .into_iter()
            .map(|new| {
                let id = SessionId(self.next_id.fetch_add(1, Ordering::SeqCst));
                Session::from_new(id, new, now)
            })
            .collect();
        for session in &created {
            stored.insert(session.id, session.clone());
        }
        Ok(created)
    }

    fn get_session(&self, session_id: SessionId) -> Result<Option<Session>> {
        Ok(read(&self.sessions, "sessions")?.get(&session_id).cloned())
    }

    fn update_session(&self, session: Session) -> Result<Session> {
        let mut sessions = write(&self.sessions, "sessions")?;
        match sessions.get_mut(&session.id) {
            Some(existing) => {
                *existing = session.clone();
                Ok(session)
            }
            None => Err(not_found(format!("session {}", session.id))),
        }
    }

    fn delete_session(&self, session_id: SessionId) -> Result<Option<Session>> {
        Ok(write(&self.sessions, "sessions")?.remove(&session_id))
    }

    fn get_activity(&self, activity_id: ActivityId) -> Result<Option<Activity>> {
        Ok(read(&self.activities, "activities")?
            .get(&activity_id)
            .cloned())
    }

    fn get_owning_activity(&self, session: &Session) -> Result<Option<ModuleId>> {
        Ok(read(&self.activities, "activities")?
            .get(&session.activity_ref)
            .map(|activity| activity.module_ref))
    }
}
