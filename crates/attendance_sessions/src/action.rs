// --- File: crates/attendance_sessions/src/action.rs ---
//! Calendar actions for session events.
//!
//! A calendar UI asks, per event and viewing user, whether to show a link next to
//! the event. The only rule applied is the visibility of the owning activity
//! module: hidden modules get no action. Session type, target groups, timing,
//! network restriction and auto-marking do not influence the result.

use attendance_common::models::{ActionDescriptor, CalendarEvent, UserId};
use attendance_common::{
    broken_invariant, ModuleRegistry, PresentationService, Result, SessionStore,
};
use attendance_config::TAKE_ATTENDANCE_KEY;
use tracing::debug;

/// Every session event stands for exactly one actionable session instance.
pub const SESSION_ITEM_COUNT: u32 = 1;

/// Computes the action for `event` as seen by `viewing_user`.
///
/// Returns `Ok(None)` when the owning activity is hidden from the user.
///
/// # Errors
///
/// * `BrokenInvariant` if the event's session or the session's activity module
///   cannot be found.
/// * Any error from the module registry, e.g. `VisibilityUnavailable`, is passed
///   through unchanged.
pub fn resolve_action(
    event: &CalendarEvent,
    viewing_user: UserId,
    sessions: &dyn SessionStore,
    modules: &dyn ModuleRegistry,
    presentation: &dyn PresentationService,
) -> Result<Option<ActionDescriptor>> {
    let session = sessions
        .get_session(event.owning_session_ref)?
        .ok_or_else(|| {
            broken_invariant(format!(
                "calendar event {} refers to missing session {}",
                event.id, event.owning_session_ref
            ))
        })?;

    let module = sessions.get_owning_activity(&session)?.ok_or_else(|| {
        broken_invariant(format!(
            "session {} has no owning activity module (activity {})",
            session.id, session.activity_ref
        ))
    })?;

    if !modules.is_visible_to(module, viewing_user)? {
        debug!(
            "No action for event {}: module {} hidden from user {}",
            event.id, module, viewing_user
        );
        return Ok(None);
    }

    Ok(Some(ActionDescriptor {
        url: presentation.view_url(module),
        label: presentation.label(TAKE_ATTENDANCE_KEY),
        item_count: SESSION_ITEM_COUNT,
    }))
}
