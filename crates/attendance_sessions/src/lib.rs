// --- File: crates/attendance_sessions/src/lib.rs ---
// Declare modules within this crate
pub mod action;
pub mod doc;
pub mod form;
pub mod handlers;
#[cfg(test)]
mod handlers_test;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
pub mod routes;
pub mod service;
pub mod store;
#[cfg(test)]
mod test_fixtures;

pub use action::resolve_action;
pub use form::{RepeatRule, SessionForm, SessionTimeOfDay};
pub use logic::{construct_sessions, ScheduleSettings};
pub use routes::routes;
pub use service::AttendanceService;
pub use store::{InMemoryCalendarStore, InMemoryModuleRegistry, InMemorySessionStore};
