// --- File: crates/attendance_common/src/lib.rs ---

// Declare modules within this crate
pub mod error; // Error handling
pub mod logging; // Logging utilities
pub mod models; // Shared data structures
pub mod services; // Collaborator abstractions

// Re-export error types and utilities for easier access
pub use error::{
    broken_invariant, config_error, not_found, store_error, validation_error,
    visibility_unavailable, AttendanceError, HttpStatusCode, Result,
};

pub use services::{
    CalendarStore, ConfiguredPresentation, ModuleRegistry, PresentationService, SessionStore,
};
