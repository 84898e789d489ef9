use crate::models::ModuleId;
use std::fmt;
use thiserror::Error;

/// The error type shared by all attendance crates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttendanceError {
    /// Data that must exist by construction is missing, e.g. an event without a session
    #[error("Broken invariant: {0}")]
    BrokenInvariant(String),

    /// The visibility of an activity module could not be determined
    #[error("Visibility of module {module} unavailable: {message}")]
    VisibilityUnavailable { module: ModuleId, message: String },

    /// Input was rejected
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// A requested record does not exist
    #[error("Not found: {0}")]
    NotFoundError(String),

    /// A store could not complete an operation
    #[error("Store error: {0}")]
    StoreError(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// A trait for converting errors to HTTP status codes.
pub trait HttpStatusCode {
    /// Returns the HTTP status code for this error.
    fn status_code(&self) -> u16;
}

impl HttpStatusCode for AttendanceError {
    fn status_code(&self) -> u16 {
        match self {
            AttendanceError::BrokenInvariant(_) => 500,
            AttendanceError::VisibilityUnavailable { .. } => 500,
            AttendanceError::ValidationError(_) => 400,
            AttendanceError::NotFoundError(_) => 404,
            AttendanceError::StoreError(_) => 500,
            AttendanceError::ConfigError(_) => 500,
        }
    }
}

impl From<serde_json::Error> for AttendanceError {
    fn from(err: serde_json::Error) -> Self {
        AttendanceError::ValidationError(err.to_string())
    }
}

pub type Result<T, E = AttendanceError> = std::result::Result<T, E>;

// Utility functions for error handling
pub fn broken_invariant<T: fmt::Display>(message: T) -> AttendanceError {
    AttendanceError::BrokenInvariant(message.to_string())
}

pub fn visibility_unavailable<T: fmt::Display>(module: ModuleId, message: T) -> AttendanceError {
    AttendanceError::VisibilityUnavailable {
        module,
        message: message.to_string(),
    }
}

pub fn validation_error<T: fmt::Display>(message: T) -> AttendanceError {
    AttendanceError::ValidationError(message.to_string())
}

pub fn not_found<T: fmt::Display>(message: T) -> AttendanceError {
    AttendanceError::NotFoundError(message.to_string())
}

pub fn store_error<T: fmt::Display>(message: T) -> AttendanceError {
    AttendanceError::StoreError(message.to_string())
}

pub fn config_error<T: fmt::Display>(message: T) -> AttendanceError {
    AttendanceError::ConfigError(message.to_string())
}
