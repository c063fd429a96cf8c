//! # AppError
//!
//! Centralized error handling for the message board.
//! Every failure a board operation can report maps to exactly one variant.

use thiserror::Error;

/// The primary error type for all board operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// A required field is missing or empty. The caller must fix the request.
    #[error("validation error: {0}")]
    Validation(String),

    /// A thread or reply id does not resolve (e.g. `("thread", "<uuid>")`).
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// The supplied delete password does not match the stored one.
    #[error("incorrect password")]
    Unauthorized,

    /// The backing store is unavailable or a write failed. Transient.
    #[error("storage error: {0}")]
    Storage(String),
}

impl AppError {
    pub fn thread_not_found(id: impl ToString) -> Self {
        Self::NotFound("thread".into(), id.to_string())
    }

    pub fn reply_not_found(id: impl ToString) -> Self {
        Self::NotFound("reply".into(), id.to_string())
    }

    /// Missing or empty required field.
    pub fn missing(field: &str) -> Self {
        Self::Validation(format!("missing required field `{field}`"))
    }
}

/// A specialized Result type for board logic.
pub type Result<T> = std::result::Result<T, AppError>;
