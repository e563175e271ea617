//! Error types for geoplay.

use thiserror::Error;

use crate::validation::ValidationReport;

/// Result type alias using geoplay's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for geoplay operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Payload failed schema validation
    #[error("Validation failed: {0}")]
    Validation(ValidationReport),

    /// Invalid input outside of a record payload (query parameters, path ids)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Record store failed for a reason other than the database driver
    #[error("Store error: {0}")]
    Store(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Not-found error for a video id.
    pub fn video_not_found(id: &str) -> Self {
        Error::NotFound(format!("video {}", id))
    }

    /// True when the failure came from the record store rather than the caller.
    pub fn is_dependency_failure(&self) -> bool {
        matches!(self, Error::Database(_) | Error::Store(_))
    }
}

impl From<ValidationReport> for Error {
    fn from(report: ValidationReport) -> Self {
        Error::Validation(report)
    }
}
