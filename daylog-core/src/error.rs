//! Error types for daylog.

use thiserror::Error;

/// Errors that can occur in daylog operations.
#[derive(Error, Debug)]
pub enum DaylogError {
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid file format: expected a JSON object keyed by date")]
    InvalidFormat,

    #[error("Activity not found: {0}")]
    ActivityNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for daylog operations.
pub type DaylogResult<T> = Result<T, DaylogError>;
