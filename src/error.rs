//! Error definitions.

use thiserror::Error;

/// Errors raised by the logger façade.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoggerError {
    /// The backend did not recognise the level name.
    #[error("not a valid log level: {level:?}")]
    InvalidLevel { level: String },
}

/// Result type for logger operations.
pub type LoggerResult<T> = Result<T, LoggerError>;
