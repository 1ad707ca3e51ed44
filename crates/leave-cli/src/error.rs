//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid date format.
    #[error("Invalid date: '{0}'. Use YYYY-MM-DD or DD-MM-YYYY.")]
    InvalidDate(String),

    /// Invalid month number.
    #[error("Invalid month: {0}. Must be between 1 and 12.")]
    InvalidMonth(u32),

    /// Invalid leave id.
    #[error("Invalid leave id: '{0}'")]
    InvalidId(String),

    /// No leave with the given id.
    #[error("No leave with id {0}")]
    LeaveNotFound(uuid::Uuid),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(#[from] leave_config::ConfigError),

    /// Storage error.
    #[error("Storage error: {0}")]
    Storage(#[from] leave_storage::StorageError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
