//! Storage error types.

use leave_core::LeaveError;
use thiserror::Error;

/// Storage operation result type.
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage error types.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database error from the underlying storage engine.
    #[error("Database error: {0}")]
    Database(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Record not found.
    #[error("Record not found: {entity_type} with key '{key}'")]
    NotFound {
        /// The type of entity (e.g., "Leave", "Profile").
        entity_type: &'static str,
        /// The key that was not found.
        key: String,
    },

    /// Duplicate key error.
    #[error("Duplicate key: {entity_type} with key '{key}' already exists")]
    DuplicateKey {
        /// The type of entity.
        entity_type: &'static str,
        /// The duplicate key.
        key: String,
    },

    /// Allowance outside the accepted options.
    #[error("Invalid allowance {total}: expected one of {options:?}")]
    InvalidAllowance {
        /// The rejected value.
        total: u32,
        /// The accepted values.
        options: Vec<u32>,
    },

    /// Transaction error.
    #[error("Transaction error: {0}")]
    Transaction(String),

    /// Invalid leave dates.
    #[error(transparent)]
    Leave(#[from] LeaveError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StorageError {
    /// A missing leave record.
    pub fn leave_not_found(id: impl ToString) -> Self {
        StorageError::NotFound {
            entity_type: "Leave",
            key: id.to_string(),
        }
    }

    pub(crate) fn lock(err: impl std::fmt::Display) -> Self {
        StorageError::Database(format!("Lock error: {}", err))
    }
}

impl From<redb::Error> for StorageError {
    fn from(err: redb::Error) -> Self {
        StorageError::Database(err.to_string())
    }
}

impl From<redb::DatabaseError> for StorageError {
    fn from(err: redb::DatabaseError) -> Self {
        StorageError::Database(err.to_string())
    }
}

impl From<redb::TableError> for StorageError {
    fn from(err: redb::TableError) -> Self {
        StorageError::Database(err.to_string())
    }
}

impl From<redb::TransactionError> for StorageError {
    fn from(err: redb::TransactionError) -> Self {
        StorageError::Transaction(err.to_string())
    }
}

impl From<redb::CommitError> for StorageError {
    fn from(err: redb::CommitError) -> Self {
        StorageError::Transaction(err.to_string())
    }
}

impl From<redb::StorageError> for StorageError {
    fn from(err: redb::StorageError) -> Self {
        StorageError::Database(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() {
            StorageError::Deserialization(err.to_string())
        } else {
            StorageError::Serialization(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = StorageError::leave_not_found("abc");
        assert_eq!(err.to_string(), "Record not found: Leave with key 'abc'");
    }

    #[test]
    fn test_leave_error_is_transparent() {
        let err: StorageError = LeaveError::inverted_range("2024-03-08", "2024-03-04").into();
        assert_eq!(
            err.to_string(),
            LeaveError::inverted_range("2024-03-08", "2024-03-04").to_string()
        );
    }
}
