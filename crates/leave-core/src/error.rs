//! Error types for the Leave core.
//!
//! The calculation engine itself never fails: holiday generation is total and
//! working-day counting degrades to zero. These errors cover constructing and
//! parsing the values that feed it.

use thiserror::Error;

/// A specialized Result type for Leave core operations.
pub type LeaveResult<T> = Result<T, LeaveError>;

/// The main error type for Leave core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LeaveError {
    /// A date that does not exist on the calendar, or text that is not a date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// A range whose end lies before its start.
    #[error("Invalid range: {until} is before {from}")]
    InvertedRange {
        /// Start of the rejected range.
        from: String,
        /// End of the rejected range.
        until: String,
    },

    /// Month number outside 1-12.
    #[error("Invalid month: {month}")]
    InvalidMonth {
        /// The rejected month number.
        month: u32,
    },

    /// Calendar error.
    #[error("Calendar error: {reason}")]
    CalendarError {
        /// Description of the error.
        reason: String,
    },
}

impl LeaveError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an inverted range error.
    #[must_use]
    pub fn inverted_range(from: impl ToString, until: impl ToString) -> Self {
        Self::InvertedRange {
            from: from.to_string(),
            until: until.to_string(),
        }
    }

    /// Creates a calendar error.
    #[must_use]
    pub fn calendar_error(reason: impl Into<String>) -> Self {
        Self::CalendarError {
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = LeaveError::invalid_date("2024-02-30 is not a valid date");
        assert!(err.to_string().contains("Invalid date"));
    }

    #[test]
    fn test_inverted_range_display() {
        let err = LeaveError::inverted_range("2024-05-10", "2024-05-01");
        assert_eq!(
            err.to_string(),
            "Invalid range: 2024-05-01 is before 2024-05-10"
        );
    }
}
