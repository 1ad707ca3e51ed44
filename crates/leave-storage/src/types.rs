//! Core storage types.
//!
//! This module defines the records kept by the persistence layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use leave_core::types::{CalendarDate, LeaveRange};
use leave_core::LeaveResult;

// =============================================================================
// LEAVE RECORD
// =============================================================================

/// One stretch of annual leave taken by a user.
///
/// `year` is the allowance year the leave counts against, which need not be
/// the calendar year of `from`. `days` is the working-day count of the range,
/// computed when the record is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveRecord {
    /// Record identifier.
    pub id: Uuid,
    /// User the leave belongs to.
    pub owner_id: String,
    /// Allowance year.
    pub year: i32,
    /// First day of leave.
    pub from: CalendarDate,
    /// Last day of leave, inclusive.
    pub until: CalendarDate,
    /// Working days consumed.
    pub days: u32,
    /// When the record was first written.
    pub created_at: DateTime<Utc>,
    /// When the record was last changed.
    pub updated_at: DateTime<Utc>,
}

impl LeaveRecord {
    /// Creates a record with a fresh id.
    pub fn new(owner_id: impl Into<String>, year: i32, range: LeaveRange, days: u32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            owner_id: owner_id.into(),
            year,
            from: range.from(),
            until: range.until(),
            days,
            created_at: now,
            updated_at: now,
        }
    }

    /// The leave dates as a range.
    ///
    /// # Errors
    ///
    /// Fails if a stored record has `until` before `from`.
    pub fn range(&self) -> LeaveResult<LeaveRange> {
        LeaveRange::new(self.from, self.until)
    }

    /// Storage key for this record.
    pub fn key(&self) -> String {
        self.id.to_string()
    }
}

// =============================================================================
// USER PROFILE
// =============================================================================

/// Per-user settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// User identifier.
    pub owner_id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Yearly allowance in working days.
    pub total_leaves: u32,
}

impl UserProfile {
    /// Creates a profile with an empty display name.
    pub fn new(owner_id: impl Into<String>, total_leaves: u32) -> Self {
        Self {
            owner_id: owner_id.into(),
            name: String::new(),
            total_leaves,
        }
    }

    /// Sets the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

// =============================================================================
// BALANCE
// =============================================================================

/// Allowance, taken and remaining days for one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveBalance {
    /// Allowance year.
    pub year: i32,
    /// Days allowed.
    pub allowance: u32,
    /// Days recorded.
    pub taken: u32,
    /// `allowance - taken`; negative when overdrawn.
    pub remaining: i64,
}

impl LeaveBalance {
    /// Builds a balance from its two inputs.
    pub fn new(year: i32, allowance: u32, taken: u32) -> Self {
        Self {
            year,
            allowance,
            taken,
            remaining: i64::from(allowance) - i64::from(taken),
        }
    }

    /// True when more days were taken than allowed.
    pub fn is_overdrawn(&self) -> bool {
        self.remaining < 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_record_json_shape() {
        let range = LeaveRange::new(d(2024, 7, 1), d(2024, 7, 5)).unwrap();
        let record = LeaveRecord::new("user-1", 2024, range, 5);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["from"], "2024-07-01");
        assert_eq!(json["until"], "2024-07-05");
        assert_eq!(json["days"], 5);
        assert_eq!(json["year"], 2024);
        assert_eq!(json["owner_id"], "user-1");

        let back: LeaveRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_record_range() {
        let range = LeaveRange::new(d(2024, 7, 1), d(2024, 7, 5)).unwrap();
        let record = LeaveRecord::new("user-1", 2024, range, 5);
        assert_eq!(record.range().unwrap(), range);
    }

    #[test]
    fn test_balance() {
        let balance = LeaveBalance::new(2024, 20, 7);
        assert_eq!(balance.remaining, 13);
        assert!(!balance.is_overdrawn());

        let balance = LeaveBalance::new(2024, 20, 23);
        assert_eq!(balance.remaining, -3);
        assert!(balance.is_overdrawn());
    }

    #[test]
    fn test_profile_without_name_deserializes() {
        let profile: UserProfile =
            serde_json::from_str(r#"{"owner_id":"u","total_leaves":22}"#).unwrap();
        assert_eq!(profile, UserProfile::new("u", 22));
    }
}
