//! Storage adapter trait definition.
//!
//! This module defines the core `StorageAdapter` trait that all storage
//! backends must implement.

use uuid::Uuid;

use crate::error::StorageResult;
use crate::types::{LeaveRecord, UserProfile};

/// Core storage adapter trait.
///
/// All storage backends (redb, in-memory) implement this trait. Methods are
/// synchronous; each call is its own transaction.
///
/// # Example
///
/// ```rust
/// use leave_core::types::{CalendarDate, LeaveRange};
/// use leave_storage::{InMemoryStorage, LeaveRecord, StorageAdapter};
///
/// let storage = InMemoryStorage::new();
/// let day = CalendarDate::from_ymd(2024, 7, 1).unwrap();
/// let record = LeaveRecord::new("user-1", 2024, LeaveRange::single(day), 1);
/// storage.insert_leave(&record).unwrap();
///
/// assert_eq!(storage.sum_days("user-1", 2024).unwrap(), 1);
/// ```
pub trait StorageAdapter: Send + Sync {
    /// Returns the backend name for logging.
    fn backend_name(&self) -> &'static str;

    /// Checks if the storage is healthy and accessible.
    fn is_healthy(&self) -> bool;

    // =========================================================================
    // LEAVE OPERATIONS
    // =========================================================================

    /// Inserts a new leave record.
    ///
    /// Fails with `StorageError::DuplicateKey` if the id is already stored.
    fn insert_leave(&self, record: &LeaveRecord) -> StorageResult<()>;

    /// Replaces an existing leave record.
    ///
    /// Fails with `StorageError::NotFound` if the id is not stored.
    fn update_leave(&self, record: &LeaveRecord) -> StorageResult<()>;

    /// Retrieves a leave record by id.
    fn get_leave(&self, id: Uuid) -> StorageResult<Option<LeaveRecord>>;

    /// Deletes a leave record by id.
    fn delete_leave(&self, id: Uuid) -> StorageResult<bool>;

    /// Lists leave records matching the filter, ordered by `from`.
    fn find_leaves(&self, filter: &LeaveFilter) -> StorageResult<Vec<LeaveRecord>>;

    /// Sum of `days` over one user's records for an allowance year.
    fn sum_days(&self, owner_id: &str, year: i32) -> StorageResult<u32> {
        let filter = LeaveFilter::new().owner(owner_id).year(year);
        Ok(self.find_leaves(&filter)?.iter().map(|r| r.days).sum())
    }

    /// Distinct allowance years with at least one record, ascending.
    fn distinct_years(&self, owner_id: &str) -> StorageResult<Vec<i32>> {
        let mut years: Vec<i32> = self
            .find_leaves(&LeaveFilter::new().owner(owner_id))?
            .iter()
            .map(|r| r.year)
            .collect();
        years.sort_unstable();
        years.dedup();
        Ok(years)
    }

    // =========================================================================
    // PROFILE OPERATIONS
    // =========================================================================

    /// Retrieves a user profile.
    fn get_profile(&self, owner_id: &str) -> StorageResult<Option<UserProfile>>;

    /// Stores a user profile, replacing any existing one.
    fn store_profile(&self, profile: &UserProfile) -> StorageResult<()>;

    // =========================================================================
    // MAINTENANCE OPERATIONS
    // =========================================================================

    /// Returns storage statistics.
    fn stats(&self) -> StorageResult<StorageStats>;
}

/// Filter for leave queries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaveFilter {
    /// Filter by owner.
    pub owner_id: Option<String>,
    /// Filter by allowance year.
    pub year: Option<i32>,
    /// Maximum number of results.
    pub limit: Option<usize>,
}

impl LeaveFilter {
    /// Creates a new empty filter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the owner filter.
    pub fn owner(mut self, owner_id: impl Into<String>) -> Self {
        self.owner_id = Some(owner_id.into());
        self
    }

    /// Sets the year filter.
    pub fn year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    /// Sets the limit.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// True if `record` passes the owner and year filters.
    pub fn matches(&self, record: &LeaveRecord) -> bool {
        if let Some(ref owner_id) = self.owner_id {
            if record.owner_id != *owner_id {
                return false;
            }
        }
        if let Some(year) = self.year {
            if record.year != year {
                return false;
            }
        }
        true
    }

    /// Sorts matching records by `from` and applies the limit.
    pub(crate) fn finish(&self, mut records: Vec<LeaveRecord>) -> Vec<LeaveRecord> {
        records.sort_by(|a, b| a.from.cmp(&b.from).then_with(|| a.until.cmp(&b.until)));
        if let Some(limit) = self.limit {
            records.truncate(limit);
        }
        records
    }
}

/// Storage statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageStats {
    /// Number of leave records stored.
    pub leave_count: usize,
    /// Number of user profiles stored.
    pub profile_count: usize,
    /// Database file size in bytes (if applicable).
    pub file_size_bytes: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use leave_core::types::{CalendarDate, LeaveRange};

    fn record(owner: &str, year: i32) -> LeaveRecord {
        let day = CalendarDate::from_ymd(year, 7, 1).unwrap();
        LeaveRecord::new(owner, year, LeaveRange::single(day), 1)
    }

    #[test]
    fn test_leave_filter_builder() {
        let filter = LeaveFilter::new().owner("user-1").year(2024).limit(10);

        assert_eq!(filter.owner_id, Some("user-1".to_string()));
        assert_eq!(filter.year, Some(2024));
        assert_eq!(filter.limit, Some(10));
    }

    #[test]
    fn test_leave_filter_matches() {
        let filter = LeaveFilter::new().owner("user-1").year(2024);
        assert!(filter.matches(&record("user-1", 2024)));
        assert!(!filter.matches(&record("user-2", 2024)));
        assert!(!filter.matches(&record("user-1", 2023)));
        assert!(LeaveFilter::new().matches(&record("anyone", 1999)));
    }
}
