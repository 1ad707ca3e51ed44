//! The leave ledger.
//!
//! [`LeaveLedger`] sits on top of a [`StorageAdapter`] and keeps the `days`
//! field of every record in step with the working-day calculator.

use chrono::Utc;
use uuid::Uuid;

use leave_core::types::{CalendarDate, LeaveRange, ALLOWANCE_OPTIONS, DEFAULT_ALLOWANCE};
use leave_core::workdays::WorkingDaysCalculator;

use crate::adapter::{LeaveFilter, StorageAdapter};
use crate::error::{StorageError, StorageResult};
use crate::types::{LeaveBalance, LeaveRecord, UserProfile};

/// Allowance rules applied by the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowancePolicy {
    /// Allowance for users with no profile.
    pub default_allowance: u32,
    /// Values accepted by [`LeaveLedger::set_allowance`].
    pub options: Vec<u32>,
}

impl Default for AllowancePolicy {
    fn default() -> Self {
        Self {
            default_allowance: DEFAULT_ALLOWANCE,
            options: ALLOWANCE_OPTIONS.to_vec(),
        }
    }
}

impl AllowancePolicy {
    /// True if `total` is one of the accepted values.
    pub fn accepts(&self, total: u32) -> bool {
        self.options.contains(&total)
    }
}

/// Records, edits and totals leave for users.
///
/// # Example
///
/// ```rust
/// use leave_core::types::CalendarDate;
/// use leave_storage::{InMemoryStorage, LeaveLedger};
///
/// let ledger = LeaveLedger::new(InMemoryStorage::new());
/// let from = CalendarDate::from_ymd(2024, 1, 1).unwrap();
/// let until = CalendarDate::from_ymd(2024, 1, 7).unwrap();
///
/// let record = ledger.record_leave("user-1", 2024, from, until).unwrap();
/// assert_eq!(record.days, 4);
/// assert_eq!(ledger.balance("user-1", 2024).unwrap().remaining, 16);
/// ```
pub struct LeaveLedger<S: StorageAdapter> {
    storage: S,
    calculator: WorkingDaysCalculator,
    policy: AllowancePolicy,
}

impl<S: StorageAdapter> LeaveLedger<S> {
    /// Creates a ledger with the default allowance policy.
    pub fn new(storage: S) -> Self {
        Self::with_policy(storage, AllowancePolicy::default())
    }

    /// Creates a ledger with an explicit allowance policy.
    pub fn with_policy(storage: S, policy: AllowancePolicy) -> Self {
        Self {
            storage,
            calculator: WorkingDaysCalculator::new(),
            policy,
        }
    }

    /// The underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// The allowance policy in force.
    pub fn policy(&self) -> &AllowancePolicy {
        &self.policy
    }

    /// Records a new stretch of leave and returns the stored record.
    ///
    /// # Errors
    ///
    /// Fails if `until` is before `from` or the storage write fails.
    pub fn record_leave(
        &self,
        owner_id: &str,
        year: i32,
        from: CalendarDate,
        until: CalendarDate,
    ) -> StorageResult<LeaveRecord> {
        let range = LeaveRange::new(from, until)?;
        let days = self.calculator.count(&range);
        let record = LeaveRecord::new(owner_id, year, range, days);

        self.storage.insert_leave(&record)?;
        log::info!(
            "recorded {days} day(s) of leave for {owner_id} ({range}, year {year})",
        );
        Ok(record)
    }

    /// Moves an existing record to new dates and recounts its days.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no record has `id`.
    pub fn edit_leave(
        &self,
        id: Uuid,
        year: i32,
        from: CalendarDate,
        until: CalendarDate,
    ) -> StorageResult<LeaveRecord> {
        let range = LeaveRange::new(from, until)?;
        let mut record = self
            .storage
            .get_leave(id)?
            .ok_or_else(|| StorageError::leave_not_found(id))?;

        record.year = year;
        record.from = range.from();
        record.until = range.until();
        record.days = self.calculator.count(&range);
        record.updated_at = Utc::now();

        self.storage.update_leave(&record)?;
        log::info!("updated leave {id}: {} day(s)", record.days);
        Ok(record)
    }

    /// Deletes a record. Returns false if it did not exist.
    pub fn delete_leave(&self, id: Uuid) -> StorageResult<bool> {
        let deleted = self.storage.delete_leave(id)?;
        if deleted {
            log::info!("deleted leave {id}");
        } else {
            log::warn!("no leave with id {id} to delete");
        }
        Ok(deleted)
    }

    /// A user's records for an allowance year, ordered by start date.
    pub fn leaves_for_year(&self, owner_id: &str, year: i32) -> StorageResult<Vec<LeaveRecord>> {
        self.storage
            .find_leaves(&LeaveFilter::new().owner(owner_id).year(year))
    }

    /// Days recorded against an allowance year.
    pub fn taken_days(&self, owner_id: &str, year: i32) -> StorageResult<u32> {
        self.storage.sum_days(owner_id, year)
    }

    /// Years to offer for selection: every year with records plus
    /// `current_year`, newest first.
    pub fn year_options(&self, owner_id: &str, current_year: i32) -> StorageResult<Vec<i32>> {
        let mut years = self.storage.distinct_years(owner_id)?;
        years.push(current_year);
        years.sort_unstable_by(|a, b| b.cmp(a));
        years.dedup();
        Ok(years)
    }

    /// The user's yearly allowance, falling back to the policy default.
    pub fn allowance(&self, owner_id: &str) -> StorageResult<u32> {
        Ok(self
            .storage
            .get_profile(owner_id)?
            .map_or(self.policy.default_allowance, |p| p.total_leaves))
    }

    /// Allowance, taken and remaining days for a year.
    pub fn balance(&self, owner_id: &str, year: i32) -> StorageResult<LeaveBalance> {
        let allowance = self.allowance(owner_id)?;
        let taken = self.taken_days(owner_id, year)?;
        Ok(LeaveBalance::new(year, allowance, taken))
    }

    /// Stores a new yearly allowance, keeping the rest of the profile.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidAllowance` when `total` is not one of
    /// the policy options.
    pub fn set_allowance(&self, owner_id: &str, total: u32) -> StorageResult<UserProfile> {
        if !self.policy.accepts(total) {
            return Err(StorageError::InvalidAllowance {
                total,
                options: self.policy.options.clone(),
            });
        }

        let profile = match self.storage.get_profile(owner_id)? {
            Some(mut existing) => {
                existing.total_leaves = total;
                existing
            }
            None => UserProfile::new(owner_id, total),
        };
        self.storage.store_profile(&profile)?;
        log::info!("allowance for {owner_id} set to {total}");
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStorage;
    use leave_core::LeaveError;

    fn d(y: i32, m: u32, day: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, day).unwrap()
    }

    fn ledger() -> LeaveLedger<InMemoryStorage> {
        LeaveLedger::new(InMemoryStorage::new())
    }

    #[test]
    fn test_record_counts_working_days() {
        let ledger = ledger();
        // Easter week 2024: Labour Day, Good Friday and Easter Monday excluded
        let record = ledger
            .record_leave("user-1", 2024, d(2024, 4, 29), d(2024, 5, 10))
            .unwrap();
        assert_eq!(record.days, 7);
        assert_eq!(ledger.taken_days("user-1", 2024).unwrap(), 7);
    }

    #[test]
    fn test_record_rejects_inverted_range() {
        let ledger = ledger();
        let err = ledger
            .record_leave("user-1", 2024, d(2024, 3, 8), d(2024, 3, 4))
            .unwrap_err();
        assert!(matches!(
            err,
            StorageError::Leave(LeaveError::InvertedRange { .. })
        ));
        assert_eq!(ledger.storage().stats().unwrap().leave_count, 0);
    }

    #[test]
    fn test_edit_recounts() {
        let ledger = ledger();
        let record = ledger
            .record_leave("user-1", 2024, d(2024, 7, 1), d(2024, 7, 5))
            .unwrap();
        assert_eq!(record.days, 5);

        // Aug 12 .. Aug 16 2024 includes the Assumption (Thursday)
        let edited = ledger
            .edit_leave(record.id, 2024, d(2024, 8, 12), d(2024, 8, 16))
            .unwrap();
        assert_eq!(edited.id, record.id);
        assert_eq!(edited.days, 4);
        assert_eq!(edited.created_at, record.created_at);
        assert_eq!(ledger.taken_days("user-1", 2024).unwrap(), 4);
    }

    #[test]
    fn test_edit_missing_record() {
        let ledger = ledger();
        let err = ledger
            .edit_leave(Uuid::new_v4(), 2024, d(2024, 7, 1), d(2024, 7, 5))
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound { .. }));
    }

    #[test]
    fn test_delete() {
        let ledger = ledger();
        let record = ledger
            .record_leave("user-1", 2024, d(2024, 7, 1), d(2024, 7, 1))
            .unwrap();
        assert!(ledger.delete_leave(record.id).unwrap());
        assert!(!ledger.delete_leave(record.id).unwrap());
        assert_eq!(ledger.taken_days("user-1", 2024).unwrap(), 0);
    }

    #[test]
    fn test_leave_counts_against_chosen_year() {
        let ledger = ledger();
        // Leave in January 2025 drawn from the 2024 allowance
        ledger
            .record_leave("user-1", 2024, d(2025, 1, 2), d(2025, 1, 3))
            .unwrap();
        assert_eq!(ledger.taken_days("user-1", 2024).unwrap(), 2);
        assert_eq!(ledger.taken_days("user-1", 2025).unwrap(), 0);
    }

    #[test]
    fn test_leaves_for_year_sorted() {
        let ledger = ledger();
        ledger
            .record_leave("user-1", 2024, d(2024, 9, 2), d(2024, 9, 3))
            .unwrap();
        ledger
            .record_leave("user-1", 2024, d(2024, 2, 5), d(2024, 2, 6))
            .unwrap();
        let leaves = ledger.leaves_for_year("user-1", 2024).unwrap();
        assert_eq!(leaves.len(), 2);
        assert_eq!(leaves[0].from, d(2024, 2, 5));
    }

    #[test]
    fn test_year_options() {
        let ledger = ledger();
        assert_eq!(ledger.year_options("user-1", 2024).unwrap(), vec![2024]);

        ledger
            .record_leave("user-1", 2022, d(2022, 7, 4), d(2022, 7, 4))
            .unwrap();
        ledger
            .record_leave("user-1", 2024, d(2024, 7, 4), d(2024, 7, 4))
            .unwrap();
        assert_eq!(
            ledger.year_options("user-1", 2024).unwrap(),
            vec![2024, 2022]
        );
        assert_eq!(
            ledger.year_options("user-1", 2026).unwrap(),
            vec![2026, 2024, 2022]
        );
    }

    #[test]
    fn test_balance_uses_default_then_profile() {
        let ledger = ledger();
        ledger
            .record_leave("user-1", 2024, d(2024, 1, 1), d(2024, 1, 7))
            .unwrap();

        let balance = ledger.balance("user-1", 2024).unwrap();
        assert_eq!(balance, LeaveBalance::new(2024, 20, 4));

        ledger.set_allowance("user-1", 25).unwrap();
        assert_eq!(ledger.balance("user-1", 2024).unwrap().remaining, 21);
    }

    #[test]
    fn test_set_allowance_validates() {
        let ledger = ledger();
        let err = ledger.set_allowance("user-1", 23).unwrap_err();
        assert!(matches!(err, StorageError::InvalidAllowance { total: 23, .. }));
        assert!(ledger.storage().get_profile("user-1").unwrap().is_none());
    }

    #[test]
    fn test_set_allowance_keeps_name() {
        let ledger = ledger();
        ledger
            .storage()
            .store_profile(&UserProfile::new("user-1", 20).with_name("Nikos"))
            .unwrap();
        let profile = ledger.set_allowance("user-1", 22).unwrap();
        assert_eq!(profile.name, "Nikos");
        assert_eq!(profile.total_leaves, 22);
    }

    #[test]
    fn test_custom_policy() {
        let policy = AllowancePolicy {
            default_allowance: 25,
            options: vec![25, 30],
        };
        let ledger = LeaveLedger::with_policy(InMemoryStorage::new(), policy);
        assert_eq!(ledger.allowance("nobody").unwrap(), 25);
        assert!(ledger.set_allowance("nobody", 30).is_ok());
        assert!(ledger.set_allowance("nobody", 20).is_err());
    }
}
