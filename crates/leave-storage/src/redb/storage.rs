//! RedbStorage implementation.
//!
//! Implements the StorageAdapter trait using redb as the underlying database.
//! Values are stored as JSON.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use redb::{Database, ReadableTable, ReadableTableMetadata, TableDefinition};
use uuid::Uuid;

use crate::adapter::{LeaveFilter, StorageAdapter, StorageStats};
use crate::error::{StorageError, StorageResult};
use crate::types::{LeaveRecord, UserProfile};

// Table definitions
const LEAVES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("leaves");
const PROFILES_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("profiles");

/// Redb-based storage adapter.
///
/// This adapter uses redb, a pure-Rust embedded database, for persistent storage.
/// It provides ACID transactions and is suitable for single-process applications.
///
/// # Example
///
/// ```rust,no_run
/// use leave_storage::{RedbStorage, StorageAdapter};
///
/// let storage = RedbStorage::open("./leave.redb").unwrap();
/// assert!(storage.is_healthy());
/// ```
pub struct RedbStorage {
    db: Arc<Database>,
    path: PathBuf,
}

impl RedbStorage {
    /// Opens or creates a database at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or created.
    pub fn open<P: AsRef<Path>>(path: P) -> StorageResult<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let db = Database::create(&path)?;
        let storage = Self {
            db: Arc::new(db),
            path,
        };
        storage.initialize_tables()?;
        log::debug!("opened leave database at {}", storage.path.display());
        Ok(storage)
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Initializes all required tables.
    fn initialize_tables(&self) -> StorageResult<()> {
        let write_txn = self.db.begin_write()?;
        {
            let _ = write_txn.open_table(LEAVES_TABLE)?;
            let _ = write_txn.open_table(PROFILES_TABLE)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Writes a leave record, checking existence first.
    fn write_leave(&self, record: &LeaveRecord, must_exist: bool) -> StorageResult<()> {
        let key = record.key();
        let data = serde_json::to_vec(record)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(LEAVES_TABLE)?;
            let exists = table.get(key.as_str())?.is_some();
            match (must_exist, exists) {
                (true, false) => return Err(StorageError::leave_not_found(&key)),
                (false, true) => {
                    return Err(StorageError::DuplicateKey {
                        entity_type: "Leave",
                        key,
                    })
                }
                _ => {}
            }
            table.insert(key.as_str(), data.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }
}

impl StorageAdapter for RedbStorage {
    fn backend_name(&self) -> &'static str {
        "redb"
    }

    fn is_healthy(&self) -> bool {
        self.db.begin_read().is_ok()
    }

    // =========================================================================
    // LEAVE OPERATIONS
    // =========================================================================

    fn insert_leave(&self, record: &LeaveRecord) -> StorageResult<()> {
        self.write_leave(record, false)
    }

    fn update_leave(&self, record: &LeaveRecord) -> StorageResult<()> {
        self.write_leave(record, true)
    }

    fn get_leave(&self, id: Uuid) -> StorageResult<Option<LeaveRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(LEAVES_TABLE)?;
        let key = id.to_string();
        match table.get(key.as_str())? {
            Some(data) => Ok(Some(serde_json::from_slice(data.value())?)),
            None => Ok(None),
        }
    }

    fn delete_leave(&self, id: Uuid) -> StorageResult<bool> {
        let key = id.to_string();
        let write_txn = self.db.begin_write()?;
        let deleted = {
            let mut table = write_txn.open_table(LEAVES_TABLE)?;
            let result = table.remove(key.as_str())?;
            result.is_some()
        };
        write_txn.commit()?;
        Ok(deleted)
    }

    fn find_leaves(&self, filter: &LeaveFilter) -> StorageResult<Vec<LeaveRecord>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(LEAVES_TABLE)?;

        let mut results = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            let record: LeaveRecord = serde_json::from_slice(value.value())?;
            if filter.matches(&record) {
                results.push(record);
            }
        }

        Ok(filter.finish(results))
    }

    // =========================================================================
    // PROFILE OPERATIONS
    // =========================================================================

    fn get_profile(&self, owner_id: &str) -> StorageResult<Option<UserProfile>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(PROFILES_TABLE)?;
        match table.get(owner_id)? {
            Some(data) => Ok(Some(serde_json::from_slice(data.value())?)),
            None => Ok(None),
        }
    }

    fn store_profile(&self, profile: &UserProfile) -> StorageResult<()> {
        let data = serde_json::to_vec(profile)?;
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(PROFILES_TABLE)?;
            table.insert(profile.owner_id.as_str(), data.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    // =========================================================================
    // MAINTENANCE OPERATIONS
    // =========================================================================

    fn stats(&self) -> StorageResult<StorageStats> {
        let read_txn = self.db.begin_read()?;

        let leave_count = {
            let table = read_txn.open_table(LEAVES_TABLE)?;
            table.len()? as usize
        };

        let profile_count = {
            let table = read_txn.open_table(PROFILES_TABLE)?;
            table.len()? as usize
        };

        Ok(StorageStats {
            leave_count,
            profile_count,
            file_size_bytes: std::fs::metadata(&self.path).ok().map(|m| m.len()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leave_core::types::{CalendarDate, LeaveRange};
    use tempfile::{tempdir, TempDir};

    fn create_test_storage() -> (TempDir, RedbStorage) {
        let dir = tempdir().unwrap();
        let storage = RedbStorage::open(dir.path().join("test.redb")).unwrap();
        (dir, storage)
    }

    fn record(owner: &str, year: i32, month: u32, days: u32) -> LeaveRecord {
        let from = CalendarDate::from_ymd(year, month, 1).unwrap();
        let until = CalendarDate::from_ymd(year, month, 3).unwrap();
        LeaveRecord::new(owner, year, LeaveRange::new(from, until).unwrap(), days)
    }

    #[test]
    fn test_backend_name() {
        let (_dir, storage) = create_test_storage();
        assert_eq!(storage.backend_name(), "redb");
        assert!(storage.is_healthy());
    }

    #[test]
    fn test_leave_crud() {
        let (_dir, storage) = create_test_storage();
        let mut leave = record("user-1", 2024, 7, 3);

        // Create
        storage.insert_leave(&leave).unwrap();
        assert!(matches!(
            storage.insert_leave(&leave),
            Err(StorageError::DuplicateKey { .. })
        ));

        // Read
        let retrieved = storage.get_leave(leave.id).unwrap().unwrap();
        assert_eq!(retrieved, leave);

        // Update
        leave.days = 2;
        storage.update_leave(&leave).unwrap();
        assert_eq!(storage.get_leave(leave.id).unwrap().unwrap().days, 2);

        // Delete
        assert!(storage.delete_leave(leave.id).unwrap());
        assert!(storage.get_leave(leave.id).unwrap().is_none());
        assert!(matches!(
            storage.update_leave(&leave),
            Err(StorageError::NotFound { .. })
        ));
    }

    #[test]
    fn test_queries() {
        let (_dir, storage) = create_test_storage();
        storage.insert_leave(&record("user-1", 2024, 9, 3)).unwrap();
        storage.insert_leave(&record("user-1", 2024, 2, 3)).unwrap();
        storage.insert_leave(&record("user-1", 2021, 6, 2)).unwrap();
        storage.insert_leave(&record("user-2", 2024, 2, 3)).unwrap();

        let found = storage
            .find_leaves(&LeaveFilter::new().owner("user-1").year(2024))
            .unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].from.month(), 2);

        let limited = storage.find_leaves(&LeaveFilter::new().limit(1)).unwrap();
        assert_eq!(limited.len(), 1);

        assert_eq!(storage.sum_days("user-1", 2024).unwrap(), 6);
        assert_eq!(storage.distinct_years("user-1").unwrap(), vec![2021, 2024]);
    }

    #[test]
    fn test_persists_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("leave.redb");
        let leave = record("user-1", 2024, 7, 3);

        {
            let storage = RedbStorage::open(&path).unwrap();
            storage.insert_leave(&leave).unwrap();
            storage
                .store_profile(&UserProfile::new("user-1", 25).with_name("Maria"))
                .unwrap();
        }

        let storage = RedbStorage::open(&path).unwrap();
        assert_eq!(storage.get_leave(leave.id).unwrap(), Some(leave));
        let profile = storage.get_profile("user-1").unwrap().unwrap();
        assert_eq!(profile.total_leaves, 25);
        assert_eq!(profile.name, "Maria");
    }

    #[test]
    fn test_stats() {
        let (_dir, storage) = create_test_storage();
        storage.insert_leave(&record("user-1", 2024, 7, 3)).unwrap();

        let stats = storage.stats().unwrap();
        assert_eq!(stats.leave_count, 1);
        assert_eq!(stats.profile_count, 0);
        assert!(stats.file_size_bytes.unwrap_or(0) > 0);
    }
}
