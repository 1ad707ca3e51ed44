//! In-memory storage adapter.
//!
//! Provides a simple in-memory implementation of the StorageAdapter trait.
//! Useful for testing and one-off sessions. Data is not persisted across
//! restarts.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use crate::adapter::{LeaveFilter, StorageAdapter, StorageStats};
use crate::error::{StorageError, StorageResult};
use crate::types::{LeaveRecord, UserProfile};

/// In-memory storage adapter.
///
/// This adapter stores all data in memory using standard collections.
/// It's thread-safe through the use of RwLock.
///
/// # Example
///
/// ```rust
/// use leave_storage::{InMemoryStorage, StorageAdapter};
///
/// let storage = InMemoryStorage::new();
/// assert!(storage.is_healthy());
/// ```
pub struct InMemoryStorage {
    leaves: RwLock<HashMap<Uuid, LeaveRecord>>,
    profiles: RwLock<HashMap<String, UserProfile>>,
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStorage {
    /// Creates a new empty in-memory storage.
    pub fn new() -> Self {
        Self {
            leaves: RwLock::new(HashMap::new()),
            profiles: RwLock::new(HashMap::new()),
        }
    }

    /// Clears all data from storage.
    pub fn clear(&self) -> StorageResult<()> {
        self.leaves.write().map_err(StorageError::lock)?.clear();
        self.profiles.write().map_err(StorageError::lock)?.clear();
        Ok(())
    }
}

impl StorageAdapter for InMemoryStorage {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    fn is_healthy(&self) -> bool {
        true
    }

    fn insert_leave(&self, record: &LeaveRecord) -> StorageResult<()> {
        let mut leaves = self.leaves.write().map_err(StorageError::lock)?;
        if leaves.contains_key(&record.id) {
            return Err(StorageError::DuplicateKey {
                entity_type: "Leave",
                key: record.key(),
            });
        }
        leaves.insert(record.id, record.clone());
        Ok(())
    }

    fn update_leave(&self, record: &LeaveRecord) -> StorageResult<()> {
        let mut leaves = self.leaves.write().map_err(StorageError::lock)?;
        match leaves.get_mut(&record.id) {
            Some(existing) => {
                *existing = record.clone();
                Ok(())
            }
            None => Err(StorageError::leave_not_found(record.id)),
        }
    }

    fn get_leave(&self, id: Uuid) -> StorageResult<Option<LeaveRecord>> {
        Ok(self
            .leaves
            .read()
            .map_err(StorageError::lock)?
            .get(&id)
            .cloned())
    }

    fn delete_leave(&self, id: Uuid) -> StorageResult<bool> {
        Ok(self
            .leaves
            .write()
            .map_err(StorageError::lock)?
            .remove(&id)
            .is_some())
    }

    fn find_leaves(&self, filter: &LeaveFilter) -> StorageResult<Vec<LeaveRecord>> {
        let records = self
            .leaves
            .read()
            .map_err(StorageError::lock)?
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        Ok(filter.finish(records))
    }

    fn sum_days(&self, owner_id: &str, year: i32) -> StorageResult<u32> {
        Ok(self
            .leaves
            .read()
            .map_err(StorageError::lock)?
            .values()
            .filter(|r| r.owner_id == owner_id && r.year == year)
            .map(|r| r.days)
            .sum())
    }

    fn get_profile(&self, owner_id: &str) -> StorageResult<Option<UserProfile>> {
        Ok(self
            .profiles
            .read()
            .map_err(StorageError::lock)?
            .get(owner_id)
            .cloned())
    }

    fn store_profile(&self, profile: &UserProfile) -> StorageResult<()> {
        self.profiles
            .write()
            .map_err(StorageError::lock)?
            .insert(profile.owner_id.clone(), profile.clone());
        Ok(())
    }

    fn stats(&self) -> StorageResult<StorageStats> {
        let leave_count = self.leaves.read().map_err(StorageError::lock)?.len();
        let profile_count = self.profiles.read().map_err(StorageError::lock)?.len();

        Ok(StorageStats {
            leave_count,
            profile_count,
            file_size_bytes: None,
        })
    }
}
