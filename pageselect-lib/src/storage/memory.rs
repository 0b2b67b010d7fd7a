//! In-memory snapshot storage using DashMap

use async_trait::async_trait;
use dashmap::DashMap;

use super::SnapshotStorage;
use crate::error::StorageError;

/// Snapshot storage backed by a concurrent hash map.
///
/// Data is lost when the process exits. Useful for tests and for running
/// without a database.
///
/// # Example
///
/// ```
/// use pageselect_lib::storage::MemoryStorage;
///
/// let storage = MemoryStorage::new();
/// assert!(storage.is_empty());
/// ```
#[derive(Debug, Default)]
pub struct MemoryStorage {
    store: DashMap<String, Vec<u8>>,
}

impl MemoryStorage {
    /// Creates a new empty storage.
    pub fn new() -> Self {
        Self {
            store: DashMap::new(),
        }
    }

    /// Creates a storage pre-populated with one snapshot.
    pub fn with_snapshot(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        let store = DashMap::new();
        store.insert(key.into(), value.into());
        Self { store }
    }

    /// Returns a copy of the raw snapshot under `key`.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.store.get(key).map(|entry| entry.value().clone())
    }

    /// Returns the number of stored snapshots.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

#[async_trait]
impl SnapshotStorage for MemoryStorage {
    async fn read_snapshot(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.get(key))
    }

    async fn write_snapshot(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        self.store.insert(key.to_string(), value);
        Ok(())
    }
}
