//! Selection store: the single source of truth for selected ids.

use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;

use tokio::sync::Mutex;

use super::SelectionSet;
use crate::model::RecordId;
use crate::storage::SnapshotStorage;

/// Owns the selected ids and keeps a durable snapshot of them.
///
/// Every mutation persists the complete set before it returns, so the
/// snapshot in storage always matches memory once a call has completed.
/// Storage failures are logged and otherwise ignored; selection keeps
/// working in memory.
///
/// The store is meant to be shared (`Arc<SelectionStore>`) between the
/// renderer, the listing view and the range selector.
///
/// # Example
///
/// ```ignore
/// let storage = Arc::new(MemoryStorage::new());
/// let store = SelectionStore::open(storage, "selectedRows").await;
///
/// store.set_selected(42, true).await;
/// assert!(store.is_selected(42));
/// ```
pub struct SelectionStore {
    selected: RwLock<SelectionSet>,
    storage: Arc<dyn SnapshotStorage>,
    key: String,
    /// Held from mutation through persistence so snapshots land in order.
    write_gate: Mutex<()>,
}

impl SelectionStore {
    /// Creates a store hydrated from the snapshot under `key`.
    pub async fn open(storage: Arc<dyn SnapshotStorage>, key: impl Into<String>) -> Self {
        let key = key.into();
        let selected = Self::hydrate(storage.as_ref(), &key).await;
        Self::with_selection(storage, key, selected)
    }

    /// Creates a store with an explicit initial selection, without reading storage.
    pub fn with_selection(
        storage: Arc<dyn SnapshotStorage>,
        key: impl Into<String>,
        selected: SelectionSet,
    ) -> Self {
        Self {
            selected: RwLock::new(selected),
            storage,
            key: key.into(),
            write_gate: Mutex::new(()),
        }
    }

    /// Reads the snapshot under `key`.
    ///
    /// Returns an empty set when there is no snapshot, the read fails, or the
    /// snapshot cannot be parsed.
    pub async fn hydrate(storage: &dyn SnapshotStorage, key: &str) -> SelectionSet {
        match storage.read_snapshot(key).await {
            Ok(Some(bytes)) => match SelectionSet::from_snapshot(&bytes) {
                Ok(set) => {
                    log::debug!("hydrated {} selected ids from '{}'", set.len(), key);
                    set
                }
                Err(e) => {
                    log::warn!("discarding unreadable selection snapshot '{}': {}", key, e);
                    SelectionSet::new()
                }
            },
            Ok(None) => SelectionSet::new(),
            Err(e) => {
                log::warn!("failed to read selection snapshot '{}': {}", key, e);
                SelectionSet::new()
            }
        }
    }

    /// Returns the storage key snapshots are written under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns `true` if `id` is selected.
    pub fn is_selected(&self, id: RecordId) -> bool {
        self.read(|set| set.contains(id))
    }

    /// Returns a copy of the full current selection.
    pub fn selection(&self) -> SelectionSet {
        self.read(SelectionSet::clone)
    }

    /// Number of selected ids.
    pub fn len(&self) -> usize {
        self.read(SelectionSet::len)
    }

    pub fn is_empty(&self) -> bool {
        self.read(SelectionSet::is_empty)
    }

    /// Selects or deselects a single id, then persists.
    pub async fn set_selected(&self, id: RecordId, selected: bool) {
        self.set_selected_many([id], selected).await;
    }

    /// Selects or deselects every id in `ids`, then persists once.
    pub async fn set_selected_many<I>(&self, ids: I, selected: bool)
    where
        I: IntoIterator<Item = RecordId>,
    {
        let _gate = self.write_gate.lock().await;

        let snapshot = {
            let mut set = self.selected.write().unwrap_or_else(PoisonError::into_inner);
            let mut changed = 0usize;
            for id in ids {
                if set.set(id, selected) {
                    changed += 1;
                }
            }
            log::debug!(
                "{} {} ids, {} now selected",
                if selected { "selected" } else { "deselected" },
                changed,
                set.len()
            );
            set.to_snapshot()
        };

        match snapshot {
            Ok(bytes) => {
                if let Err(e) = self.storage.write_snapshot(&self.key, bytes).await {
                    log::warn!("failed to persist selection to '{}': {}", self.key, e);
                }
            }
            Err(e) => log::warn!("failed to serialize selection: {}", e),
        }
    }

    fn read<T>(&self, f: impl FnOnce(&SelectionSet) -> T) -> T {
        let set = self.selected.read().unwrap_or_else(PoisonError::into_inner);
        f(&set)
    }
}
