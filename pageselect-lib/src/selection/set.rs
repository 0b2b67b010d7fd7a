//! Set of selected record ids.

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;

use crate::error::StorageError;
use crate::model::RecordId;

/// The ids currently selected.
///
/// Serialized as a JSON object mapping each id to `true`
/// (`{"101":true,"102":true}`). Deselected ids are removed, never stored as
/// `false`; `false` entries in an incoming snapshot are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    ids: BTreeSet<RecordId>,
}

impl SelectionSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: RecordId) -> bool {
        self.ids.contains(&id)
    }

    /// Marks `id` selected. Returns `true` if it was not selected before.
    pub fn insert(&mut self, id: RecordId) -> bool {
        self.ids.insert(id)
    }

    /// Unmarks `id`. Returns `true` if it was selected before.
    pub fn remove(&mut self, id: RecordId) -> bool {
        self.ids.remove(&id)
    }

    /// Inserts or removes `id` depending on `selected`.
    pub fn set(&mut self, id: RecordId, selected: bool) -> bool {
        if selected {
            self.insert(id)
        } else {
            self.remove(id)
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterates the selected ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = RecordId> + '_ {
        self.ids.iter().copied()
    }

    /// Serializes the set into its snapshot form.
    pub fn to_snapshot(&self) -> Result<Vec<u8>, StorageError> {
        serde_json::to_vec(self).map_err(StorageError::Serialization)
    }

    /// Parses a snapshot produced by [`to_snapshot`](Self::to_snapshot).
    pub fn from_snapshot(bytes: &[u8]) -> Result<Self, StorageError> {
        serde_json::from_slice(bytes).map_err(StorageError::Deserialization)
    }
}

impl FromIterator<RecordId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = RecordId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

impl Serialize for SelectionSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.ids.iter().map(|id| (id, true)))
    }
}

impl<'de> Deserialize<'de> for SelectionSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let map = BTreeMap::<RecordId, bool>::deserialize(deserializer)?;
        Ok(map
            .into_iter()
            .filter_map(|(id, selected)| selected.then_some(id))
            .collect())
    }
}
