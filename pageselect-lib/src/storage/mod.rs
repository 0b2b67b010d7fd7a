//! Durable snapshot storage
//!
//! Provides a `SnapshotStorage` trait and implementations for storing the
//! serialized selection under a fixed key.

mod memory;
mod sqlite;

pub use memory::*;
pub use sqlite::*;

use async_trait::async_trait;

use crate::error::StorageError;

/// Backend trait for key-value snapshot storage.
///
/// Implementations store raw bytes; the selection store owns serialization.
/// A read or write completes before the returned future resolves.
#[async_trait]
pub trait SnapshotStorage: Send + Sync {
    /// Reads the snapshot stored under `key`, or `None` if there is none.
    async fn read_snapshot(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replaces the snapshot stored under `key`.
    async fn write_snapshot(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError>;
}
