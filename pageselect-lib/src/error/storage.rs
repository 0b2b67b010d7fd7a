//! Snapshot storage error types

/// Errors raised by a [`SnapshotStorage`](crate::storage::SnapshotStorage) backend.
///
/// These never escape the selection store; it logs them and carries on with
/// the in-memory state.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] async_sqlite::Error),
    #[error("serialization error: {0}")]
    Serialization(#[source] serde_json::Error),
    #[error("deserialization error: {0}")]
    Deserialization(#[source] serde_json::Error),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}
