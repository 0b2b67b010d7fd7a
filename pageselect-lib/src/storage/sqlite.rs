//! SQLite-backed persistent snapshot storage.

use std::path::Path;

use async_sqlite::Client;
use async_sqlite::ClientBuilder;
use async_sqlite::JournalMode;
use async_sqlite::rusqlite;
use async_trait::async_trait;

use super::SnapshotStorage;
use crate::error::StorageError;

/// Snapshot storage backed by SQLite.
///
/// Snapshots persist across process restarts. Uses WAL journal mode.
///
/// # Example
///
/// ```ignore
/// use pageselect_lib::storage::SqliteStorage;
///
/// let storage = SqliteStorage::open("selection.db").await?;
/// ```
pub struct SqliteStorage {
    client: Client,
}

impl SqliteStorage {
    /// Opens storage at the specified path, creating the file and table if needed.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let client = ClientBuilder::new()
            .path(path)
            .journal_mode(JournalMode::Wal)
            .open()
            .await?;

        Self::init_schema(&client).await?;

        Ok(Self { client })
    }

    /// Opens an in-memory database. Data is lost when the storage is dropped.
    pub async fn open_in_memory() -> Result<Self, StorageError> {
        let client = ClientBuilder::new().path(":memory:").open().await?;

        Self::init_schema(&client).await?;

        Ok(Self { client })
    }

    async fn init_schema(client: &Client) -> Result<(), StorageError> {
        client
            .conn(|conn| {
                conn.execute(
                    "CREATE TABLE IF NOT EXISTS snapshots (
                        key TEXT PRIMARY KEY,
                        value BLOB NOT NULL
                    )",
                    [],
                )
            })
            .await?;
        Ok(())
    }
}

#[async_trait]
impl SnapshotStorage for SqliteStorage {
    async fn read_snapshot(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        let key = key.to_string();
        let value = self
            .client
            .conn(move |conn| {
                let mut stmt = conn.prepare("SELECT value FROM snapshots WHERE key = ?")?;
                let mut rows = stmt.query([&key])?;
                match rows.next()? {
                    Some(row) => Ok(Some(row.get::<_, Vec<u8>>(0)?)),
                    None => Ok(None),
                }
            })
            .await?;
        Ok(value)
    }

    async fn write_snapshot(&self, key: &str, value: Vec<u8>) -> Result<(), StorageError> {
        let key = key.to_string();
        self.client
            .conn(move |conn| {
                conn.execute(
                    "INSERT INTO snapshots (key, value) VALUES (?, ?)
                     ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                    rusqlite::params![key, value],
                )
            })
            .await?;
        Ok(())
    }
}
