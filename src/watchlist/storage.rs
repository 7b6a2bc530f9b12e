//! Durable slot holding the serialized watchlist.
//!
//! The store only ever replaces the whole value, so a backend needs nothing
//! more than a read and an overwrite of one slot.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use rusqlite::{params, Connection, OptionalExtension};

use crate::config::app_dir;
use crate::error::StorageError;

/// Get the database file path (~/.config/moviescope/watchlist.db)
pub fn db_path() -> PathBuf {
    app_dir().join("watchlist.db")
}

/// A single durable value
pub trait WatchlistStorage: Send + Sync {
    /// Current value, `None` if nothing has been written yet
    fn read(&self) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Overwrite the value in one write
    fn write(&self, value: String) -> impl Future<Output = Result<(), StorageError>> + Send;
}

/// SQLite-backed slot in a small key/value table
pub struct SqliteStorage {
    conn: Arc<Mutex<Connection>>,
    slot: String,
}

impl SqliteStorage {
    /// Open or create the database at the given path
    pub fn open(path: &Path, slot: &str) -> Result<Self, StorageError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        Self::with_connection(Connection::open(path)?, slot)
    }

    /// Open an in-memory database (for tests and throwaway sessions)
    pub fn open_in_memory(slot: &str) -> Result<Self, StorageError> {
        Self::with_connection(Connection::open_in_memory()?, slot)
    }

    fn with_connection(conn: Connection, slot: &str) -> Result<Self, StorageError> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            )",
            [],
        )?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            slot: slot.to_string(),
        })
    }

    /// Run a blocking closure against the connection off the async executor
    async fn with_conn<T, F>(&self, f: F) -> Result<T, StorageError>
    where
        T: Send + 'static,
        F: FnOnce(&Connection, &str) -> rusqlite::Result<T> + Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        let slot = self.slot.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| StorageError::Task("connection lock poisoned".to_string()))?;
            f(&*conn, &slot).map_err(StorageError::from)
        })
        .await
        .map_err(|e| StorageError::Task(e.to_string()))?
    }
}

impl WatchlistStorage for SqliteStorage {
    async fn read(&self) -> Result<Option<String>, StorageError> {
        self.with_conn(|conn, slot| {
            conn.query_row("SELECT value FROM kv WHERE key = ?1", params![slot], |row| {
                row.get(0)
            })
            .optional()
        })
        .await
    }

    async fn write(&self, value: String) -> Result<(), StorageError> {
        self.with_conn(move |conn, slot| {
            conn.execute(
                "INSERT INTO kv (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![slot, value],
            )
            .map(|_| ())
        })
        .await
    }
}

/// Process-local slot; clones share the same value
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    value: Arc<Mutex<Option<String>>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a pre-existing raw value
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Arc::new(Mutex::new(Some(value.into()))),
        }
    }

    /// The raw value as last written
    pub fn raw(&self) -> Option<String> {
        self.value.lock().ok().and_then(|v| v.clone())
    }
}

#[cfg(test)]
impl WatchlistStorage for MemoryStorage {
    async fn read(&self) -> Result<Option<String>, StorageError> {
        self.value
            .lock()
            .map(|v| v.clone())
            .map_err(|_| StorageError::Task("memory slot poisoned".to_string()))
    }

    async fn write(&self, value: String) -> Result<(), StorageError> {
        let mut slot = self
            .value
            .lock()
            .map_err(|_| StorageError::Task("memory slot poisoned".to_string()))?;
        *slot = Some(value);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sqlite_empty_then_written() {
        let storage = SqliteStorage::open_in_memory("slot").unwrap();
        assert_eq!(storage.read().await.unwrap(), None);

        storage.write("[\"movie:1\"]".to_string()).await.unwrap();
        storage.write("[\"tv:2\"]".to_string()).await.unwrap();
        assert_eq!(storage.read().await.unwrap().as_deref(), Some("[\"tv:2\"]"));
    }

    #[tokio::test]
    async fn test_sqlite_slots_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watchlist.db");

        let a = SqliteStorage::open(&path, "a").unwrap();
        a.write("one".to_string()).await.unwrap();

        let b = SqliteStorage::open(&path, "b").unwrap();
        assert_eq!(b.read().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_sqlite_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("watchlist.db");

        {
            let storage = SqliteStorage::open(&path, "slot").unwrap();
            storage.write("[\"tv:1396\"]".to_string()).await.unwrap();
        }

        let storage = SqliteStorage::open(&path, "slot").unwrap();
        assert_eq!(storage.read().await.unwrap().as_deref(), Some("[\"tv:1396\"]"));
    }

    #[tokio::test]
    async fn test_memory_clones_share_value() {
        let storage = MemoryStorage::new();
        let handle = storage.clone();
        storage.write("x".to_string()).await.unwrap();
        assert_eq!(handle.raw().as_deref(), Some("x"));
    }

    #[test]
    fn test_db_path() {
        assert!(db_path().ends_with("moviescope/watchlist.db"));
    }
}
