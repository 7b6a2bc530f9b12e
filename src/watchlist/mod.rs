//! Persisted watchlist of saved titles.
//!
//! Every operation re-reads the stored value; mutations rewrite it whole.
//! Toggles and saves go through one writer lock so concurrent toggles on
//! different keys cannot drop each other's update.

mod key;
mod set;
mod storage;

use futures::future::join_all;
use tokio::sync::Mutex;

use crate::api::{normalize, MediaItem, MetadataSource, SourceContext};
use crate::error::StorageError;

pub use key::WatchlistKey;
pub use set::Watchlist;
#[cfg(test)]
pub use storage::MemoryStorage;
pub use storage::{db_path, SqliteStorage, WatchlistStorage};

/// Fixed storage slot for the watchlist
pub const STORAGE_KEY: &str = "moviescope_watchlist_v1";

/// Outcome of a toggle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggled {
    pub watchlist: Watchlist,
    pub is_member: bool,
}

/// Watchlist persisted through a storage port
pub struct WatchlistStore<S> {
    storage: S,
    writer: Mutex<()>,
}

impl WatchlistStore<SqliteStorage> {
    /// Open the watchlist in the default database file
    pub fn open_default() -> Result<Self, StorageError> {
        Ok(Self::new(SqliteStorage::open(&db_path(), STORAGE_KEY)?))
    }
}

impl<S: WatchlistStorage> WatchlistStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            writer: Mutex::new(()),
        }
    }

    /// Current watchlist. Missing, unreadable or corrupt state reads as empty.
    pub async fn load(&self) -> Watchlist {
        self.try_load().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Could not read watchlist, treating as empty");
            Watchlist::new()
        })
    }

    /// Like [`load`](Self::load), but a failed read is an error rather than empty
    async fn try_load(&self) -> Result<Watchlist, StorageError> {
        Ok(match self.storage.read().await? {
            Some(raw) => Watchlist::decode(&raw),
            None => Watchlist::new(),
        })
    }

    /// Replace the stored watchlist
    pub async fn save(&self, watchlist: &Watchlist) -> Result<(), StorageError> {
        let _guard = self.writer.lock().await;
        self.write(watchlist).await
    }

    /// Flip membership of `key` and persist the result
    pub async fn toggle(&self, key: WatchlistKey) -> Result<Toggled, StorageError> {
        let _guard = self.writer.lock().await;

        // A failed read must not be mistaken for an empty list and written back
        let mut watchlist = self.try_load().await?;
        let is_member = watchlist.toggle(key);
        self.write(&watchlist).await?;

        tracing::info!(key = %key, is_member, "Watchlist toggled");
        Ok(Toggled {
            watchlist,
            is_member,
        })
    }

    pub async fn contains(&self, key: &WatchlistKey) -> bool {
        self.load().await.contains(key)
    }

    /// Fetch and normalize details for every key, in watchlist order.
    ///
    /// Keys that fail to resolve are left out of the result but stay stored.
    pub async fn resolve_all<M: MetadataSource>(
        &self,
        source: &M,
        watchlist: &Watchlist,
    ) -> Vec<MediaItem> {
        let fetches = watchlist.iter().map(|&key| async move {
            let result = source.details(key.kind, key.id).await;
            (key, result)
        });

        join_all(fetches)
            .await
            .into_iter()
            .filter_map(|(key, result)| match result {
                Ok(raw) => Some(normalize(&raw, key.kind, SourceContext::Details { id: key.id })),
                Err(e) => {
                    tracing::warn!(key = %key, error = %e, "Dropping unresolved watchlist entry");
                    None
                }
            })
            .collect()
    }

    async fn write(&self, watchlist: &Watchlist) -> Result<(), StorageError> {
        self.storage.write(watchlist.encode()?).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::api::testing::FakeSource;
    use crate::api::MediaKind;

    /// Yields to the scheduler around every access, so interleavings show up
    #[derive(Clone, Default)]
    struct YieldingStorage(MemoryStorage);

    impl WatchlistStorage for YieldingStorage {
        async fn read(&self) -> Result<Option<String>, StorageError> {
            tokio::task::yield_now().await;
            let value = self.0.read().await;
            tokio::task::yield_now().await;
            value
        }

        async fn write(&self, value: String) -> Result<(), StorageError> {
            tokio::task::yield_now().await;
            self.0.write(value).await
        }
    }

    /// Storage whose reads always fail
    struct BrokenStorage;

    impl WatchlistStorage for BrokenStorage {
        async fn read(&self) -> Result<Option<String>, StorageError> {
            Err(StorageError::Task("disk on fire".to_string()))
        }

        async fn write(&self, _value: String) -> Result<(), StorageError> {
            Err(StorageError::Task("disk on fire".to_string()))
        }
    }

    /// Storage whose first read fails, like a briefly locked database
    struct FlakyReadStorage {
        inner: MemoryStorage,
        failed_once: std::sync::atomic::AtomicBool,
    }

    impl WatchlistStorage for FlakyReadStorage {
        async fn read(&self) -> Result<Option<String>, StorageError> {
            if !self.failed_once.swap(true, std::sync::atomic::Ordering::SeqCst) {
                return Err(StorageError::Task("database is locked".to_string()));
            }
            self.inner.read().await
        }

        async fn write(&self, value: String) -> Result<(), StorageError> {
            self.inner.write(value).await
        }
    }

    fn store() -> (WatchlistStore<MemoryStorage>, MemoryStorage) {
        let storage = MemoryStorage::new();
        (WatchlistStore::new(storage.clone()), storage)
    }

    #[tokio::test]
    async fn test_load_missing_is_empty() {
        let (store, _) = store();
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_load_corrupt_is_empty() {
        for raw in ["not json", "{}", "[1]", ""] {
            let store = WatchlistStore::new(MemoryStorage::with_value(raw));
            assert!(store.load().await.is_empty(), "{raw}");
        }
    }

    #[tokio::test]
    async fn test_load_read_error_is_empty() {
        let store = WatchlistStore::new(BrokenStorage);
        assert!(store.load().await.is_empty());
        assert!(!store.contains(&WatchlistKey::movie(1)).await);
        assert!(store.toggle(WatchlistKey::movie(1)).await.is_err());
    }

    #[tokio::test]
    async fn test_toggle_after_failed_read_keeps_saved_titles() {
        let inner = MemoryStorage::with_value(r#"["movie:1","movie:2","tv:3"]"#);
        let store = WatchlistStore::new(FlakyReadStorage {
            inner: inner.clone(),
            failed_once: Default::default(),
        });

        assert!(store.toggle(WatchlistKey::movie(99)).await.is_err());
        assert_eq!(inner.raw().as_deref(), Some(r#"["movie:1","movie:2","tv:3"]"#));

        let toggled = store.toggle(WatchlistKey::movie(99)).await.unwrap();
        assert!(toggled.is_member);
        assert_eq!(toggled.watchlist.len(), 4);
        assert_eq!(
            inner.raw().as_deref(),
            Some(r#"["movie:1","movie:2","tv:3","movie:99"]"#)
        );
    }

    #[tokio::test]
    async fn test_toggle_on_and_off() {
        let (store, storage) = store();
        let key: WatchlistKey = "movie:550".parse().unwrap();

        let on = store.toggle(key).await.unwrap();
        assert!(on.is_member);
        assert_eq!(on.watchlist.len(), 1);
        assert_eq!(storage.raw().as_deref(), Some(r#"["movie:550"]"#));
        assert!(store.contains(&key).await);

        let off = store.toggle(key).await.unwrap();
        assert!(!off.is_member);
        assert!(off.watchlist.is_empty());
        assert_eq!(storage.raw().as_deref(), Some("[]"));
        assert!(!store.contains(&key).await);
    }

    #[tokio::test]
    async fn test_toggle_recovers_from_corrupt_state() {
        let storage = MemoryStorage::with_value("not json");
        let store = WatchlistStore::new(storage.clone());

        let toggled = store.toggle(WatchlistKey::tv(1396)).await.unwrap();
        assert!(toggled.is_member);
        assert_eq!(storage.raw().as_deref(), Some(r#"["tv:1396"]"#));
    }

    #[tokio::test]
    async fn test_save_overwrites_whole_value() {
        let (store, storage) = store();
        store.toggle(WatchlistKey::movie(1)).await.unwrap();

        let replacement: Watchlist = [WatchlistKey::movie(27205), WatchlistKey::tv(1396)]
            .into_iter()
            .collect();
        store.save(&replacement).await.unwrap();

        assert_eq!(storage.raw().as_deref(), Some(r#"["movie:27205","tv:1396"]"#));
        assert_eq!(store.load().await, replacement);
    }

    #[tokio::test]
    async fn test_concurrent_toggles_keep_both_updates() {
        let storage = YieldingStorage::default();
        let store = WatchlistStore::new(storage);

        let (a, b) = tokio::join!(
            store.toggle(WatchlistKey::movie(1)),
            store.toggle(WatchlistKey::tv(2))
        );
        assert!(a.unwrap().is_member);
        assert!(b.unwrap().is_member);

        let stored = store.load().await;
        assert!(stored.contains(&WatchlistKey::movie(1)));
        assert!(stored.contains(&WatchlistKey::tv(2)));
    }

    #[tokio::test]
    async fn test_resolve_all_drops_failures_without_pruning() {
        let storage = MemoryStorage::with_value(r#"["movie:1","tv:2"]"#);
        let store = WatchlistStore::new(storage.clone());
        let source = FakeSource::default().with_details(
            MediaKind::Movie,
            1,
            json!({"id": 1, "title": "One", "release_date": "2001-01-01"}),
        );

        let watchlist = store.load().await;
        let items = store.resolve_all(&source, &watchlist).await;

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 1);
        assert_eq!(items[0].title, "One");
        assert_eq!(items[0].release_year, "2001");

        let after = store.load().await;
        assert_eq!(after.len(), 2);
        assert!(after.contains(&WatchlistKey::tv(2)));
        assert_eq!(storage.raw().as_deref(), Some(r#"["movie:1","tv:2"]"#));
    }

    #[tokio::test]
    async fn test_resolve_all_keeps_watchlist_order() {
        let (store, _) = store();
        let source = FakeSource::default()
            .with_details(MediaKind::TvSeries, 5, json!({"id": 5, "name": "Five"}))
            .with_details(MediaKind::Movie, 3, json!({"id": 3, "title": "Three"}))
            .with_details(MediaKind::Movie, 9, json!({"title": "Nine"}));

        let watchlist: Watchlist = [
            WatchlistKey::movie(9),
            WatchlistKey::tv(5),
            WatchlistKey::movie(3),
        ]
        .into_iter()
        .collect();

        let titles: Vec<_> = store
            .resolve_all(&source, &watchlist)
            .await
            .into_iter()
            .map(|item| (item.id, item.title))
            .collect();

        assert_eq!(
            titles,
            vec![(9, "Nine".to_string()), (5, "Five".to_string()), (3, "Three".to_string())]
        );
    }
}
