//! Session persistence.
//!
//! The controller persists its state through the [`SessionStore`] trait so
//! hosts can plug in whatever key-value backend the platform offers. Two
//! implementations ship with the crate: [`MemoryStore`] for tests and
//! [`FileStore`] writing one JSON file per key under a data directory.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::StorageResult;

/// Well-known persistence keys.
pub mod keys {
    /// Last selected station (JSON-encoded [`Station`](crate::catalog::Station)).
    pub const CURRENT_STATION: &str = "current_station";
    /// Active playlist (JSON array of stations).
    pub const PLAYLIST: &str = "playlist";
    /// Favorite stations (JSON array of stations).
    pub const FAVORITES: &str = "favorites";
    /// User-chosen station ordering (JSON array of station ids).
    pub const STATION_ORDER: &str = "station_order";
}

/// Key-value persistence backend.
///
/// Values are opaque strings; callers handle JSON encoding. Implementations
/// must tolerate concurrent access from multiple tasks.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Returns the value for `key`, or `None` if unset.
    async fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Sets `key` to `value`, replacing any previous value.
    async fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Removes `key` if present.
    async fn remove(&self, key: &str) -> StorageResult<()>;
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStore {
    entries: DashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).map(|entry| entry.clone()))
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-backed store writing one JSON file per key.
///
/// Uses atomic write (temp file + rename) to prevent corruption on crash.
/// Creates the data directory on first write.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl SessionStore for FileStore {
    async fn get(&self, key: &str) -> StorageResult<Option<String>> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let temp_path = self.dir.join(format!("{key}.json.tmp"));

        // Write to temp file first
        std::fs::write(&temp_path, value)?;
        // Atomic rename (on most filesystems)
        std::fs::rename(&temp_path, &path)?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> StorageResult<()> {
        match std::fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").await.unwrap(), None);

        store.set("k", "v1").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v1"));

        store.set("k", "v2").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v2"));

        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        store.set(keys::CURRENT_STATION, r#"{"id":"s1"}"#).await.unwrap();

        let reopened = FileStore::new(dir.path());
        assert_eq!(
            reopened.get(keys::CURRENT_STATION).await.unwrap().as_deref(),
            Some(r#"{"id":"s1"}"#)
        );
    }

    #[tokio::test]
    async fn file_store_missing_key_and_remove_are_clean() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path());
        assert_eq!(store.get("absent").await.unwrap(), None);
        store.remove("absent").await.unwrap();

        store.set("k", "v").await.unwrap();
        store.remove("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }
}
