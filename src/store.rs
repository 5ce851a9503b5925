//! Persistent key-value abstraction the session manager and trackers sit on.
//!
//! Two deployment variants exist on device (a secure store for credentials and
//! a general-purpose one for app state); the core treats both as the same
//! capability and takes them as `Arc<dyn KeyValueStore>` handles.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{CoreError, CoreResult};

/// Durable string-keyed store. All operations are async I/O and
/// independently failable; no multi-key atomicity is provided.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> CoreResult<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> CoreResult<()>;
    async fn delete(&self, key: &str) -> CoreResult<()>;
}

/// In-memory store. Default for tests and for embeddings that handle
/// durability themselves.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> CoreResult<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// File-backed store: one JSON object per file, rewritten on every mutation.
/// Collections are small (tens of entries), so whole-file writes are fine.
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles against the file.
    lock: RwLock<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    async fn load(&self) -> CoreResult<HashMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => serde_json::from_str(&raw)
                .map_err(|e| CoreError::StoreIo(format!("corrupt store file: {e}"))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(CoreError::StoreIo(e.to_string())),
        }
    }

    async fn save(&self, entries: &HashMap<String, String>) -> CoreResult<()> {
        let raw = serde_json::to_string(entries).map_err(|e| CoreError::StoreIo(e.to_string()))?;
        tokio::fs::write(&self.path, raw)
            .await
            .map_err(|e| CoreError::StoreIo(e.to_string()))
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> CoreResult<Option<String>> {
        let _guard = self.lock.read().await;
        Ok(self.load().await?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        let _guard = self.lock.write().await;
        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value.to_string());
        debug!(target: "lingua_core", key, path = %self.path.display(), "store write");
        self.save(&entries).await
    }

    async fn delete(&self, key: &str) -> CoreResult<()> {
        let _guard = self.lock.write().await;
        let mut entries = self.load().await?;
        if entries.remove(key).is_some() {
            self.save(&entries).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.get("k").await.unwrap(), None);
        store.set("k", "v").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), Some("v".into()));
        store.delete("k").await.unwrap();
        assert_eq!(store.get("k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let store = JsonFileStore::new(&path);
        store.set("auth_token", "tok-1").await.unwrap();
        store.set("user_data", "{}").await.unwrap();
        drop(store);

        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.get("auth_token").await.unwrap(), Some("tok-1".into()));
        reopened.delete("auth_token").await.unwrap();
        assert_eq!(reopened.get("auth_token").await.unwrap(), None);
        assert_eq!(reopened.get("user_data").await.unwrap(), Some("{}".into()));
    }

    #[tokio::test]
    async fn file_store_reports_corruption() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        let store = JsonFileStore::new(&path);
        assert!(matches!(
            store.get("k").await,
            Err(CoreError::StoreIo(_))
        ));
    }
}
