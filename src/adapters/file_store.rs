//! File-backed key-value store.
//!
//! All keys live in one JSON object (`<data_dir>/store.json`). Every write
//! rewrites the whole file; the map is tiny (a token and a profile blob).

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::traits::{KeyValueStore, StorageError};

/// Durable [`KeyValueStore`] backed by a single JSON file.
///
/// # Example
///
/// ```ignore
/// use recipebox::adapters::FileStore;
/// use recipebox::traits::KeyValueStore;
///
/// let store = FileStore::new("/home/me/.recipebox/store.json");
/// store.set("token", "abc").await?;
/// assert_eq!(store.get("token").await?, Some("abc".to_string()));
/// ```
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Get the path to the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole map. A missing or corrupt file reads as empty.
    async fn read_map(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StorageError::ReadFailed(e.to_string())),
        };

        match serde_json::from_str(&raw) {
            Ok(map) => Ok(map),
            Err(e) => {
                tracing::warn!("Discarding unreadable store file {:?}: {}", self.path, e);
                Ok(BTreeMap::new())
            }
        }
    }

    async fn write_map(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
            }
        }

        let json = serde_json::to_string_pretty(map)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        // The file holds the bearer token: owner read/write only (Unix)
        let mut options = tokio::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options
            .open(&self.path)
            .await
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        file.write_all(json.as_bytes())
            .await
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| StorageError::WriteFailed(e.to_string()))?;

        // Files created by older builds keep their mode until tightened here
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tokio::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                .await
                .map_err(|e| StorageError::WriteFailed(e.to_string()))?;
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_map().await?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map).await
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        if map.remove(key).is_none() {
            return Ok(());
        }
        self.write_map(&map)
            .await
            .map_err(|e| StorageError::RemoveFailed(e.to_string()))
    }
}
