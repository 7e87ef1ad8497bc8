//! Durable key-value storage trait abstraction.
//!
//! The session store persists the auth token and the cached profile through
//! this trait, so production can use a file while tests stay in memory.

use async_trait::async_trait;

/// Storage operation errors.
#[derive(Debug, Clone)]
pub enum StorageError {
    /// Failed to read from storage
    ReadFailed(String),
    /// Failed to write to storage
    WriteFailed(String),
    /// Failed to remove a key
    RemoveFailed(String),
    /// Serialization error
    Serialization(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StorageError::ReadFailed(msg) => write!(f, "Failed to read storage: {}", msg),
            StorageError::WriteFailed(msg) => write!(f, "Failed to write storage: {}", msg),
            StorageError::RemoveFailed(msg) => write!(f, "Failed to remove key: {}", msg),
            StorageError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

/// Trait for asynchronous key-value persistence.
///
/// Values are opaque strings; callers own their encoding.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read a value.
    ///
    /// # Returns
    /// - `Ok(Some(value))` if the key exists
    /// - `Ok(None)` if nothing is stored under the key
    /// - `Err(error)` if the backing storage could not be read
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}
