//! In-memory key-value store for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::traits::{KeyValueStore, StorageError};

/// In-memory [`KeyValueStore`] with switchable failures.
///
/// # Example
///
/// ```ignore
/// use recipebox::adapters::mock::InMemoryStore;
/// use recipebox::traits::KeyValueStore;
///
/// let store = InMemoryStore::new();
/// store.set("token", "T1").await?;
/// assert_eq!(store.snapshot().get("token"), Some(&"T1".to_string()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    values: Arc<Mutex<HashMap<String, String>>>,
    read_should_fail: Arc<Mutex<bool>>,
    write_should_fail: Arc<Mutex<bool>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `entries`.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let store = Self::new();
        {
            let mut values = lock(&store.values);
            for (key, value) in entries {
                values.insert(key.to_string(), value.to_string());
            }
        }
        store
    }

    /// Seed or overwrite one entry without going through the trait.
    pub fn set_entry(&self, key: &str, value: &str) {
        lock(&self.values).insert(key.to_string(), value.to_string());
    }

    /// Configure whether reads should fail.
    pub fn set_read_should_fail(&self, should_fail: bool) {
        *lock(&self.read_should_fail) = should_fail;
    }

    /// Configure whether writes and removals should fail.
    pub fn set_write_should_fail(&self, should_fail: bool) {
        *lock(&self.write_should_fail) = should_fail;
    }

    /// Copy of the current contents (for assertions).
    pub fn snapshot(&self) -> HashMap<String, String> {
        lock(&self.values).clone()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if *lock(&self.read_should_fail) {
            return Err(StorageError::ReadFailed("Mock read failure".to_string()));
        }
        Ok(lock(&self.values).get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if *lock(&self.write_should_fail) {
            return Err(StorageError::WriteFailed("Mock write failure".to_string()));
        }
        lock(&self.values).insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        if *lock(&self.write_should_fail) {
            return Err(StorageError::RemoveFailed("Mock remove failure".to_string()));
        }
        lock(&self.values).remove(key);
        Ok(())
    }
}
