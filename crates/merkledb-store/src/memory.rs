use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{StorageError, StorageResult};
use crate::traits::Storage;

/// In-memory, HashMap-based storage backend.
///
/// Intended for tests and embedding. Values are held behind a `RwLock` for
/// safe concurrent access and are cloned on read/write.
pub struct InMemoryStorage {
    data: RwLock<HashMap<Vec<u8>, Vec<u8>>>,
}

impl InMemoryStorage {
    /// Create a new empty backend.
    pub fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.data.read().expect("lock poisoned").len()
    }

    /// Returns `true` if nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.data.read().expect("lock poisoned").is_empty()
    }

    /// Return a sorted list of all keys.
    pub fn keys(&self) -> Vec<Vec<u8>> {
        let map = self.data.read().expect("lock poisoned");
        let mut keys: Vec<Vec<u8>> = map.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Remove every key.
    pub fn clear(&self) {
        self.data.write().expect("lock poisoned").clear();
    }
}

impl Default for InMemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for InMemoryStorage {
    fn put(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
        let mut map = self.data.write().expect("lock poisoned");
        map.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &[u8]) -> StorageResult<Vec<u8>> {
        let map = self.data.read().expect("lock poisoned");
        map.get(key).cloned().ok_or(StorageError::NotFound)
    }

    fn exists(&self, key: &[u8]) -> StorageResult<bool> {
        let map = self.data.read().expect("lock poisoned");
        Ok(map.contains_key(key))
    }
}

impl std::fmt::Debug for InMemoryStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStorage")
            .field("key_count", &self.len())
            .finish()
    }
}
