use std::sync::Arc;

use crate::error::{StorageResult, StoreResult};

/// Byte-oriented key-value backend beneath the object store.
///
/// Keys are raw 32-byte digests, never hex. Implementations must:
/// - report an absent key from [`get`](Storage::get) as
///   [`StorageError::NotFound`](crate::StorageError::NotFound);
/// - make single-key operations atomic (no further atomicity is assumed);
/// - be safe to share between threads if the object store is shared.
///
/// All methods take `&self`; implementations use interior mutability.
pub trait Storage: Send + Sync {
    /// Store a value under a key, replacing any previous value.
    fn put(&self, key: &[u8], value: &[u8]) -> StorageResult<()>;

    /// Fetch the value stored under a key.
    fn get(&self, key: &[u8]) -> StorageResult<Vec<u8>>;

    /// Check whether a key is present.
    fn exists(&self, key: &[u8]) -> StorageResult<bool>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn put(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
        (**self).put(key, value)
    }

    fn get(&self, key: &[u8]) -> StorageResult<Vec<u8>> {
        (**self).get(key)
    }

    fn exists(&self, key: &[u8]) -> StorageResult<bool> {
        (**self).exists(key)
    }
}

/// Lets a backend be shared between an object store and other owners.
impl<S: Storage + ?Sized> Storage for Arc<S> {
    fn put(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
        (**self).put(key, value)
    }

    fn get(&self, key: &[u8]) -> StorageResult<Vec<u8>> {
        (**self).get(key)
    }

    fn exists(&self, key: &[u8]) -> StorageResult<bool> {
        (**self).exists(key)
    }
}

/// Anything that can be stored in the object store.
///
/// Two logically equal values must always produce byte-identical output;
/// the object's identity is the digest of these bytes.
pub trait Record {
    /// Produce the canonical serialization used for hashing and storage.
    fn to_canonical_bytes(&self) -> StoreResult<Vec<u8>>;
}
