use merkledb_crypto::ContentHasher;
use merkledb_types::{ObjectId, TypeError};
use tracing::debug;

use crate::commit::Commit;
use crate::config::StoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::object::Tree;
use crate::traits::{Record, Storage};

/// The content-addressable storage engine.
///
/// Serializes records, hashes the bytes with SHA-256 and stores them in the
/// backend under the raw digest. The store owns its backend and holds no
/// other mutable state, so it is as thread-safe as the backend is.
pub struct ObjectStore {
    backend: Box<dyn Storage>,
    config: StoreConfig,
}

impl ObjectStore {
    /// Create a store over the given backend with the default configuration.
    pub fn new(backend: impl Storage + 'static) -> Self {
        Self::with_config(backend, StoreConfig::default())
    }

    /// Create a store over the given backend.
    pub fn with_config(backend: impl Storage + 'static, config: StoreConfig) -> Self {
        Self {
            backend: Box::new(backend),
            config,
        }
    }

    /// The underlying backend.
    pub fn backend(&self) -> &dyn Storage {
        self.backend.as_ref()
    }

    /// The configuration this store was created with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Serialize, hash and persist a record, returning its id.
    ///
    /// The backend write is unconditional: identical content always maps to
    /// the same key and value, so writing it again is harmless.
    pub fn write_object<R: Record + ?Sized>(&self, record: &R) -> StoreResult<ObjectId> {
        let data = record.to_canonical_bytes()?;
        let id = ContentHasher::hash(&data);

        self.backend
            .put(id.as_bytes(), &data)
            .map_err(|source| StoreError::BackendWrite { id, source })?;

        debug!(id = %id.short_hex(), size = data.len(), "object written");
        Ok(id)
    }

    /// Fetch the raw serialized bytes for a hex-encoded hash.
    ///
    /// This is a low-level accessor: the bytes are returned exactly as
    /// stored, without decoding. Any valid hex is passed to the backend as
    /// the key, so a hash of the wrong length is reported as not found.
    pub fn read_raw_object(&self, hash: &str) -> StoreResult<Vec<u8>> {
        let key = decode_hash(hash)?;
        self.fetch(&key)
    }

    /// Fetch the raw serialized bytes for an object id.
    pub fn read(&self, id: &ObjectId) -> StoreResult<Vec<u8>> {
        self.fetch(id.as_bytes())
    }

    /// Check whether an object is present without fetching it.
    pub fn has_object(&self, hash: &str) -> StoreResult<bool> {
        let key = decode_hash(hash)?;
        self.backend
            .exists(&key)
            .map_err(|source| StoreError::BackendRead {
                hash: hex::encode(&key),
                source,
            })
    }

    /// Read and decode a tree object.
    pub fn read_tree(&self, hash: &str) -> StoreResult<Tree> {
        let data = self.read_raw_object(hash)?;
        Tree::from_canonical_bytes(&data).map_err(|e| StoreError::CorruptObject {
            hash: hash.to_string(),
            reason: format!("not a tree: {e}"),
        })
    }

    /// Read and decode a commit object.
    pub fn read_commit(&self, hash: &str) -> StoreResult<Commit> {
        let data = self.read_raw_object(hash)?;
        Commit::from_bytes(&data).map_err(|e| StoreError::CorruptObject {
            hash: hash.to_string(),
            reason: format!("not a commit: {e}"),
        })
    }

    fn fetch(&self, key: &[u8]) -> StoreResult<Vec<u8>> {
        let data = self.backend.get(key).map_err(|source| {
            let hash = hex::encode(key);
            if source.is_not_found() {
                StoreError::NotFound(hash)
            } else {
                StoreError::BackendRead { hash, source }
            }
        })?;

        if self.config.verify_reads {
            let computed = ContentHasher::hash(&data);
            if computed.as_bytes().as_slice() != key {
                return Err(StoreError::HashMismatch {
                    expected: hex::encode(key),
                    computed,
                });
            }
        }

        debug!(key = %hex::encode(key), size = data.len(), "object read");
        Ok(data)
    }
}

impl std::fmt::Debug for ObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectStore")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

fn decode_hash(hash: &str) -> StoreResult<Vec<u8>> {
    hex::decode(hash).map_err(|e| StoreError::Decode {
        hash: hash.to_string(),
        source: TypeError::InvalidHex(e.to_string()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StorageError, StorageResult};
    use crate::memory::InMemoryStorage;
    use crate::object::{Blob, Json};
    use serde::Serialize;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Serialize)]
    struct Sample {
        id: String,
        data: String,
    }

    fn sample(id: &str, data: &str) -> Json<Sample> {
        Json(Sample {
            id: id.into(),
            data: data.into(),
        })
    }

    fn make_store() -> ObjectStore {
        ObjectStore::new(InMemoryStorage::new())
    }

    /// Backend that fails every call with a non-NotFound error.
    struct BrokenStorage;

    impl Storage for BrokenStorage {
        fn put(&self, _key: &[u8], _value: &[u8]) -> StorageResult<()> {
            Err(StorageError::Backend("disk full".into()))
        }
        fn get(&self, _key: &[u8]) -> StorageResult<Vec<u8>> {
            Err(StorageError::Backend("io error".into()))
        }
        fn exists(&self, _key: &[u8]) -> StorageResult<bool> {
            Err(StorageError::Backend("io error".into()))
        }
    }

    /// Backend that counts puts and lets tests tamper with stored values.
    #[derive(Default)]
    struct CountingStorage {
        inner: InMemoryStorage,
        puts: Arc<AtomicUsize>,
    }

    impl Storage for CountingStorage {
        fn put(&self, key: &[u8], value: &[u8]) -> StorageResult<()> {
            self.puts.fetch_add(1, Ordering::SeqCst);
            self.inner.put(key, value)
        }
        fn get(&self, key: &[u8]) -> StorageResult<Vec<u8>> {
            self.inner.get(key)
        }
        fn exists(&self, key: &[u8]) -> StorageResult<bool> {
            self.inner.exists(key)
        }
    }

    // -----------------------------------------------------------------------
    // Writing
    // -----------------------------------------------------------------------

    #[test]
    fn write_object_hashes_and_stores_serialized_bytes() {
        let store = make_store();
        let obj = sample("test_id", "hello world");
        let serialized = obj.to_canonical_bytes().unwrap();
        let expected = ContentHasher::hash(&serialized);

        let id = store.write_object(&obj).unwrap();
        assert_eq!(id, expected);
        assert_eq!(id.to_hex().len(), 64);

        // Keyed by the raw digest, not the hex string.
        let stored = store.backend().get(expected.as_bytes()).unwrap();
        assert_eq!(stored, serialized);
        assert!(store.backend().get(expected.to_hex().as_bytes()).is_err());
    }

    #[test]
    fn equal_records_produce_equal_ids() {
        let store = make_store();
        let id1 = store.write_object(&sample("A", "same")).unwrap();
        let id2 = store.write_object(&sample("A", "same")).unwrap();
        let id3 = store.write_object(&sample("A", "different")).unwrap();
        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }

    #[test]
    fn rewriting_is_unconditional_and_harmless() {
        let puts = Arc::new(AtomicUsize::new(0));
        let backend = CountingStorage {
            inner: InMemoryStorage::new(),
            puts: Arc::clone(&puts),
        };
        let store = ObjectStore::new(backend);
        let blob = Blob::new(b"idempotent".to_vec());

        let id1 = store.write_object(&blob).unwrap();
        let id2 = store.write_object(&blob).unwrap();
        assert_eq!(id1, id2);
        assert_eq!(puts.load(Ordering::SeqCst), 2);
        assert_eq!(store.read(&id1).unwrap(), b"idempotent");
    }

    #[test]
    fn write_propagates_serialization_failure() {
        let store = make_store();
        let mut bad = std::collections::BTreeMap::new();
        bad.insert((1u8, 2u8), "tuple keys are not JSON");
        let err = store.write_object(&Json(bad)).unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn write_propagates_backend_failure() {
        let store = ObjectStore::new(BrokenStorage);
        let err = store.write_object(&Blob::new(b"x".to_vec())).unwrap_err();
        match err {
            StoreError::BackendWrite { id, source } => {
                assert_eq!(id, ContentHasher::hash(b"x"));
                assert_eq!(source, StorageError::Backend("disk full".into()));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    // -----------------------------------------------------------------------
    // Reading
    // -----------------------------------------------------------------------

    #[test]
    fn read_raw_object_returns_stored_bytes() {
        let store = make_store();
        let obj = sample("read_test", "read me");
        let id = store.write_object(&obj).unwrap();

        let data = store.read_raw_object(&id.to_hex()).unwrap();
        assert_eq!(data, obj.to_canonical_bytes().unwrap());
    }

    #[test]
    fn read_unknown_hash_is_not_found() {
        let store = make_store();
        let missing = "a".repeat(64);
        let err = store.read_raw_object(&missing).unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, StoreError::NotFound(ref hash) if *hash == missing));
    }

    #[test]
    fn read_invalid_hex_is_decode_error() {
        let store = make_store();
        let err = store.read_raw_object("zz-not-hex").unwrap_err();
        assert!(matches!(
            err,
            StoreError::Decode {
                source: TypeError::InvalidHex(_),
                ..
            }
        ));
        assert!(!err.is_not_found());
    }

    #[test]
    fn read_short_hash_is_not_found() {
        let store = make_store();
        let err = store.read_raw_object("abcd").unwrap_err();
        assert!(err.is_not_found());
        assert!(matches!(err, StoreError::NotFound(ref hash) if hash == "abcd"));
    }

    #[test]
    fn read_odd_length_hex_is_decode_error() {
        let store = make_store();
        let err = store.read_raw_object("abc").unwrap_err();
        assert!(matches!(
            err,
            StoreError::Decode {
                source: TypeError::InvalidHex(_),
                ..
            }
        ));
    }

    #[test]
    fn typed_id_parsing_stays_strict() {
        assert!(matches!(
            ObjectId::from_hex("abcd"),
            Err(TypeError::InvalidLength { .. })
        ));
    }

    #[test]
    fn read_propagates_backend_failure() {
        let store = ObjectStore::new(BrokenStorage);
        let err = store.read(&ObjectId::from_hash([9; 32])).unwrap_err();
        assert!(matches!(err, StoreError::BackendRead { .. }));
        assert!(!err.is_not_found());
    }

    #[test]
    fn has_object_reflects_backend() {
        let store = make_store();
        let id = store.write_object(&Blob::new(b"present".to_vec())).unwrap();
        assert!(store.has_object(&id.to_hex()).unwrap());
        assert!(!store.has_object(&"0".repeat(64)).unwrap());
        assert!(matches!(
            store.has_object("nope"),
            Err(StoreError::Decode { .. })
        ));
    }

    // -----------------------------------------------------------------------
    // Read verification
    // -----------------------------------------------------------------------

    #[test]
    fn verifying_store_detects_tampering() {
        let store = ObjectStore::with_config(InMemoryStorage::new(), StoreConfig::verifying());
        assert!(store.config().verify_reads);
        let id = store.write_object(&Blob::new(b"original".to_vec())).unwrap();
        assert_eq!(store.read(&id).unwrap(), b"original");

        store.backend().put(id.as_bytes(), b"tampered").unwrap();
        let err = store.read(&id).unwrap_err();
        match err {
            StoreError::HashMismatch { expected, computed } => {
                assert_eq!(expected, id.to_hex());
                assert_eq!(computed, ContentHasher::hash(b"tampered"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn default_store_returns_bytes_unverified() {
        let store = make_store();
        let id = store.write_object(&Blob::new(b"original".to_vec())).unwrap();
        store.backend().put(id.as_bytes(), b"tampered").unwrap();
        assert_eq!(store.read(&id).unwrap(), b"tampered");
    }

    // -----------------------------------------------------------------------
    // Typed readers
    // -----------------------------------------------------------------------

    #[test]
    fn read_tree_roundtrip() {
        let store = make_store();
        let blob_id = store.write_object(&Blob::new(b"content".to_vec())).unwrap();
        let mut tree = Tree::new();
        tree.insert("file.txt", blob_id);
        let tree_id = store.write_object(&tree).unwrap();

        let decoded = store.read_tree(&tree_id.to_hex()).unwrap();
        assert_eq!(decoded, tree);
        assert_eq!(decoded.get("file.txt"), Some(blob_id.to_hex().as_str()));
    }

    #[test]
    fn read_tree_rejects_non_tree_object() {
        let store = make_store();
        let id = store.write_object(&Blob::new(b"plain text".to_vec())).unwrap();
        let err = store.read_tree(&id.to_hex()).unwrap_err();
        assert!(matches!(err, StoreError::CorruptObject { ref hash, .. } if *hash == id.to_hex()));
    }

    #[test]
    fn read_commit_rejects_tree_object() {
        let store = make_store();
        let id = store.write_object(&Tree::new()).unwrap();
        let err = store.read_commit(&id.to_hex()).unwrap_err();
        assert!(matches!(err, StoreError::CorruptObject { .. }));
    }

    // -----------------------------------------------------------------------
    // Backend handles
    // -----------------------------------------------------------------------

    #[test]
    fn shared_backend_sees_store_writes() {
        let backend = Arc::new(InMemoryStorage::new());
        let store = ObjectStore::new(Arc::clone(&backend));
        let id = store.write_object(&Blob::new(b"shared".to_vec())).unwrap();

        assert_eq!(backend.len(), 1);
        assert_eq!(backend.get(id.as_bytes()).unwrap(), b"shared");
    }

    #[test]
    fn boxed_dyn_backend_is_accepted() {
        let backend: Box<dyn Storage> = Box::new(InMemoryStorage::new());
        let store = ObjectStore::new(backend);
        let id = store.write_object(&Blob::new(b"boxed".to_vec())).unwrap();
        assert_eq!(store.read(&id).unwrap(), b"boxed");
        assert!(store.has_object(&id.to_hex()).unwrap());
    }

    // -----------------------------------------------------------------------
    // Concurrency
    // -----------------------------------------------------------------------

    #[test]
    fn concurrent_writes_of_same_content_agree() {
        use std::thread;

        let store = Arc::new(make_store());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || store.write_object(&Blob::new(b"shared".to_vec())).unwrap())
            })
            .collect();

        let ids: Vec<ObjectId> = handles
            .into_iter()
            .map(|h| h.join().expect("thread should not panic"))
            .collect();
        assert!(ids.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(store.read(&ids[0]).unwrap(), b"shared");
    }

    #[test]
    fn debug_format() {
        let debug = format!("{:?}", make_store());
        assert!(debug.contains("ObjectStore"));
        assert!(debug.contains("verify_reads: false"));
    }
}
