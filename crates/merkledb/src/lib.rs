//! MerkleDB: a content-addressable object store with git-like history.
//!
//! Records are serialized to canonical bytes and stored under the SHA-256
//! digest of those bytes. Trees map names to hashes, commits snapshot a tree
//! together with their parents, and a [`Workspace`] stages entries and turns
//! them into tree and commit objects.
//!
//! ```
//! use std::sync::Arc;
//! use merkledb::{Blob, InMemoryStorage, ObjectStore, Workspace};
//!
//! let store = Arc::new(ObjectStore::new(InMemoryStorage::new()));
//! let mut ws = Workspace::new(Arc::clone(&store));
//! ws.add("hello.txt", &Blob::new(b"hello".to_vec())).unwrap();
//! let commit = ws.commit("first", &[]).unwrap();
//!
//! let decoded = store.read_commit(&commit.to_hex()).unwrap();
//! assert_eq!(decoded.message, "first");
//! ```

pub use merkledb_crypto::ContentHasher;
pub use merkledb_store::{
    create_commit, Blob, Commit, InMemoryStorage, Json, ObjectStore, Record, Storage,
    StorageError, StorageResult, StoreConfig, StoreError, StoreResult, Tree,
};
pub use merkledb_types::{ObjectId, TypeError};
pub use merkledb_workspace::{Workspace, WorkspaceError, WorkspaceResult};
