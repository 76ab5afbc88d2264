//! Content-addressed object storage for MerkleDB.
//!
//! Records are serialized to canonical bytes, hashed with SHA-256 and stored
//! in a pluggable key-value backend under the raw digest. Trees map names to
//! object hashes; commits snapshot a tree together with their parent commits,
//! building an append-only history DAG.
//!
//! # Object Types
//!
//! - [`Blob`] -- raw bytes, stored unchanged
//! - [`Json`] -- any `serde::Serialize` value, stored as compact JSON
//! - [`Tree`] -- name to hash mapping with order-independent serialization
//! - [`Commit`] -- snapshot of a tree with parents, message and timestamp
//!
//! # Storage Backends
//!
//! All backends implement the [`Storage`] trait:
//!
//! - [`InMemoryStorage`] -- `HashMap`-based backend for tests and embedding
//!
//! # Design Rules
//!
//! 1. Objects are immutable once written (content-addressing guarantees this).
//! 2. Writes are unconditional: re-writing identical content is a no-op by construction.
//! 3. The [`ObjectStore`] never interprets object contents on the raw path.
//! 4. All backend errors are propagated with context, never silently ignored.

pub mod commit;
pub mod config;
pub mod error;
pub mod json;
pub mod memory;
pub mod object;
pub mod store;
pub mod traits;

// Re-export primary types at crate root for ergonomic imports.
pub use commit::{create_commit, Commit};
pub use config::StoreConfig;
pub use error::{StorageError, StorageResult, StoreError, StoreResult};
pub use memory::InMemoryStorage;
pub use object::{Blob, Json, Tree};
pub use store::ObjectStore;
pub use traits::{Record, Storage};
