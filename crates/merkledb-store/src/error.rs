use merkledb_types::{ObjectId, TypeError};

/// Errors reported by a storage backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// The requested key is absent.
    #[error("key not found")]
    NotFound,

    /// Any other backend failure (I/O, connection, corruption).
    #[error("backend failure: {0}")]
    Backend(String),
}

impl StorageError {
    /// Returns `true` for the distinguished not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}

/// Result alias for backend operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors from object store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The record could not produce its canonical bytes.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The backend rejected a write.
    #[error("failed to store object {id}: {source}")]
    BackendWrite { id: ObjectId, source: StorageError },

    /// The backend failed while reading or checking a key.
    #[error("failed to read object {hash}: {source}")]
    BackendRead { hash: String, source: StorageError },

    /// The requested object was not found.
    #[error("object not found: {0}")]
    NotFound(String),

    /// The supplied hash string is not valid hex.
    #[error("failed to decode hash {hash:?}: {source}")]
    Decode { hash: String, source: TypeError },

    /// Content hash mismatch on read (data corruption).
    #[error("hash mismatch: expected {expected}, computed {computed}")]
    HashMismatch { expected: String, computed: ObjectId },

    /// The object bytes are not a valid tree or commit.
    #[error("corrupt object {hash}: {reason}")]
    CorruptObject { hash: String, reason: String },

    /// The store configuration could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl StoreError {
    /// Returns `true` if the error originates from an absent object.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
