use chrono::{DateTime, Utc};
use merkledb_types::ObjectId;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{StoreError, StoreResult};
use crate::json::to_canonical_vec;
use crate::store::ObjectStore;
use crate::traits::Record;

/// A snapshot of a tree at a point in time, linked to its parent commits.
///
/// A commit with no parents is a root; more than one parent denotes a merge.
/// Parent order is preserved exactly as supplied.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Hash of the tree this commit snapshots.
    #[serde(rename = "tree")]
    pub tree_hash: String,
    /// Hashes of the parent commits, in caller order.
    #[serde(rename = "parents")]
    pub parent_hashes: Vec<String>,
    pub message: String,
    /// UTC creation time, encoded as an RFC 3339 string.
    pub timestamp: DateTime<Utc>,
}

impl Commit {
    /// Returns `true` for a commit with no parents.
    pub fn is_root(&self) -> bool {
        self.parent_hashes.is_empty()
    }

    /// Returns `true` for a commit with more than one parent.
    pub fn is_merge(&self) -> bool {
        self.parent_hashes.len() > 1
    }

    /// Decode a commit from its stored bytes.
    pub fn from_bytes(data: &[u8]) -> StoreResult<Self> {
        serde_json::from_slice(data).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

impl Record for Commit {
    fn to_canonical_bytes(&self) -> StoreResult<Vec<u8>> {
        to_canonical_vec(self)
    }
}

/// Build a commit stamped with the current UTC time, write it to the store
/// and return its id.
pub fn create_commit(
    store: &ObjectStore,
    tree_hash: &str,
    message: &str,
    parent_hashes: &[String],
) -> StoreResult<ObjectId> {
    let commit = Commit {
        tree_hash: tree_hash.to_string(),
        parent_hashes: parent_hashes.to_vec(),
        message: message.to_string(),
        timestamp: Utc::now(),
    };

    let id = store.write_object(&commit)?;
    info!(
        commit = %id.short_hex(),
        tree = %tree_hash,
        parents = commit.parent_hashes.len(),
        "commit created"
    );
    Ok(id)
}
