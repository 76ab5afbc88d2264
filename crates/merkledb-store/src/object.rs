use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{StoreError, StoreResult};
use crate::json::{to_canonical_vec, write_canonical};
use crate::traits::Record;

// ---------------------------------------------------------------------------
// Blob
// ---------------------------------------------------------------------------

/// Raw content object. Its canonical bytes are the content itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blob {
    pub data: Vec<u8>,
}

impl Blob {
    /// Create a new blob from raw bytes.
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self { data: data.into() }
    }
}

impl Record for Blob {
    fn to_canonical_bytes(&self) -> StoreResult<Vec<u8>> {
        Ok(self.data.clone())
    }
}

// ---------------------------------------------------------------------------
// Json
// ---------------------------------------------------------------------------

/// Adapter that stores any serializable value as compact JSON, with the
/// same HTML-safe string escaping as trees and commits.
///
/// Struct fields are emitted in declaration order, so the output is stable
/// for structs. Values containing `HashMap`s are not canonical; use
/// `BTreeMap` for map-valued fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T: Serialize> Record for Json<T> {
    fn to_canonical_bytes(&self) -> StoreResult<Vec<u8>> {
        to_canonical_vec(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

/// A named collection of object hashes, analogous to a git tree.
///
/// Names are unique; inserting under an existing name replaces its hash.
/// The serialized form depends only on the mapping's content: entries are
/// written in byte-wise name order as a compact JSON object, e.g.
/// `{"data.csv":"<hash>","file.txt":"<hash>"}`. An empty tree is `{}`.
/// Names and hashes are escaped as in [`crate::json`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<String, String>,
}

impl Tree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry, returning the previous hash for that name.
    pub fn insert(&mut self, name: impl Into<String>, hash: impl Into<String>) -> Option<String> {
        self.entries.insert(name.into(), hash.into())
    }

    /// Look up the hash stored under a name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    /// Remove an entry, returning its hash.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.entries.remove(name)
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, hash)` pairs in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Decode a tree from its stored bytes.
    pub fn from_canonical_bytes(data: &[u8]) -> StoreResult<Self> {
        let entries: BTreeMap<String, String> =
            serde_json::from_slice(data).map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(Self { entries })
    }
}

impl Record for Tree {
    fn to_canonical_bytes(&self) -> StoreResult<Vec<u8>> {
        // `String`'s `Ord` is byte-wise, so BTreeMap iteration is already
        // the canonical order.
        let mut out = Vec::with_capacity(2 + self.entries.len() * 80);
        out.push(b'{');
        for (i, (name, hash)) in self.entries.iter().enumerate() {
            if i > 0 {
                out.push(b',');
            }
            write_canonical(&mut out, name)?;
            out.push(b':');
            write_canonical(&mut out, hash)?;
        }
        out.push(b'}');
        Ok(out)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Tree {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut tree = Tree::new();
        for (name, hash) in iter {
            tree.insert(name, hash);
        }
        tree
    }
}
