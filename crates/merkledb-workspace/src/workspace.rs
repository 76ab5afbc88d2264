//! The staging area between user records and the next commit.
//!
//! Records are written to the object store as soon as they are added; only
//! the `name -> hash` mapping is held in memory until commit time.

use std::sync::Arc;

use merkledb_store::{create_commit, ObjectStore, Record, StoreError, Tree};
use merkledb_types::ObjectId;
use tracing::debug;

use crate::error::{WorkspaceError, WorkspaceResult};

/// In-memory staging tree bound to one object store.
///
/// The staging tree is *not* reset after [`commit`](Workspace::commit): each
/// commit snapshots every entry staged so far, like a working tree that keeps
/// its files between commits. Call [`clear`](Workspace::clear) to start the
/// next snapshot from an empty tree.
///
/// Mutation goes through `&mut self`; to share a workspace between threads,
/// put it behind a lock.
pub struct Workspace {
    store: Arc<ObjectStore>,
    tree: Tree,
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("entries", &self.tree.len())
            .finish()
    }
}

impl Workspace {
    /// Create an empty workspace backed by the given store.
    pub fn new(store: Arc<ObjectStore>) -> Self {
        Self {
            store,
            tree: Tree::new(),
        }
    }

    /// The object store this workspace writes to.
    pub fn store(&self) -> &Arc<ObjectStore> {
        &self.store
    }

    /// The current staging tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Hash staged under a name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.tree.get(name)
    }

    /// Number of staged entries.
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    // ---------------------------------------------------------------
    // Stage operations
    // ---------------------------------------------------------------

    /// Write a record to the store and stage it under `name`.
    ///
    /// The record is persisted immediately, even if the workspace is never
    /// committed. An existing entry with the same name is replaced.
    pub fn add<R: Record + ?Sized>(&mut self, name: &str, record: &R) -> WorkspaceResult<ObjectId> {
        let id = self
            .store
            .write_object(record)
            .map_err(|source| WorkspaceError::Add {
                name: name.to_string(),
                source,
            })?;

        if let Some(previous) = self.tree.insert(name, id) {
            debug!(name, previous = %previous, "replaced staged entry");
        }
        debug!(name, id = %id.short_hex(), "staged object");
        Ok(id)
    }

    /// Stage an object that is already in the store, without rewriting it.
    pub fn stage_hash(&mut self, name: &str, id: ObjectId) -> WorkspaceResult<()> {
        if !self.store.has_object(&id.to_hex())? {
            return Err(StoreError::NotFound(id.to_hex()).into());
        }
        self.tree.insert(name, id);
        debug!(name, id = %id.short_hex(), "staged existing object");
        Ok(())
    }

    /// Unstage an entry, returning its hash. The object stays in the store.
    pub fn remove(&mut self, name: &str) -> WorkspaceResult<String> {
        self.tree
            .remove(name)
            .ok_or_else(|| WorkspaceError::NotStaged(name.to_string()))
    }

    /// Drop every staged entry.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    // ---------------------------------------------------------------
    // Tree and commit building
    // ---------------------------------------------------------------

    /// Persist the full staging tree and return its id.
    pub fn write_tree(&self) -> WorkspaceResult<ObjectId> {
        self.store
            .write_object(&self.tree)
            .map_err(WorkspaceError::WriteTree)
    }

    /// Write the staging tree, then a commit pointing at it.
    ///
    /// Every call re-serializes the complete staging tree. If the tree write
    /// fails, no commit is created; records staged earlier remain stored.
    pub fn commit(&self, message: &str, parent_hashes: &[String]) -> WorkspaceResult<ObjectId> {
        let tree_id = self.write_tree()?;
        create_commit(&self.store, &tree_id.to_hex(), message, parent_hashes)
            .map_err(WorkspaceError::Commit)
    }
}
