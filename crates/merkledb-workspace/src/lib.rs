//! Staging area for MerkleDB.
//!
//! A [`Workspace`] accumulates `name -> hash` entries in memory and turns
//! them into a tree object and a commit object on demand.
//!
//! # Key Types
//!
//! - [`Workspace`] -- The in-memory staging tree bound to one object store
//! - [`WorkspaceError`] -- Failures with the name or step that caused them

pub mod error;
pub mod workspace;

pub use error::{WorkspaceError, WorkspaceResult};
pub use workspace::Workspace;
