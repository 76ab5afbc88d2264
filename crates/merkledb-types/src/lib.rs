//! Foundation types for MerkleDB.
//!
//! Every other MerkleDB crate depends on `merkledb-types`.
//!
//! # Key Types
//!
//! - [`ObjectId`] -- Content-addressed identifier (SHA-256 digest of canonical bytes)
//! - [`TypeError`] -- Parse failures for identifiers

pub mod error;
pub mod object;

pub use error::TypeError;
pub use object::ObjectId;
