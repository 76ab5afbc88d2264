//! Content hashing for MerkleDB.
//!
//! Objects are identified by the SHA-256 digest of their canonical bytes.
//! All crypto operations wrap established libraries; no custom cryptography.

pub mod hasher;

pub use hasher::ContentHasher;
