use merkledb_types::ObjectId;
use sha2::{Digest, Sha256};

/// SHA-256 content hasher.
///
/// The digest is taken over the canonical bytes exactly as given, with no
/// prefix or domain tag, so an object's id matches `sha256sum` of its stored
/// value.
pub struct ContentHasher;

impl ContentHasher {
    /// Hash raw bytes into an object id.
    pub fn hash(data: &[u8]) -> ObjectId {
        ObjectId::from_hash(Self::raw_hash(data))
    }

    /// Verify that data produces the expected object ID.
    pub fn verify(data: &[u8], expected: &ObjectId) -> bool {
        Self::hash(data) == *expected
    }

    /// Raw 32-byte digest.
    pub fn raw_hash(data: &[u8]) -> [u8; 32] {
        let digest = Sha256::digest(data);
        let mut out = [0u8; 32];
        out.copy_from_slice(&digest);
        out
    }
}
