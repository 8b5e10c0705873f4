use bagcoin_hashes::Hash;
use serde::{Deserialize, Serialize};

/// A block header in consensus field order. The wire form is the 80-byte
/// little-endian serialization hashed by [`crate::hashing::header`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub version: i32,
    pub prev_block: Hash,
    pub merkle_root: Hash,
    /// Block time in seconds since the unix epoch
    pub timestamp: u32,
    /// Difficulty target in compact form
    pub bits: u32,
    pub nonce: u32,
}

impl Header {
    pub fn new(version: i32, prev_block: Hash, merkle_root: Hash, timestamp: u32, bits: u32, nonce: u32) -> Self {
        Self { version, prev_block, merkle_root, timestamp, bits, nonce }
    }

    /// The double SHA-256 hash of the serialized header.
    pub fn hash(&self) -> Hash {
        crate::hashing::header::hash(self)
    }
}
