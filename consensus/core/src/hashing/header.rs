use crate::header::Header;
use bagcoin_hashes::{DoubleSha256, Hash, Hasher};

/// Returns the header hash.
pub fn hash(header: &Header) -> Hash {
    hash_override_nonce_time(header, header.nonce, header.timestamp)
}

/// Returns the header hash with the nonce and timestamp fields replaced,
/// leaving the header itself untouched. Used when mining candidates.
pub fn hash_override_nonce_time(header: &Header, nonce: u32, timestamp: u32) -> Hash {
    let mut hasher = prefix_hasher(header, timestamp);
    hasher.update(nonce.to_le_bytes());
    hasher.finalize()
}

/// A hasher already fed with the 76 serialized bytes preceding the nonce.
/// Cloning it per attempt avoids re-hashing the prefix for every nonce.
pub fn nonce_prefix_hasher(header: &Header) -> DoubleSha256 {
    prefix_hasher(header, header.timestamp)
}

fn prefix_hasher(header: &Header, timestamp: u32) -> DoubleSha256 {
    let mut hasher = DoubleSha256::new();
    hasher
        .update(header.version.to_le_bytes())
        .update(header.prev_block)
        .update(header.merkle_root)
        .update(timestamp.to_le_bytes())
        .update(header.bits.to_le_bytes());
    hasher
}
