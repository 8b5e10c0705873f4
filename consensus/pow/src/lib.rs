use bagcoin_consensus_core::{hashing, header::Header};
use bagcoin_hashes::{DoubleSha256, Hasher};
use bagcoin_math::Uint256;

/// State is an intermediate data structure with pre-computed values to speed up mining.
pub struct State {
    target: Uint256,
    // VERSION || PREV || MERKLE || TIME || BITS; without NONCE
    hasher: DoubleSha256,
}

impl State {
    #[inline]
    pub fn new(header: &Header) -> Self {
        let target = Uint256::from_compact_target_bits(header.bits);
        let hasher = hashing::header::nonce_prefix_hasher(header);

        Self { target, hasher }
    }

    #[inline]
    #[must_use]
    pub fn calculate_pow(&self, nonce: u32) -> Uint256 {
        // Hasher already contains the 76 byte header prefix; so only the NONCE is missing
        let mut hasher = self.hasher.clone();
        hasher.update(nonce.to_le_bytes());
        Uint256::from_le_bytes(hasher.finalize().as_bytes())
    }

    #[inline]
    #[must_use]
    pub fn check_pow(&self, nonce: u32) -> (bool, Uint256) {
        let pow = self.calculate_pow(nonce);
        // The pow hash must be less or equal than the claimed target.
        (pow <= self.target, pow)
    }
}
