use bagcoin_hashes::{DoubleSha256, Hash, Hasher, ZERO_HASH};

/// Computes the merkle root over transaction ids.
///
/// Levels are paired left to right and an odd level duplicates its last
/// entry, so a single leaf is its own root.
pub fn calc_merkle_root(hashes: impl ExactSizeIterator<Item = Hash>) -> Hash {
    let mut level: Vec<Hash> = hashes.collect();
    if level.is_empty() {
        return ZERO_HASH;
    }
    while level.len() > 1 {
        if level.len() % 2 != 0 {
            level.push(*level.last().unwrap());
        }
        level = level.chunks_exact(2).map(|pair| merkle_hash(pair[0], pair[1])).collect();
    }
    level[0]
}

/// Hashes one pairing step of the tree.
pub fn merkle_hash(left: Hash, right: Hash) -> Hash {
    let mut hasher = DoubleSha256::new();
    hasher.update(left).update(right);
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::iter;

    fn make_hash(data: &[u8]) -> Hash {
        DoubleSha256::hash(data)
    }

    #[test]
    fn test_empty_returns_zero_hash() {
        let root = calc_merkle_root(iter::empty());
        assert_eq!(root, ZERO_HASH, "Empty input should return ZERO_HASH");
    }

    #[test]
    fn test_single_entry_returns_entry() {
        let entry = make_hash(b"single_entry");
        let root = calc_merkle_root(iter::once(entry));
        assert_eq!(root, entry, "A single leaf is its own root");
    }

    #[test]
    fn test_two_entries_returns_hash_of_both() {
        let h1 = make_hash(b"entry1");
        let h2 = make_hash(b"entry2");

        let root = calc_merkle_root([h1, h2].into_iter());
        let expected = merkle_hash(h1, h2);
        assert_eq!(root, expected, "Two entries should hash directly together");
    }

    #[test]
    fn test_three_entries_duplicates_last() {
        // Level 0: h1, h2, h3, h3 (odd level repeats its tail)
        // Level 1: hash(h1,h2), hash(h3,h3)
        // Level 2: hash(hash(h1,h2), hash(h3,h3))
        let h1 = make_hash(b"h1");
        let h2 = make_hash(b"h2");
        let h3 = make_hash(b"h3");

        let root = calc_merkle_root([h1, h2, h3].into_iter());

        let left = merkle_hash(h1, h2);
        let right = merkle_hash(h3, h3);
        let expected = merkle_hash(left, right);

        assert_eq!(root, expected, "Three entries should duplicate the last leaf");
    }

    #[test]
    fn test_four_entries() {
        let h1 = make_hash(b"h1");
        let h2 = make_hash(b"h2");
        let h3 = make_hash(b"h3");
        let h4 = make_hash(b"h4");

        let root = calc_merkle_root([h1, h2, h3, h4].into_iter());

        let left = merkle_hash(h1, h2);
        let right = merkle_hash(h3, h4);
        let expected = merkle_hash(left, right);

        assert_eq!(root, expected, "Four entries should build a balanced tree");
    }

    #[test]
    fn test_order_matters() {
        let h1 = make_hash(b"h1");
        let h2 = make_hash(b"h2");

        let root1 = calc_merkle_root([h1, h2].into_iter());
        let root2 = calc_merkle_root([h2, h1].into_iter());

        assert_ne!(root1, root2, "Order of hashes should matter");
    }
}
