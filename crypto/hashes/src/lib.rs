use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use sha2::{Digest, Sha256};
use std::fmt::{self, Debug, Display, Formatter};
use std::str::{self, FromStr};

pub const HASH_SIZE: usize = 32;

pub const ZERO_HASH: Hash = Hash([0; HASH_SIZE]);

/// A 32-byte hash kept in internal (little-endian) byte order.
///
/// `Display` and `FromStr` use the byte-reversed hex form that block
/// explorers and RPC tooling show, so the stored bytes and the printed
/// string read in opposite directions.
#[derive(Eq, PartialEq, Ord, PartialOrd, Clone, Copy, Hash, Default)]
pub struct Hash([u8; HASH_SIZE]);

impl Hash {
    #[inline(always)]
    pub const fn from_bytes(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }

    #[inline(always)]
    pub const fn as_bytes(self) -> [u8; HASH_SIZE] {
        self.0
    }
}

impl Display for Hash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut reversed = self.0;
        reversed.reverse();
        let mut hex = [0u8; HASH_SIZE * 2];
        faster_hex::hex_encode(&reversed, &mut hex).expect("The output is exactly twice the size of the input");
        f.write_str(str::from_utf8(&hex).expect("hex is always valid UTF-8"))
    }
}

impl Debug for Hash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

impl FromStr for Hash {
    type Err = faster_hex::Error;

    fn from_str(hash_str: &str) -> Result<Self, Self::Err> {
        if hash_str.len() != HASH_SIZE * 2 {
            return Err(faster_hex::Error::InvalidLength(hash_str.len()));
        }
        let mut bytes = [0u8; HASH_SIZE];
        faster_hex::hex_decode(hash_str.as_bytes(), &mut bytes)?;
        bytes.reverse();
        Ok(Hash(bytes))
    }
}

impl From<[u8; HASH_SIZE]> for Hash {
    fn from(bytes: [u8; HASH_SIZE]) -> Self {
        Hash(bytes)
    }
}

impl From<Hash> for [u8; HASH_SIZE] {
    fn from(hash: Hash) -> Self {
        hash.0
    }
}

impl From<u64> for Hash {
    fn from(word: u64) -> Self {
        let mut bytes = [0u8; HASH_SIZE];
        bytes[..8].copy_from_slice(&word.to_le_bytes());
        Hash(bytes)
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for Hash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_string())
        } else {
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            struct HexVisitor;
            impl de::Visitor<'_> for HexVisitor {
                type Value = Hash;

                fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
                    formatter.write_str("a byte-reversed hex string")
                }

                fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                    Hash::from_str(v).map_err(|err| E::custom(format!("invalid hex: {err:?}")))
                }
            }
            deserializer.deserialize_str(HexVisitor)
        } else {
            struct BytesVisitor;
            impl de::Visitor<'_> for BytesVisitor {
                type Value = Hash;

                fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
                    formatter.write_str("32 bytes")
                }

                fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
                    let bytes: [u8; HASH_SIZE] = v.try_into().map_err(|_| E::invalid_length(v.len(), &"32 bytes"))?;
                    Ok(Hash(bytes))
                }
            }
            deserializer.deserialize_bytes(BytesVisitor)
        }
    }
}

/// Incremental hashing to a [`Hash`].
pub trait Hasher: Clone + Default {
    fn update<A: AsRef<[u8]>>(&mut self, data: A) -> &mut Self;
    fn finalize(self) -> Hash;
    fn reset(&mut self);

    fn hash<A: AsRef<[u8]>>(data: A) -> Hash {
        let mut hasher = Self::default();
        hasher.update(data);
        hasher.finalize()
    }
}

/// Double SHA-256, the block and transaction hash function of this chain.
#[derive(Clone)]
pub struct DoubleSha256(Sha256);

impl DoubleSha256 {
    #[inline(always)]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for DoubleSha256 {
    fn default() -> Self {
        Self(Sha256::new())
    }
}

impl Hasher for DoubleSha256 {
    #[inline(always)]
    fn update<A: AsRef<[u8]>>(&mut self, data: A) -> &mut Self {
        Digest::update(&mut self.0, data.as_ref());
        self
    }

    #[inline(always)]
    fn finalize(self) -> Hash {
        let first = self.0.finalize();
        Hash(Sha256::digest(first).into())
    }

    #[inline(always)]
    fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_basics() {
        let hash_str = "000004a98bf330ad68525390a46db5f7326b58ce2294e4bc71f9abebcca15362";
        let hash = Hash::from_str(hash_str).unwrap();
        assert_eq!(hash_str, hash.to_string());
        // The last display byte pair is the first stored byte
        assert_eq!(hash.as_bytes()[0], 0x62);
        assert_eq!(hash.as_bytes()[31], 0x00);

        let hash2 = Hash::from_str(hash_str).unwrap();
        assert_eq!(hash, hash2);
        let hash3 = Hash::from_str("000004a98bf330ad68525390a46db5f7326b58ce2294e4bc71f9abebcca15363").unwrap();
        assert_ne!(hash2, hash3);

        assert_eq!(ZERO_HASH.to_string(), "0".repeat(64));

        let odd_str = "000004a98bf330ad68525390a46db5f7326b58ce2294e4bc71f9abebcca1536";
        let short_str = "000004a98bf330ad68525390a46db5f7326b58ce2294e4bc71f9abebcca153";
        assert!(Hash::from_str(odd_str).is_err());
        assert!(Hash::from_str(short_str).is_err());
    }

    #[test]
    fn test_double_sha256() {
        // Double SHA-256 of b"hello", byte-reversed for display
        let hash = DoubleSha256::hash(b"hello");
        assert_eq!(hash.to_string(), "503d8319a48348cdc610a582f7bf754b5833df65038606eb48510790dfc99595");

        let empty = DoubleSha256::hash(b"");
        assert_eq!(empty.to_string(), "56944c5d3f98413ef45cf54545538103cc9f298e0575820ad3591376e2e0f65d");
    }

    #[test]
    fn test_incremental_update() {
        let mut hasher = DoubleSha256::new();
        hasher.update(b"he").update(b"l").update(b"lo");
        assert_eq!(hasher.finalize(), DoubleSha256::hash(b"hello"));

        let mut reset = DoubleSha256::new();
        reset.update(b"junk");
        reset.reset();
        reset.update(b"hello");
        assert_eq!(reset.finalize(), DoubleSha256::hash(b"hello"));
    }

    #[test]
    fn test_serde_json_round_trip() {
        let hash = DoubleSha256::hash(b"hello");
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, "\"503d8319a48348cdc610a582f7bf754b5833df65038606eb48510790dfc99595\"");
        let back: Hash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
    }
}
