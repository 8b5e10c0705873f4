use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::fmt::{self, Formatter};

/// Little-endian 256-bit unsigned integer, used for difficulty targets.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct Uint256(pub [u64; 4]);

impl Uint256 {
    pub const ZERO: Self = Uint256([0; 4]);
    pub const MIN: Self = Self::ZERO;
    pub const MAX: Self = Uint256([u64::MAX; 4]);
    pub const BITS: u32 = 256;
    pub const BYTES: usize = 32;
    pub const LIMBS: usize = 4;

    #[inline]
    pub fn from_u64(n: u64) -> Self {
        let mut ret = Self::ZERO;
        ret.0[0] = n;
        ret
    }

    #[inline]
    pub fn as_u64(self) -> u64 {
        self.0[0]
    }

    #[inline(always)]
    pub fn is_zero(self) -> bool {
        self.0.iter().all(|&a| a == 0)
    }

    /// Return the least number of bits needed to represent the number
    #[inline(always)]
    pub fn bits(&self) -> u32 {
        for (i, &word) in self.0.iter().enumerate().rev() {
            if word != 0 {
                return u64::BITS * (i as u32 + 1) - word.leading_zeros();
            }
        }
        0
    }

    #[inline]
    pub fn overflowing_shl(self, mut s: u32) -> (Self, bool) {
        let overflows = s >= Self::BITS;
        s %= Self::BITS;
        let mut ret = [0u64; Self::LIMBS];
        let left_words = (s / 64) as usize;
        let left_shifts = s % 64;

        for i in left_words..Self::LIMBS {
            ret[i] = self.0[i - left_words] << left_shifts;
        }
        if left_shifts > 0 {
            let left_over = 64 - left_shifts;
            for i in left_words + 1..Self::LIMBS {
                ret[i] |= self.0[i - 1 - left_words] >> left_over;
            }
        }
        (Self(ret), overflows)
    }

    #[inline]
    pub fn overflowing_shr(self, mut s: u32) -> (Self, bool) {
        let overflows = s >= Self::BITS;
        s %= Self::BITS;
        let mut ret = [0u64; Self::LIMBS];
        let left_words = (s / 64) as usize;
        let left_shifts = s % 64;

        for i in left_words..Self::LIMBS {
            ret[i - left_words] = self.0[i] >> left_shifts;
        }
        if left_shifts > 0 {
            let left_over = 64 - left_shifts;
            for i in left_words + 1..Self::LIMBS {
                ret[i - left_words - 1] |= self.0[i] << left_over;
            }
        }
        (Self(ret), overflows)
    }

    #[inline]
    pub fn from_le_bytes(bytes: [u8; Self::BYTES]) -> Self {
        let mut out = [0u64; Self::LIMBS];
        out.iter_mut()
            .zip(bytes.chunks_exact(8))
            .for_each(|(word, bytes)| *word = u64::from_le_bytes(bytes.try_into().unwrap()));
        Self(out)
    }

    #[inline]
    pub fn from_be_bytes(bytes: [u8; Self::BYTES]) -> Self {
        let mut out = [0u64; Self::LIMBS];
        out.iter_mut()
            .rev()
            .zip(bytes.chunks_exact(8))
            .for_each(|(word, bytes)| *word = u64::from_be_bytes(bytes.try_into().unwrap()));
        Self(out)
    }

    #[inline]
    pub fn to_le_bytes(self) -> [u8; Self::BYTES] {
        let mut out = [0u8; Self::BYTES];
        out.chunks_exact_mut(8).zip(self.0).for_each(|(bytes, word)| bytes.copy_from_slice(&word.to_le_bytes()));
        out
    }

    #[inline]
    pub fn to_be_bytes(self) -> [u8; Self::BYTES] {
        let mut out = [0u8; Self::BYTES];
        out.chunks_exact_mut(8).zip(self.0.iter().rev()).for_each(|(bytes, word)| bytes.copy_from_slice(&word.to_be_bytes()));
        out
    }

    /// Converts an up-to-64-char hex string interpreted as big endian into a Uint256
    #[inline]
    pub fn from_hex(hex: &str) -> Result<Self, faster_hex::Error> {
        if hex.len() > Self::BYTES * 2 {
            return Err(faster_hex::Error::InvalidLength(hex.len()));
        }
        let mut out = [0u8; Self::BYTES];
        let mut input = [b'0'; Self::BYTES * 2];
        let start = input.len() - hex.len();
        input[start..].copy_from_slice(hex.as_bytes());
        faster_hex::hex_decode(&input, &mut out)?;
        Ok(Self::from_be_bytes(out))
    }

    /// Decodes the compact 32-bit "bits" representation into a full target.
    ///
    /// The encoding is a base-256 floating point: the high byte is an
    /// exponent and the low three bytes a signed mantissa. A mantissa with
    /// the sign bit set does not describe a valid target and decodes to zero.
    #[inline]
    pub fn from_compact_target_bits(bits: u32) -> Self {
        let (mant, expt) = {
            let unshifted_expt = bits >> 24;
            if unshifted_expt <= 3 {
                ((bits & 0x00ff_ffff) >> (8 * (3 - unshifted_expt)), 0)
            } else {
                (bits & 0x00ff_ffff, 8 * (unshifted_expt - 3))
            }
        };
        if mant > 0x007f_ffff { Self::ZERO } else { Self::from_u64(mant as u64) << expt }
    }

    /// Encodes the target into its compact 32-bit "bits" representation.
    #[inline]
    pub fn compact_target_bits(self) -> u32 {
        let mut size = (self.bits() + 7) / 8;
        let mut compact = if size <= 3 {
            (self.as_u64() << (8 * (3 - size))) as u32
        } else {
            let bn = self >> (8 * (size - 3));
            bn.as_u64() as u32
        };
        // Normalize away a set mantissa sign bit
        if (compact & 0x0080_0000) != 0 {
            compact >>= 8;
            size += 1;
        }
        compact | (size << 24)
    }
}

impl Default for Uint256 {
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl PartialOrd for Uint256 {
    #[inline]
    fn partial_cmp(&self, other: &Uint256) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Uint256 {
    #[inline]
    fn cmp(&self, other: &Uint256) -> std::cmp::Ordering {
        // We need to manually implement ordering because we use little-endian
        // and the auto derive is a lexicographic ordering(i.e. memcmp)
        // which with numbers is equivalent to big-endian
        Iterator::cmp(self.0.iter().rev(), other.0.iter().rev())
    }
}

impl core::ops::Not for Uint256 {
    type Output = Uint256;

    #[inline]
    fn not(self) -> Uint256 {
        Uint256([!self.0[0], !self.0[1], !self.0[2], !self.0[3]])
    }
}

impl core::ops::Shl<u32> for Uint256 {
    type Output = Uint256;

    #[inline]
    #[track_caller]
    fn shl(self, shift: u32) -> Uint256 {
        let (res, overflow) = self.overflowing_shl(shift);
        debug_assert!(!overflow, "attempt to shift left with overflow");
        res
    }
}

impl core::ops::Shr<u32> for Uint256 {
    type Output = Uint256;

    #[inline]
    #[track_caller]
    fn shr(self, shift: u32) -> Uint256 {
        let (res, overflow) = self.overflowing_shr(shift);
        debug_assert!(!overflow, "attempt to shift right with overflow");
        res
    }
}

impl From<u64> for Uint256 {
    #[inline]
    fn from(x: u64) -> Self {
        Self::from_u64(x)
    }
}

impl fmt::LowerHex for Uint256 {
    #[inline]
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let mut hex = [0u8; Self::BYTES * 2];
        let bytes = self.to_be_bytes();
        faster_hex::hex_encode(&bytes, &mut hex).expect("The output is exactly twice the size of the input");
        let first_non_zero = hex.iter().position(|&x| x != b'0').unwrap_or(hex.len() - 1);
        // The string is hex encoded so must be valid UTF8.
        let str = unsafe { core::str::from_utf8_unchecked(&hex[first_non_zero..]) };
        f.pad_integral(true, "0x", str)
    }
}

impl Serialize for Uint256 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            let mut hex = [0u8; Self::BYTES * 2];
            faster_hex::hex_encode(&self.to_be_bytes(), &mut hex).expect("The output is exactly twice the size of the input");
            // The string is hex encoded so must be valid UTF8.
            serializer.serialize_str(unsafe { core::str::from_utf8_unchecked(&hex) })
        } else {
            serializer.serialize_bytes(&self.to_le_bytes())
        }
    }
}

impl<'de> Deserialize<'de> for Uint256 {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            struct HexVisitor;
            impl de::Visitor<'_> for HexVisitor {
                type Value = Uint256;

                fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
                    formatter.write_str("a big-endian hex string")
                }

                fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                    Uint256::from_hex(v).map_err(|err| E::custom(format!("invalid hex: {err:?}")))
                }
            }
            deserializer.deserialize_str(HexVisitor)
        } else {
            struct BytesVisitor;
            impl de::Visitor<'_> for BytesVisitor {
                type Value = Uint256;

                fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
                    formatter.write_str("32 little-endian bytes")
                }

                fn visit_bytes<E: de::Error>(self, v: &[u8]) -> Result<Self::Value, E> {
                    let bytes: [u8; Uint256::BYTES] =
                        v.try_into().map_err(|_| E::invalid_length(v.len(), &"32 bytes"))?;
                    Ok(Uint256::from_le_bytes(bytes))
                }
            }
            deserializer.deserialize_bytes(BytesVisitor)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_target_bits_round_trip() {
        // Encodings seen in headers of this chain family
        let tests = [0x1e0ffff0u32, 0x1e0fffff, 0x207fffff, 0x1d00ffff, 0x1b04864c];
        for bits in tests {
            let target = Uint256::from_compact_target_bits(bits);
            assert_eq!(target.compact_target_bits(), bits, "round trip failed for {bits:#010x}");
        }
    }

    #[test]
    fn test_compact_target_bits_values() {
        // 0x1e0ffff0 is 0x0ffff0 shifted 27 bytes up
        let expected = Uint256::from_u64(0x000f_fff0) << (8 * 27);
        assert_eq!(Uint256::from_compact_target_bits(0x1e0ffff0), expected);

        // Exponents of 3 and below shift the mantissa down instead
        assert_eq!(Uint256::from_compact_target_bits(0x0300_1234), Uint256::from_u64(0x1234));
        assert_eq!(Uint256::from_compact_target_bits(0x0200_1234), Uint256::from_u64(0x12));

        // A mantissa with the sign bit set is not a valid target
        assert_eq!(Uint256::from_compact_target_bits(0x1e80_0000), Uint256::ZERO);
    }

    #[test]
    fn test_pow_limit_compact_encoding() {
        assert_eq!((!Uint256::ZERO >> 20).compact_target_bits(), 0x1e0fffff);
        assert_eq!((!Uint256::ZERO >> 1).compact_target_bits(), 0x207fffff);
    }

    #[test]
    fn test_target_ordering() {
        let strict = !Uint256::ZERO >> 20;
        let trivial = !Uint256::ZERO >> 1;
        assert!(strict < trivial);
        assert!(Uint256::ZERO < strict);
        assert!(trivial < Uint256::MAX);
    }

    #[test]
    fn test_byte_round_trips() {
        let mut bytes = [0u8; 32];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = i as u8;
        }
        let le = Uint256::from_le_bytes(bytes);
        assert_eq!(le.to_le_bytes(), bytes);
        let be = Uint256::from_be_bytes(bytes);
        assert_eq!(be.to_be_bytes(), bytes);
        assert_ne!(le, be);
        let mut reversed = bytes;
        reversed.reverse();
        assert_eq!(le.to_be_bytes(), reversed);
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Uint256::from_hex("ff").unwrap(), Uint256::from_u64(0xff));
        assert_eq!(Uint256::from_hex("").unwrap(), Uint256::ZERO);
        let max = Uint256::from_hex(&"f".repeat(64)).unwrap();
        assert_eq!(max, Uint256::MAX);
        assert!(Uint256::from_hex(&"f".repeat(65)).is_err());
        assert!(Uint256::from_hex("0xff").is_err());
    }

    #[test]
    fn test_lower_hex_format() {
        assert_eq!(format!("{:x}", Uint256::from_u64(0xdeadbeef)), "deadbeef");
        assert_eq!(format!("{:#x}", Uint256::from_u64(0xff)), "0xff");
        assert_eq!(format!("{:x}", Uint256::ZERO), "0");
    }

    #[test]
    fn test_serde_json_round_trip() {
        let target = Uint256::from_compact_target_bits(0x1e0ffff0);
        let json = serde_json::to_string(&target).unwrap();
        let expected = format!("\"{}{}\"", "00000ffff0", "0".repeat(54));
        assert_eq!(json, expected);
        let back: Uint256 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, target);
    }

    #[test]
    fn test_bits() {
        assert_eq!(Uint256::ZERO.bits(), 0);
        assert_eq!(Uint256::from_u64(1).bits(), 1);
        assert_eq!(Uint256::from_u64(0xff).bits(), 8);
        assert_eq!((Uint256::from_u64(1) << 255).bits(), 256);
        assert_eq!((!Uint256::ZERO >> 20).bits(), 236);
    }
}
