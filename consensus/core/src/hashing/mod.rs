use bagcoin_hashes::Hasher;

pub mod header;
pub mod tx;

/// Extension writes for feeding the consensus serialization into hashers.
pub(crate) trait HasherExtensions {
    /// Writes a length as a compact size integer
    fn write_len(&mut self, len: usize) -> &mut Self;

    /// Writes the length of the bytes followed by the bytes themselves
    fn write_var_bytes(&mut self, bytes: &[u8]) -> &mut Self;
}

impl<T: Hasher> HasherExtensions for T {
    #[inline(always)]
    fn write_len(&mut self, len: usize) -> &mut Self {
        match len as u64 {
            n if n < 0xfd => self.update([n as u8]),
            n if n <= 0xffff => self.update([0xfd]).update((n as u16).to_le_bytes()),
            n if n <= 0xffff_ffff => self.update([0xfe]).update((n as u32).to_le_bytes()),
            n => self.update([0xff]).update(n.to_le_bytes()),
        }
    }

    #[inline(always)]
    fn write_var_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.write_len(bytes.len()).update(bytes)
    }
}
