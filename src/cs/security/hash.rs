//! # Streaming hash contract
//!
//! Every hash object in this crate follows the same incremental shape: feed
//! bytes with [`StreamingHash::write`], read the digest with
//! [`StreamingHash::sum`] as often as you like, and [`StreamingHash::reset`]
//! to start over. Reading a digest never disturbs the running state, so a
//! caller can take intermediate digests of a growing message.
//!
//! `Md5` and `Keccak` also implement `std::io::Write`, which makes them usable
//! as sinks for `std::io::copy`.

/// Incremental hash with non-destructive finalization.
pub trait StreamingHash {
    /// Absorbs `data` and returns the number of bytes accepted, which is always `data.len()`.
    fn write(&mut self, data: &[u8]) -> usize;

    /// Appends the digest of everything written so far to `out`.
    fn sum_into(&self, out: &mut Vec<u8>);

    /// Returns `prefix` followed by the digest. The hash object is left untouched.
    fn sum(&self, prefix: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(prefix.len() + self.size());
        out.extend_from_slice(prefix);
        self.sum_into(&mut out);
        out
    }

    /// The bare digest.
    fn digest(&self) -> Vec<u8> {
        self.sum(&[])
    }

    /// The digest as lowercase hex.
    fn hex_digest(&self) -> String {
        hex::encode(self.digest())
    }

    /// Returns the object to its just-constructed state.
    fn reset(&mut self);

    /// Digest length in bytes.
    fn size(&self) -> usize;

    /// Natural block size of the underlying transform, in bytes.
    fn block_size(&self) -> usize;
}
