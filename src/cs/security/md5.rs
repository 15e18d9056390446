//! DISCLAIMER: MD5 is a legacy hash function and is cryptographically broken.
//! Collisions can be produced on commodity hardware. Use it only for
//! compatibility checksums, never for signatures, passwords, or any other
//! security-sensitive purpose. This implementation is also not constant-time.
//!
//! The hasher is streaming: [`Md5::write`] accepts input of any length and
//! [`Md5::finalize`] can be called at any point without disturbing the
//! running state.

use std::fmt;
use std::io;

use super::bytes::{load_u32_le, store_u32s_le};
use super::hash::StreamingHash;

/// The size of the MD5 digest in bytes (128 bits = 16 bytes).
pub const MD5_OUTPUT_SIZE: usize = 16;

/// MD5 consumes its input in 512-bit (64-byte) blocks.
pub const MD5_BLOCK_SIZE: usize = 64;

/// The initial chaining value (A, B, C, D) from RFC 1321.
static INIT_STATE: [u32; 4] = [0x67452301, 0xEFCDAB89, 0x98BADCFE, 0x10325476];

/// The sine table constants (K) in MD5 (32 bits).
/// K[i] = floor(2^32 * abs(sin(i+1))) for i=0..63
static K: [u32; 64] = [
    0xd76aa478, 0xe8c7b756, 0x242070db, 0xc1bdceee,
    0xf57c0faf, 0x4787c62a, 0xa8304613, 0xfd469501,
    0x698098d8, 0x8b44f7af, 0xffff5bb1, 0x895cd7be,
    0x6b901122, 0xfd987193, 0xa679438e, 0x49b40821,
    0xf61e2562, 0xc040b340, 0x265e5a51, 0xe9b6c7aa,
    0xd62f105d, 0x02441453, 0xd8a1e681, 0xe7d3fbc8,
    0x21e1cde6, 0xc33707d6, 0xf4d50d87, 0x455a14ed,
    0xa9e3e905, 0xfcefa3f8, 0x676f02d9, 0x8d2a4c8a,
    0xfffa3942, 0x8771f681, 0x6d9d6122, 0xfde5380c,
    0xa4beea44, 0x4bdecfa9, 0xf6bb4b60, 0xbebfbc70,
    0x289b7ec6, 0xeaa127fa, 0xd4ef3085, 0x04881d05,
    0xd9d4d039, 0xe6db99e5, 0x1fa27cf8, 0xc4ac5665,
    0xf4292244, 0x432aff97, 0xab9423a7, 0xfc93a039,
    0x655b59c3, 0x8f0ccc92, 0xffeff47d, 0x85845dd1,
    0x6fa87e4f, 0xfe2ce6e0, 0xa3014314, 0x4e0811a1,
    0xf7537e82, 0xbd3af235, 0x2ad7d2bb, 0xeb86d391,
];

/// The amount of left rotation performed in each MD5 step.
static S: [u32; 64] = [
    // Round 1
    7, 12, 17, 22,  7, 12, 17, 22,  7, 12, 17, 22,  7, 12, 17, 22,
    // Round 2
    5, 9, 14, 20,   5, 9, 14, 20,   5, 9, 14, 20,   5, 9, 14, 20,
    // Round 3
    4, 11, 16, 23,  4, 11, 16, 23,  4, 11, 16, 23,  4, 11, 16, 23,
    // Round 4
    6, 10, 15, 21,  6, 10, 15, 21,  6, 10, 15, 21,  6, 10, 15, 21,
];

/// A streaming MD5 context.
#[derive(Clone)]
pub struct Md5 {
    /// Chaining value (A, B, C, D).
    state: [u32; 4],
    /// Pending partial block.
    buffer: [u8; MD5_BLOCK_SIZE],
    /// Valid bytes in `buffer`, always below `MD5_BLOCK_SIZE` between calls.
    buffer_len: usize,
    /// Bytes written over the object's lifetime, mod 2^64.
    total_len: u64,
}

// Bytes past `buffer_len` are leftovers from earlier blocks and carry no state.
impl PartialEq for Md5 {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
            && self.total_len == other.total_len
            && self.buffer[..self.buffer_len] == other.buffer[..other.buffer_len]
    }
}

impl Eq for Md5 {}

impl fmt::Debug for Md5 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Md5")
            .field("state", &format_args!("{:08x?}", self.state))
            .field("total_len", &self.total_len)
            .field("pending", &&self.buffer[..self.buffer_len])
            .finish()
    }
}

impl Default for Md5 {
    fn default() -> Self {
        Self::new()
    }
}

impl Md5 {
    /// Creates a new MD5 context.
    pub fn new() -> Self {
        Self {
            state: INIT_STATE,
            buffer: [0u8; MD5_BLOCK_SIZE],
            buffer_len: 0,
            total_len: 0,
        }
    }

    /// Feeds `data` into the hash and returns `data.len()`.
    ///
    /// Whole blocks are compressed straight out of `data`; only a partial
    /// block is copied into the internal buffer.
    pub fn write(&mut self, mut data: &[u8]) -> usize {
        let accepted = data.len();
        self.total_len = self.total_len.wrapping_add(accepted as u64);

        if self.buffer_len > 0 {
            let take = (MD5_BLOCK_SIZE - self.buffer_len).min(data.len());
            self.buffer[self.buffer_len..self.buffer_len + take].copy_from_slice(&data[..take]);
            self.buffer_len += take;
            data = &data[take..];

            if self.buffer_len == MD5_BLOCK_SIZE {
                compress(&mut self.state, &self.buffer);
                self.buffer_len = 0;
            }
        }

        let mut blocks = data.chunks_exact(MD5_BLOCK_SIZE);
        for block in &mut blocks {
            compress(&mut self.state, block);
        }

        let tail = blocks.remainder();
        if !tail.is_empty() {
            self.buffer[..tail.len()].copy_from_slice(tail);
            self.buffer_len = tail.len();
        }

        accepted
    }

    /// Computes the digest of everything written so far.
    ///
    /// Padding is applied to a copy of the context, so the hasher can keep
    /// accepting input afterwards.
    pub fn finalize(&self) -> [u8; MD5_OUTPUT_SIZE] {
        let mut scratch = self.clone();

        // 0x80, up to 63 zero bytes, then the 64-bit bit length.
        let mut padding = [0u8; 1 + 63 + 8];
        padding[0] = 0x80;
        let zeros = padding_zeros(self.total_len);
        let bit_len = self.total_len.wrapping_mul(8);
        padding[1 + zeros..1 + zeros + 8].copy_from_slice(&bit_len.to_le_bytes());
        scratch.write(&padding[..1 + zeros + 8]);
        debug_assert_eq!(scratch.buffer_len, 0, "md5 padding left a partial block");

        let mut output = [0u8; MD5_OUTPUT_SIZE];
        store_u32s_le(&scratch.state, &mut output);
        output
    }

    /// Returns the context to its freshly constructed state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

/// Number of zero bytes between the `0x80` marker and the length field, chosen
/// so that `total_len + 1 + zeros + 8` is a multiple of the block size.
///
/// 2^64 is a multiple of 64, so wrapping subtraction yields the same residue as
/// exact arithmetic for every counter value.
fn padding_zeros(total_len: u64) -> usize {
    (55u64.wrapping_sub(total_len) % MD5_BLOCK_SIZE as u64) as usize
}

/// Runs the 64-step compression function over one 64-byte block.
fn compress(state: &mut [u32; 4], block: &[u8]) {
    debug_assert_eq!(block.len(), MD5_BLOCK_SIZE);

    let mut m = [0u32; 16];
    for (word, bytes) in m.iter_mut().zip(block.chunks_exact(4)) {
        *word = load_u32_le(bytes);
    }

    let [mut a, mut b, mut c, mut d] = *state;

    for step in 0..64 {
        let (f, g) = match step / 16 {
            0 => (d ^ (b & (c ^ d)), step),
            1 => (c ^ (d & (b ^ c)), (5 * step + 1) % 16),
            2 => (b ^ c ^ d, (3 * step + 5) % 16),
            _ => (c ^ (b | !d), (7 * step) % 16),
        };

        let mixed = a
            .wrapping_add(f)
            .wrapping_add(K[step])
            .wrapping_add(m[g])
            .rotate_left(S[step]);

        a = d;
        d = c;
        c = b;
        b = b.wrapping_add(mixed);
    }

    state[0] = state[0].wrapping_add(a);
    state[1] = state[1].wrapping_add(b);
    state[2] = state[2].wrapping_add(c);
    state[3] = state[3].wrapping_add(d);
}

impl StreamingHash for Md5 {
    fn write(&mut self, data: &[u8]) -> usize {
        Md5::write(self, data)
    }

    fn sum_into(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.finalize());
    }

    fn reset(&mut self) {
        Md5::reset(self);
    }

    fn size(&self) -> usize {
        MD5_OUTPUT_SIZE
    }

    fn block_size(&self) -> usize {
        MD5_BLOCK_SIZE
    }
}

impl io::Write for Md5 {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(Md5::write(self, buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Convenience function to compute an MD5 digest in a single shot.
pub fn md5_digest(data: &[u8]) -> [u8; MD5_OUTPUT_SIZE] {
    let mut hasher = Md5::new();
    hasher.write(data);
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Known test vectors from RFC 1321 and common references

    #[test]
    fn test_md5_empty() {
        // MD5("") => d41d8cd98f00b204e9800998ecf8427e
        let digest = md5_digest(b"");
        assert_eq!(hex::encode(digest), "d41d8cd98f00b204e9800998ecf8427e");
    }

    #[test]
    fn test_md5_abc() {
        let digest = md5_digest(b"abc");
        assert_eq!(hex::encode(digest), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_md5_abcd() {
        let digest = md5_digest(b"abcd");
        assert_eq!(hex::encode(digest), "e2fc714c4727ee9395f324cd2e7f331f");
    }

    #[test]
    fn test_md5_message_digest() {
        let digest = md5_digest(b"message digest");
        assert_eq!(hex::encode(digest), "f96b697d7cb7938d525a2f31aaf161d0");
    }

    #[test]
    fn test_md5_pangram() {
        let digest = md5_digest(b"The quick brown fox jumps over the lazy dog");
        assert_eq!(hex::encode(digest), "9e107d9d372bb6826bd81d3542a419d6");

        let digest = md5_digest(b"The quick brown fox jumps over the lazy dog.");
        assert_eq!(hex::encode(digest), "e4d909c290d0fb1ca068ffaddf22cbd0");
    }

    #[test]
    fn test_md5_rfc_suite() {
        let cases: [(&[u8], &str); 4] = [
            (b"a", "0cc175b9c0f1b6a831c399e269772661"),
            (b"abcdefghijklmnopqrstuvwxyz", "c3fcd3d76192e4007dfb496cca67e13b"),
            // 62 bytes: the length field no longer fits, padding spills into a second block
            (
                b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
                "d174ab98d277d9f5a5611c2c9f419d9f",
            ),
            // 80 bytes: one full block plus a partial one
            (
                b"12345678901234567890123456789012345678901234567890123456789012345678901234567890",
                "57edf4a22be3c955ac49da2e2107b67a",
            ),
        ];
        for (input, expected) in cases {
            assert_eq!(hex::encode(md5_digest(input)), expected);
        }
    }

    #[test]
    fn test_padding_length_arithmetic() {
        for len in 0..512u64 {
            let zeros = padding_zeros(len) as u64;
            assert!(zeros < 64);
            assert_eq!((len + 1 + zeros + 8) % 64, 0, "len={len}");
        }
        // The counter wraps mod 2^64; the residue must still line up.
        for len in [u64::MAX, u64::MAX - 7, u64::MAX - 63, 1 << 63] {
            let zeros = padding_zeros(len) as u128;
            assert_eq!((len as u128 + 1 + zeros + 8) % 64, 0, "len={len}");
        }
    }

    #[test]
    fn test_incremental_matches_one_shot() {
        let data: Vec<u8> = (0..300u32).map(|i| (i * 7 + 3) as u8).collect();
        let expected = md5_digest(&data);

        let mut byte_at_a_time = Md5::new();
        for b in &data {
            byte_at_a_time.write(std::slice::from_ref(b));
        }
        assert_eq!(byte_at_a_time.finalize(), expected);

        let mut uneven = Md5::new();
        uneven.write(&data[..1]);
        uneven.write(&[]);
        uneven.write(&data[1..130]);
        uneven.write(&data[130..]);
        assert_eq!(uneven.finalize(), expected);
    }

    #[test]
    fn test_block_boundaries() {
        for len in [55usize, 56, 63, 64, 65, 119, 120, 127, 128] {
            let data = vec![b'x'; len];
            let mut split = Md5::new();
            split.write(&data[..len / 2]);
            split.write(&data[len / 2..]);
            assert_eq!(split.finalize(), md5_digest(&data), "len={len}");
            assert!(split.buffer_len < MD5_BLOCK_SIZE);
        }
    }

    #[test]
    fn test_finalize_does_not_consume() {
        let mut hasher = Md5::new();
        hasher.write(b"The quick brown fox ");
        let before = hasher.clone();
        let _ = hasher.finalize();
        assert_eq!(hasher, before);

        hasher.write(b"jumps over the lazy dog");
        assert_eq!(
            hex::encode(hasher.finalize()),
            "9e107d9d372bb6826bd81d3542a419d6"
        );
    }

    #[test]
    fn test_equality_ignores_stale_buffer_bytes() {
        let data = [7u8; 65];

        let mut whole = Md5::new();
        whole.write(&data);

        // The 10-byte tail left in the buffer is overwritten only at index 0.
        let mut split = Md5::new();
        split.write(&data[..10]);
        split.write(&data[10..]);

        assert_eq!(whole.finalize(), split.finalize());
        assert_eq!(whole, split);

        let mut diverged = split.clone();
        diverged.write(b"x");
        assert_ne!(whole, diverged);
    }

    #[test]
    fn test_debug_shows_pending_bytes_only() {
        let mut hasher = Md5::new();
        hasher.write(&[0xabu8; 66]);
        let shown = format!("{hasher:?}");
        assert!(shown.contains("pending: [171, 171]"), "{shown}");
        assert!(shown.contains("total_len: 66"), "{shown}");
    }

    #[test]
    fn test_reset() {
        let mut hasher = Md5::new();
        hasher.write(b"some bytes that will be discarded");
        hasher.reset();
        assert_eq!(hasher, Md5::new());
        hasher.write(b"abc");
        assert_eq!(
            hex::encode(hasher.finalize()),
            "900150983cd24fb0d6963f7d28e17f72"
        );
    }

    #[test]
    fn test_write_reports_full_length() {
        let mut hasher = Md5::new();
        assert_eq!(hasher.write(&[]), 0);
        assert_eq!(hasher.write(&[0u8; 200]), 200);
        assert_eq!(hasher.total_len, 200);
        assert_eq!(hasher.buffer_len, 200 % MD5_BLOCK_SIZE);
    }

    #[test]
    fn test_io_write() {
        use std::io::Write;

        let mut hasher = Md5::new();
        hasher.write_all(b"message ").unwrap();
        hasher.write_all(b"digest").unwrap();
        hasher.flush().unwrap();
        assert_eq!(
            hex::encode(hasher.finalize()),
            "f96b697d7cb7938d525a2f31aaf161d0"
        );
    }
}
