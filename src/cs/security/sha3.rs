//! # SHA-3 and SHAKE (FIPS 202)
//!
//! A Keccak sponge built on [`keccak_f1600`]. One [`Keccak`] type covers every
//! variant; what differs between SHA3-256 and SHAKE128 is only the
//! [`SpongeParams`] it was built with:
//!
//! | variant  | capacity (bits) | rate (bytes) | output (bytes) | suffix |
//! |----------|-----------------|--------------|----------------|--------|
//! | SHA3-224 | 448             | 144          | 28             | `0x06` |
//! | SHA3-256 | 512             | 136          | 32             | `0x06` |
//! | SHA3-384 | 768             | 104          | 48             | `0x06` |
//! | SHA3-512 | 1024            | 72           | 64             | `0x06` |
//! | SHAKE128 | 256             | 168          | caller-chosen  | `0x1f` |
//! | SHAKE256 | 512             | 136          | caller-chosen  | `0x1f` |
//!
//! ## Example
//! ```
//! use spongemd::{Keccak, StreamingHash};
//!
//! let mut hasher = Keccak::sha3_256();
//! hasher.write(b"ab");
//! hasher.write(b"c");
//! assert_eq!(
//!     hasher.hex_digest(),
//!     "3a985da74fe225b2045c172d6bd390bd855f086e3e9d525b46bfe24511431532"
//! );
//! ```

use std::fmt;
use std::io;

use super::bytes::{load_u64_le, store_u64s_le};
use super::hash::StreamingHash;
use super::keccak::{keccak_f1600, KECCAK_LANES};
use crate::error::{Error, Result};

/// Domain-separation suffix for the fixed-output SHA-3 functions.
pub const SHA3_SUFFIX: u8 = 0x06;

/// Domain-separation suffix for the SHAKE extendable-output functions.
pub const SHAKE_SUFFIX: u8 = 0x1f;

/// Width of keccak-f[1600] in bits.
const PERMUTATION_WIDTH: usize = 1600;

/// Width of keccak-f[1600] in bytes; an upper bound on every rate.
const STATE_BYTES: usize = PERMUTATION_WIDTH / 8;

/// Parameters of a sponge instance, fixed for the lifetime of a hash object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SpongeParams {
    capacity_bits: usize,
    output_len: usize,
    suffix: u8,
}

impl SpongeParams {
    pub const SHA3_224: Self = Self::fixed(224);
    pub const SHA3_256: Self = Self::fixed(256);
    pub const SHA3_384: Self = Self::fixed(384);
    pub const SHA3_512: Self = Self::fixed(512);

    /// SHA3-N: capacity `2N` bits, `N / 8` bytes of output.
    const fn fixed(bits: usize) -> Self {
        Self {
            capacity_bits: 2 * bits,
            output_len: bits / 8,
            suffix: SHA3_SUFFIX,
        }
    }

    /// SHAKE128 producing `output_len` bytes.
    pub const fn shake128(output_len: usize) -> Self {
        Self {
            capacity_bits: 256,
            output_len,
            suffix: SHAKE_SUFFIX,
        }
    }

    /// SHAKE256 producing `output_len` bytes.
    pub const fn shake256(output_len: usize) -> Self {
        Self {
            capacity_bits: 512,
            output_len,
            suffix: SHAKE_SUFFIX,
        }
    }

    /// SHA-3 parameters for a security strength of 224, 256, 384 or 512 bits.
    pub fn sha3(bits: usize) -> Result<Self> {
        match bits {
            224 | 256 | 384 | 512 => Ok(Self::fixed(bits)),
            _ => Err(Error::UnsupportedStrength {
                family: "SHA-3",
                bits,
            }),
        }
    }

    /// SHAKE parameters for a security strength of 128 or 256 bits.
    pub fn shake(bits: usize, output_len: usize) -> Result<Self> {
        match bits {
            128 => Ok(Self::shake128(output_len)),
            256 => Ok(Self::shake256(output_len)),
            _ => Err(Error::UnsupportedStrength {
                family: "SHAKE",
                bits,
            }),
        }
    }

    /// Arbitrary sponge parameters.
    ///
    /// The capacity must be a non-zero multiple of 64 bits below 1600 so that
    /// the rate is a whole, positive number of lanes.
    pub fn custom(capacity_bits: usize, output_len: usize, suffix: u8) -> Result<Self> {
        if capacity_bits == 0 || capacity_bits % 64 != 0 || capacity_bits >= PERMUTATION_WIDTH {
            return Err(Error::InvalidCapacity(capacity_bits));
        }
        log::debug!(
            "custom sponge: capacity={capacity_bits} bits, output={output_len} bytes, suffix={suffix:#04x}"
        );
        Ok(Self {
            capacity_bits,
            output_len,
            suffix,
        })
    }

    /// Bytes absorbed or squeezed per permutation call.
    pub const fn rate(&self) -> usize {
        (PERMUTATION_WIDTH - self.capacity_bits) / 8
    }

    pub const fn capacity_bits(&self) -> usize {
        self.capacity_bits
    }

    pub const fn output_len(&self) -> usize {
        self.output_len
    }

    pub const fn suffix(&self) -> u8 {
        self.suffix
    }
}

/// A streaming Keccak sponge: SHA3-224/256/384/512, SHAKE128/256, or a custom
/// parameterisation.
#[derive(Clone)]
pub struct Keccak {
    params: SpongeParams,
    rate: usize,
    lanes: [u64; KECCAK_LANES],
    /// Unabsorbed input; only the first `buffer_len` bytes are meaningful.
    buffer: [u8; STATE_BYTES],
    buffer_len: usize,
}

impl PartialEq for Keccak {
    fn eq(&self, other: &Self) -> bool {
        self.params == other.params
            && self.lanes == other.lanes
            && self.buffer[..self.buffer_len] == other.buffer[..other.buffer_len]
    }
}

impl Eq for Keccak {}

impl fmt::Debug for Keccak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keccak")
            .field("params", &self.params)
            .field("buffer_len", &self.buffer_len)
            .field("pending", &&self.buffer[..self.buffer_len])
            .finish()
    }
}

impl Keccak {
    /// Creates a sponge with the given parameters.
    pub fn with_params(params: SpongeParams) -> Self {
        Self {
            params,
            rate: params.rate(),
            lanes: [0u64; KECCAK_LANES],
            buffer: [0u8; STATE_BYTES],
            buffer_len: 0,
        }
    }

    pub fn sha3_224() -> Self {
        Self::with_params(SpongeParams::SHA3_224)
    }

    pub fn sha3_256() -> Self {
        Self::with_params(SpongeParams::SHA3_256)
    }

    pub fn sha3_384() -> Self {
        Self::with_params(SpongeParams::SHA3_384)
    }

    pub fn sha3_512() -> Self {
        Self::with_params(SpongeParams::SHA3_512)
    }

    /// SHAKE128 with `output_len` bytes of output per digest.
    pub fn shake128(output_len: usize) -> Self {
        Self::with_params(SpongeParams::shake128(output_len))
    }

    /// SHAKE256 with `output_len` bytes of output per digest.
    pub fn shake256(output_len: usize) -> Self {
        Self::with_params(SpongeParams::shake256(output_len))
    }

    /// SHA-3 selected by security strength (224, 256, 384 or 512).
    pub fn sha3(bits: usize) -> Result<Self> {
        SpongeParams::sha3(bits).map(Self::with_params)
    }

    /// SHAKE selected by security strength (128 or 256).
    pub fn shake(bits: usize, output_len: usize) -> Result<Self> {
        SpongeParams::shake(bits, output_len).map(Self::with_params)
    }

    pub fn params(&self) -> SpongeParams {
        self.params
    }

    /// Absorbs `data` and returns `data.len()`.
    pub fn write(&mut self, mut data: &[u8]) -> usize {
        let accepted = data.len();
        let rate = self.rate;

        if self.buffer_len > 0 {
            let take = (rate - self.buffer_len).min(data.len());
            self.buffer[self.buffer_len..self.buffer_len + take].copy_from_slice(&data[..take]);
            self.buffer_len += take;
            data = &data[take..];

            if self.buffer_len == rate {
                absorb_block(&mut self.lanes, &self.buffer[..rate]);
                self.buffer_len = 0;
            }
        }

        let mut blocks = data.chunks_exact(rate);
        for block in &mut blocks {
            absorb_block(&mut self.lanes, block);
        }

        let tail = blocks.remainder();
        if !tail.is_empty() {
            self.buffer[..tail.len()].copy_from_slice(tail);
            self.buffer_len = tail.len();
        }

        accepted
    }

    /// Pads a copy of the pending input and absorbs it, returning the state
    /// the squeeze phase starts from. `self` is not modified.
    fn finalize_state(&self) -> [u64; KECCAK_LANES] {
        let mut lanes = self.lanes;
        let rate = self.rate;

        let mut block = [0u8; STATE_BYTES];
        block[..self.buffer_len].copy_from_slice(&self.buffer[..self.buffer_len]);
        // The suffix and the final 0x80 share a byte when one byte is free.
        block[self.buffer_len] ^= self.params.suffix;
        block[rate - 1] |= 0x80;

        absorb_block(&mut lanes, &block[..rate]);
        lanes
    }

    /// Appends `output_len` bytes of digest to `out`.
    pub fn finalize_into(&self, out: &mut Vec<u8>) {
        let mut lanes = self.finalize_state();
        let mut block = [0u8; STATE_BYTES];
        let mut remaining = self.params.output_len;
        out.reserve(remaining);

        loop {
            store_u64s_le(&lanes, &mut block);
            let take = remaining.min(self.rate);
            out.extend_from_slice(&block[..take]);
            remaining -= take;
            if remaining == 0 {
                break;
            }
            keccak_f1600(&mut lanes);
        }
    }

    /// The digest of everything written so far.
    pub fn finalize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.params.output_len);
        self.finalize_into(&mut out);
        out
    }

    /// An unbounded output stream over the current input.
    ///
    /// Its first `output_len` bytes equal [`Keccak::finalize`]; it ignores the
    /// configured output length and keeps squeezing as long as it is read.
    pub fn xof_reader(&self) -> XofReader {
        log::trace!("xof reader: rate={} bytes", self.rate);
        XofReader::new(self.finalize_state(), self.rate)
    }

    /// Returns the sponge to its freshly constructed state, keeping its parameters.
    pub fn reset(&mut self) {
        log::trace!("reset keccak sponge: {:?}", self.params);
        *self = Self::with_params(self.params);
    }
}

/// XORs one `rate`-byte block into the leading lanes and permutes.
fn absorb_block(lanes: &mut [u64; KECCAK_LANES], block: &[u8]) {
    debug_assert_eq!(block.len() % 8, 0, "absorbed block is not whole lanes");
    for (lane, bytes) in lanes.iter_mut().zip(block.chunks_exact(8)) {
        *lane ^= load_u64_le(bytes);
    }
    keccak_f1600(lanes);
}

impl StreamingHash for Keccak {
    fn write(&mut self, data: &[u8]) -> usize {
        Keccak::write(self, data)
    }

    fn sum_into(&self, out: &mut Vec<u8>) {
        self.finalize_into(out);
    }

    fn reset(&mut self) {
        Keccak::reset(self);
    }

    fn size(&self) -> usize {
        self.params.output_len
    }

    fn block_size(&self) -> usize {
        self.rate
    }
}

impl io::Write for Keccak {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(Keccak::write(self, buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Squeeze side of a finalized sponge, yielding output on demand.
#[derive(Clone)]
pub struct XofReader {
    lanes: [u64; KECCAK_LANES],
    rate: usize,
    block: [u8; STATE_BYTES],
    pos: usize,
}

impl fmt::Debug for XofReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XofReader")
            .field("rate", &self.rate)
            .field("pos", &self.pos)
            .finish_non_exhaustive()
    }
}

impl XofReader {
    fn new(lanes: [u64; KECCAK_LANES], rate: usize) -> Self {
        let mut block = [0u8; STATE_BYTES];
        store_u64s_le(&lanes, &mut block);
        Self {
            lanes,
            rate,
            block,
            pos: 0,
        }
    }

    /// Fills `out` with the next `out.len()` output bytes.
    pub fn squeeze(&mut self, mut out: &mut [u8]) {
        while !out.is_empty() {
            if self.pos == self.rate {
                keccak_f1600(&mut self.lanes);
                store_u64s_le(&self.lanes, &mut self.block);
                self.pos = 0;
            }

            let take = (self.rate - self.pos).min(out.len());
            out[..take].copy_from_slice(&self.block[self.pos..self.pos + take]);
            self.pos += take;
            out = &mut out[take..];
        }
    }
}

impl io::Read for XofReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.squeeze(buf);
        Ok(buf.len())
    }
}

fn fixed_digest<const N: usize>(params: SpongeParams, data: &[u8]) -> [u8; N] {
    debug_assert_eq!(params.output_len, N);
    let mut hasher = Keccak::with_params(params);
    hasher.write(data);
    let mut out = [0u8; N];
    hasher.xof_reader().squeeze(&mut out);
    out
}

/// SHA3-224 of `data` in one shot.
pub fn sha3_224(data: &[u8]) -> [u8; 28] {
    fixed_digest(SpongeParams::SHA3_224, data)
}

/// SHA3-256 of `data` in one shot.
pub fn sha3_256(data: &[u8]) -> [u8; 32] {
    fixed_digest(SpongeParams::SHA3_256, data)
}

/// SHA3-384 of `data` in one shot.
pub fn sha3_384(data: &[u8]) -> [u8; 48] {
    fixed_digest(SpongeParams::SHA3_384, data)
}

/// SHA3-512 of `data` in one shot.
pub fn sha3_512(data: &[u8]) -> [u8; 64] {
    fixed_digest(SpongeParams::SHA3_512, data)
}

/// `output_len` bytes of SHAKE128 over `data`.
pub fn shake128(data: &[u8], output_len: usize) -> Vec<u8> {
    let mut hasher = Keccak::shake128(output_len);
    hasher.write(data);
    hasher.finalize()
}

/// `output_len` bytes of SHAKE256 over `data`.
pub fn shake256(data: &[u8], output_len: usize) -> Vec<u8> {
    let mut hasher = Keccak::shake256(output_len);
    hasher.write(data);
    hasher.finalize()
}
