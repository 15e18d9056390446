//! Little-endian word codecs shared by the MD5 and Keccak transforms.
//!
//! Callers always pass slices of at least the word width; the block and lane
//! loops index in whole words.

#[inline(always)]
pub(crate) fn load_u32_le(src: &[u8]) -> u32 {
    u32::from_le_bytes([src[0], src[1], src[2], src[3]])
}

#[inline(always)]
pub(crate) fn load_u64_le(src: &[u8]) -> u64 {
    u64::from_le_bytes([
        src[0], src[1], src[2], src[3], src[4], src[5], src[6], src[7],
    ])
}

/// Serialize `words` into `dst` back to back, 4 bytes each.
#[inline]
pub(crate) fn store_u32s_le(words: &[u32], dst: &mut [u8]) {
    for (chunk, word) in dst.chunks_exact_mut(4).zip(words) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
}

/// Serialize `lanes` into `dst` back to back, 8 bytes each.
#[inline]
pub(crate) fn store_u64s_le(lanes: &[u64], dst: &mut [u8]) {
    for (chunk, lane) in dst.chunks_exact_mut(8).zip(lanes) {
        chunk.copy_from_slice(&lane.to_le_bytes());
    }
}
