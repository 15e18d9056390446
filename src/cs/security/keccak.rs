//! Keccak-f[1600] permutation.
//!
//! The state is 25 little-endian 64-bit lanes laid out row-major: lane
//! `x + 5 * y` holds column `x` of row `y`. This is the permutation shared by
//! every SHA-3 and SHAKE variant; the sponge on top of it lives in `sha3`.

/// Number of 64-bit lanes in the 1600-bit state.
pub const KECCAK_LANES: usize = 25;

/// Rounds of keccak-f[1600].
pub const KECCAK_ROUNDS: usize = 24;

/// Round constants for ι, one per round.
static RC: [u64; KECCAK_ROUNDS] = [
    0x0000_0000_0000_0001,
    0x0000_0000_0000_8082,
    0x8000_0000_0000_808a,
    0x8000_0000_8000_8000,
    0x0000_0000_0000_808b,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8009,
    0x0000_0000_0000_008a,
    0x0000_0000_0000_0088,
    0x0000_0000_8000_8009,
    0x0000_0000_8000_000a,
    0x0000_0000_8000_808b,
    0x8000_0000_0000_008b,
    0x8000_0000_0000_8089,
    0x8000_0000_0000_8003,
    0x8000_0000_0000_8002,
    0x8000_0000_0000_0080,
    0x0000_0000_0000_800a,
    0x8000_0000_8000_000a,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8080,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8008,
];

/// Destination lane of each step of the combined ρ/π walk starting from lane 1.
static PI_LANE: [usize; 24] = [
    10, 7, 11, 17, 18, 3, 5, 16, 8, 21, 24, 4, 15, 23, 19, 13, 12, 2, 20, 14, 22, 9, 6, 1,
];

/// Applies the 24-round keccak-f[1600] permutation to `state` in place.
pub fn keccak_f1600(state: &mut [u64; KECCAK_LANES]) {
    let mut c = [0u64; 5];

    for &rc in &RC {
        // θ
        for x in 0..5 {
            c[x] = state[x] ^ state[x + 5] ^ state[x + 10] ^ state[x + 15] ^ state[x + 20];
        }
        for x in 0..5 {
            let d = c[(x + 4) % 5] ^ c[(x + 1) % 5].rotate_left(1);
            for y in (0..KECCAK_LANES).step_by(5) {
                state[x + y] ^= d;
            }
        }

        // ρ + π: rotation offsets are the triangular numbers mod 64
        let mut carried = state[1];
        let mut t = 0u32;
        for (i, &dst) in PI_LANE.iter().enumerate() {
            t = (t + i as u32 + 1) % 64;
            let displaced = state[dst];
            state[dst] = carried.rotate_left(t);
            carried = displaced;
        }

        // χ
        for y in (0..KECCAK_LANES).step_by(5) {
            let row = [state[y], state[y + 1], state[y + 2], state[y + 3], state[y + 4]];
            for x in 0..5 {
                state[y + x] = row[x] ^ (!row[(x + 1) % 5] & row[(x + 2) % 5]);
            }
        }

        // ι
        state[0] ^= rc;
    }
}
