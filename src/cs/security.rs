mod bytes;
pub mod hash;
pub mod keccak;
pub mod md5;
pub mod sha3;


// Re-export the streaming contract
pub use hash::StreamingHash;

// Re-export MD5 functionality
pub use md5::{md5_digest, Md5, MD5_BLOCK_SIZE, MD5_OUTPUT_SIZE};

// Re-export the Keccak permutation
pub use keccak::{keccak_f1600, KECCAK_LANES, KECCAK_ROUNDS};

// Re-export SHA-3 / SHAKE functionality
pub use sha3::{
    sha3_224, sha3_256, sha3_384, sha3_512, shake128, shake256, Keccak, SpongeParams, XofReader,
    SHAKE_SUFFIX, SHA3_SUFFIX,
};
