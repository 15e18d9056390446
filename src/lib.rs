pub mod cs;
pub mod error;

pub use cs::security;
pub use cs::security::{
    md5_digest, sha3_224, sha3_256, sha3_384, sha3_512, shake128, shake256, Keccak, Md5,
    SpongeParams, StreamingHash, XofReader,
};
pub use error::{Error, Result};
