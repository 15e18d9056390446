use thiserror::Error;

/// Errors raised while configuring a hash object.
///
/// Hashing itself never fails: once a hash object exists, `write`, `sum` and
/// `reset` are infallible.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The requested security strength has no standard variant in this family.
    #[error("unsupported {family} security strength: {bits} bits")]
    UnsupportedStrength { family: &'static str, bits: usize },

    /// Sponge capacity must be a non-zero multiple of 64 bits below 1600.
    #[error("invalid sponge capacity: {0} bits")]
    InvalidCapacity(usize),
}

pub type Result<T> = std::result::Result<T, Error>;
