//! Error types.

/// Result type with the `shangmi` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Error type.
///
/// Validation failures and integrity failures are distinct variants so that
/// a caller decrypting untrusted input can tell a malformed ciphertext from
/// one that was tampered with.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// An encoded value failed a domain check: a point not on the curve, a
    /// coordinate or scalar out of range, or a truncated encoding.
    #[error("domain validation failed: {0}")]
    Domain(&'static str),

    /// The SM3 digest recomputed during decryption did not match `C3`.
    #[error("ciphertext integrity check failed")]
    IntegrityCheckFailed,

    /// Attempted to invert the additive identity.
    #[error("inversion of zero")]
    InversionOfZero,

    /// The random number generator failed to produce output.
    #[error("randomness unavailable")]
    RandomnessUnavailable,

    /// A nonce rejection loop exceeded its iteration cap.
    #[error("nonce retries exhausted")]
    NonceRetriesExhausted,
}

impl From<rand_core::Error> for Error {
    fn from(_: rand_core::Error) -> Error {
        Error::RandomnessUnavailable
    }
}

#[cfg(feature = "dsa")]
impl From<Error> for signature::Error {
    fn from(_: Error) -> signature::Error {
        signature::Error::new()
    }
}
