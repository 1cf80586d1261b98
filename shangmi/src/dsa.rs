//! SM2 Digital Signature Algorithm (SM2DSA) as defined in [draft-shen-sm2-ecdsa § 5].
//!
//! ## Usage
//!
//! NOTE: requires the `dsa` crate feature enabled, and `rand_core` dependency
//! with `getrandom` feature enabled.
//!
#![cfg_attr(feature = "getrandom", doc = "```")]
#![cfg_attr(not(feature = "getrandom"), doc = "```ignore")]
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use shangmi::{
//!     dsa::{Signature, SigningKey, signature::Signer},
//!     SecretKey
//! };
//!
//! // Signing
//! let secret_key = SecretKey::random()?; // serialize with `::to_bytes()`
//! let distid = "example@rustcrypto.org"; // distinguishing identifier
//! let signing_key = SigningKey::new(distid, &secret_key)?;
//! let verifying_key_bytes = signing_key.verifying_key().to_sec1_bytes();
//! let message = b"test message";
//! let signature: Signature = signing_key.sign(message);
//!
//! // Verifying
//! use shangmi::dsa::{VerifyingKey, signature::Verifier};
//!
//! let verifying_key = VerifyingKey::from_sec1_bytes(distid, &verifying_key_bytes)?;
//! verifying_key.verify(message, &signature)?;
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! [draft-shen-sm2-ecdsa § 5]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02#section-5

pub mod hazmat;
mod signing;
mod verifying;

pub use signature;

pub use self::{signing::SigningKey, verifying::VerifyingKey};

use crate::{Scalar, U256};
use bigint::Encoding;
use core::fmt::{self, Debug};
use signature::{Error, Result, SignatureEncoding};

use alloc::vec::Vec;

/// SM2DSA signature serialized as bytes.
pub type SignatureBytes = [u8; Signature::BYTE_SIZE];

/// SM2DSA signature.
///
/// Any pair of 256-bit integers can be decoded; whether `r` and `s` lie in
/// `[1, n-1]` is checked during verification, so an out-of-range signature
/// simply fails to verify.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Signature {
    r: U256,
    s: U256,
}

impl Signature {
    /// Size of an encoded SM2DSA signature in bytes.
    pub const BYTE_SIZE: usize = 64;

    /// Parse an SM2DSA signature from a byte array.
    pub fn from_bytes(bytes: &SignatureBytes) -> Self {
        let (r_bytes, s_bytes) = bytes.split_at(Self::BYTE_SIZE / 2);
        Self {
            r: U256::from_be_slice(r_bytes),
            s: U256::from_be_slice(s_bytes),
        }
    }

    /// Parse an SM2DSA signature from a byte slice.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        SignatureBytes::try_from(bytes)
            .map(|bytes| Self::from_bytes(&bytes))
            .map_err(|_| Error::new())
    }

    /// Create a [`Signature`] from the `r` and `s` integers which comprise
    /// the signature.
    pub const fn from_uints(r: U256, s: U256) -> Self {
        Self { r, s }
    }

    /// Create a [`Signature`] from reduced scalars.
    pub fn from_scalars(r: &Scalar, s: &Scalar) -> Self {
        Self::from_uints(r.to_uint(), s.to_uint())
    }

    /// Serialize this signature as bytes.
    pub fn to_bytes(&self) -> SignatureBytes {
        let mut ret = [0; Self::BYTE_SIZE];
        let (r_bytes, s_bytes) = ret.split_at_mut(Self::BYTE_SIZE / 2);
        r_bytes.copy_from_slice(&self.r.to_be_bytes());
        s_bytes.copy_from_slice(&self.s.to_be_bytes());
        ret
    }

    /// The `r` component of this signature.
    pub fn r(&self) -> &U256 {
        &self.r
    }

    /// The `s` component of this signature.
    pub fn s(&self) -> &U256 {
        &self.s
    }

    /// Bytes for the `r` component of a signature.
    pub fn r_bytes(&self) -> [u8; 32] {
        self.r.to_be_bytes()
    }

    /// Bytes for the `s` component of a signature.
    pub fn s_bytes(&self) -> [u8; 32] {
        self.s.to_be_bytes()
    }

    /// Split the signature into its `r` and `s` scalars, returning `None`
    /// unless both lie in `[1, n-1]`.
    pub fn split_scalars(&self) -> Option<(Scalar, Scalar)> {
        let r = Scalar::from_uint(&self.r).ok()?;
        let s = Scalar::from_uint(&self.s).ok()?;

        if r.is_zero() || s.is_zero() {
            return None;
        }

        Some((r, s))
    }

    /// Convert this signature into a byte vector.
    pub fn to_vec(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }
}

impl Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shangmi::dsa::Signature(")?;

        for byte in self.to_bytes() {
            write!(f, "{:02X}", byte)?;
        }

        write!(f, ")")
    }
}

impl From<Signature> for SignatureBytes {
    fn from(signature: Signature) -> SignatureBytes {
        signature.to_bytes()
    }
}

impl From<&Signature> for SignatureBytes {
    fn from(signature: &Signature) -> SignatureBytes {
        signature.to_bytes()
    }
}

impl SignatureEncoding for Signature {
    type Repr = SignatureBytes;

    fn to_bytes(&self) -> Self::Repr {
        self.into()
    }

    fn encoded_len(&self) -> usize {
        Self::BYTE_SIZE
    }
}

impl From<SignatureBytes> for Signature {
    fn from(signature: SignatureBytes) -> Signature {
        Signature::from_bytes(&signature)
    }
}

impl From<&SignatureBytes> for Signature {
    fn from(signature: &SignatureBytes) -> Signature {
        Signature::from_bytes(signature)
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Signature> {
        Signature::from_slice(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::Signature;
    use crate::{ORDER, Scalar, U256};

    #[test]
    fn decoding_accepts_out_of_range_values() {
        let sig = Signature::from_uints(ORDER, U256::ZERO);
        let decoded = Signature::from_bytes(&sig.to_bytes());
        assert_eq!(decoded, sig);
        assert_eq!(decoded.r(), &ORDER);
        assert!(decoded.split_scalars().is_none());
    }

    #[test]
    fn split_scalars() {
        let sig = Signature::from_scalars(&Scalar::from_u64(3), &Scalar::from_u64(5));
        assert_eq!(
            sig.split_scalars(),
            Some((Scalar::from_u64(3), Scalar::from_u64(5)))
        );
        assert!(Signature::from_uints(U256::ONE, U256::ZERO).split_scalars().is_none());
    }

    #[test]
    fn from_slice_length() {
        assert!(Signature::from_slice(&[0u8; 63]).is_err());
        assert!(Signature::from_slice(&[0u8; 64]).is_ok());
    }
}
