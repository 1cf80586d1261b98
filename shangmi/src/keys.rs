//! SM2 key pairs.

use crate::{AffinePoint, Error, ProjectivePoint, Result, Scalar};
use core::fmt::{self, Debug};
use rand_core::CryptoRngCore;
use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// SM2 secret key: a scalar `d` in `[1, n-1]`.
///
/// The scalar is zeroized when the key is dropped and is never printed by
/// the [`Debug`] impl.
#[derive(Clone)]
pub struct SecretKey {
    scalar: Scalar,
}

impl SecretKey {
    /// Size of a serialized secret key in bytes.
    pub const BYTE_SIZE: usize = 32;

    /// Generate a random secret key using the operating system's entropy
    /// source.
    #[cfg(feature = "getrandom")]
    pub fn random() -> Result<Self> {
        Self::try_from_rng(&mut rand_core::OsRng)
    }

    /// Generate a random secret key using the provided RNG.
    ///
    /// RNG failures are returned as [`Error::RandomnessUnavailable`].
    pub fn try_from_rng<R: CryptoRngCore + ?Sized>(rng: &mut R) -> Result<Self> {
        Ok(Self {
            scalar: Scalar::try_from_rng(rng)?,
        })
    }

    /// Create a secret key from a scalar, rejecting zero.
    pub fn from_scalar(scalar: Scalar) -> Result<Self> {
        if scalar.is_zero() {
            return Err(Error::Domain("secret scalar is zero"));
        }

        Ok(Self { scalar })
    }

    /// Decode a secret key from 32 big endian bytes in `[1, n-1]`.
    pub fn from_bytes(bytes: &[u8; Self::BYTE_SIZE]) -> Result<Self> {
        Self::from_scalar(Scalar::from_bytes(bytes)?)
    }

    /// Decode a secret key from a big endian byte slice.
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        Self::from_scalar(Scalar::from_slice(slice)?)
    }

    /// Serialize as 32 big endian bytes.
    pub fn to_bytes(&self) -> [u8; Self::BYTE_SIZE] {
        self.scalar.to_bytes()
    }

    /// Borrow the secret [`Scalar`] value for this key.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is key material.
    ///
    /// Please treat it with the care it deserves!
    pub fn as_scalar(&self) -> &Scalar {
        &self.scalar
    }

    /// Compute the public key `Q = [d] G`.
    pub fn public_key(&self) -> PublicKey {
        PublicKey::from_secret_scalar(&self.scalar)
    }
}

impl ConstantTimeEq for SecretKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.scalar.ct_eq(&other.scalar)
    }
}

/// Constant-time comparison
impl Eq for SecretKey {}
impl PartialEq for SecretKey {
    fn eq(&self, other: &SecretKey) -> bool {
        self.ct_eq(other).into()
    }
}

impl Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey").finish_non_exhaustive()
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.scalar.zeroize();
    }
}

impl ZeroizeOnDrop for SecretKey {}

/// SM2 public key: a curve point `Q` other than the identity.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PublicKey {
    point: AffinePoint,
}

impl PublicKey {
    /// Create a public key from an affine point.
    ///
    /// Returns an [`Error`] if the point is the additive identity.
    pub fn from_affine(point: AffinePoint) -> Result<Self> {
        if point.is_identity() {
            return Err(Error::Domain("public key is the identity"));
        }

        Ok(Self { point })
    }

    /// Decode a public key from its `x || y` encoding.
    pub fn from_bytes(bytes: &[u8; AffinePoint::BYTE_SIZE]) -> Result<Self> {
        Self::from_affine(AffinePoint::from_bytes(bytes)?)
    }

    /// Decode a public key from an `x || y` byte slice.
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        Self::from_affine(AffinePoint::from_slice(slice)?)
    }

    /// Decode a public key from the uncompressed SEC1 encoding
    /// `04 || x || y`.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_affine(AffinePoint::from_sec1_bytes(bytes)?)
    }

    /// Compute `[d] G` for a secret scalar already known to be non-zero.
    pub(crate) fn from_secret_scalar(scalar: &Scalar) -> Self {
        Self {
            point: ProjectivePoint::mul_by_generator(scalar).to_affine(),
        }
    }

    /// Borrow the inner [`AffinePoint`].
    pub fn as_affine(&self) -> &AffinePoint {
        &self.point
    }

    /// Convert to Jacobian coordinates.
    pub fn to_projective(&self) -> ProjectivePoint {
        self.point.into()
    }

    /// Serialize as `x || y`.
    pub fn to_bytes(&self) -> [u8; AffinePoint::BYTE_SIZE] {
        let mut bytes = [0u8; AffinePoint::BYTE_SIZE];
        let (x, y) = bytes.split_at_mut(AffinePoint::BYTE_SIZE / 2);
        x.copy_from_slice(&self.point.x().to_bytes());
        y.copy_from_slice(&self.point.y().to_bytes());
        bytes
    }

    /// Serialize as uncompressed SEC1 `04 || x || y`.
    pub fn to_sec1_bytes(&self) -> [u8; AffinePoint::SEC1_BYTE_SIZE] {
        let mut bytes = [0u8; AffinePoint::SEC1_BYTE_SIZE];
        bytes[0] = 0x04;
        bytes[1..].copy_from_slice(&self.to_bytes());
        bytes
    }
}

impl AsRef<AffinePoint> for PublicKey {
    fn as_ref(&self) -> &AffinePoint {
        self.as_affine()
    }
}

impl From<PublicKey> for AffinePoint {
    fn from(public_key: PublicKey) -> AffinePoint {
        public_key.point
    }
}

impl From<&PublicKey> for ProjectivePoint {
    fn from(public_key: &PublicKey) -> ProjectivePoint {
        public_key.to_projective()
    }
}

impl TryFrom<AffinePoint> for PublicKey {
    type Error = Error;

    fn try_from(point: AffinePoint) -> Result<Self> {
        Self::from_affine(point)
    }
}
