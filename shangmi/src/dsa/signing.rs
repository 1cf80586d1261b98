//! Support for SM2DSA signing.
//!
//! ## Algorithm
//!
//! ```text
//! A1: set M~=ZA || M
//! A2: calculate e=Hv(M~)
//! A3: pick a random number k in [1, n-1] via a random number generator
//! A4: calculate the elliptic curve point (x1, y1)=[k]G
//! A5: calculate r=(e+x1) modn, return to A3 if r=0 or r+k=n
//! A6: calculate s=((1+dA)^(-1)*(k-r*dA)) modn, return to A3 if s=0
//! A7: the digital signature of M is (r, s)
//! ```

#![allow(non_snake_case)]

use super::{Signature, VerifyingKey};
use crate::{Error, ProjectivePoint, PublicKey, Scalar, SecretKey};
use core::fmt::{self, Debug};
use signature::{
    KeypairRef, RandomizedSigner, hazmat::RandomizedPrehashSigner, rand_core::CryptoRngCore,
};
use subtle::{Choice, ConstantTimeEq};

#[cfg(feature = "getrandom")]
use signature::{Signer, hazmat::PrehashSigner, rand_core::OsRng};

/// Upper bound on A3-A6 iterations. Each iteration is rejected with
/// negligible probability, so hitting the bound indicates a broken RNG.
const MAX_SIGNING_ATTEMPTS: usize = 64;

/// SM2DSA secret key used for signing messages and producing signatures.
///
/// ## Usage
///
/// The [`signature`] crate defines the following traits which are the
/// primary API for signing:
///
/// - [`RandomizedSigner`]: sign a message with a caller-supplied RNG
/// - [`RandomizedPrehashSigner`]: sign the SM3 digest `e` of `ZA || M`
/// - `Signer` (with the `getrandom` feature): sign using the OS RNG
#[derive(Clone)]
pub struct SigningKey {
    /// Secret key.
    secret_key: SecretKey,

    /// Verifying key for this signing key.
    verifying_key: VerifyingKey,
}

impl SigningKey {
    /// Create signing key from a signer's distinguishing identifier and
    /// secret key. An empty identifier selects the default one.
    ///
    /// Signing keys are restricted to `[1, n-2]`: for `d = n-1` the factor
    /// `1 + d` in A6 has no inverse.
    pub fn new(distid: impl AsRef<[u8]>, secret_key: &SecretKey) -> crate::Result<Self> {
        if (Scalar::ONE + *secret_key.as_scalar()).is_zero() {
            return Err(Error::Domain("signing key must be in [1, n-2]"));
        }

        let verifying_key = VerifyingKey::new(distid, secret_key.public_key())?;
        Ok(Self {
            secret_key: secret_key.clone(),
            verifying_key,
        })
    }

    /// Parse signing key from big endian-encoded bytes.
    pub fn from_bytes(distid: impl AsRef<[u8]>, bytes: &[u8; 32]) -> crate::Result<Self> {
        Self::new(distid, &SecretKey::from_bytes(bytes)?)
    }

    /// Parse signing key from big endian-encoded byte slice containing a secret
    /// scalar value.
    pub fn from_slice(distid: impl AsRef<[u8]>, slice: &[u8]) -> crate::Result<Self> {
        Self::new(distid, &SecretKey::from_slice(slice)?)
    }

    /// Serialize as bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.secret_key.to_bytes()
    }

    /// Borrow the [`SecretKey`] for this signing key.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is key material.
    ///
    /// Please treat it with the care it deserves!
    pub fn as_secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    /// Get the [`VerifyingKey`] which corresponds to this [`SigningKey`].
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Get the distinguishing identifier for this key.
    pub fn distid(&self) -> &[u8] {
        self.verifying_key.distid()
    }

    /// Sign `msg`, drawing nonces from `rng`.
    pub fn sign_with<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        msg: &[u8],
    ) -> crate::Result<Signature> {
        // A1: set M~=ZA || M
        // A2: calculate e=Hv(M~)
        let hash = self.verifying_key.hash_msg(msg);
        sign_prehash(self.secret_key.as_scalar(), &hash, rng)
    }
}

//
// `*Signer` trait impls
//

impl RandomizedPrehashSigner<Signature> for SigningKey {
    fn sign_prehash_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        prehash: &[u8],
    ) -> signature::Result<Signature> {
        Ok(sign_prehash(self.secret_key.as_scalar(), prehash, rng)?)
    }
}

impl RandomizedSigner<Signature> for SigningKey {
    fn try_sign_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        msg: &[u8],
    ) -> signature::Result<Signature> {
        Ok(self.sign_with(rng, msg)?)
    }
}

#[cfg(feature = "getrandom")]
impl PrehashSigner<Signature> for SigningKey {
    fn sign_prehash(&self, prehash: &[u8]) -> signature::Result<Signature> {
        self.sign_prehash_with_rng(&mut OsRng, prehash)
    }
}

#[cfg(feature = "getrandom")]
impl Signer<Signature> for SigningKey {
    fn try_sign(&self, msg: &[u8]) -> signature::Result<Signature> {
        self.try_sign_with_rng(&mut OsRng, msg)
    }
}

//
// Other trait impls
//

impl AsRef<VerifyingKey> for SigningKey {
    fn as_ref(&self) -> &VerifyingKey {
        &self.verifying_key
    }
}

impl ConstantTimeEq for SigningKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.secret_key.ct_eq(&other.secret_key)
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

/// Constant-time comparison
impl Eq for SigningKey {}
impl PartialEq for SigningKey {
    fn eq(&self, other: &SigningKey) -> bool {
        self.ct_eq(other).into()
    }
}

impl KeypairRef for SigningKey {
    type VerifyingKey = VerifyingKey;
}

impl From<&SigningKey> for PublicKey {
    fn from(signing_key: &SigningKey) -> PublicKey {
        signing_key.verifying_key.public_key()
    }
}

/// Interpret a 32-byte digest as the integer `e` reduced modulo `n`.
pub(super) fn prehash_to_scalar(prehash: &[u8]) -> crate::Result<Scalar> {
    let bytes = <[u8; 32]>::try_from(prehash)
        .map_err(|_| Error::Domain("prehash must be 32 bytes"))?;
    Ok(Scalar::reduce_bytes(&bytes))
}

/// Sign the digest `e`, drawing fresh nonces until A5 and A6 accept one.
fn sign_prehash<R: CryptoRngCore + ?Sized>(
    secret_scalar: &Scalar,
    prehash: &[u8],
    rng: &mut R,
) -> crate::Result<Signature> {
    let e = prehash_to_scalar(prehash)?;

    for attempt in 0..MAX_SIGNING_ATTEMPTS {
        // A3: pick a random number k in [1, n-1] via a random number generator
        let k = Scalar::try_from_rng(rng)?;

        match sign_with_k(secret_scalar, &e, &k)? {
            Some(signature) => return Ok(signature),
            None => tracing::trace!(attempt, "SM2 nonce rejected"),
        }
    }

    Err(Error::NonceRetriesExhausted)
}

/// Steps A4-A7 for a given nonce `k`.
///
/// Returns `Ok(None)` when the nonce must be discarded.
pub(super) fn sign_with_k(
    secret_scalar: &Scalar,
    e: &Scalar,
    k: &Scalar,
) -> crate::Result<Option<Signature>> {
    // A4: calculate the elliptic curve point (x1, y1)=[k]G
    let R = ProjectivePoint::mul_by_generator(k).to_affine();

    // A5: calculate r=(e+x1) modn, return to A3 if r=0 or r+k=n
    let r = *e + Scalar::reduce(&R.x().to_uint());
    if r.is_zero() || (r + *k).is_zero() {
        return Ok(None);
    }

    // A6: calculate s=((1+dA)^(-1)*(k-r*dA)) modn, return to A3 if s=0
    let d_plus_1_inv = (*secret_scalar + Scalar::ONE).invert()?;
    let s = d_plus_1_inv * (*k - r * *secret_scalar);
    if s.is_zero() {
        return Ok(None);
    }

    // A7: the digital signature of M is (r, s)
    Ok(Some(Signature::from_scalars(&r, &s)))
}
