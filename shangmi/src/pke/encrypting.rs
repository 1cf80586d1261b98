//! SM2 public key encryption.
//!
//! ## Algorithm
//!
//! ```text
//! A1: generate a random number k in [1, n-1] with the random number generator
//! A2: compute point C1 = [k]G = (x1, y1)
//! A3: compute point S = [h]PB; h = 1 and PB is validated, so S = PB
//! A4: compute point [k]PB = (x2, y2)
//! A5: compute t = KDF(x2 || y2, klen), return to A1 if t is all zero
//! A6: compute C2 = M xor t
//! A7: compute C3 = Hash(x2 || M || y2)
//! A8: output the ciphertext C = C1 || C2 || C3
//! ```

use super::{Cipher, Mode, hash_c3, kdf, shared_secret};
use crate::{
    AffinePoint, Error, MulStrategy, ProjectivePoint, PublicKey, Result, Scalar,
};
use alloc::{borrow::Cow, vec, vec::Vec};
use rand_core::CryptoRngCore;
use zeroize::Zeroize;

/// Upper bound on A1-A5 iterations.
const MAX_ENCRYPTION_ATTEMPTS: usize = 64;

/// Represents an encryption key used for encrypting messages using elliptic curve cryptography.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EncryptingKey {
    public_key: PublicKey,
    mode: Mode,
}

impl EncryptingKey {
    /// Initialize [`EncryptingKey`] from PublicKey
    pub fn new(public_key: PublicKey) -> Self {
        Self::new_with_mode(public_key, Mode::default())
    }

    /// Initialize [`EncryptingKey`] from PublicKey and set Encryption mode
    pub fn new_with_mode(public_key: PublicKey, mode: Mode) -> Self {
        Self { public_key, mode }
    }

    /// Initialize [`EncryptingKey`] from a SEC1-encoded public key.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::new(PublicKey::from_sec1_bytes(bytes)?))
    }

    /// Initialize [`EncryptingKey`] from an affine point.
    ///
    /// Returns an [`Error`] if the given affine point is the additive identity
    /// (a.k.a. point at infinity).
    pub fn from_affine(affine: AffinePoint) -> Result<Self> {
        Ok(Self::new(PublicKey::from_affine(affine)?))
    }

    /// Borrow the inner [`AffinePoint`] for this public key.
    pub fn as_affine(&self) -> &AffinePoint {
        self.public_key.as_affine()
    }

    /// Get the [`PublicKey`] for this encrypting key.
    pub fn public_key(&self) -> PublicKey {
        self.public_key
    }

    /// Ciphertext layout produced by this key.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Convert this [`EncryptingKey`] into the uncompressed SEC1 encoding.
    pub fn to_sec1_bytes(&self) -> [u8; AffinePoint::SEC1_BYTE_SIZE] {
        self.public_key.to_sec1_bytes()
    }

    /// Encrypt `msg`, returning the ciphertext serialized in this key's
    /// [`Mode`].
    pub fn encrypt<R: CryptoRngCore + ?Sized>(&self, rng: &mut R, msg: &[u8]) -> Result<Vec<u8>> {
        Ok(self.encrypt_to_cipher(rng, msg)?.to_vec(self.mode))
    }

    /// Encrypt `msg`, returning the unserialized [`Cipher`].
    pub fn encrypt_to_cipher<R: CryptoRngCore + ?Sized>(
        &self,
        rng: &mut R,
        msg: &[u8],
    ) -> Result<Cipher<'static>> {
        let pb_point = self.public_key.to_projective();
        let mut t = vec![0u8; msg.len()];

        for attempt in 0..MAX_ENCRYPTION_ATTEMPTS {
            // A1: generate a random number k in [1, n-1] with the random number generator
            let k = Scalar::try_from_rng(rng)?;

            // A2: compute point C1 = [k]G = (x1, y1)
            let c1 = ProjectivePoint::mul_by_generator(&k).to_affine();

            // A4: compute point [k]PB = (x2, y2)
            let shared = pb_point.mul_with(&k, MulStrategy::CoZ).to_affine();
            if shared.is_identity() {
                return Err(Error::Domain("shared point is the identity"));
            }

            // A5: compute t = KDF(x2 || y2, klen)
            let mut z = shared_secret(&shared);
            kdf(&z, &mut t);
            z.zeroize();

            if !msg.is_empty() && t.iter().all(|&byte| byte == 0) {
                tracing::trace!(attempt, "SM2 KDF produced an all-zero keystream");
                continue;
            }

            // A6: compute C2 = M xor t
            let c2 = msg.iter().zip(&t).map(|(byte, mask)| byte ^ mask).collect();
            t.zeroize();

            // A7: compute C3 = Hash(x2 || M || y2)
            let c3 = hash_c3(&shared, msg);

            // A8: output the ciphertext C = C1 || C2 || C3
            return Ok(Cipher {
                c1,
                c2: Cow::Owned(c2),
                c3,
            });
        }

        Err(Error::NonceRetriesExhausted)
    }
}

impl From<PublicKey> for EncryptingKey {
    fn from(value: PublicKey) -> Self {
        Self::new(value)
    }
}
