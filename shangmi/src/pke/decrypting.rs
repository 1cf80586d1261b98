//! SM2 decryption.
//!
//! ## Algorithm
//!
//! ```text
//! B1: get C1 from C, verify that C1 satisfies the curve equation
//! B2: compute point S = [h]C1; h = 1 and C1 is not the identity, so S = C1
//! B3: compute [dB]C1 = (x2, y2)
//! B4: compute t = KDF(x2 || y2, klen), output "ERROR" if t is all zero
//! B5: get C2 from C and compute M' = C2 xor t
//! B6: compute u = Hash(x2 || M' || y2), output "ERROR" if u != C3
//! B7: output the plaintext M'
//! ```

use core::fmt::{self, Debug};

use super::{Cipher, Mode, encrypting::EncryptingKey, hash_c3, kdf, shared_secret};
use crate::{Error, MulStrategy, ProjectivePoint, Result, SecretKey};
use alloc::{vec, vec::Vec};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

/// Represents a decryption key used for decrypting messages using elliptic curve cryptography.
#[derive(Clone)]
pub struct DecryptingKey {
    secret_key: SecretKey,
    encrypting_key: EncryptingKey,
}

impl DecryptingKey {
    /// Creates a new `DecryptingKey` from a `SecretKey` with the default mode (`C1C2C3`).
    pub fn new(secret_key: SecretKey) -> Self {
        Self::new_with_mode(secret_key, Mode::default())
    }

    /// Creates a new `DecryptingKey` from a `SecretKey` and sets the ciphertext mode.
    pub fn new_with_mode(secret_key: SecretKey, mode: Mode) -> Self {
        let encrypting_key = EncryptingKey::new_with_mode(secret_key.public_key(), mode);
        Self {
            secret_key,
            encrypting_key,
        }
    }

    /// Parse decrypting key from big endian-encoded bytes.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self> {
        Ok(Self::new(SecretKey::from_bytes(bytes)?))
    }

    /// Parse decrypting key from big endian-encoded byte slice containing a
    /// secret scalar value.
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        Ok(Self::new(SecretKey::from_slice(slice)?))
    }

    /// Serialize as bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.secret_key.to_bytes()
    }

    /// Borrow the [`SecretKey`] for this decrypting key.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is key material.
    ///
    /// Please treat it with the care it deserves!
    pub fn as_secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    /// Get the [`EncryptingKey`] which corresponds to this [`DecryptingKey`].
    pub fn encrypting_key(&self) -> &EncryptingKey {
        &self.encrypting_key
    }

    /// Ciphertext layout expected by this key.
    pub fn mode(&self) -> Mode {
        self.encrypting_key.mode()
    }

    /// Decrypt a ciphertext serialized in this key's [`Mode`].
    pub fn decrypt(&self, ciphertext: &[u8]) -> Result<Vec<u8>> {
        let cipher = Cipher::from_slice(ciphertext, self.mode())?;
        self.decrypt_cipher(&cipher)
    }

    /// Decrypt a parsed [`Cipher`].
    ///
    /// Returns [`Error::IntegrityCheckFailed`] without any plaintext if `C3`
    /// does not match.
    pub fn decrypt_cipher(&self, cipher: &Cipher<'_>) -> Result<Vec<u8>> {
        // B3: compute [dB]C1 = (x2, y2)
        let shared = ProjectivePoint::from(cipher.c1())
            .mul_with(self.secret_key.as_scalar(), MulStrategy::CoZ)
            .to_affine();
        if shared.is_identity() {
            return Err(Error::Domain("shared point is the identity"));
        }

        // B4: compute t = KDF(x2 || y2, klen)
        let c2 = cipher.c2();
        let mut msg = vec![0u8; c2.len()];
        let mut z = shared_secret(&shared);
        kdf(&z, &mut msg);
        z.zeroize();

        if !msg.is_empty() && msg.iter().all(|&byte| byte == 0) {
            return Err(Error::Domain("derived keystream is all zero"));
        }

        // B5: get C2 from C and compute M' = C2 xor t
        for (m, c) in msg.iter_mut().zip(c2) {
            *m ^= c;
        }

        // B6: compute u = Hash(x2 || M' || y2), output "ERROR" if u != C3
        let u = hash_c3(&shared, &msg);
        if !bool::from(u.as_slice().ct_eq(cipher.c3().as_slice())) {
            msg.zeroize();
            tracing::debug!("SM2 ciphertext integrity check failed");
            return Err(Error::IntegrityCheckFailed);
        }

        // B7: output the plaintext M'
        Ok(msg)
    }
}

//
// Other trait impls
//

impl AsRef<EncryptingKey> for DecryptingKey {
    fn as_ref(&self) -> &EncryptingKey {
        &self.encrypting_key
    }
}

impl ConstantTimeEq for DecryptingKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.secret_key.ct_eq(&other.secret_key)
    }
}

impl Debug for DecryptingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecryptingKey")
            .field("encrypting_key", &self.encrypting_key())
            .finish_non_exhaustive()
    }
}

/// Constant-time comparison
impl Eq for DecryptingKey {}
impl PartialEq for DecryptingKey {
    fn eq(&self, other: &DecryptingKey) -> bool {
        self.ct_eq(other).into()
    }
}
