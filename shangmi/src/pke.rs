//! SM2 Encryption Algorithm (SM2) as defined in [draft-shen-sm2-ecdsa § 5].
//!
//! ## Usage
#![cfg_attr(feature = "getrandom", doc = "```")]
#![cfg_attr(not(feature = "getrandom"), doc = "```ignore")]
//! use shangmi::pke::{DecryptingKey, Mode};
//! use shangmi::SecretKey;
//! use rand_core::OsRng;
//!
//! // Encrypting
//! let secret_key = SecretKey::try_from_rng(&mut OsRng).unwrap(); // serialize with `::to_bytes()`
//! let decrypting_key = DecryptingKey::new_with_mode(secret_key, Mode::C1C3C2);
//! let encrypting_key = decrypting_key.encrypting_key();
//! let plaintext = b"plaintext";
//! let ciphertext = encrypting_key.encrypt(&mut OsRng, plaintext).unwrap();
//!
//! // Decrypting
//! let decrypted = decrypting_key.decrypt(&ciphertext).unwrap();
//! assert_eq!(decrypted, plaintext);
//! ```
//!
//! [draft-shen-sm2-ecdsa § 5]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02#section-5

mod decrypting;
mod encrypting;

pub use self::{decrypting::DecryptingKey, encrypting::EncryptingKey};

use crate::{AffinePoint, Error, Hash, Result, sm3::Sm3};
use alloc::{borrow::Cow, vec::Vec};

/// Modes for the cipher encoding/decoding.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Mode {
    /// `C1 || C2 || C3`, the order of GM/T 0003-2012.
    #[default]
    C1C2C3,
    /// `C1 || C3 || C2`, the order of GB/T 32918-2016 used by OpenSSL and
    /// GmSSL.
    C1C3C2,
}

/// SM2 ciphertext: the ephemeral point `C1`, the masked message `C2` and the
/// digest `C3`.
///
/// `C1` is encoded as `x || y` without a SEC1 tag byte.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Cipher<'a> {
    c1: AffinePoint,
    c2: Cow<'a, [u8]>,
    c3: Hash,
}

impl<'a> Cipher<'a> {
    /// Bytes added to a message by encryption.
    pub const OVERHEAD: usize = AffinePoint::BYTE_SIZE + Sm3::OUTPUT_SIZE;

    /// Decode from slice, checking that `C1` is a point on the curve.
    pub fn from_slice(cipher: &'a [u8], mode: Mode) -> Result<Self> {
        if cipher.len() < Self::OVERHEAD {
            return Err(Error::Domain("ciphertext too short"));
        }

        // B1: get C1 from C and verify that it satisfies the curve equation
        let (c1, c) = cipher.split_at(AffinePoint::BYTE_SIZE);
        let c1 = AffinePoint::from_slice(c1)?;

        let (c2, c3_buf) = match mode {
            Mode::C1C3C2 => {
                let (c3, c2) = c.split_at(Sm3::OUTPUT_SIZE);
                (c2, c3)
            }
            Mode::C1C2C3 => c.split_at(c.len() - Sm3::OUTPUT_SIZE),
        };

        let mut c3 = Hash::default();
        c3.copy_from_slice(c3_buf);

        Ok(Self {
            c1,
            c2: Cow::Borrowed(c2),
            c3,
        })
    }

    /// Encode to Vec
    pub fn to_vec(&self, mode: Mode) -> Vec<u8> {
        let mut result = Vec::with_capacity(Self::OVERHEAD + self.c2.len());
        result.extend(self.c1.x().to_bytes());
        result.extend(self.c1.y().to_bytes());

        match mode {
            Mode::C1C2C3 => {
                result.extend(self.c2.as_ref());
                result.extend(&self.c3);
            }
            Mode::C1C3C2 => {
                result.extend(&self.c3);
                result.extend(self.c2.as_ref());
            }
        }

        result
    }

    /// Get C1
    pub fn c1(&self) -> &AffinePoint {
        &self.c1
    }

    /// Get C2
    pub fn c2(&self) -> &[u8] {
        &self.c2
    }

    /// Get C3
    pub fn c3(&self) -> &Hash {
        &self.c3
    }

    /// Detach from the buffer this cipher was parsed from.
    pub fn into_owned(self) -> Cipher<'static> {
        Cipher {
            c1: self.c1,
            c2: Cow::Owned(self.c2.into_owned()),
            c3: self.c3,
        }
    }
}

/// Key derivation function of GM/T 0003.4 § 5.4.3.
///
/// Fills `out` with `Hash(z || ct)` for a 32-bit big endian counter
/// `ct = 1, 2, ...`, truncating the last block.
pub fn kdf(z: &[u8], out: &mut [u8]) {
    for (ct, block) in (1u32..).zip(out.chunks_mut(Sm3::OUTPUT_SIZE)) {
        let ha = Sm3::new()
            .chain_update(z)
            .chain_update(ct.to_be_bytes())
            .finalize();
        block.copy_from_slice(&ha[..block.len()]);
    }
}

/// Serialize the shared point `(x2, y2)` as the KDF input `x2 || y2`.
fn shared_secret(point: &AffinePoint) -> [u8; AffinePoint::BYTE_SIZE] {
    let mut z = [0u8; AffinePoint::BYTE_SIZE];
    let (x, y) = z.split_at_mut(AffinePoint::BYTE_SIZE / 2);
    x.copy_from_slice(&point.x().to_bytes());
    y.copy_from_slice(&point.y().to_bytes());
    z
}

/// `C3 = Hash(x2 || M || y2)`
fn hash_c3(point: &AffinePoint, msg: &[u8]) -> Hash {
    Sm3::new()
        .chain_update(point.x().to_bytes())
        .chain_update(msg)
        .chain_update(point.y().to_bytes())
        .finalize()
}

#[cfg(test)]
mod tests {
    use super::{Cipher, Mode, kdf};
    use crate::{AffinePoint, Error, sm3::Sm3};
    use alloc::vec;

    #[test]
    fn kdf_blocks() {
        let z = b"shared secret";
        let mut out = [0u8; 70];
        kdf(z, &mut out);

        let first = Sm3::new().chain_update(z).chain_update(1u32.to_be_bytes()).finalize();
        let second = Sm3::new().chain_update(z).chain_update(2u32.to_be_bytes()).finalize();
        let third = Sm3::new().chain_update(z).chain_update(3u32.to_be_bytes()).finalize();
        assert_eq!(out[..32], first);
        assert_eq!(out[32..64], second);
        assert_eq!(out[64..], third[..6]);
    }

    #[test]
    fn kdf_prefix_is_stable() {
        let mut short = [0u8; 10];
        let mut long = [0u8; 100];
        kdf(b"z", &mut short);
        kdf(b"z", &mut long);
        assert_eq!(short, long[..10]);
    }

    #[test]
    fn cipher_layouts() {
        let mut bytes = AffinePoint::GENERATOR.to_bytes().unwrap().to_vec();
        bytes.extend([0xaa; 3]);
        bytes.extend([0xbb; 32]);

        let cipher = Cipher::from_slice(&bytes, Mode::C1C2C3).unwrap();
        assert_eq!(cipher.c1(), &AffinePoint::GENERATOR);
        assert_eq!(cipher.c2(), &[0xaa; 3]);
        assert_eq!(cipher.c3(), &[0xbb; 32]);
        assert_eq!(cipher.to_vec(Mode::C1C2C3), bytes);

        let reordered = cipher.to_vec(Mode::C1C3C2);
        assert_eq!(&reordered[64..96], &[0xbb; 32]);
        assert_eq!(Cipher::from_slice(&reordered, Mode::C1C3C2).unwrap(), cipher);
    }

    #[test]
    fn cipher_rejects_malformed_input() {
        let short = vec![0u8; Cipher::OVERHEAD - 1];
        assert_eq!(
            Cipher::from_slice(&short, Mode::C1C2C3),
            Err(Error::Domain("ciphertext too short"))
        );

        let mut bytes = AffinePoint::GENERATOR.to_bytes().unwrap().to_vec();
        bytes[63] ^= 1;
        bytes.extend([0u8; 32]);
        assert_eq!(
            Cipher::from_slice(&bytes, Mode::C1C2C3),
            Err(Error::Domain("point not on curve"))
        );
    }
}
