//! Support for verifying SM2DSA signatures.
//!
//! ## Algorithm
//!
//! ```text
//! B1: verify whether r' in [1,n-1], verification failed if not
//! B2: verify whether s' in [1,n-1], verification failed if not
//! B3: set M'~=ZA || M'
//! B4: calculate e'=Hv(M'~)
//! B5: calculate t = (r' + s') modn, verification failed if t=0
//! B6: calculate the point (x1', y1')=[s']G + [t]PA
//! B7: calculate R=(e'+x1') modn, verification pass if yes, otherwise failed
//! ```

use super::{Signature, signing::prehash_to_scalar};
use crate::{AffinePoint, Hash, PublicKey, Scalar, distid::hash_z, lincomb, sm3::Sm3};
use alloc::vec::Vec;
use signature::{Error, Verifier, hazmat::PrehashVerifier};

/// SM2DSA public key used for verifying signatures are valid for a given
/// message.
///
/// ## Usage
///
/// [`VerifyingKey::is_valid`] answers with a plain `bool`. The [`signature`]
/// crate defines the following traits which map a rejection onto an opaque
/// [`signature::Error`]:
///
/// - [`Verifier`]: verify a message against a provided key and signature
/// - [`PrehashVerifier`]: verify the low-level raw output bytes of a message digest
#[derive(Clone, Debug)]
pub struct VerifyingKey {
    /// Signer's public key.
    public_key: PublicKey,

    /// Signer's user information hash `Z`.
    identity_hash: Hash,

    /// Distinguishing identifier used to compute `Z`.
    distid: Vec<u8>,
}

impl VerifyingKey {
    /// Initialize [`VerifyingKey`] from a signer's distinguishing identifier
    /// and public key. An empty identifier selects the default one.
    pub fn new(distid: impl AsRef<[u8]>, public_key: PublicKey) -> crate::Result<Self> {
        let distid = distid.as_ref();
        let identity_hash = hash_z(distid, &public_key)?;

        Ok(Self {
            identity_hash,
            public_key,
            distid: distid.into(),
        })
    }

    /// Initialize [`VerifyingKey`] from a SEC1-encoded public key.
    pub fn from_sec1_bytes(distid: impl AsRef<[u8]>, bytes: &[u8]) -> crate::Result<Self> {
        Self::new(distid, PublicKey::from_sec1_bytes(bytes)?)
    }

    /// Initialize [`VerifyingKey`] from an affine point.
    ///
    /// Returns an [`Error`](crate::Error) if the given affine point is the
    /// additive identity (a.k.a. point at infinity).
    pub fn from_affine(distid: impl AsRef<[u8]>, affine: AffinePoint) -> crate::Result<Self> {
        Self::new(distid, PublicKey::from_affine(affine)?)
    }

    /// Borrow the inner [`AffinePoint`] for this public key.
    pub fn as_affine(&self) -> &AffinePoint {
        self.public_key.as_affine()
    }

    /// Get the [`PublicKey`] for this verifying key.
    pub fn public_key(&self) -> PublicKey {
        self.public_key
    }

    /// Get the distinguishing identifier for this key, as supplied.
    pub fn distid(&self) -> &[u8] {
        &self.distid
    }

    /// User information hash `Z` bound into every signature.
    pub fn identity_hash(&self) -> &Hash {
        &self.identity_hash
    }

    /// Convert this [`VerifyingKey`] into the
    /// `Elliptic-Curve-Point-to-Octet-String` encoding described in
    /// SEC 1: Elliptic Curve Cryptography (Version 2.0) section 2.3.3
    /// (page 10).
    ///
    /// <http://www.secg.org/sec1-v2.pdf>
    pub fn to_sec1_bytes(&self) -> [u8; AffinePoint::SEC1_BYTE_SIZE] {
        self.public_key.to_sec1_bytes()
    }

    /// Compute message hash `e` according to [draft-shen-sm2-ecdsa § 5.2.1]
    ///
    /// [draft-shen-sm2-ecdsa § 5.2.1]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02#section-5.2.1
    pub fn hash_msg(&self, msg: &[u8]) -> Hash {
        Sm3::new_with_prefix(self.identity_hash)
            .chain_update(msg)
            .finalize()
    }

    /// Check `signature` over `msg`.
    ///
    /// Never fails for well-formed input: an out-of-range or forged
    /// signature yields `false`.
    pub fn is_valid(&self, msg: &[u8], signature: &Signature) -> bool {
        // B3: set M'~=ZA || M'
        // B4: calculate e'=Hv(M'~)
        let hash = self.hash_msg(msg);
        self.is_valid_prehash(&hash, signature)
    }

    /// Check `signature` against the digest `e` of `ZA || M`.
    pub fn is_valid_prehash(&self, prehash: &[u8], signature: &Signature) -> bool {
        let Ok(e) = prehash_to_scalar(prehash) else {
            tracing::debug!("SM2 signature rejected: prehash has the wrong length");
            return false;
        };

        // B1: verify whether r' in [1,n-1], verification failed if not
        // B2: verify whether s' in [1,n-1], verification failed if not
        let Some((r, s)) = signature.split_scalars() else {
            tracing::debug!("SM2 signature rejected: r or s out of range");
            return false;
        };

        // B5: calculate t = (r' + s') modn, verification failed if t=0
        let t = r + s;
        if t.is_zero() {
            tracing::debug!("SM2 signature rejected: r + s = 0 mod n");
            return false;
        }

        // B6: calculate the point (x1', y1')=[s']G + [t]PA
        let point = lincomb(&s, &t, &self.public_key.to_projective()).to_affine();
        if point.is_identity() {
            tracing::debug!("SM2 signature rejected: [s]G + [t]P is the identity");
            return false;
        }

        // B7: calculate R=(e'+x1') modn, verification pass if yes, otherwise failed
        let valid = r == e + Scalar::reduce(&point.x().to_uint());
        if !valid {
            tracing::debug!("SM2 signature rejected: r mismatch");
        }

        valid
    }
}

//
// `*Verifier` trait impls
//

impl PrehashVerifier<Signature> for VerifyingKey {
    fn verify_prehash(&self, prehash: &[u8], signature: &Signature) -> signature::Result<()> {
        if self.is_valid_prehash(prehash, signature) {
            Ok(())
        } else {
            Err(Error::new())
        }
    }
}

impl Verifier<Signature> for VerifyingKey {
    fn verify(&self, msg: &[u8], signature: &Signature) -> signature::Result<()> {
        if self.is_valid(msg, signature) {
            Ok(())
        } else {
            Err(Error::new())
        }
    }
}

//
// Other trait impls
//

impl AsRef<AffinePoint> for VerifyingKey {
    fn as_ref(&self) -> &AffinePoint {
        self.as_affine()
    }
}

impl From<VerifyingKey> for PublicKey {
    fn from(verifying_key: VerifyingKey) -> PublicKey {
        verifying_key.public_key
    }
}

impl From<&VerifyingKey> for PublicKey {
    fn from(verifying_key: &VerifyingKey) -> PublicKey {
        verifying_key.public_key
    }
}
