//! Low-level SM2DSA primitives.
//!
//! # ⚠️ Warning: Hazmat!
//!
//! YOU PROBABLY DON'T WANT TO USE THESE!
//!
//! These functions expose the nonce `k`. Reusing a nonce for two different
//! messages leaks the secret key, as [`recover_secret_from_nonce_reuse`]
//! demonstrates. They exist for test vectors and for auditing that failure
//! mode.

use super::{
    Signature,
    signing::{prehash_to_scalar, sign_with_k},
};
use crate::{Error, Result, Scalar, SecretKey};

/// Sign the 32-byte digest `e` of `ZA || M` with a caller-chosen nonce `k`.
///
/// Fails with [`Error::Domain`] when `k` is zero or is rejected by the
/// signing algorithm (`r = 0`, `r + k = n` or `s = 0`).
pub fn sign_prehash_with_k(secret_key: &SecretKey, prehash: &[u8], k: &Scalar) -> Result<Signature> {
    if k.is_zero() {
        return Err(Error::Domain("nonce is zero"));
    }

    let e = prehash_to_scalar(prehash)?;
    sign_with_k(secret_key.as_scalar(), &e, k)?.ok_or(Error::Domain("nonce rejected"))
}

/// Recover the secret key from two signatures that were produced with the
/// same nonce `k`.
///
/// From `s = (1 + d)⁻¹ (k - r d)` it follows that `k = s + (r + s) d`, so two
/// signatures sharing `k` give `d = (s₂ - s₁) / ((r₁ + s₁) - (r₂ + s₂))`.
/// The messages themselves are not needed.
pub fn recover_secret_from_nonce_reuse(first: &Signature, second: &Signature) -> Result<SecretKey> {
    let (r1, s1) = first
        .split_scalars()
        .ok_or(Error::Domain("signature out of range"))?;
    let (r2, s2) = second
        .split_scalars()
        .ok_or(Error::Domain("signature out of range"))?;

    let denominator = (r1 + s1) - (r2 + s2);
    let d = (s2 - s1) * denominator.invert()?;
    SecretKey::from_scalar(d)
}

#[cfg(test)]
mod tests {
    use super::{recover_secret_from_nonce_reuse, sign_prehash_with_k};
    use crate::{Error, Scalar, SecretKey, dsa::SigningKey, sm3::Sm3};
    use rand_core::OsRng;

    #[test]
    fn nonce_reuse_reveals_secret_key() {
        let secret_key = SecretKey::try_from_rng(&mut OsRng).unwrap();
        let signing_key = SigningKey::new("", &secret_key).unwrap();
        let k = Scalar::try_from_rng(&mut OsRng).unwrap();

        let e1 = signing_key.verifying_key().hash_msg(b"first message");
        let e2 = signing_key.verifying_key().hash_msg(b"second message");
        let sig1 = sign_prehash_with_k(&secret_key, &e1, &k).unwrap();
        let sig2 = sign_prehash_with_k(&secret_key, &e2, &k).unwrap();

        assert!(signing_key.verifying_key().is_valid(b"first message", &sig1));
        assert!(signing_key.verifying_key().is_valid(b"second message", &sig2));

        let recovered = recover_secret_from_nonce_reuse(&sig1, &sig2).unwrap();
        assert_eq!(recovered, secret_key);
    }

    #[test]
    fn same_message_same_nonce_is_not_enough() {
        let secret_key = SecretKey::try_from_rng(&mut OsRng).unwrap();
        let e = Sm3::digest(b"message");
        let k = Scalar::from_u64(42);
        let sig = sign_prehash_with_k(&secret_key, &e, &k).unwrap();

        assert_eq!(
            recover_secret_from_nonce_reuse(&sig, &sig),
            Err(Error::InversionOfZero)
        );
    }

    #[test]
    fn rejects_zero_nonce_and_bad_prehash() {
        let secret_key = SecretKey::try_from_rng(&mut OsRng).unwrap();
        assert!(sign_prehash_with_k(&secret_key, &[0u8; 32], &Scalar::ZERO).is_err());
        assert!(sign_prehash_with_k(&secret_key, &[0u8; 31], &Scalar::ONE).is_err());
    }
}
