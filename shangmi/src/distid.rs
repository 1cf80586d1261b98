//! Distinguished identifier support.

use crate::{EQUATION_A, EQUATION_B, Error, GENERATOR, Hash, PublicKey, Result, sm3::Sm3};

/// Identifier used when a signer does not supply one.
pub const DEFAULT_DISTID: &[u8] = b"1234567812345678";

/// Largest identifier whose bit length fits the 16-bit `ENTL` field.
#[cfg(test)]
const MAX_DISTID_LEN: usize = 8191;

/// Compute user information hash `Z` according to [draft-shen-sm2-ecdsa § 5.1.4.4].
///
/// ```text
/// ZA=H256(ENTLA || IDA || a || b || xG || yG || xA || yA)
/// ```
///
/// An empty `distid` is replaced by [`DEFAULT_DISTID`].
///
/// [draft-shen-sm2-ecdsa § 5.1.4.4]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02#section-5.1.4.4
pub fn hash_z(distid: &[u8], public_key: &PublicKey) -> Result<Hash> {
    let distid = if distid.is_empty() {
        DEFAULT_DISTID
    } else {
        distid
    };

    let entla = distid
        .len()
        .checked_mul(8)
        .and_then(|bits| u16::try_from(bits).ok())
        .ok_or(Error::Domain("distinguishing identifier too long"))?;

    let point = public_key.as_affine();

    Ok(Sm3::new()
        .chain_update(entla.to_be_bytes())
        .chain_update(distid)
        .chain_update(EQUATION_A.to_bytes())
        .chain_update(EQUATION_B.to_bytes())
        .chain_update(GENERATOR.0.to_bytes())
        .chain_update(GENERATOR.1.to_bytes())
        .chain_update(point.x().to_bytes())
        .chain_update(point.y().to_bytes())
        .finalize())
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_DISTID, MAX_DISTID_LEN, hash_z};
    use crate::{AffinePoint, Error, PublicKey};

    fn generator_key() -> PublicKey {
        PublicKey::from_affine(AffinePoint::GENERATOR).unwrap()
    }

    #[test]
    fn empty_distid_uses_default() {
        let key = generator_key();
        assert_eq!(
            hash_z(b"", &key).unwrap(),
            hash_z(DEFAULT_DISTID, &key).unwrap()
        );
        assert_ne!(
            hash_z(b"ALICE123@YAHOO.COM", &key).unwrap(),
            hash_z(DEFAULT_DISTID, &key).unwrap()
        );
    }

    #[test]
    fn distid_length_limit() {
        let key = generator_key();
        let longest = alloc::vec![b'a'; MAX_DISTID_LEN];
        assert!(hash_z(&longest, &key).is_ok());

        let too_long = alloc::vec![b'a'; MAX_DISTID_LEN + 1];
        assert_eq!(
            hash_z(&too_long, &key),
            Err(Error::Domain("distinguishing identifier too long"))
        );
    }
}
