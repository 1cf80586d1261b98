//! SM2 encryption tests.

#![cfg(feature = "pke")]

use hex_literal::hex;
use proptest::prelude::*;
use rand_core::OsRng;
use shangmi::{
    Error, Scalar, SecretKey,
    pke::{Cipher, DecryptingKey, EncryptingKey, Mode},
};

// private key bytes
const PRIVATE_KEY: [u8; 32] =
    hex!("3DDD2A3679BF6F1DFC3B49D3E99114718E48EC170EB4E4D3A82052DAB19E8B50");
const MSG: &[u8] = b"plaintext";

// C1C3C2 order, C1 carries the SEC1 `04` tag
const CIPHER: [u8; 106] = hex!("041ed68db303f5bc6bce516d5a62e1cd16781d3007df6864d970a56d46a6cecca0e0d33bfc71e78c440ae6afeef1a18cce473b3e27002189a058ddadc9182c80a3f13be66476ba6ef66d95a7fb11f30de441b3b66d566e48348bd830e584e7ec37f9b704ef32eba9055c");

fn test_key(mode: Mode) -> DecryptingKey {
    DecryptingKey::new_with_mode(SecretKey::from_bytes(&[42u8; 32]).unwrap(), mode)
}

#[test]
fn decrypt_test_vector() {
    let dk = DecryptingKey::new_with_mode(SecretKey::from_bytes(&PRIVATE_KEY).unwrap(), Mode::C1C3C2);
    assert_eq!(dk.decrypt(&CIPHER[1..]).unwrap(), MSG);

    let cipher = Cipher::from_slice(&CIPHER[1..], Mode::C1C3C2).unwrap();
    assert_eq!(cipher.c2().len(), MSG.len());

    let reordered = cipher.to_vec(Mode::C1C2C3);
    let dk = DecryptingKey::new(SecretKey::from_bytes(&PRIVATE_KEY).unwrap());
    assert_eq!(dk.decrypt(&reordered).unwrap(), MSG);
}

#[test]
fn varying_plaintext_lengths() {
    for mode in [Mode::C1C2C3, Mode::C1C3C2] {
        let dk = test_key(mode);
        let ek = dk.encrypting_key();

        for plaintext in [vec![], vec![1u8; 1], vec![2u8; 32], vec![3u8; 33], vec![4u8; 256]] {
            let ciphertext = ek.encrypt(&mut OsRng, &plaintext).unwrap();
            assert_eq!(ciphertext.len(), plaintext.len() + Cipher::OVERHEAD);
            assert_eq!(dk.decrypt(&ciphertext).unwrap(), plaintext);
        }
    }
}

#[test]
fn ciphertext_tampering() {
    let dk = test_key(Mode::C1C2C3);
    let ciphertext = dk.encrypting_key().encrypt(&mut OsRng, b"test message").unwrap();

    for i in 0..ciphertext.len() {
        let mut tampered = ciphertext.clone();
        tampered[i] ^= 1;
        let result = dk.decrypt(&tampered);

        if i < 64 {
            // C1 no longer on the curve
            assert!(matches!(result, Err(Error::Domain(_))));
        } else {
            assert_eq!(result, Err(Error::IntegrityCheckFailed));
        }
    }
}

#[test]
fn wrong_key_fails_integrity_check() {
    let ciphertext = test_key(Mode::C1C2C3)
        .encrypting_key()
        .encrypt(&mut OsRng, MSG)
        .unwrap();
    let other = DecryptingKey::new(SecretKey::try_from_rng(&mut OsRng).unwrap());
    assert_eq!(other.decrypt(&ciphertext), Err(Error::IntegrityCheckFailed));
}

#[test]
fn mode_mismatch_fails() {
    let ciphertext = test_key(Mode::C1C3C2)
        .encrypting_key()
        .encrypt(&mut OsRng, b"layout matters")
        .unwrap();
    assert!(test_key(Mode::C1C2C3).decrypt(&ciphertext).is_err());
}

#[test]
fn truncated_ciphertext() {
    let dk = test_key(Mode::C1C2C3);
    let ciphertext = dk.encrypting_key().encrypt(&mut OsRng, b"").unwrap();
    assert_eq!(ciphertext.len(), Cipher::OVERHEAD);
    assert_eq!(
        dk.decrypt(&ciphertext[..Cipher::OVERHEAD - 1]),
        Err(Error::Domain("ciphertext too short"))
    );
}

#[test]
fn encrypting_key_from_sec1() {
    let dk = test_key(Mode::C1C2C3);
    let ek = EncryptingKey::from_sec1_bytes(&dk.encrypting_key().to_sec1_bytes()).unwrap();
    assert_eq!(&ek, dk.encrypting_key());

    let ciphertext = ek.encrypt(&mut OsRng, MSG).unwrap();
    assert_eq!(dk.decrypt(&ciphertext).unwrap(), MSG);
}

prop_compose! {
    fn decrypting_key()(bytes in any::<[u8; 32]>(), c1c3c2 in any::<bool>()) -> DecryptingKey {
        let secret_key = SecretKey::from_scalar(Scalar::reduce_bytes(&bytes))
            .or_else(|_| SecretKey::from_scalar(Scalar::ONE))
            .unwrap();
        let mode = if c1c3c2 { Mode::C1C3C2 } else { Mode::C1C2C3 };
        DecryptingKey::new_with_mode(secret_key, mode)
    }
}

proptest! {
    #[test]
    fn encrypt_and_decrypt(dk in decrypting_key(), msg in proptest::collection::vec(any::<u8>(), 0..200)) {
        let ciphertext = dk.encrypting_key().encrypt(&mut OsRng, &msg).unwrap();
        prop_assert_eq!(dk.decrypt(&ciphertext).unwrap(), msg);
    }
}
