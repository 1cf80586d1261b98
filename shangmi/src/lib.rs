#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/meta/master/logo.svg"
)]
#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::checked_conversions,
    clippy::implicit_saturating_sub,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

#[allow(unused_extern_crates)]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "dsa")]
pub mod dsa;

#[cfg(feature = "pke")]
pub mod pke;

pub mod sm3;

mod arithmetic;
#[cfg(feature = "dsa")]
mod distid;
mod error;
mod keys;

pub use crate::{
    arithmetic::{
        AffinePoint, BasepointTable, EQUATION_A, EQUATION_B, FieldElement, GENERATOR,
        MulStrategy, ProjectivePoint, Scalar, lincomb,
    },
    error::{Error, Result},
    keys::{PublicKey, SecretKey},
};
pub use bigint::{self, U256};
pub use rand_core;

#[cfg(feature = "dsa")]
pub use crate::distid::{DEFAULT_DISTID, hash_z};

/// Order of SM2's elliptic curve group (i.e. scalar modulus) serialized as
/// hexadecimal.
const ORDER_HEX: &str = "fffffffeffffffffffffffffffffffff7203df6b21c6052b53bbf40939d54123";

/// Field modulus `p`.
pub const P: U256 = FieldElement::MODULUS;

/// Curve coefficient `a = p - 3`.
pub const A: U256 =
    U256::from_be_hex("fffffffeffffffffffffffffffffffffffffffff00000000fffffffffffffffc");

/// Curve coefficient `b`.
pub const B: U256 =
    U256::from_be_hex("28e9fa9e9d9f5e344d5a9e4bcf6509a7f39789f515ab8f92ddbcbd414d940e93");

/// Order of SM2's elliptic curve group (i.e. scalar modulus).
pub const ORDER: U256 = U256::from_be_hex(ORDER_HEX);

/// Base point x-coordinate.
pub const GX: U256 =
    U256::from_be_hex("32c4ae2c1f1981195f9904466a39c9948fe30bbff2660be1715a4589334c74c7");

/// Base point y-coordinate.
pub const GY: U256 =
    U256::from_be_hex("bc3736a2f4f6779c59bdcee36b692153d0a9877cc62a474002df32e52139f0a0");

/// SM3 hash output.
pub type Hash = sm3::Hash;
