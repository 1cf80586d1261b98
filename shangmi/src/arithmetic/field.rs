//! Field arithmetic modulo p = 0xfffffffeffffffffffffffffffffffffffffffff00000000ffffffffffffffff
//!
//! Elements are kept in Montgomery form using `crypto-bigint`'s constant
//! modulus residues. Inversion uses Fermat's little theorem, `x⁻¹ = x^(p-2)`.

use crate::{Error, Result, U256};
use bigint::{Encoding, impl_modulus, modular::constant_mod::Residue};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};
use subtle::{Choice, ConstantTimeEq};

/// Constant representing the modulus serialized as hex.
pub(crate) const MODULUS_HEX: &str =
    "fffffffeffffffffffffffffffffffffffffffff00000000ffffffffffffffff";

/// `p - 2`, the exponent used for inversion.
const P_MINUS_TWO: U256 =
    U256::from_be_hex("fffffffeffffffffffffffffffffffffffffffff00000000fffffffffffffffd");

impl_modulus!(
    FieldModulus,
    U256,
    "fffffffeffffffffffffffffffffffffffffffff00000000ffffffffffffffff"
);

type FieldResidue = Residue<FieldModulus, { U256::LIMBS }>;

/// Element in the SM2 finite field modulo `p`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FieldElement(FieldResidue);

impl FieldElement {
    /// Zero element.
    pub const ZERO: Self = Self(FieldResidue::ZERO);

    /// Multiplicative identity.
    pub const ONE: Self = Self(FieldResidue::ONE);

    /// Field modulus `p`.
    pub const MODULUS: U256 = U256::from_be_hex(MODULUS_HEX);

    /// Create a field element from a small integer.
    pub const fn from_u64(w: u64) -> Self {
        Self(FieldResidue::new(&U256::from_u64(w)))
    }

    /// Parse a field element from big endian hex. Used for curve constants,
    /// which are all below the modulus.
    pub(crate) const fn from_hex(hex: &str) -> Self {
        Self(FieldResidue::new(&U256::from_be_hex(hex)))
    }

    /// Create a field element from an integer, rejecting values `>= p`.
    pub fn from_uint(uint: &U256) -> Result<Self> {
        if *uint >= Self::MODULUS {
            return Err(Error::Domain("field element out of range"));
        }

        Ok(Self(FieldResidue::new(uint)))
    }

    /// Decode a field element from 32 big endian bytes, rejecting values
    /// `>= p`.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self> {
        Self::from_uint(&U256::from_be_bytes(*bytes))
    }

    /// Decode a field element from a big endian byte slice.
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let bytes = <[u8; 32]>::try_from(slice)
            .map_err(|_| Error::Domain("field element must be 32 bytes"))?;
        Self::from_bytes(&bytes)
    }

    /// Canonical integer in `[0, p)`.
    pub fn to_uint(&self) -> U256 {
        self.0.retrieve()
    }

    /// Serialize as 32 big endian bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.to_uint().to_be_bytes()
    }

    /// Is this element zero?
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Returns `self + self`.
    pub fn double(&self) -> Self {
        *self + *self
    }

    /// Returns `self * self`.
    pub fn square(&self) -> Self {
        Self(self.0.square())
    }

    /// Returns `self^exp`.
    pub fn pow(&self, exp: &U256) -> Self {
        Self(self.0.pow(exp))
    }

    /// Returns the multiplicative inverse `self^(p-2)`.
    pub fn invert(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::InversionOfZero);
        }

        Ok(self.pow(&P_MINUS_TWO))
    }
}

impl Default for FieldElement {
    fn default() -> Self {
        Self::ZERO
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.to_bytes().ct_eq(&other.to_bytes())
    }
}

impl Add for FieldElement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for FieldElement {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for FieldElement {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for FieldElement {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul for FieldElement {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl MulAssign for FieldElement {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Neg for FieldElement {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}
