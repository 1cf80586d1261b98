//! SM2 scalar field elements, i.e. integers modulo the group order
//! n = 0xfffffffeffffffffffffffffffffffff7203df6b21c6052b53bbf40939d54123

use crate::{Error, ORDER, Result, U256};
use bigint::{Encoding, impl_modulus, modular::constant_mod::Residue};
use core::{
    fmt::{self, Debug},
    ops::{Add, Mul, Neg, Sub},
};
use rand_core::CryptoRngCore;
use subtle::{Choice, ConstantTimeEq};
use zeroize::{DefaultIsZeroes, Zeroize};

/// `n - 2`, the exponent used for inversion.
const N_MINUS_TWO: U256 =
    U256::from_be_hex("fffffffeffffffffffffffffffffffff7203df6b21c6052b53bbf40939d54121");

/// Upper bound on rejection sampling attempts. A single draw is rejected with
/// probability below 2⁻³².
const MAX_SAMPLING_ATTEMPTS: usize = 64;

impl_modulus!(
    ScalarModulus,
    U256,
    "fffffffeffffffffffffffffffffffff7203df6b21c6052b53bbf40939d54123"
);

type ScalarResidue = Residue<ScalarModulus, { U256::LIMBS }>;

/// Scalars are elements in the finite field modulo `n`.
#[derive(Clone, Copy, Eq, PartialEq)]
pub struct Scalar(ScalarResidue);

impl Scalar {
    /// Zero scalar.
    pub const ZERO: Self = Self(ScalarResidue::ZERO);

    /// Multiplicative identity.
    pub const ONE: Self = Self(ScalarResidue::ONE);

    /// Create a scalar from a small integer.
    pub const fn from_u64(w: u64) -> Self {
        Self(ScalarResidue::new(&U256::from_u64(w)))
    }

    /// Reduce an arbitrary 256-bit integer modulo `n`.
    pub const fn reduce(uint: &U256) -> Self {
        Self(ScalarResidue::new(uint))
    }

    /// Interpret 32 big endian bytes as an integer and reduce it modulo `n`.
    pub fn reduce_bytes(bytes: &[u8; 32]) -> Self {
        Self::reduce(&U256::from_be_bytes(*bytes))
    }

    /// Create a scalar from an integer, rejecting values `>= n`.
    pub fn from_uint(uint: &U256) -> Result<Self> {
        if *uint >= ORDER {
            return Err(Error::Domain("scalar out of range"));
        }

        Ok(Self::reduce(uint))
    }

    /// Decode a scalar from 32 big endian bytes, rejecting values `>= n`.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self> {
        Self::from_uint(&U256::from_be_bytes(*bytes))
    }

    /// Decode a scalar from a big endian byte slice.
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let bytes =
            <[u8; 32]>::try_from(slice).map_err(|_| Error::Domain("scalar must be 32 bytes"))?;
        Self::from_bytes(&bytes)
    }

    /// Draw a uniformly random scalar in `[1, n-1]` by rejection sampling.
    pub fn try_from_rng<R: CryptoRngCore + ?Sized>(rng: &mut R) -> Result<Self> {
        let mut bytes = [0u8; 32];

        for _ in 0..MAX_SAMPLING_ATTEMPTS {
            rng.try_fill_bytes(&mut bytes)?;
            let k = U256::from_be_bytes(bytes);

            if k != U256::ZERO && k < ORDER {
                bytes.zeroize();
                return Ok(Self::reduce(&k));
            }
        }

        bytes.zeroize();
        Err(Error::NonceRetriesExhausted)
    }

    /// Canonical integer in `[0, n)`.
    pub fn to_uint(&self) -> U256 {
        self.0.retrieve()
    }

    /// Serialize as 32 big endian bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.to_uint().to_be_bytes()
    }

    /// Is this scalar zero?
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Returns the multiplicative inverse `self^(n-2)`.
    pub fn invert(&self) -> Result<Self> {
        if self.is_zero() {
            return Err(Error::InversionOfZero);
        }

        Ok(Self(self.0.pow(&N_MINUS_TWO)))
    }
}

impl Default for Scalar {
    fn default() -> Self {
        Self::ZERO
    }
}

impl DefaultIsZeroes for Scalar {}

impl ConstantTimeEq for Scalar {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.to_bytes().ct_eq(&other.to_bytes())
    }
}

impl Debug for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Scalar(0x")?;

        for byte in self.to_bytes() {
            write!(f, "{:02x}", byte)?;
        }

        write!(f, ")")
    }
}

impl Add for Scalar {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Scalar {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul for Scalar {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl Neg for Scalar {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl From<u64> for Scalar {
    fn from(w: u64) -> Self {
        Self::from_u64(w)
    }
}
