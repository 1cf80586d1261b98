//! Affine curve points.

use super::{EQUATION_A, EQUATION_B, FieldElement, GENERATOR, ProjectivePoint};
use crate::{Error, Result};
use subtle::{Choice, ConstantTimeEq};

/// Tag byte prefixing an uncompressed SEC1 point.
const SEC1_UNCOMPRESSED_TAG: u8 = 0x04;

/// Point on the SM2 curve in affine coordinates.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AffinePoint {
    /// x-coordinate
    pub(crate) x: FieldElement,

    /// y-coordinate
    pub(crate) y: FieldElement,

    /// Is this point the point at infinity?
    pub(crate) infinity: bool,
}

impl AffinePoint {
    /// Additive identity of the group a.k.a. the point at infinity.
    pub const IDENTITY: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ZERO,
        infinity: true,
    };

    /// Base point of the curve.
    pub const GENERATOR: Self = Self {
        x: GENERATOR.0,
        y: GENERATOR.1,
        infinity: false,
    };

    /// Size of an encoded point: `x || y`.
    pub const BYTE_SIZE: usize = 64;

    /// Size of an uncompressed SEC1 encoded point: `04 || x || y`.
    pub const SEC1_BYTE_SIZE: usize = 65;

    /// Create a point from affine coordinates, checking the curve equation.
    pub fn from_coordinates(x: FieldElement, y: FieldElement) -> Result<Self> {
        let point = Self {
            x,
            y,
            infinity: false,
        };

        if point.is_on_curve() {
            Ok(point)
        } else {
            Err(Error::Domain("point not on curve"))
        }
    }

    /// Decode a point from its `x || y` encoding.
    pub fn from_bytes(bytes: &[u8; Self::BYTE_SIZE]) -> Result<Self> {
        let (x, y) = bytes.split_at(Self::BYTE_SIZE / 2);
        Self::from_coordinates(FieldElement::from_slice(x)?, FieldElement::from_slice(y)?)
    }

    /// Decode a point from an `x || y` byte slice.
    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        let bytes = <[u8; Self::BYTE_SIZE]>::try_from(slice)
            .map_err(|_| Error::Domain("point must be 64 bytes"))?;
        Self::from_bytes(&bytes)
    }

    /// Decode a point from the uncompressed SEC1 encoding `04 || x || y`.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        match bytes.split_first() {
            Some((&SEC1_UNCOMPRESSED_TAG, coordinates)) => Self::from_slice(coordinates),
            Some(_) => Err(Error::Domain("unsupported SEC1 point tag")),
            None => Err(Error::Domain("empty SEC1 point")),
        }
    }

    /// Serialize as `x || y`. The identity has no encoding.
    pub fn to_bytes(&self) -> Result<[u8; Self::BYTE_SIZE]> {
        if self.infinity {
            return Err(Error::Domain("identity has no encoding"));
        }

        let mut bytes = [0u8; Self::BYTE_SIZE];
        let (x, y) = bytes.split_at_mut(Self::BYTE_SIZE / 2);
        x.copy_from_slice(&self.x.to_bytes());
        y.copy_from_slice(&self.y.to_bytes());
        Ok(bytes)
    }

    /// Serialize as uncompressed SEC1 `04 || x || y`.
    pub fn to_sec1_bytes(&self) -> Result<[u8; Self::SEC1_BYTE_SIZE]> {
        let mut bytes = [0u8; Self::SEC1_BYTE_SIZE];
        bytes[0] = SEC1_UNCOMPRESSED_TAG;
        bytes[1..].copy_from_slice(&self.to_bytes()?);
        Ok(bytes)
    }

    /// Is this point the point at infinity?
    pub fn is_identity(&self) -> bool {
        self.infinity
    }

    /// Does this point satisfy `y² = x³ + ax + b`? The identity is on the
    /// curve by definition.
    pub fn is_on_curve(&self) -> bool {
        if self.infinity {
            return true;
        }

        let rhs = (self.x.square() + EQUATION_A) * self.x + EQUATION_B;
        self.y.square() == rhs
    }

    /// Affine x-coordinate.
    pub fn x(&self) -> FieldElement {
        self.x
    }

    /// Affine y-coordinate.
    pub fn y(&self) -> FieldElement {
        self.y
    }

    /// Returns `-self`.
    pub fn neg(&self) -> Self {
        Self {
            x: self.x,
            y: -self.y,
            infinity: self.infinity,
        }
    }

    /// Returns `self + other` using the affine chord-and-tangent law.
    ///
    /// Each slope denominator is checked for zero before inversion, so the
    /// only error this can return is an [`Error::InversionOfZero`] from a
    /// point that is not actually on the curve.
    pub fn add(&self, other: &Self) -> Result<Self> {
        if self.infinity {
            return Ok(*other);
        }

        if other.infinity {
            return Ok(*self);
        }

        if self.x == other.x {
            // Same x: either P + (-P) or P + P.
            if (self.y + other.y).is_zero() {
                return Ok(Self::IDENTITY);
            }

            return self.double();
        }

        let lambda = (other.y - self.y) * (other.x - self.x).invert()?;
        let x3 = lambda.square() - self.x - other.x;
        let y3 = lambda * (self.x - x3) - self.y;

        Ok(Self {
            x: x3,
            y: y3,
            infinity: false,
        })
    }

    /// Returns `self + self` using the tangent slope `(3x² + a) / 2y`.
    pub fn double(&self) -> Result<Self> {
        if self.infinity || self.y.is_zero() {
            return Ok(Self::IDENTITY);
        }

        let lambda =
            (self.x.square() * FieldElement::from_u64(3) + EQUATION_A) * self.y.double().invert()?;
        let x3 = lambda.square() - self.x.double();
        let y3 = lambda * (self.x - x3) - self.y;

        Ok(Self {
            x: x3,
            y: y3,
            infinity: false,
        })
    }
}

impl Default for AffinePoint {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl ConstantTimeEq for AffinePoint {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.x.ct_eq(&other.x)
            & self.y.ct_eq(&other.y)
            & Choice::from(u8::from(self.infinity == other.infinity))
    }
}

impl From<ProjectivePoint> for AffinePoint {
    fn from(point: ProjectivePoint) -> AffinePoint {
        point.to_affine()
    }
}

impl From<&ProjectivePoint> for AffinePoint {
    fn from(point: &ProjectivePoint) -> AffinePoint {
        point.to_affine()
    }
}
