//! Curve points in Jacobian coordinates.
//!
//! A point `(X, Y, Z)` with `Z ≠ 0` represents the affine point
//! `(X / Z², Y / Z³)`. The identity is any point with `Z = 0`.

use super::{AffinePoint, EQUATION_A, FieldElement, GENERATOR, Scalar, table::BASEPOINT_TABLE};
use crate::{Error, Result};
use core::ops::{Add, AddAssign, Mul, Neg, Sub};

/// Point on the SM2 curve in Jacobian coordinates.
#[derive(Clone, Copy, Debug)]
pub struct ProjectivePoint {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
}

impl ProjectivePoint {
    /// Additive identity of the group a.k.a. the point at infinity.
    pub const IDENTITY: Self = Self {
        x: FieldElement::ONE,
        y: FieldElement::ONE,
        z: FieldElement::ZERO,
    };

    /// Base point of the curve.
    pub const GENERATOR: Self = Self {
        x: GENERATOR.0,
        y: GENERATOR.1,
        z: FieldElement::ONE,
    };

    /// Is this point the point at infinity?
    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    /// The Jacobian `Z` coordinate.
    pub fn z(&self) -> FieldElement {
        self.z
    }

    /// Returns the affine representation of this point.
    pub fn to_affine(&self) -> AffinePoint {
        match self.z.invert() {
            Ok(zinv) => {
                let zinv2 = zinv.square();
                AffinePoint {
                    x: self.x * zinv2,
                    y: self.y * zinv2 * zinv,
                    infinity: false,
                }
            }
            Err(_) => AffinePoint::IDENTITY,
        }
    }

    /// Returns `-self`.
    pub fn neg(&self) -> Self {
        Self {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }

    /// Returns `self + self`.
    ///
    /// ```text
    /// S = 4·X·Y², M = 3·X² + a·Z⁴
    /// X3 = M² − 2·S, Y3 = M·(S − X3) − 8·Y⁴, Z3 = 2·Y·Z
    /// ```
    pub fn double(&self) -> Self {
        if self.is_identity() || self.y.is_zero() {
            return Self::IDENTITY;
        }

        let yy = self.y.square();
        let s = (self.x * yy).double().double();
        let m = self.x.square() * FieldElement::from_u64(3) + EQUATION_A * self.z.square().square();
        let x3 = m.square() - s.double();
        let y3 = m * (s - x3) - yy.square().double().double().double();
        let z3 = (self.y * self.z).double();

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Returns `self + other`.
    ///
    /// ```text
    /// U1 = X1·Z2², U2 = X2·Z1², S1 = Y1·Z2³, S2 = Y2·Z1³
    /// H = U2 − U1, R = S2 − S1
    /// X3 = R² − H³ − 2·U1·H², Y3 = R·(U1·H² − X3) − S1·H³, Z3 = Z1·Z2·H
    /// ```
    pub fn add(&self, other: &Self) -> Self {
        if self.is_identity() {
            return *other;
        }

        if other.is_identity() {
            return *self;
        }

        let z1z1 = self.z.square();
        let z2z2 = other.z.square();
        let u1 = self.x * z2z2;
        let u2 = other.x * z1z1;
        let s1 = self.y * z2z2 * other.z;
        let s2 = other.y * z1z1 * self.z;
        let h = u2 - u1;
        let r = s2 - s1;

        if h.is_zero() {
            // Same affine x: P + P or P + (-P).
            return if r.is_zero() {
                self.double()
            } else {
                Self::IDENTITY
            };
        }

        let hh = h.square();
        let hhh = hh * h;
        let v = u1 * hh;
        let x3 = r.square() - hhh - v.double();
        let y3 = r * (v - x3) - s1 * hhh;
        let z3 = self.z * other.z * h;

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Returns `self - other`.
    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.neg())
    }

    /// Rescale `a` and `b` to the common coordinate `Z = Z1·Z2` without
    /// inverting, so the pair can be combined with [`Self::add_co_z`].
    ///
    /// Identity operands are returned unchanged; co-Z addition absorbs them
    /// before looking at `Z`.
    pub fn co_z_pair(a: &Self, b: &Self) -> (Self, Self) {
        if a.is_identity() || b.is_identity() || a.z == b.z {
            return (*a, *b);
        }

        let z = a.z * b.z;
        let z1z1 = a.z.square();
        let z2z2 = b.z.square();

        let a2 = Self {
            x: a.x * z2z2,
            y: a.y * z2z2 * b.z,
            z,
        };
        let b2 = Self {
            x: b.x * z1z1,
            y: b.y * z1z1 * a.z,
            z,
        };

        (a2, b2)
    }

    /// Returns `self + other` for two points sharing the same `Z` coordinate.
    ///
    /// Fails with [`Error::Domain`] if the `Z` coordinates differ; use
    /// [`Self::co_z_pair`] to equalize them first.
    pub fn add_co_z(&self, other: &Self) -> Result<Self> {
        if !self.is_identity() && !other.is_identity() && self.z != other.z {
            return Err(Error::Domain("co-Z operands must share a Z coordinate"));
        }

        Ok(self.add_co_z_unchecked(other))
    }

    /// Co-Z addition (Meloni 2007) with the shared-`Z` precondition assumed.
    ///
    /// ```text
    /// A = (X2 − X1)², B = X1·A, C = X2·A, D = (Y2 − Y1)²
    /// X3 = D − B − C, Y3 = (Y2 − Y1)·(B − X3) − Y1·(C − B), Z3 = Z·(X2 − X1)
    /// ```
    pub(crate) fn add_co_z_unchecked(&self, other: &Self) -> Self {
        if self.is_identity() {
            return *other;
        }

        if other.is_identity() {
            return *self;
        }

        let dx = other.x - self.x;
        let dy = other.y - self.y;

        if dx.is_zero() {
            return if dy.is_zero() {
                self.double()
            } else {
                Self::IDENTITY
            };
        }

        let a = dx.square();
        let b = self.x * a;
        let c = other.x * a;
        let x3 = dy.square() - b - c;
        let y3 = dy * (b - x3) - self.y * (c - b);
        let z3 = self.z * dx;

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Returns `[k] G` using the precomputed basepoint table.
    pub fn mul_by_generator(k: &Scalar) -> Self {
        BASEPOINT_TABLE.mul(k)
    }
}

impl Default for ProjectivePoint {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Equality of the underlying affine points, tested by cross-multiplying
/// with the other operand's `Z²` and `Z³`.
impl PartialEq for ProjectivePoint {
    fn eq(&self, other: &Self) -> bool {
        match (self.is_identity(), other.is_identity()) {
            (true, true) => return true,
            (false, false) => {}
            _ => return false,
        }

        let z1z1 = self.z.square();
        let z2z2 = other.z.square();

        self.x * z2z2 == other.x * z1z1 && self.y * z2z2 * other.z == other.y * z1z1 * self.z
    }
}

impl Eq for ProjectivePoint {}

impl From<AffinePoint> for ProjectivePoint {
    fn from(p: AffinePoint) -> Self {
        if p.is_identity() {
            Self::IDENTITY
        } else {
            Self {
                x: p.x,
                y: p.y,
                z: FieldElement::ONE,
            }
        }
    }
}

impl From<&AffinePoint> for ProjectivePoint {
    fn from(p: &AffinePoint) -> Self {
        Self::from(*p)
    }
}

impl Add<ProjectivePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::add(&self, &other)
    }
}

impl Add<&ProjectivePoint> for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn add(self, other: &ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::add(self, other)
    }
}

impl AddAssign<ProjectivePoint> for ProjectivePoint {
    fn add_assign(&mut self, rhs: ProjectivePoint) {
        *self = ProjectivePoint::add(self, &rhs);
    }
}

impl Sub<ProjectivePoint> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn sub(self, other: ProjectivePoint) -> ProjectivePoint {
        ProjectivePoint::sub(&self, &other)
    }
}

impl Neg for ProjectivePoint {
    type Output = ProjectivePoint;

    fn neg(self) -> ProjectivePoint {
        ProjectivePoint::neg(&self)
    }
}

impl Mul<Scalar> for ProjectivePoint {
    type Output = ProjectivePoint;

    fn mul(self, k: Scalar) -> ProjectivePoint {
        self.mul_with(&k, Default::default())
    }
}

impl Mul<&Scalar> for &ProjectivePoint {
    type Output = ProjectivePoint;

    fn mul(self, k: &Scalar) -> ProjectivePoint {
        self.mul_with(k, Default::default())
    }
}
