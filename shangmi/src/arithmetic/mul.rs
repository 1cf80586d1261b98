//! Scalar multiplication strategies.
//!
//! All strategies compute the same group element; they differ only in how
//! many point additions they spend and which addition formula they use.
//! Multiplication by the generator additionally has a precomputed table, see
//! [`BasepointTable`](super::BasepointTable).

use super::{ProjectivePoint, Scalar};
use crate::U256;
use bigint::Encoding;

/// Maximum length of a NAF recoding of a 256-bit integer.
const NAF_MAX_LEN: usize = 257;

/// Scalar multiplication algorithm for an arbitrary point.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MulStrategy {
    /// Left-to-right double-and-add over the bits of the scalar.
    Binary,

    /// Non-adjacent form: signed digits in `{-1, 0, 1}`, no two consecutive
    /// digits nonzero.
    #[default]
    Naf,

    /// NAF digits combined with co-Z additions, equalizing the accumulator
    /// and the running point before every addition.
    CoZ,
}

/// Non-adjacent form of a scalar, least significant digit first.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Naf {
    digits: [i8; NAF_MAX_LEN],
    len: usize,
}

impl Naf {
    /// Recode `k`: while `k > 0`, emit `2 - (k mod 4)` if `k` is odd and
    /// subtract it, otherwise emit `0`; then halve.
    pub(crate) fn new(k: &Scalar) -> Self {
        let mut k = k.to_uint();
        let mut digits = [0i8; NAF_MAX_LEN];
        let mut len = 0;

        while k != U256::ZERO {
            let low = k.to_le_bytes()[0];

            if low & 1 == 1 {
                if low & 3 == 1 {
                    digits[len] = 1;
                    k = k.wrapping_sub(&U256::ONE);
                } else {
                    digits[len] = -1;
                    k = k.wrapping_add(&U256::ONE);
                }
            }

            k = k.shr_vartime(1);
            len += 1;
        }

        Self { digits, len }
    }

    /// Digits, least significant first.
    pub(crate) fn digits(&self) -> &[i8] {
        &self.digits[..self.len]
    }
}

impl ProjectivePoint {
    /// Returns `[k] self` using the given multiplication strategy.
    pub fn mul_with(&self, k: &Scalar, strategy: MulStrategy) -> Self {
        match strategy {
            MulStrategy::Binary => mul_binary(self, k),
            MulStrategy::Naf => mul_naf(self, k),
            MulStrategy::CoZ => mul_co_z(self, k),
        }
    }
}

/// Is bit `i` of the big endian encoding `bytes` set?
pub(crate) fn bit(bytes: &[u8; 32], i: usize) -> bool {
    (bytes[31 - i / 8] >> (i % 8)) & 1 == 1
}

fn mul_binary(point: &ProjectivePoint, k: &Scalar) -> ProjectivePoint {
    let k = k.to_bytes();
    let mut acc = ProjectivePoint::IDENTITY;

    for i in (0..256).rev() {
        acc = acc.double();

        if bit(&k, i) {
            acc = acc.add(point);
        }
    }

    acc
}

fn mul_naf(point: &ProjectivePoint, k: &Scalar) -> ProjectivePoint {
    let mut acc = ProjectivePoint::IDENTITY;
    let mut current = *point;

    for &digit in Naf::new(k).digits() {
        match digit {
            1 => acc = acc.add(&current),
            -1 => acc = acc.add(&current.neg()),
            _ => {}
        }

        current = current.double();
    }

    acc
}

fn mul_co_z(point: &ProjectivePoint, k: &Scalar) -> ProjectivePoint {
    let mut acc = ProjectivePoint::IDENTITY;
    let mut current = *point;

    for &digit in Naf::new(k).digits() {
        if digit != 0 {
            let addend = if digit > 0 { current } else { current.neg() };
            let (lhs, rhs) = ProjectivePoint::co_z_pair(&acc, &addend);
            acc = lhs.add_co_z_unchecked(&rhs);
        }

        current = current.double();
    }

    acc
}

/// Returns `[s] G + [t] q`.
///
/// `[s] G` comes from the basepoint table and `[t] q` from co-Z
/// multiplication; the two are brought to a common `Z` and joined with a
/// co-Z addition.
pub fn lincomb(s: &Scalar, t: &Scalar, q: &ProjectivePoint) -> ProjectivePoint {
    let sg = ProjectivePoint::mul_by_generator(s);
    let tq = q.mul_with(t, MulStrategy::CoZ);
    let (lhs, rhs) = ProjectivePoint::co_z_pair(&sg, &tq);
    lhs.add_co_z_unchecked(&rhs)
}

#[cfg(test)]
mod tests {
    use super::{MulStrategy, Naf, lincomb};
    use crate::{
        ORDER, U256,
        arithmetic::{AffinePoint, ProjectivePoint, Scalar},
    };

    const STRATEGIES: [MulStrategy; 3] = [MulStrategy::Binary, MulStrategy::Naf, MulStrategy::CoZ];

    fn naf_value(naf: &Naf) -> Scalar {
        naf.digits()
            .iter()
            .rev()
            .fold(Scalar::ZERO, |acc, &d| {
                let acc = acc + acc;
                match d {
                    1 => acc + Scalar::ONE,
                    -1 => acc - Scalar::ONE,
                    _ => acc,
                }
            })
    }

    #[test]
    fn naf_recoding() {
        // 7 = 8 - 1
        assert_eq!(Naf::new(&Scalar::from_u64(7)).digits(), &[-1, 0, 0, 1]);
        assert_eq!(Naf::new(&Scalar::from_u64(6)).digits(), &[0, -1, 0, 1]);
        assert!(Naf::new(&Scalar::ZERO).digits().is_empty());
    }

    #[test]
    fn naf_is_non_adjacent() {
        let k = Scalar::reduce(&U256::from_be_hex(
            "5bbf40939d54123fffffffeffffffff7203df6b21c6052b53fffffffeffffff0",
        ));
        let naf = Naf::new(&k);
        assert!(naf.digits().windows(2).all(|w| w[0] == 0 || w[1] == 0));
        assert_eq!(naf_value(&naf), k);
    }

    #[test]
    fn small_multiples() {
        let g = ProjectivePoint::GENERATOR;
        let g3 = AffinePoint::GENERATOR
            .double()
            .unwrap()
            .add(&AffinePoint::GENERATOR)
            .unwrap();

        for strategy in STRATEGIES {
            assert!(g.mul_with(&Scalar::ZERO, strategy).is_identity());
            assert_eq!(g.mul_with(&Scalar::ONE, strategy), g);
            assert_eq!(g.mul_with(&Scalar::from_u64(2), strategy), g.double());
            assert_eq!(g.mul_with(&Scalar::from_u64(3), strategy).to_affine(), g3);
        }
    }

    #[test]
    fn order_minus_one_is_negation() {
        let k = Scalar::reduce(&ORDER.wrapping_sub(&U256::ONE));
        let g = ProjectivePoint::GENERATOR;

        for strategy in STRATEGIES {
            assert_eq!(g.mul_with(&k, strategy), g.neg());
        }
    }

    #[test]
    fn lincomb_matches_separate_products() {
        let s = Scalar::from_u64(0x1234_5678);
        let t = Scalar::from_u64(0x9abc_def0);
        let q = ProjectivePoint::GENERATOR.mul_with(&Scalar::from_u64(99), MulStrategy::Binary);

        let expected = ProjectivePoint::GENERATOR.mul_with(&s, MulStrategy::Binary)
            + q.mul_with(&t, MulStrategy::Binary);
        assert_eq!(lincomb(&s, &t, &q), expected);
    }

    #[test]
    fn lincomb_cancellation() {
        // [s]G + [n - s]G = O
        let s = Scalar::from_u64(42);
        assert!(lincomb(&s, &-s, &ProjectivePoint::GENERATOR).is_identity());
        assert!(lincomb(&Scalar::ZERO, &Scalar::ZERO, &ProjectivePoint::GENERATOR).is_identity());
    }
}
