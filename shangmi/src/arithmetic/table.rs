//! Precomputed multiples of the base point.

use super::{AffinePoint, ProjectivePoint, Scalar, mul::bit};
use alloc::boxed::Box;
use core::{
    fmt::{self, Debug},
    ops::Deref,
};
use once_cell::sync::OnceCell;

#[cfg(not(any(feature = "critical-section", feature = "std")))]
compile_error!("the basepoint table requires either the `critical-section` or `std` feature");

/// Number of entries in a [`BasepointTable`]: one per scalar bit.
pub const TABLE_SIZE: usize = 256;

/// Process-wide table used by [`ProjectivePoint::mul_by_generator`].
pub(crate) static BASEPOINT_TABLE: BasepointTable = BasepointTable::new();

/// Table of `[2^i] G` for `i = 0..256`, stored in affine form.
///
/// The table is computed by repeated doubling the first time it is used and
/// is read-only afterwards. The table is built exactly once: threads that hit
/// an empty table while another thread is building it block until it is
/// published.
pub struct BasepointTable {
    points: OnceCell<Box<[AffinePoint; TABLE_SIZE]>>,
    #[cfg(test)]
    builds: core::sync::atomic::AtomicUsize,
}

impl BasepointTable {
    /// Create a new [`BasepointTable`] which is lazily initialized on first
    /// use and can be bound to a `static`.
    pub const fn new() -> Self {
        Self {
            points: OnceCell::new(),
            #[cfg(test)]
            builds: core::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Force initialization and borrow the table entries.
    pub fn points(&self) -> &[AffinePoint; TABLE_SIZE] {
        self.points.get_or_init(|| {
            tracing::debug!("building SM2 basepoint table");
            #[cfg(test)]
            self.builds
                .fetch_add(1, core::sync::atomic::Ordering::SeqCst);

            let mut points = Box::new([AffinePoint::IDENTITY; TABLE_SIZE]);
            let mut current = ProjectivePoint::GENERATOR;

            for entry in points.iter_mut() {
                *entry = current.to_affine();
                current = current.double();
            }

            points
        })
    }

    /// Returns `[k] G` by summing the entries whose bit is set in `k`.
    pub fn mul(&self, k: &Scalar) -> ProjectivePoint {
        let bytes = k.to_bytes();
        let points = self.points();
        let mut acc = ProjectivePoint::IDENTITY;

        for (i, point) in points.iter().enumerate() {
            if bit(&bytes, i) {
                acc = acc.add(&ProjectivePoint::from(point));
            }
        }

        acc
    }
}

impl Default for BasepointTable {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for BasepointTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasepointTable")
            .field("initialized", &self.points.get().is_some())
            .finish()
    }
}

impl Deref for BasepointTable {
    type Target = [AffinePoint; TABLE_SIZE];

    #[inline]
    fn deref(&self) -> &[AffinePoint; TABLE_SIZE] {
        self.points()
    }
}
