//! Seeded random matrices.

use crate::types::{DMatrix, Scalar};
use rand::Rng;
use rand_distr::{Distribution, Uniform};

/// Matrix with independent uniform [0, 1) entries, filled row by row.
///
/// Entries are drawn as `f64` and converted, so `f32` and `f64` matrices
/// built from the same generator state hold the same values up to rounding.
pub fn random_nonnegative<T: Scalar, R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> DMatrix<T> {
    let dist = Uniform::new(0.0_f64, 1.0);
    DMatrix::from_row_iterator(
        rows,
        cols,
        (0..rows * cols).map(|_| <T as Scalar>::from_f64(dist.sample(rng))),
    )
}
