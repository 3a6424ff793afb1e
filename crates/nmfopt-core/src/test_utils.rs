//! Shared test utilities for solver tests and benchmarks.

#![cfg(any(test, feature = "test-utils"))]

pub use crate::random::random_nonnegative;
use crate::types::{DMatrix, Scalar};
use rand::prelude::*;
use rand_distr::Uniform;

/// Matrix with independent standard-uniform entries shifted to [-0.5, 0.5).
pub fn random_signed<T: Scalar, R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> DMatrix<T> {
    let dist = Uniform::new(-0.5_f64, 0.5);
    DMatrix::from_row_iterator(
        rows,
        cols,
        (0..rows * cols).map(|_| <T as Scalar>::from_f64(dist.sample(rng))),
    )
}

/// Random `(design, target)` pair for a nonnegative least squares problem.
///
/// The target is drawn independently of the design, so the optimum usually
/// has active bounds.
pub fn random_nnls_pair(rows: usize, vars: usize, cols: usize, seed: u64) -> (DMatrix<f64>, DMatrix<f64>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let design = random_nonnegative(rows, vars, &mut rng);
    let target = random_signed(rows, cols, &mut rng);
    (design, target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_signed_range() {
        let mut rng = StdRng::seed_from_u64(3);
        let m: DMatrix<f64> = random_signed(4, 6, &mut rng);
        assert_eq!(m.shape(), (4, 6));
        assert!(m.iter().all(|&v| (-0.5..0.5).contains(&v)));
    }

    #[test]
    fn test_pairs_are_seeded() {
        let (c1, b1) = random_nnls_pair(5, 3, 2, 11);
        let (c2, b2) = random_nnls_pair(5, 3, 2, 11);
        assert_eq!(c1, c2);
        assert_eq!(b1, b2);
    }
}
