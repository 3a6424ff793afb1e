//! Seeded random problem instances.
//!
//! Draws a planted factorization `A = Y_true·X_true` with independent
//! uniform [0, 1) entries, then an independent initial left factor. All
//! matrices are filled row by row from a single generator in the order
//! `Y_true`, `X_true`, `Y0`, so the same seed always yields the same
//! instance.

use nmfopt_core::random::random_nonnegative;
use nmfopt_core::types::{DMatrix, Scalar};
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Shape of a factorization problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Rows m of the target
    pub rows: usize,
    /// Columns n of the target
    pub cols: usize,
    /// Inner rank k
    pub rank: usize,
}

impl Dimensions {
    /// Create new dimensions.
    pub fn new(rows: usize, cols: usize, rank: usize) -> Self {
        Self { rows, cols, rank }
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self::new(10, 10, 5)
    }
}

/// A generated problem with its planted factors.
#[derive(Debug, Clone)]
pub struct ProblemInstance<T: Scalar> {
    /// Target A = Y_true·X_true (m×n)
    pub target: DMatrix<T>,
    /// Initial left factor Y0 (m×k)
    pub initial_left: DMatrix<T>,
    /// Planted left factor (m×k)
    pub true_left: DMatrix<T>,
    /// Planted right factor (k×n)
    pub true_right: DMatrix<T>,
    /// Seed the instance was drawn from
    pub seed: u64,
}

impl<T: Scalar> ProblemInstance<T> {
    /// Shape of the instance.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.target.nrows(), self.target.ncols(), self.initial_left.ncols())
    }
}

/// Draw a problem instance from `seed`.
pub fn generate_instance<T: Scalar>(dimensions: Dimensions, seed: u64) -> ProblemInstance<T> {
    let Dimensions { rows, cols, rank } = dimensions;
    let mut rng = StdRng::seed_from_u64(seed);

    let true_left = random_nonnegative(rows, rank, &mut rng);
    let true_right = random_nonnegative(rank, cols, &mut rng);
    let target = &true_left * &true_right;
    let initial_left = random_nonnegative(rows, rank, &mut rng);

    ProblemInstance {
        target,
        initial_left,
        true_left,
        true_right,
        seed,
    }
}
