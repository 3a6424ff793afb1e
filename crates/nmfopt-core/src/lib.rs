//! Core traits and types for nonnegative matrix factorization.
//!
//! This crate provides the foundations shared by the subproblem solvers and
//! the alternating driver. Fixing one factor of `A ≈ Y·X` turns the
//! factorization problem into a convex nonnegative least squares (NNLS)
//! problem in the other factor; everything here describes that subproblem
//! and the bookkeeping around it.
//!
//! # Modules
//!
//! - [`block`]: Which factor is free in a subproblem
//! - [`callback`]: Observation hooks for factorization runs
//! - [`error`]: Error types for solvers and runs
//! - [`problem`]: The NNLS subproblem `min ‖B − C·Z‖_F, Z ≥ 0`
//! - [`random`]: Seeded uniform matrices
//! - [`solver`]: Solver trait, configuration, status and solution record
//! - [`types`]: Scalar trait, matrix aliases and tolerance constants
//! - [`validation`]: Finiteness, shape and nonnegativity checks

pub mod block;
pub mod callback;
pub mod error;
pub mod problem;
pub mod random;
pub mod solver;
pub mod types;
pub mod validation;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export commonly used items at the crate root
pub use error::{FactorizationError, Result, SolverError, SolverResult};

/// Prelude module for convenient imports.
///
/// # Example
/// ```
/// use nmfopt_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::block::Block;
    pub use crate::callback::{FactorizationCallback, IterationInfo, NoOpCallback, PrintProgressCallback};
    pub use crate::error::{FactorizationError, Result, SolverError, SolverResult};
    pub use crate::problem::NnlsProblem;
    pub use crate::solver::{NnlsSolution, NnlsSolver, SolveStatus, SolverConfig};
    pub use crate::types::{DMatrix, DVector, Scalar};
    pub use crate::validation::{MatrixValidator, NonnegativityCheck};
}
