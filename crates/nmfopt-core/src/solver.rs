//! Subproblem solver interface.
//!
//! The alternating driver never solves a least squares problem itself. It
//! poses each half-step as an [`NnlsProblem`] and hands it to an
//! [`NnlsSolver`], which reports the minimizer, its objective value and a
//! [`SolveStatus`].
//!
//! # Status versus error
//!
//! Running out of iterations is an expected outcome and is reported as
//! [`SolveStatus::IterationLimit`] inside an `Ok` solution. The caller
//! decides whether a non-optimal status is fatal. `Err` is reserved for
//! problems that cannot be attempted at all (mismatched shapes, invalid
//! configuration).

use crate::{
    error::{SolverError, SolverResult},
    problem::NnlsProblem,
    types::{DMatrix, Scalar},
};
use num_traits::Float;
use std::fmt::{self, Debug};
use std::time::Duration;

/// Outcome of a subproblem solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolveStatus {
    /// Optimality conditions satisfied within tolerance
    Optimal,
    /// Iteration budget exhausted before optimality was certified
    IterationLimit,
    /// NaN or infinity encountered in an iterate
    NumericalError,
}

impl SolveStatus {
    /// True only for [`SolveStatus::Optimal`].
    pub fn is_optimal(self) -> bool {
        matches!(self, Self::Optimal)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Optimal => "optimal",
            Self::IterationLimit => "iteration limit",
            Self::NumericalError => "numerical error",
        };
        f.write_str(text)
    }
}

/// Budget and tolerance shared by the subproblem solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SolverConfig<T> {
    /// Maximum number of solver iterations per solve
    pub max_iterations: usize,
    /// Relative optimality tolerance
    pub tolerance: T,
}

impl<T: Scalar> Default for SolverConfig<T> {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            tolerance: T::DEFAULT_TOLERANCE,
        }
    }
}

impl<T: Scalar> SolverConfig<T> {
    /// Creates a configuration with default budget and tolerance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the iteration budget.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Sets the relative optimality tolerance.
    pub fn with_tolerance(mut self, tolerance: T) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Rejects negative or non-finite tolerances.
    pub fn validate(&self) -> SolverResult<()> {
        if !<T as Float>::is_finite(self.tolerance) || self.tolerance < T::zero() {
            return Err(SolverError::invalid_configuration(
                "tolerance must be finite and nonnegative",
                "tolerance",
                self.tolerance.to_string(),
            ));
        }
        Ok(())
    }
}

/// Minimizer reported by a subproblem solver.
#[derive(Debug, Clone)]
pub struct NnlsSolution<T: Scalar> {
    /// The final iterate `Z`
    pub value: DMatrix<T>,

    /// Objective `‖B − C·Z‖_F` at `value`
    pub objective: T,

    /// Termination status
    pub status: SolveStatus,

    /// Iterations performed (summed over columns for column-wise solvers)
    pub iterations: usize,

    /// Wall-clock time spent in the solve
    pub duration: Duration,
}

impl<T: Scalar> NnlsSolution<T> {
    /// Creates a solution record.
    pub fn new(value: DMatrix<T>, objective: T, status: SolveStatus, iterations: usize) -> Self {
        Self {
            value,
            objective,
            status,
            iterations,
            duration: Duration::ZERO,
        }
    }

    /// Sets the elapsed time.
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// True if the solver certified optimality.
    pub fn is_optimal(&self) -> bool {
        self.status.is_optimal()
    }
}

/// Solver for `min ‖B − C·Z‖_F subject to Z ≥ 0`.
pub trait NnlsSolver<T>: Debug
where
    T: Scalar,
{
    /// Returns a human-readable name identifying the algorithm.
    ///
    /// Used for logging and in error messages.
    fn name(&self) -> &str;

    /// Solves the subproblem.
    ///
    /// `warm_start`, when given, has the shape of `Z` and is a feasible
    /// starting point; solvers are free to ignore it.
    fn solve(
        &mut self,
        problem: &NnlsProblem<'_, T>,
        warm_start: Option<&DMatrix<T>>,
    ) -> SolverResult<NnlsSolution<T>>;
}

impl<T, S> NnlsSolver<T> for Box<S>
where
    T: Scalar,
    S: NnlsSolver<T> + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn solve(
        &mut self,
        problem: &NnlsProblem<'_, T>,
        warm_start: Option<&DMatrix<T>>,
    ) -> SolverResult<NnlsSolution<T>> {
        (**self).solve(problem, warm_start)
    }
}
