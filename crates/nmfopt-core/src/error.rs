//! Error types for subproblem solvers and factorization runs.
//!
//! Solvers report budget exhaustion through [`SolveStatus`](crate::solver::SolveStatus);
//! the errors here are reserved for malformed problems and for runs that
//! cannot produce a factorization.

use crate::block::Block;
use crate::solver::SolveStatus;
use thiserror::Error;

/// Errors that can occur inside a nonnegative least squares solve.
#[derive(Debug, Clone, Error)]
pub enum SolverError {
    /// Dimension mismatch between the design, target or warm start.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimensions
        expected: String,
        /// Actual dimensions
        actual: String,
    },

    /// Invalid solver configuration.
    ///
    /// This error occurs when the solver is configured with invalid
    /// parameters (e.g., negative or non-finite tolerance).
    #[error("Invalid solver configuration: {reason}")]
    InvalidConfiguration {
        /// Description of the configuration error
        reason: String,
        /// Name of the invalid parameter
        parameter: String,
        /// Value that was invalid
        value: String,
    },

    /// Numerical failure that prevents the solver from producing any iterate.
    #[error("Numerical failure: {reason}")]
    Numerical {
        /// Description of the numerical issue
        reason: String,
    },
}

impl SolverError {
    /// Create a DimensionMismatch error.
    pub fn dimension_mismatch<S1, S2>(expected: S1, actual: S2) -> Self
    where
        S1: std::fmt::Display,
        S2: std::fmt::Display,
    {
        Self::DimensionMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create an InvalidConfiguration error.
    pub fn invalid_configuration<S1, S2, S3>(reason: S1, parameter: S2, value: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self::InvalidConfiguration {
            reason: reason.into(),
            parameter: parameter.into(),
            value: value.into(),
        }
    }

    /// Create a Numerical error with a custom reason.
    pub fn numerical<S: Into<String>>(reason: S) -> Self {
        Self::Numerical {
            reason: reason.into(),
        }
    }
}

/// Errors that terminate an alternating factorization run.
#[derive(Debug, Clone, Error)]
pub enum FactorizationError {
    /// The subproblem solver did not certify optimality.
    ///
    /// The run is aborted immediately; no factors are returned.
    #[error("Solver '{solver}' did not reach an optimal solution at iteration {iteration} (solving for {block}): status {status}")]
    SolverNonOptimal {
        /// One-based iteration index of the failed subproblem
        iteration: usize,
        /// Factor that was free in the failed subproblem
        block: Block,
        /// Name of the solver
        solver: String,
        /// Status reported by the solver
        status: SolveStatus,
    },

    /// Input matrices violate the problem's assumptions.
    #[error("Invalid input {name}: {reason}")]
    InvalidInput {
        /// Name of the offending input
        name: String,
        /// Description of the violation
        reason: String,
    },

    /// Invalid run configuration.
    #[error("Invalid run configuration: {parameter} = {value} ({reason})")]
    InvalidConfiguration {
        /// Description of the configuration error
        reason: String,
        /// Name of the invalid parameter
        parameter: String,
        /// Value that was invalid
        value: String,
    },

    /// Propagated solver error.
    #[error("Subproblem solver failed: {0}")]
    Solver(#[from] SolverError),
}

impl FactorizationError {
    /// Create a SolverNonOptimal error.
    pub fn solver_non_optimal<S: Into<String>>(
        iteration: usize,
        block: Block,
        solver: S,
        status: SolveStatus,
    ) -> Self {
        Self::SolverNonOptimal {
            iteration,
            block,
            solver: solver.into(),
            status,
        }
    }

    /// Create an InvalidInput error.
    pub fn invalid_input<S1: Into<String>, S2: Into<String>>(name: S1, reason: S2) -> Self {
        Self::InvalidInput {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfiguration error.
    pub fn invalid_configuration<S1, S2, S3>(reason: S1, parameter: S2, value: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self::InvalidConfiguration {
            reason: reason.into(),
            parameter: parameter.into(),
            value: value.into(),
        }
    }

    /// One-based iteration at which the run failed, if the failure was a solve.
    pub fn failed_iteration(&self) -> Option<usize> {
        match self {
            Self::SolverNonOptimal { iteration, .. } => Some(*iteration),
            _ => None,
        }
    }
}

/// Result type alias for solver operations.
pub type SolverResult<T> = std::result::Result<T, SolverError>;

/// Result type alias for factorization runs.
pub type Result<T> = std::result::Result<T, FactorizationError>;
