//! Nonnegative least squares solvers for alternating factorization.
//!
//! This crate provides concrete implementations of the
//! [`NnlsSolver`](nmfopt_core::solver::NnlsSolver) trait.
//!
//! # Available Solvers
//!
//! - **cvxrust**: each column posed as a convex program and handed to the
//!   Clarabel interior point solver; the default subproblem solver
//! - **Active Set**: Lawson–Hanson, exact to machine precision, column-wise
//! - **Projected Gradient**: FISTA with restart, all columns at once,
//!   accepts a warm start
//!
//! # Examples
//!
//! ```rust
//! use nmfopt_core::prelude::*;
//! use nmfopt_solvers::{ActiveSet, ProjectedGradient};
//!
//! let design = DMatrix::<f64>::from_row_slice(3, 2, &[1.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
//! let target = DMatrix::<f64>::from_row_slice(3, 1, &[2.0, 3.0, 5.0]);
//! let problem = NnlsProblem::new(&design, &target).unwrap();
//!
//! let exact = ActiveSet::new(SolverConfig::new()).solve(&problem, None).unwrap();
//! let approx = ProjectedGradient::default().solve(&problem, None).unwrap();
//! assert!(exact.is_optimal() && approx.is_optimal());
//! assert!((exact.objective - approx.objective).abs() < 1e-6);
//! ```

pub mod active_set;
pub mod cvx;
pub mod projected_gradient;

// Re-export main solvers for convenience
pub use active_set::ActiveSet;
pub use cvx::CvxSolver;
pub use projected_gradient::ProjectedGradient;

// Re-export commonly used items from core
pub use nmfopt_core::solver::{NnlsSolution, NnlsSolver, SolveStatus, SolverConfig};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exports() {
        let config = SolverConfig::<f64>::new().with_max_iterations(10);
        let exact = ActiveSet::new(config);
        let approx = ProjectedGradient::<f64>::default();
        let conic = CvxSolver::<f64>::default();
        assert_eq!(exact.name(), "Active Set NNLS");
        assert_eq!(conic.name(), "cvxrust (Clarabel)");
        assert_eq!(approx.name(), "Projected Gradient (FISTA)");
        assert_eq!(exact.config().max_iterations, 10);
    }
}
