//! # nmfopt
//!
//! Nonnegative matrix factorization by alternating nonnegative least squares.
//!
//! Given a nonnegative m×n matrix `A`, an inner rank k and an initial left
//! factor `Y0`, the driver alternates between solving for `X ≥ 0` with `Y`
//! fixed and for `Y ≥ 0` with `X` fixed, recording the Frobenius residual
//! `‖A − Y·X‖_F` after every solve.
//!
//! ## Crates
//!
//! - `nmfopt-core`: scalar types, errors, the [`NnlsSolver`](nmfopt_core::solver::NnlsSolver)
//!   interface, callbacks and input validation
//! - `nmfopt-solvers`: cvxrust-backed, active set and projected gradient
//!   subproblem solvers
//! - `nmfopt` (this crate): the alternating driver, problem generation,
//!   run configuration, reporting and the `nmf-demo` binary
//!
//! ## Quick Start
//!
//! ```rust
//! use nmfopt::prelude::*;
//!
//! let instance = generate_instance::<f64>(Dimensions::new(10, 10, 5), 0);
//! let mut driver = AlternatingMinimization::new(ActiveSet::default(), 30);
//! let result = driver.factorize(&instance.target, &instance.initial_left).unwrap();
//!
//! assert!(result.final_residual() <= result.residuals[0] + 1e-8);
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod generate;
#[cfg(feature = "plot")]
pub mod plot;
pub mod report;
pub mod run;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::config::{RunConfig, SolverKind, SolverSettings};
    pub use crate::driver::{AlternatingMinimization, Factorization, IterationRecord};
    pub use crate::error::{ConfigError, PlotError, RunError};
    pub use crate::generate::{generate_instance, Dimensions, ProblemInstance};
    pub use crate::report::format_report;
    pub use crate::run::{run, RunOutput};
    pub use nmfopt_core::prelude::*;
    pub use nmfopt_solvers::{ActiveSet, CvxSolver, ProjectedGradient};
}
