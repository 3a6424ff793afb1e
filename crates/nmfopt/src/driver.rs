//! Alternating minimization driver.
//!
//! Approximates a nonnegative target `A` (m×n) by `Y·X` with `Y` (m×k) and
//! `X` (k×n) both nonnegative. Each iteration fixes one factor and solves a
//! nonnegative least squares problem for the other:
//!
//! - odd iterations solve `min ‖A − Y·X‖_F` over `X ≥ 0` (design `Y`, target `A`)
//! - even iterations solve `min ‖Aᵀ − Xᵀ·Yᵀ‖_F` over `Yᵀ ≥ 0` (design `Xᵀ`, target `Aᵀ`)
//!
//! The residual recorded for an iteration is the objective the solver
//! reports at its optimum. Because every subproblem starts from the
//! previous optimum, the residual trace is non-increasing up to solver
//! tolerance.
//!
//! # Example
//!
//! ```rust
//! use nmfopt::prelude::*;
//!
//! let instance = generate_instance::<f64>(Dimensions::new(6, 5, 2), 7);
//! let mut driver = AlternatingMinimization::new(ActiveSet::default(), 6);
//! let factorization = driver
//!     .factorize(&instance.target, &instance.initial_left)
//!     .unwrap();
//!
//! assert_eq!(factorization.residuals.len(), 6);
//! assert_eq!(factorization.right.shape(), (2, 5));
//! ```

use nmfopt_core::{
    block::Block,
    callback::{FactorizationCallback, IterationInfo, NoOpCallback},
    error::{FactorizationError, Result, SolverError},
    problem::NnlsProblem,
    solver::NnlsSolver,
    types::{DMatrix, Scalar},
    validation::MatrixValidator,
};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Per-iteration record kept in the [`Factorization`] result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord<T> {
    /// One-based iteration index
    pub iteration: usize,
    /// Factor solved for
    pub block: Block,
    /// Solver-reported residual norm at the subproblem optimum
    pub residual: T,
    /// Residual norm before the solve (None on iteration 1)
    pub start_residual: Option<T>,
    /// Iterations spent by the subproblem solver
    pub solver_iterations: usize,
}

/// Result of a completed alternating minimization run.
#[derive(Debug, Clone)]
pub struct Factorization<T: Scalar> {
    /// Left factor Y (m×k)
    pub left: DMatrix<T>,
    /// Right factor X (k×n)
    pub right: DMatrix<T>,
    /// Residual norm after each iteration, in order
    pub residuals: Vec<T>,
    /// Detailed per-iteration records
    pub records: Vec<IterationRecord<T>>,
    /// Wall-clock time of the run
    pub duration: Duration,
}

impl<T: Scalar> Factorization<T> {
    /// Inner rank k.
    pub fn rank(&self) -> usize {
        self.left.ncols()
    }

    /// The product `Y·X`.
    pub fn reconstruction(&self) -> DMatrix<T> {
        &self.left * &self.right
    }

    /// The residual matrix `A − Y·X`.
    pub fn residual_matrix(&self, target: &DMatrix<T>) -> DMatrix<T> {
        target - self.reconstruction()
    }

    /// Residual norm after the last iteration.
    pub fn final_residual(&self) -> T {
        self.residuals.last().copied().unwrap_or_else(T::zero)
    }

    /// Total subproblem solver iterations across the run.
    pub fn total_solver_iterations(&self) -> usize {
        self.records.iter().map(|r| r.solver_iterations).sum()
    }
}

/// Alternating nonnegative least squares.
///
/// Generic over the subproblem solver; any [`NnlsSolver`] works, including
/// a boxed trait object chosen at runtime.
#[derive(Debug)]
pub struct AlternatingMinimization<T: Scalar, S: NnlsSolver<T>> {
    solver: S,
    iterations: usize,
    warm_start: bool,
    _marker: PhantomData<T>,
}

impl<T, S> AlternatingMinimization<T, S>
where
    T: Scalar,
    S: NnlsSolver<T>,
{
    /// Create a driver that performs `iterations` alternating solves.
    pub fn new(solver: S, iterations: usize) -> Self {
        Self {
            solver,
            iterations,
            warm_start: true,
            _marker: PhantomData,
        }
    }

    /// Pass the current value of the free factor to the solver as a warm start.
    ///
    /// Enabled by default. Solvers that ignore warm starts are unaffected.
    pub fn with_warm_start(mut self, warm_start: bool) -> Self {
        self.warm_start = warm_start;
        self
    }

    /// Number of iterations per run.
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// The subproblem solver.
    pub fn solver(&self) -> &S {
        &self.solver
    }

    /// Run the factorization without observation.
    pub fn factorize(&mut self, target: &DMatrix<T>, initial_left: &DMatrix<T>) -> Result<Factorization<T>> {
        self.factorize_with_callback(target, initial_left, &mut NoOpCallback)
    }

    /// Run the factorization, reporting each iteration to `callback`.
    ///
    /// Aborts at the first subproblem whose status is not optimal; no
    /// factors are returned in that case.
    pub fn factorize_with_callback<C>(
        &mut self,
        target: &DMatrix<T>,
        initial_left: &DMatrix<T>,
        callback: &mut C,
    ) -> Result<Factorization<T>>
    where
        C: FactorizationCallback<T> + ?Sized,
    {
        self.validate_inputs(target, initial_left)?;

        let start = Instant::now();
        let (rows, cols) = target.shape();
        let rank = initial_left.ncols();
        let target_transposed = target.transpose();

        let mut left = initial_left.clone();
        let mut right: Option<DMatrix<T>> = None;
        let mut residuals = Vec::with_capacity(self.iterations);
        let mut records = Vec::with_capacity(self.iterations);

        info!(
            rows,
            cols,
            rank,
            iterations = self.iterations,
            solver = self.solver.name(),
            "starting alternating minimization"
        );
        callback.on_start(self.iterations)?;

        for iteration in 1..=self.iterations {
            let block = Block::for_iteration(iteration);
            let start_residual = right.as_ref().map(|x| (target - &left * x).norm());

            let solution = match block {
                Block::Right => {
                    let problem = NnlsProblem::new(&left, target)?;
                    let warm = if self.warm_start { right.as_ref() } else { None };
                    self.solver.solve(&problem, warm)?
                }
                Block::Left => {
                    let fixed = right.as_ref().ok_or_else(|| {
                        FactorizationError::invalid_input("X", "right factor is undefined before the first X-step")
                    })?;
                    let design = fixed.transpose();
                    let problem = NnlsProblem::new(&design, &target_transposed)?;
                    let warm = self.warm_start.then(|| left.transpose());
                    self.solver.solve(&problem, warm.as_ref())?
                }
            };

            if !solution.is_optimal() {
                warn!(
                    iteration,
                    %block,
                    status = %solution.status,
                    solver_iterations = solution.iterations,
                    "subproblem solver did not reach optimality"
                );
                return Err(FactorizationError::solver_non_optimal(
                    iteration,
                    block,
                    self.solver.name(),
                    solution.status,
                ));
            }

            let residual = solution.objective;
            let solver_iterations = solution.iterations;
            let solved = match block {
                Block::Right => solution.value,
                Block::Left => solution.value.transpose(),
            };
            let expected = block.shape(rows, cols, rank);
            if solved.shape() != expected {
                return Err(SolverError::dimension_mismatch(
                    format!("{block} of shape {}x{}", expected.0, expected.1),
                    format!("{}x{}", solved.nrows(), solved.ncols()),
                )
                .into());
            }
            match block {
                Block::Right => right = Some(solved),
                Block::Left => left = solved,
            }

            debug!(
                iteration,
                %block,
                residual = <T as Scalar>::to_f64(residual),
                solver_iterations,
                "iteration complete"
            );

            let info = IterationInfo {
                iteration,
                block,
                residual,
                start_residual,
                solver_iterations,
                elapsed: start.elapsed(),
            };
            callback.on_iteration_end(&info)?;

            residuals.push(residual);
            records.push(IterationRecord {
                iteration,
                block,
                residual,
                start_residual,
                solver_iterations,
            });
        }

        let right = right.ok_or_else(|| {
            FactorizationError::invalid_configuration("at least one iteration is required", "iterations", "0")
        })?;
        callback.on_end(&residuals)?;

        let duration = start.elapsed();
        info!(
            final_residual = residuals.last().map_or(0.0, |r| <T as Scalar>::to_f64(*r)),
            elapsed_ms = duration.as_millis() as u64,
            "alternating minimization finished"
        );

        Ok(Factorization {
            left,
            right,
            residuals,
            records,
            duration,
        })
    }

    fn validate_inputs(&self, target: &DMatrix<T>, initial_left: &DMatrix<T>) -> Result<()> {
        if self.iterations == 0 {
            return Err(FactorizationError::invalid_configuration(
                "at least one iteration is required",
                "iterations",
                "0",
            ));
        }
        if target.is_empty() {
            return Err(FactorizationError::invalid_input("A", "matrix is empty"));
        }
        if initial_left.ncols() == 0 {
            return Err(FactorizationError::invalid_configuration(
                "inner rank must be at least 1",
                "rank",
                "0",
            ));
        }

        MatrixValidator::require_shape("Y0", initial_left, (target.nrows(), initial_left.ncols()))?;
        MatrixValidator::require_finite("A", target)?;
        MatrixValidator::require_finite("Y0", initial_left)?;
        MatrixValidator::require_nonnegative("A", target, T::NONNEGATIVITY_TOLERANCE)?;
        MatrixValidator::require_nonnegative("Y0", initial_left, T::NONNEGATIVITY_TOLERANCE)?;
        Ok(())
    }
}
