//! Lawson–Hanson active set method for nonnegative least squares.
//!
//! This module implements the classical active set algorithm in its Gram
//! form. Each column `b` of the target is an independent problem
//!
//! ```text
//! minimize ‖b − C·z‖₂  subject to  z ≥ 0
//! ```
//!
//! # Algorithm Overview
//!
//! The method keeps a passive set P of coordinates allowed to be positive:
//! 1. Compute the dual `w = Cᵀb − CᵀC·z`
//! 2. If no coordinate outside P has `w_j` above tolerance, z is optimal
//! 3. Otherwise move the most violating coordinate into P
//! 4. Solve the unconstrained least squares problem on P
//! 5. If that solution leaves the orthant, step back along the segment to
//!    the boundary, drop the coordinates that hit zero and repeat step 4
//!
//! The method terminates in finitely many steps in exact arithmetic and
//! returns the optimum to machine precision, which makes it the reference
//! solver of the workspace.
//!
//! # Budget
//!
//! `max_iterations` bounds the number of outer iterations (step 3) per
//! column. A column that exhausts it makes the whole solve report
//! [`SolveStatus::IterationLimit`].

use nalgebra::linalg::Cholesky;
use nmfopt_core::{
    error::{SolverError, SolverResult},
    problem::NnlsProblem,
    solver::{NnlsSolution, NnlsSolver, SolveStatus, SolverConfig},
    types::{DMatrix, DVector, Scalar},
};
use num_traits::Float;
use std::time::Instant;

/// Result of solving a single column.
#[derive(Debug)]
struct ColumnOutcome<T: Scalar> {
    solution: DVector<T>,
    iterations: usize,
    status: SolveStatus,
}

/// Lawson–Hanson active set NNLS solver.
///
/// # Examples
///
/// ```rust
/// use nmfopt_core::prelude::*;
/// use nmfopt_solvers::ActiveSet;
///
/// let design = DMatrix::<f64>::from_row_slice(2, 2, &[1.0, 1.0, 1.0, -1.0]);
/// let target = DMatrix::<f64>::from_row_slice(2, 1, &[0.0, 2.0]);
/// let problem = NnlsProblem::new(&design, &target).unwrap();
///
/// let mut solver = ActiveSet::new(SolverConfig::new());
/// let solution = solver.solve(&problem, None).unwrap();
/// assert!(solution.is_optimal());
/// assert!((solution.value[(0, 0)] - 1.0).abs() < 1e-12);
/// assert_eq!(solution.value[(1, 0)], 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct ActiveSet<T: Scalar> {
    config: SolverConfig<T>,
}

impl<T: Scalar> Default for ActiveSet<T> {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl<T: Scalar> ActiveSet<T> {
    /// Creates a new active set solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }

    fn solve_column(&self, gram: &DMatrix<T>, rhs: &DVector<T>) -> SolverResult<ColumnOutcome<T>> {
        let n = gram.nrows();
        let mut x = DVector::<T>::zeros(n);
        let mut passive = vec![false; n];
        // Coordinates that were dropped again right after entering; excluded
        // until the passive set changes, which rules out cycling on rounding.
        let mut rejected = vec![false; n];
        let scale = rhs
            .iter()
            .fold(T::one(), |acc, v| <T as Float>::max(acc, <T as Float>::abs(*v)));
        let threshold = self.config.tolerance * scale;
        let mut iterations = 0;

        loop {
            let dual = rhs - gram * &x;
            if dual.iter().any(|v| !<T as Float>::is_finite(*v)) {
                return Ok(ColumnOutcome {
                    solution: x,
                    iterations,
                    status: SolveStatus::NumericalError,
                });
            }

            let mut entering: Option<usize> = None;
            for j in (0..n).filter(|&j| !passive[j] && !rejected[j]) {
                if dual[j] > threshold && entering.map_or(true, |best| dual[j] > dual[best]) {
                    entering = Some(j);
                }
            }
            let Some(entering) = entering else {
                return Ok(ColumnOutcome {
                    solution: x,
                    iterations,
                    status: SolveStatus::Optimal,
                });
            };

            if iterations >= self.config.max_iterations {
                return Ok(ColumnOutcome {
                    solution: x,
                    iterations,
                    status: SolveStatus::IterationLimit,
                });
            }
            iterations += 1;

            passive[entering] = true;
            restore_feasibility(gram, rhs, &mut x, &mut passive)?;

            if passive[entering] {
                rejected.iter_mut().for_each(|r| *r = false);
            } else {
                rejected[entering] = true;
            }
        }
    }
}

/// Solves on the passive set and steps back into the orthant until the
/// passive solution is strictly positive.
fn restore_feasibility<T: Scalar>(
    gram: &DMatrix<T>,
    rhs: &DVector<T>,
    x: &mut DVector<T>,
    passive: &mut [bool],
) -> SolverResult<()> {
    loop {
        let candidate = solve_on_passive_set(gram, rhs, passive)?;

        let mut step = T::one();
        let mut blocking: Option<usize> = None;
        for i in (0..passive.len()).filter(|&i| passive[i]) {
            if candidate[i] <= T::zero() {
                let denom = x[i] - candidate[i];
                let ratio = if denom > T::zero() { x[i] / denom } else { T::zero() };
                if blocking.is_none() || ratio < step {
                    step = ratio;
                    blocking = Some(i);
                }
            }
        }

        let Some(blocking) = blocking else {
            x.copy_from(&candidate);
            return Ok(());
        };

        let largest = x.iter().fold(T::one(), |acc, v| <T as Float>::max(acc, *v));
        let zero_tol = <T as Scalar>::EPSILON * <T as Scalar>::from_f64(10.0) * largest;
        for i in 0..passive.len() {
            let current = x[i];
            x[i] = current + step * (candidate[i] - current);
            if passive[i] && (i == blocking || x[i] <= zero_tol) {
                passive[i] = false;
            }
            if !passive[i] {
                x[i] = T::zero();
            }
        }
    }
}

/// Unconstrained least squares restricted to the passive coordinates.
///
/// Uses a Cholesky factorization of the Gram submatrix and falls back to
/// an SVD pseudo-solve when the submatrix is numerically singular.
fn solve_on_passive_set<T: Scalar>(
    gram: &DMatrix<T>,
    rhs: &DVector<T>,
    passive: &[bool],
) -> SolverResult<DVector<T>> {
    let indices: Vec<usize> = (0..passive.len()).filter(|&i| passive[i]).collect();
    let mut full = DVector::<T>::zeros(passive.len());
    if indices.is_empty() {
        return Ok(full);
    }

    let p = indices.len();
    let sub_gram = DMatrix::from_fn(p, p, |r, c| gram[(indices[r], indices[c])]);
    let sub_rhs = DVector::from_fn(p, |r, _| rhs[indices[r]]);

    let sub_solution = match Cholesky::new(sub_gram.clone()) {
        Some(cholesky) => cholesky.solve(&sub_rhs),
        None => sub_gram
            .svd(true, true)
            .solve(&sub_rhs, <T as Scalar>::EPSILON)
            .map_err(SolverError::numerical)?,
    };

    for (r, &i) in indices.iter().enumerate() {
        full[i] = sub_solution[r];
    }
    Ok(full)
}

impl<T: Scalar> NnlsSolver<T> for ActiveSet<T> {
    fn name(&self) -> &str {
        "Active Set NNLS"
    }

    fn solve(
        &mut self,
        problem: &NnlsProblem<'_, T>,
        warm_start: Option<&DMatrix<T>>,
    ) -> SolverResult<NnlsSolution<T>> {
        self.config.validate()?;
        if let Some(start) = warm_start {
            // The active set method always starts from zero; the shape is
            // still checked so callers get consistent errors.
            problem.check_shape(start)?;
        }

        let start = Instant::now();
        let gram = problem.gram();
        let correlation = problem.correlation();
        let (rows, cols) = problem.solution_shape();
        let mut value = DMatrix::<T>::zeros(rows, cols);
        let mut iterations = 0;
        let mut status = SolveStatus::Optimal;

        for col in 0..cols {
            let rhs = correlation.column(col).into_owned();
            let outcome = self.solve_column(&gram, &rhs)?;
            value.set_column(col, &outcome.solution);
            iterations += outcome.iterations;
            if !outcome.status.is_optimal() {
                tracing::debug!(
                    solver = self.name(),
                    column = col,
                    status = %outcome.status,
                    "column solve stopped before optimality"
                );
                status = outcome.status;
                break;
            }
        }

        let objective = problem.objective(&value);
        Ok(NnlsSolution::new(value, objective, status, iterations).with_duration(start.elapsed()))
    }
}
