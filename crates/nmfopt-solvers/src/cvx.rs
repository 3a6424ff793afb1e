//! Nonnegative least squares through the `cvxrust` modelling layer.
//!
//! Each column `b_j` of the target becomes the convex program
//!
//! ```text
//! minimize    ‖C·w − b_j‖²
//! subject to  w ≥ 0
//! ```
//!
//! which `cvxrust` canonicalizes and hands to the Clarabel interior point
//! solver. Clarabel statuses are mapped onto [`SolveStatus`]: a solved
//! program is `Optimal`, an exhausted iteration or time budget is
//! `IterationLimit`, and anything else (numerical trouble, an inaccurate
//! "almost solved" stop) is `NumericalError`.
//!
//! Interior point iterates sit strictly inside the feasible set, so entries
//! at the bound come back as small positives. Returned columns are clamped
//! to `w ≥ 0` against rounding.

use cvxrust::prelude::{constant_dmatrix, constant_vec, constraint, matmul, sum_squares, variable, Problem};
use cvxrust::prelude::{Array, CvxError, Expr, Settings};
use nmfopt_core::{
    error::{SolverError, SolverResult},
    problem::NnlsProblem,
    solver::{NnlsSolution, NnlsSolver, SolveStatus, SolverConfig},
    types::{DMatrix, Scalar},
};
use num_traits::Float;
use std::time::Instant;

/// NNLS solver backed by `cvxrust` and Clarabel.
///
/// `max_iterations` bounds the interior point iterations of each column
/// solve and `tolerance` sets both the absolute and relative duality gap
/// Clarabel must reach. The warm start is ignored apart from a shape check.
///
/// # Examples
///
/// ```rust
/// use nmfopt_core::prelude::*;
/// use nmfopt_solvers::CvxSolver;
///
/// let design = DMatrix::<f64>::from_row_slice(3, 2, &[1.0, 0.0, 0.0, 1.0, 1.0, 1.0]);
/// let target = DMatrix::<f64>::from_row_slice(3, 1, &[1.0, -2.0, -1.0]);
/// let problem = NnlsProblem::new(&design, &target).unwrap();
///
/// let solution = CvxSolver::default().solve(&problem, None).unwrap();
/// assert!(solution.is_optimal());
/// assert!(solution.value.iter().all(|&v| v >= 0.0));
/// ```
#[derive(Debug, Clone)]
pub struct CvxSolver<T: Scalar> {
    config: SolverConfig<T>,
}

impl<T: Scalar> Default for CvxSolver<T> {
    fn default() -> Self {
        Self::new(SolverConfig::new().with_tolerance(T::DEFAULT_GRADIENT_TOLERANCE))
    }
}

impl<T: Scalar> CvxSolver<T> {
    /// Creates a new solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }

    fn settings(&self) -> Settings {
        let tolerance = <T as Scalar>::to_f64(self.config.tolerance);
        Settings {
            max_iter: u32::try_from(self.config.max_iterations).unwrap_or(u32::MAX),
            tol_gap_abs: tolerance,
            tol_gap_rel: tolerance,
            ..Settings::default()
        }
    }
}

/// Outcome of one column program.
enum ColumnOutcome {
    Solved { values: Vec<f64>, iterations: usize },
    Stopped(SolveStatus),
}

fn solve_column(design: &Expr, column: Vec<f64>, vars: usize, settings: Settings) -> SolverResult<ColumnOutcome> {
    let w = variable(vars);
    let b = constant_vec(column);
    let residual = matmul(design, &w) - &b;

    let solution = match Problem::minimize(sum_squares(&residual))
        .constraint(constraint!(w >= 0.0))
        .solve_with(settings)
    {
        Ok(solution) => solution,
        Err(err) => return stopped_status(err).map(ColumnOutcome::Stopped),
    };

    let id = w
        .variable_id()
        .ok_or_else(|| SolverError::numerical("cvxrust variable has no identifier"))?;
    let values = match solution.get_value(id) {
        Some(Array::Scalar(v)) => vec![*v],
        Some(Array::Dense(m)) => m.iter().copied().collect(),
        Some(Array::Sparse(_)) | None => {
            return Err(SolverError::numerical("cvxrust returned no dense value for the column"));
        }
    };
    if values.len() != vars {
        return Err(SolverError::dimension_mismatch(
            format!("column of {vars} values"),
            format!("{} values", values.len()),
        ));
    }

    Ok(ColumnOutcome::Solved {
        values,
        iterations: solution.iterations as usize,
    })
}

/// Status for a program `cvxrust` reported as not optimal.
///
/// Modelling errors mean the program itself is malformed and are returned
/// as errors.
fn stopped_status(err: CvxError) -> SolverResult<SolveStatus> {
    match err {
        CvxError::SolverError(message) if message.contains("Maximum iterations") => Ok(SolveStatus::IterationLimit),
        CvxError::SolverError(_) | CvxError::NumericalError(_) => Ok(SolveStatus::NumericalError),
        other @ (CvxError::NotDcp(_) | CvxError::ShapeMismatch { .. } | CvxError::InvalidProblem(_)) => {
            Err(SolverError::numerical(format!("cvxrust rejected the subproblem: {other}")))
        }
    }
}

impl<T: Scalar> NnlsSolver<T> for CvxSolver<T> {
    fn name(&self) -> &str {
        "cvxrust (Clarabel)"
    }

    fn solve(
        &mut self,
        problem: &NnlsProblem<'_, T>,
        warm_start: Option<&DMatrix<T>>,
    ) -> SolverResult<NnlsSolution<T>> {
        self.config.validate()?;
        if let Some(start) = warm_start {
            problem.check_shape(start)?;
        }

        let start = Instant::now();
        let (vars, cols) = problem.solution_shape();
        let design = constant_dmatrix(problem.design().map(<T as Scalar>::to_f64));
        let target = problem.target();
        let mut value = DMatrix::<T>::zeros(vars, cols);
        let mut iterations = 0;
        let mut status = SolveStatus::Optimal;

        for col in 0..cols {
            let column: Vec<f64> = target.column(col).iter().map(|v| <T as Scalar>::to_f64(*v)).collect();
            match solve_column(&design, column, vars, self.settings())? {
                ColumnOutcome::Solved {
                    values,
                    iterations: used,
                } => {
                    for (row, v) in values.into_iter().enumerate() {
                        value[(row, col)] = <T as Float>::max(<T as Scalar>::from_f64(v), T::zero());
                    }
                    iterations += used;
                }
                ColumnOutcome::Stopped(stopped) => {
                    tracing::debug!(
                        solver = self.name(),
                        column = col,
                        status = %stopped,
                        "column solve stopped before optimality"
                    );
                    if stopped == SolveStatus::IterationLimit {
                        iterations += self.config.max_iterations;
                    }
                    status = stopped;
                    break;
                }
            }
        }

        let objective = problem.objective(&value);
        Ok(NnlsSolution::new(value, objective, status, iterations).with_duration(start.elapsed()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ActiveSet;
    use approx::assert_relative_eq;
    use nmfopt_core::test_utils::random_nnls_pair;

    #[test]
    fn test_constrained_line_fit() {
        // y = w0 + w1·x through five points; the fit is interior to w ≥ 0.
        let design = DMatrix::from_row_slice(5, 2, &[1.0, 1.0, 1.0, 2.0, 1.0, 3.0, 1.0, 4.0, 1.0, 5.0]);
        let target = DMatrix::from_row_slice(5, 1, &[3.1, 5.2, 6.8, 9.1, 10.9]);
        let problem = NnlsProblem::new(&design, &target).unwrap();

        let solution = CvxSolver::default().solve(&problem, None).unwrap();
        let exact = ActiveSet::default().solve(&problem, None).unwrap();
        assert!(solution.is_optimal());
        assert!(solution.iterations > 0);
        assert_relative_eq!(solution.value, exact.value, epsilon = 1e-5);
    }

    #[test]
    fn test_negative_target_gives_zero() {
        let design = DMatrix::from_row_slice(2, 2, &[1.0, 0.5, 0.5, 1.0]);
        let target = DMatrix::from_row_slice(2, 1, &[-1.0, -2.0]);
        let problem = NnlsProblem::new(&design, &target).unwrap();

        let solution = CvxSolver::default().solve(&problem, None).unwrap();
        assert!(solution.is_optimal());
        assert!(solution.value.iter().all(|&v| (0.0..1e-6).contains(&v)));
        assert_relative_eq!(solution.objective, problem.objective(&DMatrix::zeros(2, 1)), epsilon = 1e-6);
    }

    #[test]
    fn test_single_variable_column() {
        let design = DMatrix::from_row_slice(3, 1, &[1.0, 2.0, 2.0]);
        let target = DMatrix::from_row_slice(3, 2, &[1.0, -1.0, 2.0, -2.0, 2.0, -2.0]);
        let problem = NnlsProblem::new(&design, &target).unwrap();

        let solution = CvxSolver::default().solve(&problem, None).unwrap();
        assert!(solution.is_optimal());
        assert_relative_eq!(solution.value[(0, 0)], 1.0, epsilon = 1e-6);
        assert!(solution.value[(0, 1)] < 1e-6);
    }

    #[test]
    fn test_agrees_with_active_set() {
        for seed in 0..3 {
            let (design, target) = random_nnls_pair(8, 4, 3, seed);
            let problem = NnlsProblem::new(&design, &target).unwrap();

            let cvx = CvxSolver::default().solve(&problem, None).unwrap();
            let exact = ActiveSet::default().solve(&problem, None).unwrap();
            assert!(cvx.is_optimal(), "seed {seed}");
            assert_eq!(cvx.value.shape(), (4, 3));
            assert_relative_eq!(cvx.objective, exact.objective, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_zero_budget_reports_iteration_limit() {
        let (design, target) = random_nnls_pair(6, 3, 2, 4);
        let problem = NnlsProblem::new(&design, &target).unwrap();

        let mut solver = CvxSolver::new(SolverConfig::new().with_max_iterations(0));
        let solution = solver.solve(&problem, None).unwrap();
        assert_eq!(solution.status, SolveStatus::IterationLimit);
        assert!(!solution.is_optimal());
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            stopped_status(CvxError::SolverError("Maximum iterations reached".into())).unwrap(),
            SolveStatus::IterationLimit
        );
        assert_eq!(
            stopped_status(CvxError::SolverError("Unknown solver status".into())).unwrap(),
            SolveStatus::NumericalError
        );
        assert_eq!(
            stopped_status(CvxError::NumericalError("ill conditioned".into())).unwrap(),
            SolveStatus::NumericalError
        );
        assert!(matches!(
            stopped_status(CvxError::NotDcp("objective".into())),
            Err(SolverError::Numerical { .. })
        ));
    }

    #[test]
    fn test_settings_follow_config() {
        let solver = CvxSolver::<f64>::new(SolverConfig::new().with_max_iterations(25).with_tolerance(1e-6));
        let settings = solver.settings();
        assert_eq!(settings.max_iter, 25);
        assert_eq!(settings.tol_gap_abs, 1e-6);
        assert_eq!(settings.tol_gap_rel, 1e-6);

        let huge = CvxSolver::<f64>::new(SolverConfig::new().with_max_iterations(usize::MAX));
        assert_eq!(huge.settings().max_iter, u32::MAX);
    }

    #[test]
    fn test_rejects_misshaped_warm_start() {
        let design = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        let target = DMatrix::from_row_slice(2, 1, &[1.0, 1.0]);
        let problem = NnlsProblem::new(&design, &target).unwrap();

        let err = CvxSolver::default()
            .solve(&problem, Some(&DMatrix::zeros(3, 1)))
            .unwrap_err();
        assert!(matches!(err, SolverError::DimensionMismatch { .. }));
    }
}
