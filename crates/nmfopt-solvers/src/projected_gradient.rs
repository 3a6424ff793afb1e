//! Accelerated projected gradient (FISTA) for nonnegative least squares.
//!
//! Minimizes `f(Z) = ½‖B − C·Z‖²_F` over `Z ≥ 0` for all columns at once.
//! Each iteration takes a gradient step of length `1/L` from the
//! extrapolated point, with `L = λ_max(CᵀC)` the Lipschitz constant of the
//! gradient, then projects onto the nonnegative orthant.
//!
//! # Restart
//!
//! Momentum is reset whenever a step increases `f` (function-value restart),
//! in which case the step is retaken from the last iterate. This keeps the
//! objective non-increasing, so a warm start is never made worse.
//!
//! # Termination
//!
//! The solve is optimal when the Frobenius norm of the projected gradient
//! drops below `tolerance · max(1, ‖CᵀB‖_F)`.

use nmfopt_core::{
    error::SolverResult,
    problem::NnlsProblem,
    solver::{NnlsSolution, NnlsSolver, SolveStatus, SolverConfig},
    types::{DMatrix, Scalar},
};
use num_traits::Float;
use std::time::Instant;

/// FISTA solver with projection onto the nonnegative orthant.
///
/// Starts from the warm start when one is provided.
#[derive(Debug, Clone)]
pub struct ProjectedGradient<T: Scalar> {
    config: SolverConfig<T>,
}

impl<T: Scalar> Default for ProjectedGradient<T> {
    fn default() -> Self {
        Self::new(SolverConfig::new().with_tolerance(T::DEFAULT_GRADIENT_TOLERANCE))
    }
}

impl<T: Scalar> ProjectedGradient<T> {
    /// Creates a new projected gradient solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}

/// `½⟨Z, G·Z⟩ − ⟨Z, CᵀB⟩`, which differs from `½‖B − C·Z‖²` by a constant.
fn reduced_objective<T: Scalar>(z: &DMatrix<T>, gram: &DMatrix<T>, correlation: &DMatrix<T>) -> T {
    let half = <T as Scalar>::from_f64(0.5);
    let gz = gram * z;
    half * z.dot(&gz) - z.dot(correlation)
}

fn project_nonnegative<T: Scalar>(z: &mut DMatrix<T>) {
    z.apply(|v| *v = <T as Float>::max(*v, T::zero()));
}

/// Largest eigenvalue of the symmetric Gram matrix.
fn lipschitz_constant<T: Scalar>(gram: &DMatrix<T>) -> T {
    gram.symmetric_eigenvalues()
        .iter()
        .fold(T::zero(), |acc, v| <T as Float>::max(acc, *v))
}

impl<T: Scalar> NnlsSolver<T> for ProjectedGradient<T> {
    fn name(&self) -> &str {
        "Projected Gradient (FISTA)"
    }

    fn solve(
        &mut self,
        problem: &NnlsProblem<'_, T>,
        warm_start: Option<&DMatrix<T>>,
    ) -> SolverResult<NnlsSolution<T>> {
        self.config.validate()?;
        let start = Instant::now();
        let gram = problem.gram();
        let correlation = problem.correlation();
        let (rows, cols) = problem.solution_shape();

        let mut z = match warm_start {
            Some(initial) => {
                problem.check_shape(initial)?;
                let mut initial = initial.clone();
                project_nonnegative(&mut initial);
                initial
            }
            None => DMatrix::zeros(rows, cols),
        };

        let lipschitz = lipschitz_constant(&gram);
        let threshold = self.config.tolerance * <T as Float>::max(T::one(), correlation.norm());
        let mut status = SolveStatus::IterationLimit;
        let mut iterations = 0;

        if lipschitz <= T::zero() {
            // Zero design: every feasible Z is optimal, keep the start.
            status = SolveStatus::Optimal;
        } else {
            let step = T::one() / lipschitz;
            let mut extrapolated = z.clone();
            let mut momentum = T::one();
            let mut value = reduced_objective(&z, &gram, &correlation);

            loop {
                let pg_norm = problem.projected_gradient_norm(&z, &gram, &correlation);
                if !<T as Float>::is_finite(pg_norm) {
                    status = SolveStatus::NumericalError;
                    break;
                }
                if pg_norm <= threshold {
                    status = SolveStatus::Optimal;
                    break;
                }
                if iterations >= self.config.max_iterations {
                    break;
                }
                iterations += 1;

                let gradient = &gram * &extrapolated - &correlation;
                let mut next = &extrapolated - gradient * step;
                project_nonnegative(&mut next);
                let mut next_value = reduced_objective(&next, &gram, &correlation);

                if next_value > value {
                    momentum = T::one();
                    let gradient = &gram * &z - &correlation;
                    next = &z - gradient * step;
                    project_nonnegative(&mut next);
                    next_value = reduced_objective(&next, &gram, &correlation);
                }

                let four = <T as Scalar>::from_f64(4.0);
                let two = <T as Scalar>::from_f64(2.0);
                let next_momentum = (T::one() + <T as Float>::sqrt(T::one() + four * momentum * momentum)) / two;
                let beta = (momentum - T::one()) / next_momentum;
                extrapolated = &next + (&next - &z) * beta;

                z = next;
                value = next_value;
                momentum = next_momentum;
            }
        }

        if !status.is_optimal() {
            tracing::debug!(
                solver = self.name(),
                iterations,
                status = %status,
                "solve stopped before optimality"
            );
        }

        let objective = problem.objective(&z);
        Ok(NnlsSolution::new(z, objective, status, iterations).with_duration(start.elapsed()))
    }
}
