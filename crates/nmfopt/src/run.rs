//! End-to-end run: generate, factorize, collect.

use crate::config::RunConfig;
use crate::driver::{AlternatingMinimization, Factorization};
use crate::error::RunError;
use crate::generate::{generate_instance, ProblemInstance};
use nmfopt_core::callback::FactorizationCallback;
use tracing::info;

/// Everything a run produces.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// The generated problem
    pub instance: ProblemInstance<f64>,
    /// The computed factors and residual trace
    pub factorization: Factorization<f64>,
    /// Name of the subproblem solver
    pub solver: String,
}

/// Generate the instance described by `config` and factorize it.
pub fn run<C>(config: &RunConfig, callback: &mut C) -> Result<RunOutput, RunError>
where
    C: FactorizationCallback<f64> + ?Sized,
{
    config.validate()?;

    let instance = generate_instance::<f64>(config.dimensions(), config.seed);
    let solver = config.solver.build::<f64>();
    let solver_name = solver.name().to_string();
    info!(seed = config.seed, solver = %solver_name, "generated problem instance");

    let mut driver = AlternatingMinimization::new(solver, config.iterations).with_warm_start(config.warm_start);
    let factorization = driver.factorize_with_callback(&instance.target, &instance.initial_left, callback)?;
    info!(
        solver = %solver_name,
        total_solver_iterations = factorization.total_solver_iterations(),
        "run complete"
    );

    Ok(RunOutput {
        instance,
        factorization,
        solver: solver_name,
    })
}
