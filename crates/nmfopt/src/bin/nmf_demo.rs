//! Demonstration run: factorize a random rank-k product and report the result.

use anyhow::{Context, Result};
use clap::Parser;
use nmfopt::prelude::*;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "nmf-demo", version, about = "Alternating nonnegative matrix factorization demo")]
struct Args {
    /// JSON run configuration; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rows of the target matrix
    #[arg(long)]
    rows: Option<usize>,

    /// Columns of the target matrix
    #[arg(long)]
    cols: Option<usize>,

    /// Inner rank of the factorization
    #[arg(long, short = 'k')]
    rank: Option<usize>,

    /// Number of alternating iterations
    #[arg(long, short = 'n')]
    iterations: Option<usize>,

    /// Random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Subproblem solver (cvx, active-set or projected-gradient)
    #[arg(long)]
    solver: Option<SolverKind>,

    /// Iteration budget per subproblem
    #[arg(long)]
    max_solver_iterations: Option<usize>,

    /// Subproblem optimality tolerance
    #[arg(long)]
    tolerance: Option<f64>,

    /// Solve every subproblem from scratch
    #[arg(long)]
    no_warm_start: bool,

    /// Where to write the residual plot
    #[arg(long, default_value = "residuals.png")]
    plot: PathBuf,

    /// Skip the residual plot
    #[arg(long)]
    no_plot: bool,

    /// Suppress per-iteration output and the matrix report
    #[arg(long, short)]
    quiet: bool,
}

impl Args {
    fn run_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::from_json_file(path)?,
            None => RunConfig::default(),
        };

        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(rank) = self.rank {
            config.rank = rank;
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(kind) = self.solver {
            config.solver.kind = kind;
        }
        if let Some(max_iterations) = self.max_solver_iterations {
            config.solver.max_iterations = max_iterations;
        }
        if self.tolerance.is_some() {
            config.solver.tolerance = self.tolerance;
        }
        if self.no_warm_start {
            config.warm_start = false;
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(feature = "plot")]
fn write_plot(residuals: &[f64], path: &std::path::Path) -> Result<()> {
    nmfopt::plot::plot_residuals(residuals, path)
        .with_context(|| format!("cannot write plot to {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote residual plot");
    Ok(())
}

#[cfg(not(feature = "plot"))]
fn write_plot(_residuals: &[f64], path: &std::path::Path) -> Result<()> {
    tracing::warn!(path = %path.display(), "built without the `plot` feature, skipping residual plot");
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = args.run_config()?;

    let mut callback: Box<dyn FactorizationCallback<f64>> = if args.quiet {
        Box::new(NoOpCallback)
    } else {
        Box::new(PrintProgressCallback::new(1))
    };

    let output = run(&config, callback.as_mut()).context("factorization failed")?;
    let factorization = &output.factorization;

    if args.quiet {
        println!("{}", nmfopt::report::format_final_residual(factorization));
    } else {
        print!("{}", format_report(&output.instance.target, factorization));
    }

    if !args.no_plot {
        write_plot(&factorization.residuals, &args.plot)?;
    }
    Ok(())
}
