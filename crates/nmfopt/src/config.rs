//! Run configuration.
//!
//! A [`RunConfig`] describes one demonstration run: problem shape, seed,
//! iteration count and subproblem solver. It can be loaded from JSON;
//! missing fields take their defaults.
//!
//! ```json
//! {
//!   "rows": 10,
//!   "cols": 10,
//!   "rank": 5,
//!   "iterations": 30,
//!   "seed": 0,
//!   "solver": { "kind": "cvx", "max_iterations": 10000 }
//! }
//! ```

use crate::error::ConfigError;
use crate::generate::Dimensions;
use nmfopt_core::{
    solver::{NnlsSolver, SolverConfig},
    types::Scalar,
};
use nmfopt_solvers::{ActiveSet, CvxSolver, ProjectedGradient};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Available subproblem solvers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    /// Convex program per column, solved by Clarabel through cvxrust
    #[default]
    Cvx,
    /// Lawson–Hanson active set
    ActiveSet,
    /// FISTA projected gradient
    ProjectedGradient,
}

impl SolverKind {
    /// Default tolerance of the solver, in f64.
    pub fn default_tolerance(self) -> f64 {
        match self {
            Self::ActiveSet => <f64 as Scalar>::DEFAULT_TOLERANCE,
            Self::Cvx | Self::ProjectedGradient => <f64 as Scalar>::DEFAULT_GRADIENT_TOLERANCE,
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cvx => write!(f, "cvx"),
            Self::ActiveSet => write!(f, "active-set"),
            Self::ProjectedGradient => write!(f, "projected-gradient"),
        }
    }
}

impl FromStr for SolverKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "cvx" | "cvxrust" | "clarabel" => Ok(Self::Cvx),
            "active-set" | "lawson-hanson" => Ok(Self::ActiveSet),
            "projected-gradient" | "fista" => Ok(Self::ProjectedGradient),
            other => Err(ConfigError::invalid(
                "solver",
                format!("unknown solver '{other}', expected cvx, active-set or projected-gradient"),
            )),
        }
    }
}

/// Subproblem solver settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SolverSettings {
    /// Which solver to use
    pub kind: SolverKind,
    /// Iteration budget per subproblem
    pub max_iterations: usize,
    /// Optimality tolerance; the solver's default when absent
    pub tolerance: Option<f64>,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            kind: SolverKind::default(),
            max_iterations: 10_000,
            tolerance: None,
        }
    }
}

impl SolverSettings {
    /// Effective tolerance.
    pub fn effective_tolerance(&self) -> f64 {
        self.tolerance.unwrap_or_else(|| self.kind.default_tolerance())
    }

    /// Solver configuration in the working precision.
    pub fn solver_config<T: Scalar>(&self) -> SolverConfig<T> {
        SolverConfig::new()
            .with_max_iterations(self.max_iterations)
            .with_tolerance(<T as Scalar>::from_f64(self.effective_tolerance()))
    }

    /// Instantiate the configured solver.
    pub fn build<T: Scalar>(&self) -> Box<dyn NnlsSolver<T>> {
        let config = self.solver_config();
        match self.kind {
            SolverKind::Cvx => Box::new(CvxSolver::new(config)),
            SolverKind::ActiveSet => Box::new(ActiveSet::new(config)),
            SolverKind::ProjectedGradient => Box::new(ProjectedGradient::new(config)),
        }
    }
}

/// Configuration of one factorization run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Rows m of the target
    pub rows: usize,
    /// Columns n of the target
    pub cols: usize,
    /// Inner rank k
    pub rank: usize,
    /// Number of alternating iterations
    pub iterations: usize,
    /// Random seed for problem generation
    pub seed: u64,
    /// Pass the current factor to the solver as a warm start
    pub warm_start: bool,
    /// Subproblem solver
    pub solver: SolverSettings,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            rank: 5,
            iterations: 30,
            seed: 0,
            warm_start: true,
            solver: SolverSettings::default(),
        }
    }
}

impl RunConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Problem shape.
    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.rows, self.cols, self.rank)
    }

    /// Check that every value is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("rows", self.rows),
            ("cols", self.cols),
            ("rank", self.rank),
            ("iterations", self.iterations),
        ] {
            if value == 0 {
                return Err(ConfigError::invalid(name, "must be at least 1"));
            }
        }
        if let Some(tolerance) = self.solver.tolerance {
            if !tolerance.is_finite() || tolerance < 0.0 {
                return Err(ConfigError::invalid(
                    "solver.tolerance",
                    format!("must be finite and nonnegative, got {tolerance}"),
                ));
            }
        }
        Ok(())
    }
}
