//! Error types for configuration, runs and plotting.

use nmfopt_core::error::FactorizationError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a run configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Cannot read configuration file {path}: {source}")]
    Io {
        /// Path of the file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The configuration is not valid JSON for [`RunConfig`](crate::config::RunConfig).
    #[error("Malformed configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// A configuration value is out of range.
    #[error("Invalid configuration value for {parameter}: {reason}")]
    Invalid {
        /// Name of the offending parameter
        parameter: String,
        /// Description of the problem
        reason: String,
    },
}

impl ConfigError {
    /// Create an Invalid error.
    pub fn invalid<S1: Into<String>, S2: Into<String>>(parameter: S1, reason: S2) -> Self {
        Self::Invalid {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }
}

/// Errors raised by [`run`](crate::run::run).
#[derive(Debug, Error)]
pub enum RunError {
    /// The configuration was rejected before any work was done.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The factorization itself failed.
    #[error(transparent)]
    Factorization(#[from] FactorizationError),
}

/// Errors raised while rendering the residual plot.
#[derive(Debug, Error)]
pub enum PlotError {
    /// Nothing to plot.
    #[error("Residual trace is empty")]
    EmptyTrace,

    /// The drawing backend failed.
    #[error("Drawing failed: {0}")]
    Drawing(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use nmfopt_core::{block::Block, solver::SolveStatus};

    #[test]
    fn test_run_error_is_transparent() {
        let inner = FactorizationError::solver_non_optimal(3, Block::Right, "Active Set NNLS", SolveStatus::IterationLimit);
        let expected = inner.to_string();
        let err: RunError = inner.into();
        assert_eq!(err.to_string(), expected);

        let err: RunError = ConfigError::invalid("rank", "must be at least 1").into();
        assert_eq!(err.to_string(), "Invalid configuration value for rank: must be at least 1");
    }

    #[test]
    fn test_parse_error_conversion() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: ConfigError = parse.into();
        assert!(err.to_string().starts_with("Malformed configuration"));
    }
}
