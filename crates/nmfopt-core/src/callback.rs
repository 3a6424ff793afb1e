//! Callback support for the alternating driver.
//!
//! Callbacks observe a factorization run. They cannot steer it: the driver
//! always performs the configured number of iterations unless a subproblem
//! fails.

use crate::block::Block;
use crate::error::Result;
use crate::types::Scalar;
use std::time::Duration;

/// Information passed to callbacks after each iteration.
#[derive(Clone, Debug)]
pub struct IterationInfo<T: Scalar> {
    /// One-based iteration index
    pub iteration: usize,

    /// Factor solved for in this iteration
    pub block: Block,

    /// Residual norm at the subproblem optimum, as reported by the solver
    pub residual: T,

    /// Residual norm at the iteration's starting point (None on iteration 1)
    pub start_residual: Option<T>,

    /// Iterations spent by the subproblem solver
    pub solver_iterations: usize,

    /// Elapsed time since the run started
    pub elapsed: Duration,
}

/// Trait for factorization callbacks.
pub trait FactorizationCallback<T: Scalar> {
    /// Called before the first iteration.
    fn on_start(&mut self, iterations: usize) -> Result<()> {
        let _ = iterations;
        Ok(())
    }

    /// Called at the end of each iteration.
    fn on_iteration_end(&mut self, info: &IterationInfo<T>) -> Result<()> {
        let _ = info;
        Ok(())
    }

    /// Called once after the last iteration with the full residual trace.
    fn on_end(&mut self, residuals: &[T]) -> Result<()> {
        let _ = residuals;
        Ok(())
    }
}

/// A no-op callback that does nothing.
pub struct NoOpCallback;

impl<T: Scalar> FactorizationCallback<T> for NoOpCallback {}

/// A callback that prints progress to stdout.
pub struct PrintProgressCallback {
    print_every: usize,
}

impl PrintProgressCallback {
    /// Create a callback printing every `print_every`-th iteration.
    pub fn new(print_every: usize) -> Self {
        Self {
            print_every: print_every.max(1),
        }
    }

    /// Line printed for an iteration.
    pub fn format_line<T: Scalar>(info: &IterationInfo<T>) -> String {
        format!("Iteration {}, residual norm {}", info.iteration, info.residual)
    }
}

impl Default for PrintProgressCallback {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<T: Scalar> FactorizationCallback<T> for PrintProgressCallback {
    fn on_iteration_end(&mut self, info: &IterationInfo<T>) -> Result<()> {
        if info.iteration % self.print_every == 0 {
            println!("{}", Self::format_line(info));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_line() {
        let info = IterationInfo {
            iteration: 3,
            block: Block::Right,
            residual: 0.5_f64,
            start_residual: Some(0.75),
            solver_iterations: 12,
            elapsed: Duration::from_millis(1),
        };
        assert_eq!(
            PrintProgressCallback::format_line(&info),
            "Iteration 3, residual norm 0.5"
        );
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let mut callback = PrintProgressCallback::new(0);
        let info = IterationInfo {
            iteration: 1,
            block: Block::Right,
            residual: 1.0_f32,
            start_residual: None,
            solver_iterations: 1,
            elapsed: Duration::ZERO,
        };
        assert!(callback.on_iteration_end(&info).is_ok());
    }
}
