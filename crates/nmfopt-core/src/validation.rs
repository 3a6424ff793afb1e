//! Numerical validation of factorization inputs and outputs.
//!
//! The driver validates its inputs before the first solve; tests use the
//! same tools to verify that returned factors are nonnegative within
//! tolerance.

use crate::{
    error::{FactorizationError, Result},
    types::{DMatrix, Scalar},
};
use num_traits::Float;

/// Results from a nonnegativity check.
#[derive(Debug, Clone, PartialEq)]
pub struct NonnegativityCheck<T> {
    /// Smallest entry of the matrix (None for an empty matrix)
    pub min_entry: Option<T>,
    /// Number of entries below `-tolerance`
    pub violations: usize,
    /// Whether the check passed
    pub passed: bool,
}

/// Validation tools for factor and target matrices.
pub struct MatrixValidator;

impl MatrixValidator {
    /// Checks every entry against `-tolerance`.
    pub fn check_nonnegativity<T: Scalar>(matrix: &DMatrix<T>, tolerance: T) -> NonnegativityCheck<T> {
        let floor = -tolerance;
        let mut min_entry: Option<T> = None;
        let mut violations = 0;
        for &value in matrix.iter() {
            min_entry = Some(match min_entry {
                Some(current) => <T as Float>::min(current, value),
                None => value,
            });
            if value < floor {
                violations += 1;
            }
        }
        NonnegativityCheck {
            min_entry,
            violations,
            passed: violations == 0,
        }
    }

    /// Fails unless every entry is finite.
    pub fn require_finite<T: Scalar>(name: &str, matrix: &DMatrix<T>) -> Result<()> {
        if let Some(index) = matrix.iter().position(|v| !<T as Float>::is_finite(*v)) {
            let (row, col) = (index % matrix.nrows(), index / matrix.nrows());
            return Err(FactorizationError::invalid_input(
                name,
                format!("entry ({row}, {col}) is not finite"),
            ));
        }
        Ok(())
    }

    /// Fails unless every entry is at least `-tolerance`.
    pub fn require_nonnegative<T: Scalar>(name: &str, matrix: &DMatrix<T>, tolerance: T) -> Result<()> {
        let check = Self::check_nonnegativity(matrix, tolerance);
        if !check.passed {
            return Err(FactorizationError::invalid_input(
                name,
                format!(
                    "{} negative entries, minimum {}",
                    check.violations,
                    check.min_entry.unwrap_or_else(T::zero)
                ),
            ));
        }
        Ok(())
    }

    /// Fails unless the matrix has the expected shape and is not empty.
    pub fn require_shape<T: Scalar>(name: &str, matrix: &DMatrix<T>, expected: (usize, usize)) -> Result<()> {
        if matrix.shape() != expected {
            return Err(FactorizationError::invalid_input(
                name,
                format!(
                    "expected shape {}x{}, got {}x{}",
                    expected.0,
                    expected.1,
                    matrix.nrows(),
                    matrix.ncols()
                ),
            ));
        }
        if matrix.is_empty() {
            return Err(FactorizationError::invalid_input(name, "matrix is empty"));
        }
        Ok(())
    }
}
