//! Nonnegative least squares subproblems.
//!
//! Every subproblem of the alternating scheme has the form
//!
//! ```text
//! minimize    ‖B − C·Z‖_F
//! subject to  Z ≥ 0
//! ```
//!
//! where `C` (the design, p×k) is the fixed factor and `B` (the target, p×q)
//! is the data matrix or its transpose. The X-step uses `C = Y`, `B = A`; the
//! Y-step uses `C = Xᵀ`, `B = Aᵀ` and returns `Z = Yᵀ`.

use crate::error::{SolverError, SolverResult};
use crate::types::{DMatrix, Scalar};
use num_traits::Float;

/// A borrowed nonnegative least squares problem `min ‖B − C·Z‖_F, Z ≥ 0`.
#[derive(Debug, Clone, Copy)]
pub struct NnlsProblem<'a, T: Scalar> {
    design: &'a DMatrix<T>,
    target: &'a DMatrix<T>,
}

impl<'a, T: Scalar> NnlsProblem<'a, T> {
    /// Creates a problem after checking that design and target share rows.
    pub fn new(design: &'a DMatrix<T>, target: &'a DMatrix<T>) -> SolverResult<Self> {
        if design.nrows() != target.nrows() {
            return Err(SolverError::dimension_mismatch(
                format!("target with {} rows", design.nrows()),
                format!("{} rows", target.nrows()),
            ));
        }
        if design.ncols() == 0 {
            return Err(SolverError::dimension_mismatch(
                "design with at least one column",
                "0 columns",
            ));
        }
        Ok(Self { design, target })
    }

    /// The fixed matrix `C`.
    pub fn design(&self) -> &'a DMatrix<T> {
        self.design
    }

    /// The data matrix `B`.
    pub fn target(&self) -> &'a DMatrix<T> {
        self.target
    }

    /// Number of unknowns per column of `Z`.
    pub fn num_variables(&self) -> usize {
        self.design.ncols()
    }

    /// Number of independent columns of `Z`.
    pub fn num_columns(&self) -> usize {
        self.target.ncols()
    }

    /// Shape of the unknown `Z`.
    pub fn solution_shape(&self) -> (usize, usize) {
        (self.num_variables(), self.num_columns())
    }

    /// Gram matrix `CᵀC`.
    pub fn gram(&self) -> DMatrix<T> {
        self.design.tr_mul(self.design)
    }

    /// Correlation `CᵀB`, the negated gradient of `½‖B − C·Z‖²` at `Z = 0`.
    pub fn correlation(&self) -> DMatrix<T> {
        self.design.tr_mul(self.target)
    }

    /// Residual matrix `B − C·Z`.
    pub fn residual(&self, z: &DMatrix<T>) -> DMatrix<T> {
        self.target - self.design * z
    }

    /// Objective value `‖B − C·Z‖_F`.
    pub fn objective(&self, z: &DMatrix<T>) -> T {
        self.residual(z).norm()
    }

    /// Checks that a candidate or warm start has the shape of `Z`.
    pub fn check_shape(&self, z: &DMatrix<T>) -> SolverResult<()> {
        let expected = self.solution_shape();
        if z.shape() != expected {
            return Err(SolverError::dimension_mismatch(
                format!("{}x{}", expected.0, expected.1),
                format!("{}x{}", z.nrows(), z.ncols()),
            ));
        }
        Ok(())
    }

    /// Frobenius norm of the projected gradient of `½‖B − C·Z‖²` at `Z`.
    ///
    /// Zero exactly at the KKT points of the problem: free entries have zero
    /// gradient and entries at the bound have nonnegative gradient.
    pub fn projected_gradient_norm(&self, z: &DMatrix<T>, gram: &DMatrix<T>, correlation: &DMatrix<T>) -> T {
        let gradient = gram * z - correlation;
        let mut sum = T::zero();
        for (g, x) in gradient.iter().zip(z.iter()) {
            let pg = if *x > T::zero() {
                *g
            } else {
                <T as Float>::min(*g, T::zero())
            };
            sum += pg * pg;
        }
        <T as Float>::sqrt(sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rejects_row_mismatch() {
        let design = DMatrix::<f64>::identity(3, 2);
        let target = DMatrix::<f64>::zeros(4, 2);
        let err = NnlsProblem::new(&design, &target).unwrap_err();
        assert!(matches!(err, SolverError::DimensionMismatch { .. }));
    }

    #[test]
    fn test_objective_and_shape() {
        let design = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 2.0]);
        let target = DMatrix::from_row_slice(2, 1, &[1.0, 4.0]);
        let problem = NnlsProblem::new(&design, &target).unwrap();

        assert_eq!(problem.solution_shape(), (2, 1));
        let exact = DMatrix::from_row_slice(2, 1, &[1.0, 2.0]);
        assert_relative_eq!(problem.objective(&exact), 0.0);
        let zero = DMatrix::zeros(2, 1);
        assert_relative_eq!(problem.objective(&zero), 17.0_f64.sqrt());

        assert!(problem.check_shape(&exact).is_ok());
        assert!(problem.check_shape(&DMatrix::zeros(1, 2)).is_err());
    }

    #[test]
    fn test_projected_gradient_vanishes_at_optimum() {
        // Unconstrained minimizer is (1, -1); the constrained one is (1, 0).
        let design = DMatrix::from_row_slice(2, 2, &[1.0, 1.0, 1.0, -1.0]);
        let target = DMatrix::from_row_slice(2, 1, &[0.0, 2.0]);
        let problem = NnlsProblem::new(&design, &target).unwrap();
        let gram = problem.gram();
        let correlation = problem.correlation();

        let optimum = DMatrix::from_row_slice(2, 1, &[1.0, 0.0]);
        assert_relative_eq!(
            problem.projected_gradient_norm(&optimum, &gram, &correlation),
            0.0,
            epsilon = 1e-12
        );

        let zero = DMatrix::zeros(2, 1);
        assert!(problem.projected_gradient_norm(&zero, &gram, &correlation) > 0.1);
    }
}
