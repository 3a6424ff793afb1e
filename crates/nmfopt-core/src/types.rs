//! Type definitions and aliases for nonnegative factorization.
//!
//! This module provides the scalar trait shared by every solver, the
//! matrix aliases used for factors and targets, and the tolerance
//! constants each precision carries.

use nalgebra::{Dyn, OMatrix, OVector, RealField, Scalar as NalgebraScalar};
use num_traits::{Float, FromPrimitive};
use std::fmt::{Debug, Display};

/// Trait for scalar types used in factorization (f32 or f64).
///
/// This trait combines all the numeric traits required by the
/// subproblem solvers and the alternating driver.
pub trait Scalar:
    NalgebraScalar
    + RealField
    + Float
    + FromPrimitive
    + Display
    + Debug
    + Default
    + Copy
    + Send
    + Sync
    + 'static
{
    /// Machine epsilon for this scalar type.
    const EPSILON: Self;

    /// Default relative KKT tolerance for exact subproblem solvers.
    const DEFAULT_TOLERANCE: Self;

    /// Default relative projected-gradient tolerance for first-order solvers.
    const DEFAULT_GRADIENT_TOLERANCE: Self;

    /// Entries above `-NONNEGATIVITY_TOLERANCE` count as nonnegative.
    const NONNEGATIVITY_TOLERANCE: Self;

    /// Convert from f64 (for constants).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails.
    fn from_f64(v: f64) -> Self {
        <Self as FromPrimitive>::from_f64(v).expect("Failed to convert from f64")
    }

    /// Convert to f64 (for logging/display).
    ///
    /// # Panics
    ///
    /// Panics if the conversion fails.
    fn to_f64(self) -> f64 {
        num_traits::cast(self).expect("Failed to convert to f64")
    }
}

impl Scalar for f32 {
    const EPSILON: Self = f32::EPSILON;
    const DEFAULT_TOLERANCE: Self = 1e-5;
    const DEFAULT_GRADIENT_TOLERANCE: Self = 1e-4;
    const NONNEGATIVITY_TOLERANCE: Self = 1e-6;
}

impl Scalar for f64 {
    const EPSILON: Self = f64::EPSILON;
    const DEFAULT_TOLERANCE: Self = 1e-10;
    const DEFAULT_GRADIENT_TOLERANCE: Self = 1e-8;
    const NONNEGATIVITY_TOLERANCE: Self = 1e-12;
}

/// Type alias for a dynamically-sized matrix.
pub type DMatrix<T> = OMatrix<T, Dyn, Dyn>;

/// Type alias for a dynamically-sized vector.
pub type DVector<T> = OVector<T, Dyn>;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scalar_trait_f32() {
        assert_eq!(<f32 as Scalar>::EPSILON, f32::EPSILON);
        assert!(<f32 as Scalar>::DEFAULT_TOLERANCE > 0.0);
        assert!(<f32 as Scalar>::DEFAULT_GRADIENT_TOLERANCE > 0.0);
        assert!(<f32 as Scalar>::NONNEGATIVITY_TOLERANCE > 0.0);
    }

    #[test]
    fn test_scalar_trait_f64() {
        assert_eq!(<f64 as Scalar>::EPSILON, f64::EPSILON);
        assert!(<f64 as Scalar>::DEFAULT_TOLERANCE > 0.0);
        assert!(<f64 as Scalar>::DEFAULT_TOLERANCE < <f64 as Scalar>::DEFAULT_GRADIENT_TOLERANCE);
        assert!(
            <f64 as Scalar>::NONNEGATIVITY_TOLERANCE
                < f64::from(<f32 as Scalar>::NONNEGATIVITY_TOLERANCE)
        );
    }

    #[test]
    fn test_conversions() {
        assert_relative_eq!(<f64 as Scalar>::from_f64(0.25), 0.25);
        assert_relative_eq!(<f32 as Scalar>::to_f64(0.5_f32), 0.5);
    }
}
