//! Property tests for the NNLS subproblem description.

use approx::assert_relative_eq;
use nmfopt_core::prelude::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn matrix_strategy(rows: usize, cols: usize, lo: f64, hi: f64) -> impl Strategy<Value = DMatrix<f64>> {
    prop::collection::vec(lo..hi, rows * cols)
        .prop_map(move |data| DMatrix::from_row_slice(rows, cols, &data))
}

proptest! {
    #[test]
    fn objective_matches_residual_norm(
        design in matrix_strategy(4, 3, 0.0, 1.0),
        target in matrix_strategy(4, 2, -1.0, 1.0),
        z in matrix_strategy(3, 2, 0.0, 2.0),
    ) {
        let problem = NnlsProblem::new(&design, &target).unwrap();
        let direct = (&target - &design * &z).norm();
        prop_assert!((problem.objective(&z) - direct).abs() <= 1e-12);
        prop_assert!(problem.objective(&z) >= 0.0);
    }

    #[test]
    fn projected_gradient_is_nonnegative_and_zero_for_consistent_interior_point(
        design in matrix_strategy(5, 2, 0.1, 1.0),
        z in matrix_strategy(2, 3, 0.5, 2.0),
    ) {
        // Target built from a strictly positive Z: that Z is an exact interior optimum.
        let target = &design * &z;
        let problem = NnlsProblem::new(&design, &target).unwrap();
        let gram = problem.gram();
        let correlation = problem.correlation();
        let pg = problem.projected_gradient_norm(&z, &gram, &correlation);
        prop_assert!(pg >= 0.0);
        prop_assert!(pg <= 1e-9);
    }
}

#[test]
fn test_gram_and_correlation_shapes() {
    let design = DMatrix::from_row_slice(3, 2, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    let target = DMatrix::from_row_slice(3, 4, &[1.0; 12]);
    let problem = NnlsProblem::new(&design, &target).unwrap();

    let gram = problem.gram();
    assert_eq!(gram.shape(), (2, 2));
    assert_relative_eq!(gram[(0, 1)], gram[(1, 0)]);
    assert_relative_eq!(gram[(0, 0)], 35.0);

    let correlation = problem.correlation();
    assert_eq!(correlation.shape(), (2, 4));
    assert_relative_eq!(correlation[(1, 3)], 12.0);
}

#[test]
fn test_status_serializes_by_variant_name() {
    let json = serde_json::to_string(&SolveStatus::IterationLimit).unwrap();
    assert_eq!(json, "\"IterationLimit\"");

    let config: SolverConfig<f64> =
        serde_json::from_str(r#"{"max_iterations": 25, "tolerance": 1e-7}"#).unwrap();
    assert_eq!(config, SolverConfig::new().with_max_iterations(25).with_tolerance(1e-7));
}
