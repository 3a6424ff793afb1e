//! Integration tests comparing the NNLS solvers.

use approx::assert_relative_eq;
use nmfopt_core::{prelude::*, test_utils::random_nnls_pair};
use nmfopt_solvers::{ActiveSet, ProjectedGradient};
use proptest::prelude::*;

fn kkt_residual(problem: &NnlsProblem<'_, f64>, z: &DMatrix<f64>) -> f64 {
    problem.projected_gradient_norm(z, &problem.gram(), &problem.correlation())
}

#[test]
fn test_solvers_agree_on_random_problems() -> Result<()> {
    for seed in 0..5 {
        let (design, target) = random_nnls_pair(8, 4, 3, seed);
        let problem = NnlsProblem::new(&design, &target)?;

        let exact = ActiveSet::default().solve(&problem, None)?;
        let mut fista = ProjectedGradient::new(
            SolverConfig::new()
                .with_max_iterations(50_000)
                .with_tolerance(1e-10),
        );
        let approx = fista.solve(&problem, None)?;

        assert!(exact.is_optimal(), "seed {seed}: active set not optimal");
        assert!(approx.is_optimal(), "seed {seed}: FISTA not optimal");
        assert_relative_eq!(exact.objective, approx.objective, epsilon = 1e-6);
        assert!(kkt_residual(&problem, &exact.value) < 1e-9);
    }
    Ok(())
}

#[test]
fn test_warm_start_never_hurts_projected_gradient() -> Result<()> {
    let (design, target) = random_nnls_pair(10, 5, 4, 42);
    let problem = NnlsProblem::new(&design, &target)?;
    let start = DMatrix::from_element(5, 4, 0.3);
    let start_objective = problem.objective(&start);

    let mut solver = ProjectedGradient::new(SolverConfig::new().with_max_iterations(3));
    let solution = solver.solve(&problem, Some(&start))?;

    assert!(solution.objective <= start_objective + 1e-12);
    assert!(solution.value.iter().all(|&v| v >= 0.0));
    Ok(())
}

#[test]
fn test_exact_nonnegative_representation_is_recovered() -> Result<()> {
    let design = DMatrix::from_row_slice(4, 2, &[1.0, 0.2, 0.3, 1.0, 0.5, 0.5, 0.9, 0.1]);
    let truth = DMatrix::from_row_slice(2, 3, &[0.0, 1.0, 2.0, 3.0, 0.0, 0.5]);
    let target = &design * &truth;
    let problem = NnlsProblem::new(&design, &target)?;

    let solution = ActiveSet::default().solve(&problem, None)?;
    assert!(solution.is_optimal());
    assert_relative_eq!(solution.value, truth, epsilon = 1e-10);
    assert!(solution.objective < 1e-10);
    Ok(())
}

proptest! {
    #[test]
    fn active_set_satisfies_kkt(seed in 0u64..1_000, rows in 4usize..9, vars in 1usize..4) {
        let (design, target) = random_nnls_pair(rows, vars, 2, seed);
        let problem = NnlsProblem::new(&design, &target).unwrap();
        let solution = ActiveSet::default().solve(&problem, None).unwrap();

        prop_assert!(solution.is_optimal());
        prop_assert!(solution.value.iter().all(|&v| v >= 0.0));
        prop_assert!(solution.objective <= problem.objective(&DMatrix::zeros(vars, 2)) + 1e-12);
        prop_assert!(kkt_residual(&problem, &solution.value) < 1e-8);
    }
}
