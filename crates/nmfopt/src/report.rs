//! Plain-text rendering of a finished run.

use crate::driver::Factorization;
use nmfopt_core::types::{DMatrix, Scalar};
use std::fmt::Write;

/// Digits after the decimal point when printing matrices.
pub const MATRIX_PRECISION: usize = 4;

/// Render a matrix with a heading line.
pub fn format_matrix<T: Scalar>(heading: &str, matrix: &DMatrix<T>) -> String {
    format!("{heading}:{matrix:.prec$}", prec = MATRIX_PRECISION)
}

/// Final summary line.
pub fn format_final_residual<T: Scalar>(factorization: &Factorization<T>) -> String {
    format!(
        "Residual after {} iterations: {}",
        factorization.residuals.len(),
        factorization.final_residual()
    )
}

/// Full report: target, both factors, residual matrix and final residual.
pub fn format_report<T: Scalar>(target: &DMatrix<T>, factorization: &Factorization<T>) -> String {
    let mut out = String::new();
    for (heading, matrix) in [
        ("Original matrix", target.clone()),
        ("Left factor Y", factorization.left.clone()),
        ("Right factor X", factorization.right.clone()),
        ("Residual A - Y * X", factorization.residual_matrix(target)),
    ] {
        out.push_str(&format_matrix(heading, &matrix));
        out.push('\n');
    }
    let _ = writeln!(out, "{}", format_final_residual(factorization));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn tiny() -> (DMatrix<f64>, Factorization<f64>) {
        let target = DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 4.0]);
        let factorization = Factorization {
            left: DMatrix::from_row_slice(2, 1, &[1.0, 2.0]),
            right: DMatrix::from_row_slice(1, 2, &[1.0, 2.0]),
            residuals: vec![0.5, 0.0],
            records: Vec::new(),
            duration: Duration::ZERO,
        };
        (target, factorization)
    }

    #[test]
    fn test_report_sections_in_order() {
        let (target, factorization) = tiny();
        let report = format_report(&target, &factorization);

        let positions: Vec<usize> = [
            "Original matrix:",
            "Left factor Y:",
            "Right factor X:",
            "Residual A - Y * X:",
            "Residual after 2 iterations: 0",
        ]
        .iter()
        .map(|h| report.find(h).unwrap_or_else(|| panic!("missing {h}")))
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_matrix_precision() {
        let m = DMatrix::from_row_slice(1, 1, &[1.0_f64 / 3.0]);
        let text = format_matrix("M", &m);
        assert!(text.starts_with("M:"));
        assert!(text.contains("0.3333"));
        assert!(!text.contains("0.33333"));
    }
}
