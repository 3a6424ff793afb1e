//! Residual trace plot.
//!
//! Draws residual norm against iteration on a logarithmic y axis and writes
//! a PNG. Only available with the `plot` feature.

use crate::error::PlotError;
use plotters::prelude::*;
use std::path::Path;

/// Smallest value drawn on the log axis; exact zeros are clamped to it.
const LOG_FLOOR: f64 = 1e-16;

/// Plot `residuals` (iteration 1 first) to a PNG at `path`.
pub fn plot_residuals<P: AsRef<Path>>(residuals: &[f64], path: P) -> Result<(), PlotError> {
    if residuals.is_empty() {
        return Err(PlotError::EmptyTrace);
    }

    let points: Vec<(usize, f64)> = residuals
        .iter()
        .enumerate()
        .map(|(i, &r)| (i + 1, r.max(LOG_FLOOR)))
        .collect();
    let lo = points.iter().map(|p| p.1).fold(f64::INFINITY, f64::min);
    let hi = points.iter().map(|p| p.1).fold(LOG_FLOOR, f64::max);

    let root = BitMapBackend::new(path.as_ref(), (800, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| PlotError::Drawing(e.to_string()))?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Residual norm per iteration", ("sans-serif", 24).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(1..residuals.len() + 1, (lo * 0.5..hi * 2.0).log_scale())
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .configure_mesh()
        .x_desc("iteration")
        .y_desc("residual norm")
        .y_label_formatter(&|y| format!("{y:.1e}"))
        .draw()
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    chart
        .draw_series(LineSeries::new(points.iter().copied(), &BLUE))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;
    chart
        .draw_series(points.iter().map(|&p| Circle::new(p, 3, BLUE.filled())))
        .map_err(|e| PlotError::Drawing(e.to_string()))?;

    root.present().map_err(|e| PlotError::Drawing(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_trace_is_rejected() {
        let path = std::env::temp_dir().join("nmfopt-empty.png");
        assert!(matches!(plot_residuals(&[], &path), Err(PlotError::EmptyTrace)));
    }

    #[test]
    fn test_writes_png() {
        let path = std::env::temp_dir().join(format!("nmfopt-plot-{}.png", std::process::id()));
        plot_residuals(&[2.5, 0.4, 0.05, 0.0], &path).unwrap();
        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }
}
