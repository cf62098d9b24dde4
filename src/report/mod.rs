//! Formatted terminal output.
//!
//! Formatting lives here so the fitting code stays free of presentation and
//! output changes stay localized.

use crate::domain::{FitResult, Point};
use crate::fit::BatchFit;

/// Per-point observed vs. predicted values.
#[derive(Debug, Clone, PartialEq)]
pub struct Residual {
    pub point: Point,
    pub y_fit: f64,
    pub residual: f64,
}

/// Pair each input point with its prediction.
pub fn compute_residuals(points: &[Point], result: &FitResult) -> Vec<Residual> {
    points
        .iter()
        .zip(&result.predictions)
        .map(|(p, &y_fit)| Residual {
            point: *p,
            y_fit,
            residual: p.y - y_fit,
        })
        .collect()
}

/// Format the summary for every fitted model.
pub fn format_fit_summary(points: &[Point], fits: &[BatchFit], show_points: bool) -> String {
    let mut out = String::new();

    out.push_str("=== pointfit ===\n");
    out.push_str(&format!("Points: n={}", points.len()));
    if let Some((x_min, x_max, y_min, y_max)) = bounds(points) {
        out.push_str(&format!(
            " | x=[{x_min:.3}, {x_max:.3}] | y=[{y_min:.3}, {y_max:.3}]"
        ));
    }
    out.push('\n');

    out.push_str("\nModels:\n");
    for fit in fits {
        out.push_str(&format!(
            "- {:<14} R²={:>9.6}  intercept={}  coefficients={}\n",
            fit.kind.display_name(),
            fit.result.r2_score,
            fit.result
                .intercept
                .map(|v| format!("{v:.6}"))
                .unwrap_or_else(|| "-".to_string()),
            fit.result
                .coefficients
                .as_deref()
                .map(fmt_vec)
                .unwrap_or_else(|| "-".to_string()),
        ));
    }

    if show_points {
        for fit in fits {
            out.push('\n');
            out.push_str(&format!("{} predictions:\n", fit.kind.display_name()));
            out.push_str(&format_table(&compute_residuals(points, &fit.result)));
        }
    }

    out
}

fn format_table(rows: &[Residual]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>12} {:>12} {:>12} {:>12}\n",
        "x", "y_obs", "y_fit", "residual"
    ));
    out.push_str(&format!("{:-<12} {:-<12} {:-<12} {:-<12}\n", "", "", "", ""));
    for r in rows {
        out.push_str(&format!(
            "{:>12.4} {:>12.4} {:>12.4} {:>12.4}\n",
            r.point.x, r.point.y, r.y_fit, r.residual
        ));
    }
    out
}

fn bounds(points: &[Point]) -> Option<(f64, f64, f64, f64)> {
    let first = points.first()?;
    Some(points.iter().fold(
        (first.x, first.x, first.y, first.y),
        |(x0, x1, y0, y1), p| (x0.min(p.x), x1.max(p.x), y0.min(p.y), y1.max(p.y)),
    ))
}

fn fmt_vec(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{x:.6}")).collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RegressionType;
    use crate::fit::fit_many;

    fn points() -> Vec<Point> {
        vec![Point::new(0.0, 1.0), Point::new(1.0, 3.0), Point::new(2.0, 5.0)]
    }

    #[test]
    fn compute_residuals_basic() {
        let result = FitResult {
            coefficients: None,
            intercept: None,
            r2_score: 0.0,
            predictions: vec![1.5, 3.0, 4.0],
            line_points: Vec::new(),
        };
        let rows = compute_residuals(&points(), &result);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].residual, -0.5);
        assert_eq!(rows[2].residual, 1.0);
    }

    #[test]
    fn summary_lists_each_model() {
        let kinds = [RegressionType::Linear, RegressionType::Tree];
        let fits = fit_many(&points(), &kinds, 2, 1).unwrap();
        let text = format_fit_summary(&points(), &fits, true);

        assert!(text.contains("Points: n=3"));
        assert!(text.contains("Linear"));
        assert!(text.contains("Decision tree"));
        assert!(text.contains("coefficients=[2.000000]"));
        assert!(text.contains("Decision tree predictions:"));
    }
}
