//! Response assembly.
//!
//! This is the single place where the wire envelope is finalized, so every
//! model kind returns the same shape. Only the presence of `coefficients` and
//! `intercept` varies, and that is decided by the model itself.

use crate::domain::{FitResult, Point};
use crate::error::FitError;
use crate::math::{linspace, min_max, r2_score};
use crate::models::FittedModel;

/// Build the response for `model` fitted on `points`.
pub fn assemble(model: &FittedModel, points: &[Point]) -> Result<FitResult, FitError> {
    let xs: Vec<f64> = points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
    let (x_min, x_max) =
        min_max(&xs).ok_or_else(|| FitError::degenerate("no points to assemble a result for"))?;

    let predictions: Vec<f64> = xs.iter().map(|&x| model.predict(x)).collect();
    if predictions.iter().any(|v| !v.is_finite()) {
        return Err(FitError::degenerate(format!(
            "{} model produced a non-finite prediction",
            model.kind()
        )));
    }

    let r2 = r2_score(&ys, &predictions);
    if !r2.is_finite() {
        return Err(FitError::degenerate("R² score is not finite"));
    }

    let line_points = sample_curve(model, x_min, x_max);
    if line_points.iter().any(|p| !p.y.is_finite()) {
        return Err(FitError::degenerate(format!(
            "{} model produced a non-finite curve sample",
            model.kind()
        )));
    }

    Ok(FitResult {
        coefficients: model.coefficients(),
        intercept: model.intercept(),
        r2_score: r2,
        predictions,
        line_points,
    })
}

/// Evaluate `model` on evenly spaced x-values spanning `[x_min, x_max]`.
pub fn sample_curve(model: &FittedModel, x_min: f64, x_max: f64) -> Vec<Point> {
    linspace(x_min, x_max, model.kind().line_samples())
        .into_iter()
        .map(|x| Point::new(x, model.predict(x)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DummyFit, LinearFit, RegressionTree};

    fn pts(xy: &[(f64, f64)]) -> Vec<Point> {
        xy.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn line_points_span_the_x_domain() {
        let points = pts(&[(4.0, 1.0), (-2.0, 0.0), (1.0, 5.0)]);
        let model = FittedModel::Linear(LinearFit {
            slope: 1.0,
            intercept: 0.0,
        });
        let result = assemble(&model, &points).unwrap();

        assert_eq!(result.predictions, vec![4.0, -2.0, 1.0]);
        assert_eq!(result.line_points.len(), 100);
        assert_eq!(result.line_points.first().map(|p| p.x), Some(-2.0));
        assert_eq!(result.line_points.last().map(|p| p.x), Some(4.0));
        assert!(result.line_points.windows(2).all(|w| w[0].x <= w[1].x));
    }

    #[test]
    fn dummy_curve_is_two_flat_endpoints() {
        let points = pts(&[(0.0, 1.0), (2.0, 3.0), (1.0, 5.0)]);
        let model = FittedModel::Dummy(DummyFit { mean: 3.0 });
        let result = assemble(&model, &points).unwrap();

        assert_eq!(
            result.line_points,
            vec![Point::new(0.0, 3.0), Point::new(2.0, 3.0)]
        );
        assert_eq!(result.intercept, Some(3.0));
        assert!(result.coefficients.is_none());
        assert_eq!(result.r2_score, 0.0);
    }

    #[test]
    fn tree_curve_uses_fine_sampling() {
        let points = pts(&[(0.0, 0.0), (1.0, 1.0), (2.0, 4.0), (3.0, 9.0)]);
        let tree = RegressionTree::fit(&[0.0, 1.0, 2.0, 3.0], &[0.0, 1.0, 4.0, 9.0], 2).unwrap();
        let result = assemble(&FittedModel::Tree(tree), &points).unwrap();
        assert_eq!(result.line_points.len(), 200);
        assert!(result.coefficients.is_none() && result.intercept.is_none());
    }

    #[test]
    fn non_finite_predictions_are_degenerate() {
        let points = pts(&[(0.0, 1.0), (1.0, 2.0)]);
        let model = FittedModel::Linear(LinearFit {
            slope: f64::INFINITY,
            intercept: 0.0,
        });
        assert!(matches!(
            assemble(&model, &points),
            Err(FitError::Degenerate(_))
        ));
    }
}
