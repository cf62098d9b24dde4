//! Shared "fit pipeline" logic behind `pointfit fit`.
//!
//! Keeps the workflow in one place:
//! points file / inline points -> request parameters -> local or remote fits
//!
//! The command handler can then focus on presentation.

use crate::client::FitClient;
use crate::domain::{
    DEFAULT_POLYNOMIAL_DEGREE, DEFAULT_TREE_MAX_DEPTH, FitRequest, Point, RegressionType,
};
use crate::error::{AppError, EXIT_USAGE};
use crate::fit::{BatchFit, build_regressor, fit_many};
use crate::io::PointsFile;

/// Everything needed to run a set of fits.
#[derive(Debug, Clone, PartialEq)]
pub struct FitPlan {
    pub points: Vec<Point>,
    pub kinds: Vec<RegressionType>,
    pub polynomial_degree: i64,
    pub tree_max_depth: i64,
}

impl FitPlan {
    /// Merge file contents with command-line overrides.
    ///
    /// Flags win over the file; the file wins over built-in defaults.
    pub fn resolve(
        file: Option<&PointsFile>,
        inline: &[Point],
        kinds: &[RegressionType],
        degree: Option<i64>,
        depth: Option<i64>,
    ) -> Result<Self, AppError> {
        let mut points: Vec<Point> = file.map(|f| f.points().to_vec()).unwrap_or_default();
        points.extend_from_slice(inline);
        if points.is_empty() {
            return Err(AppError::new(
                EXIT_USAGE,
                "No points given. Use `--points <file.json>` or `--point X,Y`.",
            ));
        }

        let embedded = file.and_then(|f| f.request());
        let kinds = if !kinds.is_empty() {
            kinds.to_vec()
        } else if let Some(req) = embedded {
            vec![req.regression_type]
        } else {
            vec![RegressionType::Linear]
        };

        Ok(Self {
            points,
            kinds,
            polynomial_degree: degree
                .or(embedded.map(|r| r.polynomial_degree))
                .unwrap_or(DEFAULT_POLYNOMIAL_DEGREE),
            tree_max_depth: depth
                .or(embedded.map(|r| r.tree_max_depth))
                .unwrap_or(DEFAULT_TREE_MAX_DEPTH),
        })
    }

    pub fn request_for(&self, kind: RegressionType) -> FitRequest {
        FitRequest {
            points: self.points.clone(),
            regression_type: kind,
            polynomial_degree: self.polynomial_degree,
            tree_max_depth: self.tree_max_depth,
        }
    }
}

/// Fit every planned model in-process.
pub fn run_local(plan: &FitPlan) -> Result<Vec<BatchFit>, AppError> {
    Ok(fit_many(
        &plan.points,
        &plan.kinds,
        plan.polynomial_degree,
        plan.tree_max_depth,
    )?)
}

/// Fit every planned model through a remote service, in order.
///
/// Stops at the first failure; later models are not requested.
pub fn run_remote(plan: &FitPlan, client: &FitClient) -> Result<Vec<BatchFit>, AppError> {
    let mut fits = Vec::with_capacity(plan.kinds.len());
    for &kind in &plan.kinds {
        let result = client.fit(&plan.request_for(kind))?;
        fits.push(BatchFit { kind, result });
    }
    Ok(fits)
}

/// Evaluate each planned model at arbitrary x-values.
pub fn predict_at(plan: &FitPlan, xs: &[f64]) -> Result<Vec<(RegressionType, Vec<f64>)>, AppError> {
    let mut out = Vec::with_capacity(plan.kinds.len());
    for &kind in &plan.kinds {
        let model = build_regressor(&plan.request_for(kind))?;
        out.push((kind, xs.iter().map(|&x| model.predict(x)).collect()));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts() -> Vec<Point> {
        vec![Point::new(0.0, 0.0), Point::new(1.0, 2.0), Point::new(2.0, 4.0)]
    }

    #[test]
    fn flags_override_embedded_request() {
        let file = PointsFile::Request(
            FitRequest::new(pts(), RegressionType::Polynomial)
                .with_degree(2)
                .with_depth(5),
        );
        let plan = FitPlan::resolve(Some(&file), &[Point::new(3.0, 6.0)], &[], Some(1), None).unwrap();
        assert_eq!(plan.points.len(), 4);
        assert_eq!(plan.kinds, vec![RegressionType::Polynomial]);
        assert_eq!(plan.polynomial_degree, 1);
        assert_eq!(plan.tree_max_depth, 5);
    }

    #[test]
    fn defaults_without_file() {
        let plan = FitPlan::resolve(None, &pts(), &[], None, None).unwrap();
        assert_eq!(plan.kinds, vec![RegressionType::Linear]);
        assert_eq!(plan.polynomial_degree, DEFAULT_POLYNOMIAL_DEGREE);
        assert_eq!(plan.tree_max_depth, DEFAULT_TREE_MAX_DEPTH);
    }

    #[test]
    fn no_points_is_a_usage_error() {
        let err = FitPlan::resolve(None, &[], &[], None, None).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_USAGE);
    }

    #[test]
    fn local_run_and_predictions() {
        let plan = FitPlan::resolve(
            None,
            &pts(),
            &[RegressionType::Linear, RegressionType::Dummy],
            None,
            None,
        )
        .unwrap();
        let fits = run_local(&plan).unwrap();
        assert_eq!(fits.len(), 2);

        let preds = predict_at(&plan, &[10.0]).unwrap();
        assert!((preds[0].1[0] - 20.0).abs() < 1e-9);
        assert!((preds[1].1[0] - 2.0).abs() < 1e-12);
    }
}
