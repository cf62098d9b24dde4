//! Request validation.
//!
//! Every rule here is checked before fitting so callers get a precise,
//! display-ready reason instead of a numeric failure deeper in the stack.
//! Model-specific parameters are only checked for the selected model.

use crate::domain::{FitRequest, RegressionType};
use crate::error::FitError;
use crate::math::distinct_count;
use crate::models::ModelParams;

/// Minimum number of points accepted by every model.
pub const MIN_POINTS: usize = 2;

/// Validate `req` and resolve its model parameters.
pub fn validate(req: &FitRequest) -> Result<ModelParams, FitError> {
    let n = req.points.len();
    if n < MIN_POINTS {
        return Err(FitError::validation(format!(
            "At least {MIN_POINTS} points are required (got {n})"
        )));
    }

    if let Some(i) = req
        .points
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite()))
    {
        return Err(FitError::validation(format!(
            "Point {i} has a non-finite coordinate"
        )));
    }

    let xs: Vec<f64> = req.points.iter().map(|p| p.x).collect();
    let distinct_x = distinct_count(&xs);
    if distinct_x < 2 {
        return Err(FitError::validation(
            "All points share the same x-value; at least two distinct x-values are required",
        ));
    }

    let mut params = ModelParams {
        polynomial_degree: usize::try_from(req.polynomial_degree).unwrap_or(0),
        tree_max_depth: usize::try_from(req.tree_max_depth).unwrap_or(0),
    };

    match req.regression_type {
        RegressionType::Polynomial => {
            let degree = req.polynomial_degree;
            if degree < 1 {
                return Err(FitError::validation(format!(
                    "polynomial_degree must be >= 1 (got {degree})"
                )));
            }
            params.polynomial_degree = usize::try_from(degree)
                .ok()
                .filter(|&d| d < distinct_x)
                .ok_or_else(|| {
                    FitError::validation(format!(
                        "polynomial_degree {degree} needs more than {degree} distinct x-values (got {distinct_x})"
                    ))
                })?;
        }
        RegressionType::Tree => {
            let depth = req.tree_max_depth;
            if depth < 1 {
                return Err(FitError::validation(format!(
                    "tree_max_depth must be >= 1 (got {depth})"
                )));
            }
        }
        RegressionType::Linear | RegressionType::Dummy => {}
    }

    Ok(params)
}
