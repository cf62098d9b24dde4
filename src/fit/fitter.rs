//! Single-request fitting: validate, fit, assemble.
//!
//! Everything here is pure. The same request always produces a bit-identical
//! result: there is no randomness and every tie is broken deterministically.

use crate::domain::{FitRequest, FitResult};
use crate::error::FitError;
use crate::fit::{assemble, validate};
use crate::models::{FittedModel, fit_model};

/// Validate `req` and fit the selected regressor without assembling a response.
///
/// Useful when the caller wants to evaluate the model at x-values other than
/// the request points.
pub fn build_regressor(req: &FitRequest) -> Result<FittedModel, FitError> {
    let params = validate(req)?;
    let xs: Vec<f64> = req.points.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = req.points.iter().map(|p| p.y).collect();
    fit_model(req.regression_type, &xs, &ys, params)
}

/// Fit `req` and return the wire response.
pub fn fit(req: &FitRequest) -> Result<FitResult, FitError> {
    fit_with_model(req).map(|(_, result)| result)
}

/// Fit `req` and return both the model and the wire response.
pub fn fit_with_model(req: &FitRequest) -> Result<(FittedModel, FitResult), FitError> {
    let model = build_regressor(req)?;
    let result = assemble(&model, &req.points)?;
    log::debug!(
        "fitted {} on {} points: r2={:.6}",
        req.regression_type,
        req.points.len(),
        result.r2_score
    );
    Ok((model, result))
}
