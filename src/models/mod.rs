//! Regression model implementations.
//!
//! Each model is a small fitted value with a `predict` method so the
//! assembly code can stay generic over the model kind.

pub mod dummy;
pub mod linear;
pub mod polynomial;
pub mod tree;

pub use dummy::*;
pub use linear::*;
pub use polynomial::*;
pub use tree::*;

use crate::domain::RegressionType;
use crate::error::FitError;

/// Hyper-parameters for building a regressor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelParams {
    pub polynomial_degree: usize,
    pub tree_max_depth: usize,
}

/// A fitted model of any kind.
#[derive(Debug, Clone)]
pub enum FittedModel {
    Linear(LinearFit),
    Polynomial(PolynomialFit),
    Tree(RegressionTree),
    Dummy(DummyFit),
}

impl FittedModel {
    pub fn kind(&self) -> RegressionType {
        match self {
            FittedModel::Linear(_) => RegressionType::Linear,
            FittedModel::Polynomial(_) => RegressionType::Polynomial,
            FittedModel::Tree(_) => RegressionType::Tree,
            FittedModel::Dummy(_) => RegressionType::Dummy,
        }
    }

    /// Predict `y` at an arbitrary `x`.
    pub fn predict(&self, x: f64) -> f64 {
        match self {
            FittedModel::Linear(m) => m.predict(x),
            FittedModel::Polynomial(m) => m.predict(x),
            FittedModel::Tree(m) => m.predict(x),
            FittedModel::Dummy(m) => m.predict(x),
        }
    }

    /// Non-constant coefficients in ascending power, if the model has them.
    pub fn coefficients(&self) -> Option<Vec<f64>> {
        match self {
            FittedModel::Linear(m) => Some(vec![m.slope]),
            FittedModel::Polynomial(m) => Some(m.coefficients[1..].to_vec()),
            FittedModel::Tree(_) | FittedModel::Dummy(_) => None,
        }
    }

    /// Constant term, if the model has one.
    pub fn intercept(&self) -> Option<f64> {
        match self {
            FittedModel::Linear(m) => Some(m.intercept),
            FittedModel::Polynomial(m) => Some(m.coefficients[0]),
            FittedModel::Tree(_) => None,
            FittedModel::Dummy(m) => Some(m.mean),
        }
    }
}

/// Fit the requested model kind on paired `xs` / `ys`.
///
/// Inputs are expected to have passed validation; anything unsolvable that
/// slips through surfaces as [`FitError::Degenerate`].
pub fn fit_model(
    kind: RegressionType,
    xs: &[f64],
    ys: &[f64],
    params: ModelParams,
) -> Result<FittedModel, FitError> {
    if xs.len() != ys.len() {
        return Err(FitError::degenerate(format!(
            "x/y length mismatch ({} vs {})",
            xs.len(),
            ys.len()
        )));
    }
    if xs.is_empty() {
        return Err(FitError::degenerate("no points to fit"));
    }

    let model = match kind {
        RegressionType::Linear => FittedModel::Linear(LinearFit::fit(xs, ys)?),
        RegressionType::Polynomial => {
            FittedModel::Polynomial(PolynomialFit::fit(xs, ys, params.polynomial_degree)?)
        }
        RegressionType::Tree => {
            FittedModel::Tree(RegressionTree::fit(xs, ys, params.tree_max_depth)?)
        }
        RegressionType::Dummy => FittedModel::Dummy(DummyFit::fit(ys)),
    };
    Ok(model)
}
