//! Shared domain types.
//!
//! These types are kept lightweight and serializable so the same values can be:
//!
//! - decoded from / encoded to the `/api/fit` JSON contract
//! - read from and exported to JSON files by the CLI
//! - passed straight into the pure fitting core

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Polynomial degree used when a request omits `polynomial_degree`.
pub const DEFAULT_POLYNOMIAL_DEGREE: i64 = 2;

/// Tree depth used when a request omits `tree_max_depth`.
pub const DEFAULT_TREE_MAX_DEPTH: i64 = 3;

/// A single observation on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Which regression model to fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RegressionType {
    /// Ordinary least squares line `y = a*x + b`.
    Linear,
    /// Least squares polynomial of a requested degree.
    Polynomial,
    /// Piecewise-constant CART regression tree.
    Tree,
    /// Baseline that always predicts `mean(y)`.
    Dummy,
}

impl RegressionType {
    pub const ALL: [RegressionType; 4] = [
        RegressionType::Linear,
        RegressionType::Polynomial,
        RegressionType::Tree,
        RegressionType::Dummy,
    ];

    /// Wire name, as used in the `regression_type` field.
    pub fn as_str(self) -> &'static str {
        match self {
            RegressionType::Linear => "linear",
            RegressionType::Polynomial => "polynomial",
            RegressionType::Tree => "tree",
            RegressionType::Dummy => "dummy",
        }
    }

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            RegressionType::Linear => "Linear",
            RegressionType::Polynomial => "Polynomial",
            RegressionType::Tree => "Decision tree",
            RegressionType::Dummy => "Dummy (mean)",
        }
    }

    /// Number of evenly spaced samples used to draw the fitted curve.
    ///
    /// Trees are piecewise constant and need a finer grid to show their steps.
    /// The dummy model is a flat line and only needs its two endpoints.
    pub fn line_samples(self) -> usize {
        match self {
            RegressionType::Linear | RegressionType::Polynomial => 100,
            RegressionType::Tree => 200,
            RegressionType::Dummy => 2,
        }
    }
}

impl std::fmt::Display for RegressionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_polynomial_degree() -> i64 {
    DEFAULT_POLYNOMIAL_DEGREE
}

fn default_tree_max_depth() -> i64 {
    DEFAULT_TREE_MAX_DEPTH
}

/// A single fit request.
///
/// `polynomial_degree` and `tree_max_depth` are signed on purpose: out-of-range
/// values must reach the validator (and get a readable message) instead of
/// failing JSON decoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitRequest {
    pub points: Vec<Point>,
    pub regression_type: RegressionType,
    /// Consulted only when `regression_type == polynomial`.
    #[serde(default = "default_polynomial_degree")]
    pub polynomial_degree: i64,
    /// Consulted only when `regression_type == tree`.
    #[serde(default = "default_tree_max_depth")]
    pub tree_max_depth: i64,
}

impl FitRequest {
    /// Build a request with the default degree and depth.
    pub fn new(points: Vec<Point>, regression_type: RegressionType) -> Self {
        Self {
            points,
            regression_type,
            polynomial_degree: DEFAULT_POLYNOMIAL_DEGREE,
            tree_max_depth: DEFAULT_TREE_MAX_DEPTH,
        }
    }

    pub fn with_degree(mut self, degree: i64) -> Self {
        self.polynomial_degree = degree;
        self
    }

    pub fn with_depth(mut self, depth: i64) -> Self {
        self.tree_max_depth = depth;
        self
    }
}

/// The response envelope shared by every model kind.
///
/// `coefficients` never includes the constant term; that lives in `intercept`.
/// Both are `null` on the wire for models that do not expose them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    #[serde(default)]
    pub coefficients: Option<Vec<f64>>,
    #[serde(default)]
    pub intercept: Option<f64>,
    pub r2_score: f64,
    /// One prediction per request point, in request order.
    pub predictions: Vec<f64>,
    /// Fitted curve sampled across the x-domain, non-decreasing in x.
    #[serde(default)]
    pub line_points: Vec<Point>,
}

/// Largest point set the canvas client keeps.
pub const DEFAULT_MAX_SAMPLE_POINTS: usize = 50;

/// Underlying curve for synthetic point sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SampleShape {
    /// `y = 2x + 1`.
    Line,
    /// `y = x^2 / 4 - x + 1`.
    Quadratic,
    /// `y = -1` left of the midpoint, `+1` right of it.
    Step,
    /// Pure noise around zero.
    Noise,
}

/// Settings for synthetic point generation.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleConfig {
    pub shape: SampleShape,
    pub count: usize,
    pub seed: u64,
    /// Standard deviation of the Gaussian noise added to `y`.
    pub noise: f64,
    pub x_min: f64,
    pub x_max: f64,
}

/// Settings for `pointfit serve`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServeConfig {
    pub host: String,
    pub port: u16,
}

impl ServeConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Settings for fitting through a remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL without the `/api/fit` suffix.
    pub base_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults_degree_and_depth() {
        let json = r#"{"points":[{"x":0,"y":1},{"x":1,"y":2}],"regression_type":"tree"}"#;
        let req: FitRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.regression_type, RegressionType::Tree);
        assert_eq!(req.polynomial_degree, DEFAULT_POLYNOMIAL_DEGREE);
        assert_eq!(req.tree_max_depth, DEFAULT_TREE_MAX_DEPTH);
        assert_eq!(req.points[1], Point::new(1.0, 2.0));
    }

    #[test]
    fn unknown_regression_type_is_rejected() {
        let json = r#"{"points":[],"regression_type":"spline"}"#;
        assert!(serde_json::from_str::<FitRequest>(json).is_err());
    }

    #[test]
    fn absent_fields_serialize_as_null() {
        let result = FitResult {
            coefficients: None,
            intercept: None,
            r2_score: 0.5,
            predictions: vec![1.0],
            line_points: vec![Point::new(0.0, 1.0)],
        };
        let v = serde_json::to_value(&result).unwrap();
        assert!(v["coefficients"].is_null());
        assert!(v["intercept"].is_null());
        assert_eq!(v["r2_score"], 0.5);
    }

    #[test]
    fn wire_names_round_trip_through_display() {
        for kind in RegressionType::ALL {
            let json = format!("\"{kind}\"");
            let back: RegressionType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
        }
    }
}
