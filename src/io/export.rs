//! Export fit results to JSON.
//!
//! The export bundles the input points with one entry per fitted model, each
//! carrying the exact wire response, so a file can be diffed against a live
//! service response.

use std::fs::File;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::{FitResult, Point, RegressionType};
use crate::error::{AppError, EXIT_USAGE};
use crate::fit::BatchFit;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportFile {
    pub tool: String,
    pub points: Vec<Point>,
    pub fits: Vec<ExportedFit>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedFit {
    pub regression_type: RegressionType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polynomial_degree: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree_max_depth: Option<i64>,
    pub result: FitResult,
}

impl ExportFile {
    /// Build an export, recording only the parameters each model consulted.
    pub fn new(points: &[Point], fits: &[BatchFit], polynomial_degree: i64, tree_max_depth: i64) -> Self {
        let fits = fits
            .iter()
            .map(|f| ExportedFit {
                regression_type: f.kind,
                polynomial_degree: (f.kind == RegressionType::Polynomial).then_some(polynomial_degree),
                tree_max_depth: (f.kind == RegressionType::Tree).then_some(tree_max_depth),
                result: f.result.clone(),
            })
            .collect();
        Self {
            tool: "pointfit".to_string(),
            points: points.to_vec(),
            fits,
        }
    }
}

/// Write an export file as pretty JSON.
pub fn write_export_json(path: &Path, export: &ExportFile) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(EXIT_USAGE, format!("Failed to create export JSON '{}': {e}", path.display()))
    })?;
    serde_json::to_writer_pretty(file, export)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to write export JSON: {e}")))
}
