//! Read/write point set JSON files.
//!
//! Accepted input shapes:
//! - a bare array of points: `[{"x": 1, "y": 2}, ...]`
//! - a full fit request (same schema as `POST /api/fit`)
//! - an object with just a `points` array

use std::fs::File;
use std::path::Path;

use serde::Deserialize;

use crate::domain::{FitRequest, Point};
use crate::error::{AppError, EXIT_USAGE};

/// Decoded contents of a points file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PointsFile {
    Points(Vec<Point>),
    Request(FitRequest),
    Wrapped { points: Vec<Point> },
}

impl PointsFile {
    pub fn points(&self) -> &[Point] {
        match self {
            PointsFile::Points(points) | PointsFile::Wrapped { points } => points,
            PointsFile::Request(req) => &req.points,
        }
    }

    /// The embedded request, when the file carried one.
    pub fn request(&self) -> Option<&FitRequest> {
        match self {
            PointsFile::Request(req) => Some(req),
            PointsFile::Points(_) | PointsFile::Wrapped { .. } => None,
        }
    }
}

/// Read a points file.
pub fn read_points_json(path: &Path) -> Result<PointsFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::new(EXIT_USAGE, format!("Failed to open points JSON '{}': {e}", path.display()))
    })?;
    serde_json::from_reader(file).map_err(|e| {
        AppError::new(EXIT_USAGE, format!("Invalid points JSON '{}': {e}", path.display()))
    })
}

/// Write a bare point array as pretty JSON.
pub fn write_points_json(path: &Path, points: &[Point]) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::new(EXIT_USAGE, format!("Failed to create points JSON '{}': {e}", path.display()))
    })?;
    serde_json::to_writer_pretty(file, points)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to write points JSON: {e}")))
}

/// Parse an inline `X,Y` point argument.
pub fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{s}'"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x in '{s}': {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y in '{s}': {e}"))?;
    Ok(Point::new(x, y))
}
