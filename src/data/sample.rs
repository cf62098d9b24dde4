//! Seeded synthetic point generation.
//!
//! Points are drawn uniformly over `[x_min, x_max]`, evaluated on the chosen
//! shape, and perturbed with Gaussian noise. The same config always produces
//! the same points.

use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::{Point, SampleConfig, SampleShape};
use crate::error::{AppError, EXIT_USAGE};

pub fn generate_points(config: &SampleConfig) -> Result<Vec<Point>, AppError> {
    if config.count < 2 {
        return Err(AppError::new(EXIT_USAGE, "Sample count must be >= 2."));
    }
    if !(config.x_min.is_finite() && config.x_max.is_finite() && config.x_max > config.x_min) {
        return Err(AppError::new(
            EXIT_USAGE,
            format!(
                "Invalid x range: [{}, {}] (must be finite with x_max > x_min).",
                config.x_min, config.x_max
            ),
        ));
    }
    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(AppError::new(EXIT_USAGE, "Noise must be finite and >= 0."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, 1.0)
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Noise distribution error: {e}")))?;

    let mid = (config.x_min + config.x_max) / 2.0;
    let mut points = Vec::with_capacity(config.count);
    for _ in 0..config.count {
        let x = rng.gen_range(config.x_min..=config.x_max);
        let z: f64 = normal.sample(&mut rng);
        let y = shape_value(config.shape, x, mid) + config.noise * z;
        points.push(Point::new(x, y));
    }

    Ok(points)
}

/// Keep only the newest `max_points` points, evicting from the front.
///
/// This mirrors the canvas client, which drops its oldest point when a new
/// click would exceed the cap.
pub fn cap_points(mut points: Vec<Point>, max_points: usize) -> Vec<Point> {
    if points.len() > max_points {
        points.drain(..points.len() - max_points);
    }
    points
}

/// Noise-free value of `shape` at `x`.
pub fn shape_value(shape: SampleShape, x: f64, mid: f64) -> f64 {
    match shape {
        SampleShape::Line => 2.0 * x + 1.0,
        SampleShape::Quadratic => x * x / 4.0 - x + 1.0,
        SampleShape::Step => {
            if x <= mid {
                -1.0
            } else {
                1.0
            }
        }
        SampleShape::Noise => 0.0,
    }
}
