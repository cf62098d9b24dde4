//! Command-line parsing for the point fitting service.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! fitting and server code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{DEFAULT_MAX_SAMPLE_POINTS, Point, RegressionType, SampleShape};
use crate::io::parse_point;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "pointfit", version, about = "Point-and-fit regression service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP fitting service (`POST /api/fit`, `GET /api/health`).
    Serve(ServeArgs),
    /// Fit one or more models to a point set, locally or against a remote service.
    Fit(FitArgs),
    /// Generate a seeded synthetic point set as JSON.
    Sample(SampleArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct ServeArgs {
    /// Interface to bind (falls back to POINTFIT_HOST, then 127.0.0.1).
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (falls back to POINTFIT_PORT, then 8000).
    #[arg(short = 'p', long)]
    pub port: Option<u16>,
}

#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Points JSON: a point array, a `{"points": [...]}` object, or a full fit request.
    #[arg(short = 'f', long, value_name = "JSON")]
    pub points: Option<PathBuf>,

    /// Inline point `X,Y` (repeatable; appended after file points).
    #[arg(long = "point", value_name = "X,Y", value_parser = parse_point, allow_hyphen_values = true)]
    pub point: Vec<Point>,

    /// Model(s) to fit (repeatable). Defaults to the file's model, else linear.
    #[arg(short = 'm', long = "model", value_enum)]
    pub model: Vec<RegressionType>,

    /// Polynomial degree (default: from the file, else 2).
    #[arg(long, allow_hyphen_values = true)]
    pub degree: Option<i64>,

    /// Tree max depth (default: from the file, else 3).
    #[arg(long, allow_hyphen_values = true)]
    pub depth: Option<i64>,

    /// Fit through a remote service instead of in-process.
    #[arg(long)]
    pub remote: bool,

    /// Remote base URL (implies --remote; falls back to POINTFIT_API_URL).
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Also evaluate each fitted model at these x-values (in-process fits only).
    #[arg(long = "predict-at", value_name = "X", allow_hyphen_values = true)]
    pub predict_at: Vec<f64>,

    /// Print per-point predictions and residuals.
    #[arg(long)]
    pub show_points: bool,

    /// Print the raw JSON responses instead of the summary.
    #[arg(long)]
    pub json: bool,

    /// Export points and results to a JSON file.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Parser, Clone)]
pub struct SampleArgs {
    /// Underlying curve shape.
    #[arg(long, value_enum, default_value_t = SampleShape::Line)]
    pub shape: SampleShape,

    /// Number of points to generate.
    #[arg(short = 'n', long, default_value_t = 20)]
    pub count: usize,

    /// Keep only the newest N points.
    #[arg(long, default_value_t = DEFAULT_MAX_SAMPLE_POINTS)]
    pub max_points: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Standard deviation of the Gaussian noise on y.
    #[arg(long, default_value_t = 0.5)]
    pub noise: f64,

    /// Lower bound of the x range.
    #[arg(long, default_value_t = -10.0, allow_hyphen_values = true)]
    pub x_min: f64,

    /// Upper bound of the x range.
    #[arg(long, default_value_t = 10.0, allow_hyphen_values = true)]
    pub x_max: f64,

    /// Write to a file instead of stdout.
    #[arg(short = 'o', long, value_name = "JSON")]
    pub out: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_fit_with_inline_points_and_models() {
        let cli = Cli::parse_from([
            "pointfit", "fit", "--point", "-1,2", "--point", "3,4", "-m", "linear", "-m", "tree",
            "--depth", "2",
        ]);
        let Command::Fit(args) = cli.command else {
            panic!("expected fit");
        };
        assert_eq!(args.point, vec![Point::new(-1.0, 2.0), Point::new(3.0, 4.0)]);
        assert_eq!(args.model, vec![RegressionType::Linear, RegressionType::Tree]);
        assert_eq!(args.depth, Some(2));
        assert!(!args.remote);
    }

    #[test]
    fn sample_defaults() {
        let cli = Cli::parse_from(["pointfit", "sample", "--x-min", "-3"]);
        let Command::Sample(args) = cli.command else {
            panic!("expected sample");
        };
        assert_eq!(args.shape, SampleShape::Line);
        assert_eq!(args.count, 20);
        assert_eq!(args.max_points, DEFAULT_MAX_SAMPLE_POINTS);
        assert_eq!(args.x_min, -3.0);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
