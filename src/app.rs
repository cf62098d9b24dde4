//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - starts the HTTP fitting service
//! - runs local or remote fits and prints reports
//! - generates synthetic point sets
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, FitArgs, SampleArgs, ServeArgs};
use crate::client::FitClient;
use crate::domain::{SampleConfig, ServeConfig};
use crate::error::{AppError, EXIT_USAGE};
use crate::server::{DEFAULT_HOST, DEFAULT_PORT};

pub mod pipeline;

/// Environment variable overriding the bind host.
pub const HOST_ENV: &str = "POINTFIT_HOST";
/// Environment variable overriding the bind port.
pub const PORT_ENV: &str = "POINTFIT_PORT";

/// Entry point for the `pointfit` binary.
pub fn run() -> Result<(), AppError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // `pointfit` and `pointfit --port 9000` behave like `pointfit serve ...`.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Serve(args) => handle_serve(args),
        Command::Fit(args) => handle_fit(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_serve(args: ServeArgs) -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let config = resolve_serve_config(
        args.host,
        args.port,
        std::env::var(HOST_ENV).ok(),
        std::env::var(PORT_ENV).ok(),
    )?;
    crate::server::serve(&config)
}

/// Merge flags, environment and defaults into a bind address.
///
/// Flags win over the environment.
pub fn resolve_serve_config(
    host_arg: Option<String>,
    port_arg: Option<u16>,
    env_host: Option<String>,
    env_port: Option<String>,
) -> Result<ServeConfig, AppError> {
    let host = host_arg
        .or(env_host.filter(|h| !h.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_HOST.to_string());

    let port = match (port_arg, env_port) {
        (Some(p), _) => p,
        (None, Some(raw)) => raw.trim().parse::<u16>().map_err(|_| {
            AppError::new(
                EXIT_USAGE,
                format!("Invalid {PORT_ENV} value '{raw}' (expected 0-65535)."),
            )
        })?,
        (None, None) => DEFAULT_PORT,
    };

    Ok(ServeConfig { host, port })
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let file = match &args.points {
        Some(path) => Some(crate::io::read_points_json(path)?),
        None => None,
    };
    let plan = pipeline::FitPlan::resolve(
        file.as_ref(),
        &args.point,
        &args.model,
        args.degree,
        args.depth,
    )?;

    let remote = args.remote || args.api_url.is_some();
    let fits = if remote {
        let config = FitClient::config_from_env(args.api_url.as_deref());
        let client = FitClient::new(&config)?;
        log::info!("fitting {} model(s) via {}", plan.kinds.len(), client.endpoint());
        pipeline::run_remote(&plan, &client)?
    } else {
        pipeline::run_local(&plan)?
    };

    if args.json {
        let results: Vec<_> = fits.iter().map(|f| &f.result).collect();
        let text = if results.len() == 1 {
            serde_json::to_string_pretty(results[0])
        } else {
            serde_json::to_string_pretty(&results)
        }
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to encode results: {e}")))?;
        println!("{text}");
    } else {
        println!(
            "{}",
            crate::report::format_fit_summary(&plan.points, &fits, args.show_points)
        );
    }

    if !args.predict_at.is_empty() {
        if remote {
            log::warn!("--predict-at is only available for in-process fits; skipping");
        } else {
            for (kind, values) in pipeline::predict_at(&plan, &args.predict_at)? {
                println!("{} predictions:", kind.display_name());
                for (x, y) in args.predict_at.iter().zip(values) {
                    println!("  f({x}) = {y:.6}");
                }
            }
        }
    }

    if let Some(path) = &args.export {
        let export = crate::io::ExportFile::new(
            &plan.points,
            &fits,
            plan.polynomial_degree,
            plan.tree_max_depth,
        );
        crate::io::write_export_json(path, &export)?;
        log::info!("wrote {}", path.display());
    }

    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let config = SampleConfig {
        shape: args.shape,
        count: args.count,
        seed: args.seed,
        noise: args.noise,
        x_min: args.x_min,
        x_max: args.x_max,
    };
    let points = crate::data::generate_points(&config)?;
    let points = crate::data::cap_points(points, args.max_points);

    match &args.out {
        Some(path) => {
            crate::io::write_points_json(path, &points)?;
            log::info!("wrote {} points to {}", points.len(), path.display());
        }
        None => {
            let text = serde_json::to_string_pretty(&points)
                .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to encode points: {e}")))?;
            println!("{text}");
        }
    }
    Ok(())
}

/// Rewrite argv so `pointfit` defaults to `pointfit serve`.
///
/// Rules:
/// - `pointfit`                      -> `pointfit serve`
/// - `pointfit --port 9000 ...`      -> `pointfit serve --port 9000 ...`
/// - `pointfit --help/--version/-h`  -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("serve".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    if arg1.starts_with('-') {
        argv.insert(1, "serve".to_string());
    }
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(args: &[&str]) -> Vec<String> {
        args.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_serves() {
        assert_eq!(rewrite_args(argv(&["pointfit"])), argv(&["pointfit", "serve"]));
        assert_eq!(
            rewrite_args(argv(&["pointfit", "-p", "9000"])),
            argv(&["pointfit", "serve", "-p", "9000"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        for args in [
            argv(&["pointfit", "fit", "--point", "1,2"]),
            argv(&["pointfit", "--help"]),
            argv(&["pointfit", "-V"]),
        ] {
            assert_eq!(rewrite_args(args.clone()), args);
        }
    }

    #[test]
    fn serve_config_precedence() {
        let cfg = resolve_serve_config(None, None, None, None).unwrap();
        assert_eq!(cfg.host, DEFAULT_HOST);
        assert_eq!(cfg.port, DEFAULT_PORT);

        let cfg = resolve_serve_config(None, None, Some("0.0.0.0".into()), Some("9001".into())).unwrap();
        assert_eq!(cfg.bind_addr(), "0.0.0.0:9001");

        let cfg = resolve_serve_config(
            Some("127.0.0.2".into()),
            Some(7000),
            Some("0.0.0.0".into()),
            Some("9001".into()),
        )
        .unwrap();
        assert_eq!(cfg.bind_addr(), "127.0.0.2:7000");
    }

    #[test]
    fn bad_env_port_is_a_usage_error() {
        let err = resolve_serve_config(None, None, None, Some("http".into())).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_USAGE);
        assert!(err.message().contains(PORT_ENV));
    }
}
