//! Blocking HTTP client for a remote fitting service.
//!
//! Mirrors what the canvas frontend does: POST the request to `/api/fit` and,
//! on a non-2xx status, surface the server's `detail` (or `msg`) verbatim,
//! falling back to the status text.

use reqwest::StatusCode;
use reqwest::blocking::Client;

use crate::domain::{ClientConfig, FitRequest, FitResult};
use crate::error::{AppError, EXIT_REMOTE, EXIT_USAGE};

/// Base URL used when neither `--remote` nor `POINTFIT_API_URL` is set.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

/// Environment variable holding the remote base URL.
pub const API_URL_ENV: &str = "POINTFIT_API_URL";

pub struct FitClient {
    client: Client,
    base_url: String,
}

impl FitClient {
    pub fn new(config: &ClientConfig) -> Result<Self, AppError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(AppError::new(
                EXIT_USAGE,
                format!("Remote URL must start with http:// or https:// (got '{base_url}')."),
            ));
        }
        Ok(Self {
            client: Client::new(),
            base_url,
        })
    }

    /// Resolve the base URL from an explicit value, then the environment, then the default.
    pub fn config_from_env(explicit: Option<&str>) -> ClientConfig {
        dotenvy::dotenv().ok();
        let base_url = explicit
            .map(str::to_string)
            .or_else(|| std::env::var(API_URL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        ClientConfig { base_url }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/api/fit", self.base_url)
    }

    pub fn fit(&self, req: &FitRequest) -> Result<FitResult, AppError> {
        let url = self.endpoint();
        log::debug!("POST {url} ({}, {} points)", req.regression_type, req.points.len());

        let response = self
            .client
            .post(&url)
            .json(req)
            .send()
            .map_err(|e| AppError::new(EXIT_REMOTE, format!("Request to {url} failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| AppError::new(EXIT_REMOTE, format!("Failed to read response from {url}: {e}")))?;

        if !status.is_success() {
            return Err(AppError::new(EXIT_REMOTE, error_message(status, &body)));
        }

        serde_json::from_str(&body)
            .map_err(|e| AppError::new(EXIT_REMOTE, format!("Invalid fit response from {url}: {e}")))
    }
}

/// Message to show for a failed response.
pub fn error_message(status: StatusCode, body: &str) -> String {
    let fallback = || {
        status
            .canonical_reason()
            .map(str::to_string)
            .unwrap_or_else(|| status.to_string())
    };

    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return fallback();
    };

    match value.get("detail") {
        Some(serde_json::Value::String(detail)) => return detail.clone(),
        // Framework-style validation errors: a list of `{ "msg": ... }` entries.
        Some(serde_json::Value::Array(items)) => {
            let msgs: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                .collect();
            if !msgs.is_empty() {
                return msgs.join("; ");
            }
        }
        _ => {}
    }

    value
        .get("msg")
        .and_then(|m| m.as_str())
        .map(str::to_string)
        .unwrap_or_else(fallback)
}
