//! HTTP surface for the fitting service.
//!
//! Routes:
//! - `POST /api/fit`    fit one model, respond with the shared envelope
//! - `GET  /api/health` liveness probe
//!
//! Every error body is `{"detail": "<message>"}` so callers can show the
//! message verbatim. Fits run on tokio's blocking pool; the service keeps no
//! state between requests.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{info, warn};

use crate::domain::{FitRequest, ServeConfig};
use crate::error::{AppError, EXIT_USAGE, FitError};
use crate::fit::fit;

/// Host used when neither `--host` nor `POINTFIT_HOST` is set.
pub const DEFAULT_HOST: &str = "127.0.0.1";
/// Port used when neither `--port` nor `POINTFIT_PORT` is set.
pub const DEFAULT_PORT: u16 = 8000;

/// An error response: status plus a display-ready `detail`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }
}

impl From<FitError> for ApiError {
    fn from(err: FitError) -> Self {
        match err {
            FitError::Validation(m) => ApiError::new(StatusCode::BAD_REQUEST, m),
            FitError::Degenerate(m) => ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, m),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(serde_json::json!({ "detail": self.detail }))).into_response()
    }
}

pub fn build_router() -> Router {
    Router::new()
        .route("/api/fit", post(fit_handler))
        .route("/api/health", get(health_handler))
}

pub async fn fit_handler(payload: Result<Json<FitRequest>, JsonRejection>) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!("rejected fit request body: {}", rejection.body_text());
            return ApiError::new(rejection.status(), rejection.body_text()).into_response();
        }
    };

    let kind = req.regression_type;
    let n = req.points.len();
    match tokio::task::spawn_blocking(move || fit(&req)).await {
        Ok(Ok(result)) => {
            info!("fit {kind}: n={n} r2={:.6}", result.r2_score);
            Json(result).into_response()
        }
        Ok(Err(err)) => {
            warn!("fit {kind} failed: n={n}: {err}");
            ApiError::from(err).into_response()
        }
        Err(join_err) => {
            warn!("fit {kind} task failed: {join_err}");
            ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "Fit task failed unexpectedly")
                .into_response()
        }
    }
}

pub async fn health_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Run the server until Ctrl+C.
pub fn serve(config: &ServeConfig) -> Result<(), AppError> {
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to create runtime: {e}")))?;

    let bind_addr = config.bind_addr();
    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(&bind_addr)
            .await
            .map_err(|e| AppError::new(EXIT_USAGE, format!("Failed to bind {bind_addr}: {e}")))?;
        info!("listening on http://{bind_addr} (POST /api/fit, GET /api/health)");

        axum::serve(listener, build_router())
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| AppError::new(EXIT_USAGE, format!("Server error: {e}")))?;

        info!("server stopped");
        Ok(())
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("failed to install Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
}
