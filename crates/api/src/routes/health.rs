use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the configured scripts directory exists.
    pub scripts_dir_present: bool,
}

/// GET /health -- returns service health and scripts directory presence.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let scripts_dir_present = tokio::fs::metadata(&state.runner.config().scripts_dir)
        .await
        .map(|meta| meta.is_dir())
        .unwrap_or(false);

    let status = if scripts_dir_present { "ok" } else { "degraded" };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        scripts_dir_present,
    })
}

/// Mount health check routes.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
