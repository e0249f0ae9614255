//! Health check endpoint
//!
//! Reports from the in-memory pick list only; the record store is never
//! contacted, so the check answers while the store is unreachable.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::build_info::BuildInfo;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
    /// Last store fetch failed; stale picks are being served
    Degraded,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub module: &'static str,
    pub version: &'static str,
    /// Picks currently held in memory
    pub picks: usize,
    pub store_error: Option<String>,
}

/// GET /health (always 200)
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_error = state.picks.error().await;
    let status = match store_error {
        Some(_) => HealthStatus::Degraded,
        None => HealthStatus::Ok,
    };

    Json(HealthResponse {
        status,
        module: "bookclub-dash",
        version: BuildInfo::CURRENT.version,
        picks: state.picks.snapshot().await.len(),
        store_error,
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
