//! Health check handlers.

use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

#[derive(serde::Serialize)]
pub(super) struct HealthCheckResponse {
    pub status: &'static str,
    /// `configured` or `not_configured`; the process stays up either way.
    pub signing: &'static str,
    pub version: &'static str,
}

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Health summary, including whether upload signing can succeed.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let signing = if state.config.signing_configured() {
        "configured"
    } else {
        "not_configured"
    };

    (
        StatusCode::OK,
        Json(HealthCheckResponse {
            status: "healthy",
            signing,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}
