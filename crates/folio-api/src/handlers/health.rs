//! Liveness plus a readiness check on the resume artifact

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub resume_available: bool,
}

/// GET /health
///
/// Answers 503 while the resume cannot be opened, so a broken deployment
/// shows up here before a visitor redeems a link.
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let resume_available = state.resume.artifact_ready().await;
    let (code, status) = if resume_available {
        (StatusCode::OK, "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded")
    };

    (
        code,
        Json(HealthResponse {
            status,
            version: env!("CARGO_PKG_VERSION"),
            resume_available,
        }),
    )
}
