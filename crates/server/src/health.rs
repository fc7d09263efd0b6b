//! Liveness probe

use axum::{response::Json, routing::get, Router};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Body of `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub timestamp: String,
}

/// Reports `ok` whenever the process can serve requests
///
/// Upstream services are not probed.
pub async fn health_handler() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// Router exposing `GET /health`
pub fn health_router() -> Router {
    Router::new().route("/health", get(health_handler))
}
