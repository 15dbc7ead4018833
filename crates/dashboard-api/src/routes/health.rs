//! Health check endpoints.

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct Health {
    pub status: String,
}

/// Liveness check.
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_string(),
    })
}

#[derive(Serialize)]
pub struct ApiHealth {
    pub ok: bool,
    pub ts: String,
}

/// Health check polled by the dashboard, with the server time.
pub async fn api_health() -> Json<ApiHealth> {
    Json(ApiHealth {
        ok: true,
        ts: chrono::Utc::now().to_rfc3339(),
    })
}
