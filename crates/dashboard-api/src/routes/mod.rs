//! Route handlers for the dashboard API.

pub mod aoi;
pub mod auth;
pub mod download;
pub mod events;
pub mod health;
pub mod stats;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the router with all API routes.
pub fn router() -> Router<AppState> {
    Router::new()
        // Health checks
        .route("/health", get(health::health))
        .route("/api/health", get(health::api_health))
        .route("/api/stats", get(stats::stats_api))
        // Accounts
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        // AOI normalization
        .route("/api/aoi/import", post(aoi::import))
        .route("/api/aoi/normalize", post(aoi::normalize))
        .route("/api/aoi/cli", post(aoi::cli))
        // Download service proxy
        .route("/api/download/health", get(download::health))
        .route("/api/download/run", post(download::run))
        .route("/api/download/status/:id", get(download::status))
        .route("/api/download/cancel/:id", post(download::cancel))
        .route("/api/download/tasks", get(download::tasks))
        // Flood events
        .route("/api/events", get(events::list).post(events::create))
        .route("/api/events/:id", get(events::get))
}
