//! HTTP backend for the flood dashboard.
//!
//! Serves the built SPA and a JSON API that normalizes areas of interest,
//! proxies the Sentinel-1 download service, stores flood analysis results
//! and handles account login.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod state;

use std::path::Path;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;

pub use auth::Auth;
pub use config::{Config, ConfigError};
pub use error::{ApiError, Result};
pub use state::AppState;

/// Build the application: API routes, then static files for everything else.
pub fn app(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    routes::router()
        .fallback_service(ServeDir::new(static_dir.as_ref()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
