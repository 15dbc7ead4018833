//! Flood dashboard server.

use dashboard_api::{app, AppState, Auth, Config};
use database::Database;
use download_client::{DownloadClient, DownloadConfig};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const DEV_JWT_SECRET: &str = "secretkey";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting dashboard server");

    // Connect to database
    let db = Database::connect(&config.database_url).await?;
    db.migrate().await?;

    let downloads = DownloadClient::new(DownloadConfig::new(&config.download_url))?;
    info!(url = %config.download_url, "Using download service");

    let secret = config.jwt_secret.clone().unwrap_or_else(|| {
        warn!("JWT_SECRET not set, signing login tokens with the development secret");
        DEV_JWT_SECRET.to_string()
    });
    let auth = Auth::new(&secret);

    let state = AppState::new(db, downloads, auth);
    let app = app(state, &config.static_dir);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "Dashboard server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
