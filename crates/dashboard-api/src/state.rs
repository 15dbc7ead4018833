//! Application state shared across handlers.

use database::Database;
use download_client::DownloadClient;

use crate::auth::Auth;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection.
    pub db: Database,
    /// Download service client.
    pub downloads: DownloadClient,
    /// Password hashing and token signing.
    pub auth: Auth,
}

impl AppState {
    /// Create new application state.
    pub fn new(db: Database, downloads: DownloadClient, auth: Auth) -> Self {
        Self {
            db,
            downloads,
            auth,
        }
    }
}
