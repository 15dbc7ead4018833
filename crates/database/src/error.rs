//! Database error types.

use thiserror::Error;

use crate::validation::ValidationError;

/// Errors from the task and flood-event stores.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Connection or query failure.
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// No row with this key. `entity` is `DownloadTask` or `FloodEvent`.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A download task ID was recorded twice.
    #[error("{entity} already exists: {id}")]
    AlreadyExists { entity: &'static str, id: String },

    /// A field was rejected before reaching SQLite.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
}

impl DatabaseError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound { .. })
    }
}

/// Result type for database operations.
pub type Result<T> = std::result::Result<T, DatabaseError>;
