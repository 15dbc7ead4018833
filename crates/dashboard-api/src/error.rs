//! Error types for the dashboard API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use database::DatabaseError;
use download_client::DownloadError;
use thiserror::Error;

/// Errors that can occur while handling a dashboard request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// AOI could not be normalized.
    #[error("{0}")]
    Aoi(#[from] aoi::AoiError),

    /// Download service error.
    #[error("{0}")]
    Download(#[from] DownloadError),

    /// Malformed request.
    #[error("{0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Database(DatabaseError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Database(DatabaseError::AlreadyExists { .. }) => StatusCode::CONFLICT,
            ApiError::Database(DatabaseError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Aoi(err) if err.is_input_error() => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Aoi(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Download(DownloadError::Upstream { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            ApiError::Download(_) => StatusCode::BAD_GATEWAY,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            ApiError::Download(DownloadError::Unreachable(err)) => {
                tracing::error!("Download service unreachable: {}", err);
                serde_json::json!({
                    "error": "Download service unreachable",
                    "detail": err.to_string(),
                })
            }
            _ => {
                if status.is_server_error() {
                    tracing::error!("{}", self);
                } else {
                    tracing::debug!(status = status.as_u16(), "Request rejected: {}", self);
                }
                serde_json::json!({ "error": self.to_string() })
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
