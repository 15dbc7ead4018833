//! Error types for download-client.

use thiserror::Error;

/// Errors that can occur when talking to the download service.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The service could not be reached (connection refused, timeout, DNS).
    #[error("Download service unreachable: {0}")]
    Unreachable(#[source] reqwest::Error),

    /// HTTP error while building a request or reading a response.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("Upstream error {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Polling gave up before the task reached a terminal state.
    #[error("Task {task_id} still running after {polls} polls")]
    PollLimit { task_id: String, polls: u32 },
}

/// Result type for download service operations.
pub type Result<T> = std::result::Result<T, DownloadError>;
