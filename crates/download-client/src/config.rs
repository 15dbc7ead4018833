//! Configuration types for download-client.

/// Configuration for connecting to the download service.
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    /// Base URL of the service (e.g., "http://download:8010"), without a trailing slash.
    pub base_url: String,
}

impl DownloadConfig {
    /// Create a new configuration with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Get the health check endpoint URL.
    pub fn health_url(&self) -> String {
        format!("{}/health", self.base_url)
    }

    /// Get the primary submit endpoint URL.
    pub fn run_url(&self) -> String {
        format!("{}/run", self.base_url)
    }

    /// Get the fallback submit endpoint URL, used when `/run` is missing.
    pub fn download_url(&self) -> String {
        format!("{}/download", self.base_url)
    }

    /// Get the status endpoint URL for a task.
    pub fn status_url(&self, task_id: &str) -> String {
        format!("{}/status/{}", self.base_url, urlencoding::encode(task_id))
    }

    /// Get the cancel endpoint URL for a task.
    pub fn cancel_url(&self, task_id: &str) -> String {
        format!("{}/cancel/{}", self.base_url, urlencoding::encode(task_id))
    }
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self::new("http://download:8010")
    }
}
