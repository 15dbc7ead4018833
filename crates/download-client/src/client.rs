//! Download service HTTP client.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::{debug, info, warn};

use crate::config::DownloadConfig;
use crate::error::{DownloadError, Result};
use crate::types::{DownloadRequest, ProxyBody, ProxyResponse, TaskState};

/// Client for communicating with the download service.
#[derive(Clone)]
pub struct DownloadClient {
    http: Client,
    config: DownloadConfig,
}

impl DownloadClient {
    /// Create a client. No request is made until the first call.
    pub fn new(config: DownloadConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(DownloadError::Http)?;

        Ok(Self { http, config })
    }

    /// Check the service's health endpoint.
    pub async fn health(&self) -> Result<ProxyResponse> {
        let url = self.config.health_url();
        debug!("Health check: {}", url);
        self.send(self.http.get(&url)).await
    }

    /// Submit a download.
    ///
    /// Posts to `/run`; if the service answers 404 the same body is posted
    /// to `/download` instead.
    pub async fn run(&self, request: &DownloadRequest) -> Result<ProxyResponse> {
        let response = self
            .send(self.http.post(self.config.run_url()).json(request))
            .await?;

        if response.status != StatusCode::NOT_FOUND.as_u16() {
            return Ok(response);
        }

        debug!("/run not found, falling back to /download");
        self.send(self.http.post(self.config.download_url()).json(request))
            .await
    }

    /// Fetch the status of a task.
    pub async fn status(&self, task_id: &str) -> Result<ProxyResponse> {
        self.send(self.http.get(self.config.status_url(task_id)))
            .await
    }

    /// Cancel a task.
    pub async fn cancel(&self, task_id: &str) -> Result<ProxyResponse> {
        info!(task_id, "Cancelling download task");
        self.send(self.http.post(self.config.cancel_url(task_id)))
            .await
    }

    /// Poll a task until it reaches a terminal state.
    ///
    /// Waits `interval` before each poll. Stops on the first failed poll, and
    /// gives up with [`DownloadError::PollLimit`] after `max_polls`.
    pub async fn wait_for_completion(
        &self,
        task_id: &str,
        interval: Duration,
        max_polls: u32,
    ) -> Result<TaskState> {
        for poll in 1..=max_polls {
            tokio::time::sleep(interval).await;

            let response = self.status(task_id).await?;
            if !response.is_success() {
                warn!(task_id, status = response.status, "Status poll failed");
                return Err(DownloadError::Upstream {
                    status: response.status,
                    body: response.body_text(),
                });
            }

            match response.task_state() {
                Some(state) if state.is_terminal() => {
                    info!(task_id, state = %state, polls = poll, "Download task finished");
                    return Ok(state);
                }
                Some(state) => debug!(task_id, state = %state, poll, "Download task pending"),
                None => debug!(task_id, poll, "Status response without a state"),
            }
        }

        Err(DownloadError::PollLimit {
            task_id: task_id.to_string(),
            polls: max_polls,
        })
    }

    /// Get the configuration.
    pub fn config(&self) -> &DownloadConfig {
        &self.config
    }

    async fn send(&self, request: RequestBuilder) -> Result<ProxyResponse> {
        let response = request.send().await.map_err(DownloadError::Unreachable)?;
        read_response(response).await
    }
}

/// Keep the upstream status; decode the body as JSON when possible.
async fn read_response(response: Response) -> Result<ProxyResponse> {
    let status = response.status().as_u16();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("text/plain")
        .to_string();
    let text = response.text().await?;

    let body = match serde_json::from_str(&text) {
        Ok(value) => ProxyBody::Json(value),
        Err(_) => ProxyBody::Text { content_type, text },
    };

    Ok(ProxyResponse { status, body })
}

impl std::fmt::Debug for DownloadClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadClient")
            .field("config", &self.config)
            .finish()
    }
}
