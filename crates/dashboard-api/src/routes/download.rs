//! Download service proxy routes.
//!
//! Upstream responses are passed through with their body intact. Statuses are
//! kept, except that an accepted submission is always answered as `200 OK`.
//! Submissions and status changes are mirrored into the local task table.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use database::models::{DownloadTask, NewDownloadTask};
use database::{task, DatabaseError};
use download_client::{DownloadRequest, ProxyBody, ProxyResponse};
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Download submission from the dashboard.
#[derive(Debug, Deserialize)]
pub struct RunRequest {
    #[serde(default)]
    pub bbox: Option<String>,
    #[serde(default)]
    pub wkt: Option<String>,
    #[serde(alias = "startDate")]
    pub start: String,
    #[serde(alias = "endDate")]
    pub end: String,
}

fn into_response(upstream: ProxyResponse) -> Response {
    let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
    match upstream.body {
        ProxyBody::Json(value) => (status, Json(value)).into_response(),
        ProxyBody::Text { content_type, text } => {
            (status, [(header::CONTENT_TYPE, content_type)], text).into_response()
        }
    }
}

/// Validate that a submitted AOI string is one this server could have produced.
fn check_aoi(field: &str, value: Option<&str>) -> Result<()> {
    if let Some(text) = value {
        if aoi::import_aoi(text)?.is_none() {
            return Err(ApiError::BadRequest(format!("{} cannot be empty", field)));
        }
    }
    Ok(())
}

/// Download service health, passed through.
pub async fn health(State(state): State<AppState>) -> Result<Response> {
    let upstream = state.downloads.health().await?;
    Ok(into_response(upstream))
}

/// Submit a download and record the returned task.
///
/// Any upstream 2xx is answered as `200 OK`; errors keep their status.
pub async fn run(
    State(state): State<AppState>,
    Json(request): Json<RunRequest>,
) -> Result<Response> {
    if request.bbox.is_none() && request.wkt.is_none() {
        return Err(ApiError::BadRequest("Missing aoi/start/end".to_string()));
    }
    check_aoi("bbox", request.bbox.as_deref())?;
    check_aoi("wkt", request.wkt.as_deref())?;
    let (start, end) = database::validation::validate_date_range(&request.start, &request.end)
        .map_err(DatabaseError::from)?;

    let submission = DownloadRequest {
        bbox: request.bbox,
        wkt: request.wkt,
        start,
        end,
    };
    let mut upstream = state.downloads.run(&submission).await?;

    if upstream.is_success() {
        upstream.status = StatusCode::OK.as_u16();
        match upstream.task_id() {
            Some(task_id) => {
                let record = NewDownloadTask {
                    task_id: task_id.clone(),
                    wkt: submission.wkt,
                    bbox: submission.bbox,
                    start_date: submission.start,
                    end_date: submission.end,
                    status: "QUEUED".to_string(),
                };
                match task::create_task(state.db.pool(), &record).await {
                    Ok(()) => info!(task_id = %task_id, "Download submitted"),
                    Err(e) => warn!(task_id = %task_id, error = %e, "Failed to record task"),
                }
            }
            None => warn!("Download service accepted the job without a task ID"),
        }
    }

    Ok(into_response(upstream))
}

/// Task status, passed through. A reported state updates the local record.
pub async fn status(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Response> {
    let upstream = state.downloads.status(&task_id).await?;

    if upstream.is_success() {
        if let Some(task_state) = upstream.task_state() {
            record_status(&state, &task_id, task_state.as_str()).await?;
        }
    }

    Ok(into_response(upstream))
}

/// Cancel a task, passed through. A successful cancel marks the record.
pub async fn cancel(
    State(state): State<AppState>,
    Path(task_id): Path<String>,
) -> Result<Response> {
    let upstream = state.downloads.cancel(&task_id).await?;

    if upstream.is_success() {
        record_status(&state, &task_id, "CANCELLED").await?;
    }

    Ok(into_response(upstream))
}

/// Locally recorded tasks, newest first.
pub async fn tasks(State(state): State<AppState>) -> Result<Json<Vec<DownloadTask>>> {
    let tasks = task::list_tasks(state.db.pool()).await?;
    Ok(Json(tasks))
}

/// Store a task's latest status. Tasks submitted elsewhere are skipped.
async fn record_status(state: &AppState, task_id: &str, status: &str) -> Result<()> {
    match task::update_task_status(state.db.pool(), task_id, status).await {
        Err(e) if e.is_not_found() => {
            tracing::debug!(task_id, "Status for untracked task");
            Ok(())
        }
        other => Ok(other?),
    }
}
