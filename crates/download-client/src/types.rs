//! Request and response types for the download service.

use std::fmt;

use aoi::AoiRecord;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of a download submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wkt: Option<String>,
    pub start: String,
    pub end: String,
}

impl DownloadRequest {
    /// Build a request from a normalized AOI. Both `bbox` and `wkt` are sent.
    pub fn from_aoi(record: &AoiRecord, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            bbox: Some(record.bbox().to_string()),
            wkt: Some(record.wkt().to_string()),
            start: start.into(),
            end: end.into(),
        }
    }
}

/// Upstream response body: JSON when it parses, raw text otherwise.
#[derive(Debug, Clone, PartialEq)]
pub enum ProxyBody {
    Json(Value),
    Text { content_type: String, text: String },
}

/// An upstream response, kept intact for pass-through.
#[derive(Debug, Clone, PartialEq)]
pub struct ProxyResponse {
    pub status: u16,
    pub body: ProxyBody,
}

impl ProxyResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json(&self) -> Option<&Value> {
        match &self.body {
            ProxyBody::Json(value) => Some(value),
            ProxyBody::Text { .. } => None,
        }
    }

    /// Task ID from a submission response, if any.
    pub fn task_id(&self) -> Option<String> {
        self.json().and_then(task_id)
    }

    /// Task state from a status response, if any.
    pub fn task_state(&self) -> Option<TaskState> {
        self.json().and_then(TaskState::from_body)
    }

    /// Body as text, for error messages.
    pub fn body_text(&self) -> String {
        match &self.body {
            ProxyBody::Json(value) => value.to_string(),
            ProxyBody::Text { text, .. } => text.clone(),
        }
    }
}

/// Read the task ID from a submission response.
///
/// The service has used `task_id`, `id` and `taskId` over time. Numeric IDs
/// are accepted and stringified.
pub fn task_id(body: &Value) -> Option<String> {
    ["task_id", "id", "taskId"]
        .iter()
        .filter_map(|key| body.get(key))
        .find_map(|value| match value {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}

/// States after which a task will not change again.
pub const TERMINAL_STATES: [&str; 5] = ["DONE", "COMPLETED", "ERROR", "FAILED", "CANCELLED"];

/// A task status string as reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskState(String);

impl TaskState {
    pub fn new(state: impl Into<String>) -> Self {
        Self(state.into())
    }

    /// Read the `status` field of a status response, falling back to the
    /// legacy `state` field when `status` is missing, null or empty.
    pub fn from_body(body: &Value) -> Option<Self> {
        ["status", "state"]
            .iter()
            .filter_map(|key| body.get(key).and_then(Value::as_str))
            .find(|s| !s.is_empty())
            .map(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-insensitive check against [`TERMINAL_STATES`].
    pub fn is_terminal(&self) -> bool {
        TERMINAL_STATES
            .iter()
            .any(|s| s.eq_ignore_ascii_case(&self.0))
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
