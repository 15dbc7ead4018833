//! Dashboard statistics.

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::Result;
use crate::state::AppState;

/// Dashboard statistics.
#[derive(Clone, Serialize)]
pub struct Stats {
    pub task_count: i64,
    pub event_count: i64,
    pub tasks: Vec<StatusStats>,
}

/// Number of tasks in one status.
#[derive(Clone, Serialize)]
pub struct StatusStats {
    pub status: String,
    pub task_count: i64,
}

/// Get dashboard statistics as JSON.
pub async fn stats_api(State(state): State<AppState>) -> Result<Json<Stats>> {
    let pool = state.db.pool();

    let by_status = database::task::count_tasks_by_status(pool).await?;
    let event_count = database::flood_event::count_events(pool).await?;

    let task_count: i64 = by_status.iter().map(|(_, c)| *c).sum();
    let tasks = by_status
        .into_iter()
        .map(|(status, task_count)| StatusStats { status, task_count })
        .collect();

    Ok(Json(Stats {
        task_count,
        event_count,
        tasks,
    }))
}
