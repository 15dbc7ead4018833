//! Flood event routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use database::flood_event;
use database::models::{EventFilter, FloodEvent, NewFloodEvent};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Query string for listing events.
#[derive(Debug, Default, Deserialize)]
pub struct EventQuery {
    /// AOI as BBOX or WKT.
    pub aoi: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Created {
    pub id: i64,
}

/// Canonical WKT for any AOI text the importer accepts.
fn canonical_wkt(text: &str) -> Result<String> {
    match aoi::import_aoi(text)? {
        Some(record) => Ok(record.wkt().to_string()),
        None => Err(ApiError::BadRequest("aoi cannot be empty".to_string())),
    }
}

/// List events, newest post-flood date first.
///
/// Events are stored against canonical WKT, so a BBOX filter matches the
/// polygon it describes.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<EventQuery>,
) -> Result<Json<Vec<FloodEvent>>> {
    let aoi_wkt = match query.aoi.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(text) => Some(canonical_wkt(text)?),
        None => None,
    };
    let filter = EventFilter {
        aoi_wkt,
        from: query.from,
        to: query.to,
    };

    let events = flood_event::list_events(state.db.pool(), &filter).await?;
    Ok(Json(events))
}

/// Store an analysis result.
pub async fn create(
    State(state): State<AppState>,
    Json(mut event): Json<NewFloodEvent>,
) -> Result<(StatusCode, Json<Created>)> {
    event.aoi_wkt = canonical_wkt(&event.aoi_wkt)?;
    let id = flood_event::create_event(state.db.pool(), &event).await?;
    Ok((StatusCode::CREATED, Json(Created { id })))
}

pub async fn get(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<FloodEvent>> {
    let event = flood_event::get_event(state.db.pool(), id).await?;
    Ok(Json(event))
}
