//! AOI normalization routes.

use aoi::{cli_command, import_aoi, AoiRecord, DrawnShape, Point, Region};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Normalized AOI as returned to the dashboard.
#[derive(Debug, Serialize)]
pub struct AoiResponse {
    #[serde(flatten)]
    pub record: AoiRecord,
    pub center: Point,
    pub label: String,
}

impl AoiResponse {
    fn new(record: AoiRecord) -> Result<Self> {
        let center = record.region().center()?;
        let label = record.region().label();
        Ok(Self {
            record,
            center,
            label,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    pub text: String,
}

/// Parse pasted BBOX or WKT text.
///
/// Blank text is a no-op and answers `204 No Content`.
pub async fn import(Json(request): Json<ImportRequest>) -> Result<Response> {
    match import_aoi(&request.text)? {
        Some(record) => Ok(Json(AoiResponse::new(record)?).into_response()),
        None => Ok(StatusCode::NO_CONTENT.into_response()),
    }
}

/// Normalize a shape drawn on the map.
///
/// Rectangles must arrive with their north-east corner above and to the
/// right of the south-west one.
pub async fn normalize(Json(shape): Json<DrawnShape>) -> Result<Json<AoiResponse>> {
    let region = Region::from(shape);
    region.validate_corners()?;
    let record = AoiRecord::from_region(region)?;
    tracing::debug!(label = %record.region().label(), "Normalized drawn AOI");
    Ok(Json(AoiResponse::new(record)?))
}

#[derive(Debug, Deserialize)]
pub struct CliRequest {
    #[serde(default = "default_username")]
    pub username: String,
    pub start: String,
    pub end: String,
    pub wkt: String,
}

fn default_username() -> String {
    "YOUR_EMAIL".to_string()
}

#[derive(Debug, Serialize)]
pub struct CliResponse {
    pub command: String,
}

/// Build the download CLI invocation for an AOI.
pub async fn cli(Json(request): Json<CliRequest>) -> Result<Json<CliResponse>> {
    let (start, end) = database::validation::validate_date_range(&request.start, &request.end)
        .map_err(database::DatabaseError::from)?;

    Ok(Json(CliResponse {
        command: cli_command(&request.username, &start, &end, &request.wkt),
    }))
}
