//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A download job submitted to the external download service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct DownloadTask {
    /// Task ID assigned by the download service.
    pub task_id: String,
    /// AOI as WKT, if submitted.
    pub wkt: Option<String>,
    /// AOI as BBOX, if submitted.
    pub bbox: Option<String>,
    /// Start of the imagery window (YYYY-MM-DD).
    pub start_date: String,
    /// End of the imagery window (YYYY-MM-DD).
    pub end_date: String,
    /// Last known status reported by the service (e.g. "QUEUED", "DONE").
    pub status: String,
    /// Creation timestamp.
    pub created_at: String,
    /// Last update timestamp.
    pub updated_at: String,
}

/// Fields needed to record a newly submitted download task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDownloadTask {
    pub task_id: String,
    pub wkt: Option<String>,
    pub bbox: Option<String>,
    pub start_date: String,
    pub end_date: String,
    pub status: String,
}

/// A stored flood-analysis result for one AOI and a pre/post image pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FloodEvent {
    /// Auto-incrementing ID.
    pub id: i64,
    /// AOI the analysis ran on, as WKT.
    pub aoi_wkt: String,
    /// Product ID of the pre-flood image.
    pub pre_product_id: String,
    /// Product ID of the post-flood image.
    pub post_product_id: String,
    /// Acquisition time of the pre-flood image (ISO 8601).
    pub pre_date: String,
    /// Acquisition time of the post-flood image (ISO 8601).
    pub post_date: String,
    /// Path to the generated flood mask raster.
    pub flood_mask_path: String,
    /// Percentage of the AOI detected as flooded.
    pub flooded_pct: f64,
    /// Flooded area geometry as WKT, if extracted.
    pub flood_geom: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
}

/// Fields needed to store a flood event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFloodEvent {
    pub aoi_wkt: String,
    pub pre_product_id: String,
    pub post_product_id: String,
    pub pre_date: String,
    pub post_date: String,
    pub flood_mask_path: String,
    pub flooded_pct: f64,
    #[serde(default)]
    pub flood_geom: Option<String>,
}

/// Filter for listing flood events. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFilter {
    /// Exact AOI WKT match.
    pub aoi_wkt: Option<String>,
    /// Earliest post-flood date, inclusive (YYYY-MM-DD).
    pub from: Option<String>,
    /// Latest post-flood date, inclusive (YYYY-MM-DD).
    pub to: Option<String>,
}

/// A dashboard account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    /// bcrypt hash; never sent to clients.
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: String,
}

/// Fields needed to register an account. The password is already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
}
