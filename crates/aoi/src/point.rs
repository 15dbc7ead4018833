//! Geographic coordinates.

use serde::{Deserialize, Serialize};

use crate::error::{AoiError, Result};

/// A geographic coordinate in degrees.
///
/// Points are stored latitude first, but every text format this crate emits
/// (WKT, BBOX) is longitude first. The swap happens at serialization only.
/// No range check is applied: values outside [-90, 90] / [-180, 180] pass
/// through unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub lat: f64,
    pub lng: f64,
}

impl Point {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// The `lng lat` pair used inside a WKT ring.
    pub fn wkt_pair(&self) -> String {
        format!("{} {}", format_coord(self.lng), format_coord(self.lat))
    }
}

/// Format a coordinate the way the dashboard's backend expects it.
///
/// Shortest decimal that round-trips, with no trailing zeros and `-0` printed
/// as `0`. This is a wire format: changing it breaks stored `aoi_wkt` values.
pub fn format_coord(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}

/// Parse one numeric coordinate token, rejecting NaN and infinities.
pub(crate) fn parse_coord(token: &str) -> Result<f64> {
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| AoiError::InvalidCoordinate {
            token: token.to_string(),
        })
}
