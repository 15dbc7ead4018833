//! Regions and the canonical AOI record.

use serde::{Deserialize, Serialize};

use crate::bbox::{rectangle_to_bbox, BoundingBox};
use crate::error::{AoiError, Result};
use crate::point::Point;
use crate::wkt::{polygon_to_wkt, rectangle_to_wkt, MIN_POLYGON_VERTICES};

/// A user-drawn area of interest. Exactly one shape is active at a time.
///
/// Serializes as `{"type":"polygon","coords":[...]}` or
/// `{"type":"rectangle","northEast":{...},"southWest":{...}}`, the same shape
/// the dashboard keeps in local storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Region {
    /// Vertices in drawing order.
    Polygon { coords: Vec<Point> },
    #[serde(rename_all = "camelCase")]
    Rectangle { north_east: Point, south_west: Point },
}

impl Region {
    pub fn polygon(coords: Vec<Point>) -> Self {
        Region::Polygon { coords }
    }

    pub fn rectangle(north_east: Point, south_west: Point) -> Self {
        Region::Rectangle {
            north_east,
            south_west,
        }
    }

    /// WKT polygon. Empty string for a polygon with no vertices.
    pub fn wkt(&self) -> String {
        match self {
            Region::Polygon { coords } => polygon_to_wkt(coords),
            Region::Rectangle {
                north_east,
                south_west,
            } => rectangle_to_wkt(*north_east, *south_west),
        }
    }

    /// BBOX string. Polygons scan every vertex; rectangles use their corners as given.
    pub fn bbox(&self) -> Result<String> {
        match self {
            Region::Polygon { .. } => Ok(self.bounding_box()?.to_string()),
            Region::Rectangle {
                north_east,
                south_west,
            } => Ok(rectangle_to_bbox(*north_east, *south_west)),
        }
    }

    pub fn bounding_box(&self) -> Result<BoundingBox> {
        match self {
            Region::Polygon { coords } => {
                BoundingBox::from_points(coords).ok_or(AoiError::EmptyGeometry)
            }
            Region::Rectangle {
                north_east,
                south_west,
            } => Ok(BoundingBox::from_corners(*north_east, *south_west)),
        }
    }

    /// Midpoint of the bounding box, used to recenter the map.
    pub fn center(&self) -> Result<Point> {
        Ok(self.bounding_box()?.center())
    }

    /// Short description for status lines.
    pub fn label(&self) -> String {
        match self {
            Region::Polygon { coords } => format!("Polygon with {} points", coords.len()),
            Region::Rectangle { .. } => "Rectangle".to_string(),
        }
    }

    /// Check that a rectangle's north-east corner really is north-east of
    /// its south-west corner. Polygons always pass.
    ///
    /// The WKT/BBOX builders never call this; it is opt-in for callers that
    /// want to reject inverted input instead of emitting it.
    pub fn validate_corners(&self) -> Result<()> {
        match self {
            Region::Rectangle {
                north_east,
                south_west,
            } if north_east.lat < south_west.lat || north_east.lng < south_west.lng => {
                Err(AoiError::InvertedCorners {
                    north_east: *north_east,
                    south_west: *south_west,
                })
            }
            _ => Ok(()),
        }
    }
}

/// A region together with its precomputed WKT and BBOX strings.
///
/// This is what gets submitted to the download service, stored, copied to
/// the clipboard and restored across sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AoiRecord {
    #[serde(flatten)]
    region: Region,
    wkt: String,
    bbox: String,
}

impl AoiRecord {
    /// Build the record, deriving `wkt` and `bbox` from the region.
    ///
    /// Polygons need at least [`MIN_POLYGON_VERTICES`] vertices, the same
    /// minimum the WKT importer enforces, so every record re-imports.
    pub fn from_region(region: Region) -> Result<Self> {
        if let Region::Polygon { coords } = &region {
            if !coords.is_empty() && coords.len() < MIN_POLYGON_VERTICES {
                return Err(AoiError::TooFewVertices {
                    count: coords.len(),
                });
            }
        }
        let bbox = region.bbox()?;
        let wkt = region.wkt();
        Ok(Self { region, wkt, bbox })
    }

    pub fn region(&self) -> &Region {
        &self.region
    }

    pub fn wkt(&self) -> &str {
        &self.wkt
    }

    pub fn bbox(&self) -> &str {
        &self.bbox
    }

    pub fn into_region(self) -> Region {
        self.region
    }
}

impl TryFrom<Region> for AoiRecord {
    type Error = AoiError;

    fn try_from(region: Region) -> Result<Self> {
        AoiRecord::from_region(region)
    }
}
