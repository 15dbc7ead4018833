//! Bounding boxes in `minLng,minLat,maxLng,maxLat` form.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AoiError, Result};
use crate::point::{format_coord, parse_coord, Point};

/// Exactly four plain decimals. No exponents, no leading `+`, ASCII digits only.
static BBOX_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(-?[0-9]+(\.[0-9]+)?),\s*(-?[0-9]+(\.[0-9]+)?),\s*(-?[0-9]+(\.[0-9]+)?),\s*(-?[0-9]+(\.[0-9]+)?)\s*$",
    )
    .expect("bbox pattern is valid")
});

/// An axis-aligned bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_lng: f64,
    pub min_lat: f64,
    pub max_lng: f64,
    pub max_lat: f64,
}

impl BoundingBox {
    /// True min/max over every point, in any order. `None` for an empty slice.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let init = Self {
            min_lng: first.lng,
            min_lat: first.lat,
            max_lng: first.lng,
            max_lat: first.lat,
        };

        Some(points.iter().skip(1).fold(init, |acc, p| Self {
            min_lng: acc.min_lng.min(p.lng),
            min_lat: acc.min_lat.min(p.lat),
            max_lng: acc.max_lng.max(p.lng),
            max_lat: acc.max_lat.max(p.lat),
        }))
    }

    /// Take the corners as given. No min/max recomputation.
    pub fn from_corners(north_east: Point, south_west: Point) -> Self {
        Self {
            min_lng: south_west.lng,
            min_lat: south_west.lat,
            max_lng: north_east.lng,
            max_lat: north_east.lat,
        }
    }

    pub fn north_east(&self) -> Point {
        Point::new(self.max_lat, self.max_lng)
    }

    pub fn south_west(&self) -> Point {
        Point::new(self.min_lat, self.min_lng)
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{},{},{},{}",
            format_coord(self.min_lng),
            format_coord(self.min_lat),
            format_coord(self.max_lng),
            format_coord(self.max_lat)
        )
    }
}

/// `"{sw.lng},{sw.lat},{ne.lng},{ne.lat}"`. Caller guarantees corner order.
pub fn rectangle_to_bbox(north_east: Point, south_west: Point) -> String {
    BoundingBox::from_corners(north_east, south_west).to_string()
}

/// Bounding box of an arbitrary vertex set.
pub fn coords_to_bbox(points: &[Point]) -> Result<String> {
    BoundingBox::from_points(points)
        .map(|bbox| bbox.to_string())
        .ok_or(AoiError::EmptyGeometry)
}

/// Match `text` against the BBOX grammar.
///
/// Returns `Ok(None)` when the text is not a four-number BBOX.
pub fn match_bbox(text: &str) -> Result<Option<BoundingBox>> {
    let Some(captures) = BBOX_PATTERN.captures(text) else {
        return Ok(None);
    };

    let number = |group: usize| {
        captures
            .get(group)
            .map(|m| m.as_str())
            .ok_or(AoiError::UnrecognizedFormat)
            .and_then(parse_coord)
    };

    Ok(Some(BoundingBox {
        min_lng: number(1)?,
        min_lat: number(3)?,
        max_lng: number(5)?,
        max_lat: number(7)?,
    }))
}
