//! Adapters from the map drawing widget's payloads.
//!
//! The widget reports points as `{lat, lng}` (sometimes spelled out as
//! `latitude`/`longitude`) and rectangles as `{north, east, south, west}`
//! bounds. Everything is converted to [`Point`] here so the normalizer only
//! ever sees plain numeric fields.

use serde::Deserialize;

use crate::point::Point;
use crate::region::Region;

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WidgetPoint {
    #[serde(alias = "latitude")]
    pub lat: f64,
    #[serde(alias = "longitude", alias = "lon")]
    pub lng: f64,
}

impl From<WidgetPoint> for Point {
    fn from(p: WidgetPoint) -> Self {
        Point::new(p.lat, p.lng)
    }
}

/// Rectangle bounds as reported by the widget.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WidgetBounds {
    pub north: f64,
    pub east: f64,
    pub south: f64,
    pub west: f64,
}

/// A completed draw gesture.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DrawnShape {
    Polygon { path: Vec<WidgetPoint> },
    Rectangle { bounds: WidgetBounds },
}

impl From<DrawnShape> for Region {
    fn from(shape: DrawnShape) -> Self {
        match shape {
            DrawnShape::Polygon { path } => {
                Region::polygon(path.into_iter().map(Point::from).collect())
            }
            DrawnShape::Rectangle { bounds } => Region::rectangle(
                Point::new(bounds.north, bounds.east),
                Point::new(bounds.south, bounds.west),
            ),
        }
    }
}
