//! Area-of-interest (AOI) normalization for the flood dashboard.
//!
//! A user-drawn region reaches the backend in one of several shapes: a polygon
//! vertex list, a rectangle's opposite corners, a `minLng,minLat,maxLng,maxLat`
//! bounding-box string, or a WKT `POLYGON((...))` string. This crate converts
//! between them and builds the canonical [`AoiRecord`] the rest of the
//! application consumes.
//!
//! All conversions are pure functions. The only stateful piece is
//! [`session::DashboardSession`], which holds the single active AOI and
//! mirrors it into a key-value store.
//!
//! # Example
//!
//! ```
//! use aoi::{import_aoi, Region};
//!
//! let record = import_aoi("25.5,44.3,26.1,44.7").unwrap().unwrap();
//! assert!(matches!(record.region(), Region::Rectangle { .. }));
//! assert_eq!(record.bbox(), "25.5,44.3,26.1,44.7");
//! assert_eq!(
//!     record.wkt(),
//!     "POLYGON((25.5 44.3,26.1 44.3,26.1 44.7,25.5 44.7,25.5 44.3))"
//! );
//! ```

pub mod bbox;
pub mod error;
pub mod export;
pub mod import;
pub mod point;
pub mod region;
pub mod session;
pub mod widget;
pub mod wkt;

pub use bbox::{coords_to_bbox, rectangle_to_bbox, BoundingBox};
pub use error::{AoiError, Result};
pub use export::cli_command;
pub use import::import_aoi;
pub use point::Point;
pub use region::{AoiRecord, Region};
pub use session::{DashboardSession, FileStore, KeyValueStore, MemoryStore};
pub use widget::{DrawnShape, WidgetBounds, WidgetPoint};
pub use wkt::{polygon_to_wkt, rectangle_to_wkt, MIN_POLYGON_VERTICES};
