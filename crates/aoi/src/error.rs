//! AOI error types.

use thiserror::Error;

use crate::point::Point;

/// Errors that can occur while normalizing an area of interest.
#[derive(Debug, Error)]
pub enum AoiError {
    /// Input matched neither the BBOX nor the WKT polygon grammar.
    #[error("unrecognized AOI format: expected BBOX (minLng,minLat,maxLng,maxLat) or WKT POLYGON")]
    UnrecognizedFormat,

    /// A coordinate token inside a matched grammar is not a finite number.
    #[error("invalid coordinate: {token:?}")]
    InvalidCoordinate { token: String },

    /// A WKT ring with fewer than three vertices.
    #[error("polygon needs at least 3 vertices, got {count}")]
    TooFewVertices { count: usize },

    /// A bounding box or center was requested for an empty point set.
    #[error("geometry has no points")]
    EmptyGeometry,

    /// Rectangle corners are not in north-east / south-west order.
    #[error("rectangle corners are inverted: north-east {north_east:?}, south-west {south_west:?}")]
    InvertedCorners { north_east: Point, south_west: Point },

    /// Session store I/O failure.
    #[error("storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Session state could not be (de)serialized.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl AoiError {
    /// Whether the error describes bad user input, as opposed to a storage failure.
    pub fn is_input_error(&self) -> bool {
        !matches!(self, AoiError::Storage(_) | AoiError::Serialization(_))
    }
}

/// Result type for AOI operations.
pub type Result<T> = std::result::Result<T, AoiError>;
