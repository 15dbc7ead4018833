//! WKT polygon serialization and parsing.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AoiError, Result};
use crate::point::{parse_coord, Point};

/// Fewest vertices a WKT polygon may list.
pub const MIN_POLYGON_VERTICES: usize = 3;

/// Case-insensitive, unanchored: the polygon may be embedded in other text.
static POLYGON_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)POLYGON\s*\(\(\s*(.+?)\s*\)\)").expect("polygon pattern is valid")
});

/// Serialize a vertex list as `POLYGON((lng lat,...))`.
///
/// The ring is closed by appending the first vertex when the last one
/// differs from it. An empty list yields an empty string.
pub fn polygon_to_wkt(points: &[Point]) -> String {
    let Some(first) = points.first() else {
        return String::new();
    };

    let mut ring: Vec<String> = points.iter().map(Point::wkt_pair).collect();
    if points.last() != Some(first) {
        ring.push(first.wkt_pair());
    }

    format!("POLYGON(({}))", ring.join(","))
}

/// Serialize a rectangle as a closed five-vertex ring: SW, SE, NE, NW, SW.
///
/// Corner ordering is trusted; see [`crate::Region::validate_corners`].
pub fn rectangle_to_wkt(north_east: Point, south_west: Point) -> String {
    let north_west = Point::new(north_east.lat, south_west.lng);
    let south_east = Point::new(south_west.lat, north_east.lng);

    let ring = [south_west, south_east, north_east, north_west, south_west]
        .iter()
        .map(Point::wkt_pair)
        .collect::<Vec<_>>()
        .join(",");

    format!("POLYGON(({}))", ring)
}

/// Find a WKT polygon in `text` and parse its vertices in listed order.
///
/// Returns `Ok(None)` when no `POLYGON((...))` is present. A matched polygon
/// with a malformed vertex fails as a whole; nothing is partially parsed.
pub fn match_polygon(text: &str) -> Result<Option<Vec<Point>>> {
    let Some(captures) = POLYGON_PATTERN.captures(text) else {
        return Ok(None);
    };

    let body = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
    let coords = body
        .split(',')
        .map(parse_vertex)
        .collect::<Result<Vec<_>>>()?;

    if coords.len() < MIN_POLYGON_VERTICES {
        return Err(AoiError::TooFewVertices {
            count: coords.len(),
        });
    }

    Ok(Some(coords))
}

/// Parse a WKT polygon, failing if `text` does not contain one.
pub fn parse_polygon(text: &str) -> Result<Vec<Point>> {
    match_polygon(text)?.ok_or(AoiError::UnrecognizedFormat)
}

/// `"lng lat"` -> Point. Exactly two tokens are required.
fn parse_vertex(part: &str) -> Result<Point> {
    let tokens: Vec<&str> = part.split_whitespace().collect();
    let [lng, lat] = tokens.as_slice() else {
        return Err(AoiError::InvalidCoordinate {
            token: part.trim().to_string(),
        });
    };

    Ok(Point::new(parse_coord(lat)?, parse_coord(lng)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(pairs: &[(f64, f64)]) -> Vec<Point> {
        pairs.iter().map(|&(lat, lng)| Point::new(lat, lng)).collect()
    }

    #[test]
    fn test_polygon_to_wkt_closes_ring() {
        let points = pts(&[(44.39, 26.05), (44.52, 26.05), (44.52, 26.25)]);
        assert_eq!(
            polygon_to_wkt(&points),
            "POLYGON((26.05 44.39,26.05 44.52,26.25 44.52,26.05 44.39))"
        );
    }

    #[test]
    fn test_polygon_to_wkt_already_closed() {
        let points = pts(&[(1.0, 2.0), (3.0, 4.0), (5.0, 6.0), (1.0, 2.0)]);
        assert_eq!(polygon_to_wkt(&points), "POLYGON((2 1,4 3,6 5,2 1))");
    }

    #[test]
    fn test_polygon_to_wkt_empty() {
        assert_eq!(polygon_to_wkt(&[]), "");
    }

    #[test]
    fn test_polygon_to_wkt_single_point() {
        let points = pts(&[(1.0, 2.0)]);
        assert_eq!(polygon_to_wkt(&points), "POLYGON((2 1))");
    }

    #[test]
    fn test_rectangle_to_wkt() {
        let wkt = rectangle_to_wkt(Point::new(44.7, 26.1), Point::new(44.3, 25.5));
        assert_eq!(
            wkt,
            "POLYGON((25.5 44.3,26.1 44.3,26.1 44.7,25.5 44.7,25.5 44.3))"
        );
    }

    #[test]
    fn test_match_polygon_listed_order() {
        let coords = parse_polygon(
            "POLYGON((26.05 44.39,26.25 44.39,26.25 44.52,26.05 44.52,26.05 44.39))",
        )
        .unwrap();
        assert_eq!(coords.len(), 5);
        assert_eq!(coords[0], Point::new(44.39, 26.05));
        assert_eq!(coords[1], Point::new(44.39, 26.25));
        assert_eq!(coords.first(), coords.last());
    }

    #[test]
    fn test_match_polygon_case_and_spacing() {
        let coords = parse_polygon("polygon (( 1 2 ,  3 4,5\t6 ))").unwrap();
        assert_eq!(coords, pts(&[(2.0, 1.0), (4.0, 3.0), (6.0, 5.0)]));
    }

    #[test]
    fn test_match_polygon_embedded() {
        let coords = parse_polygon("aoi = POLYGON((1 2,3 4,5 6)) ;").unwrap();
        assert_eq!(coords.len(), 3);
    }

    #[test]
    fn test_match_polygon_absent() {
        assert!(match_polygon("LINESTRING(1 2,3 4)").unwrap().is_none());
        assert!(matches!(
            parse_polygon("nothing here"),
            Err(AoiError::UnrecognizedFormat)
        ));
    }

    #[test]
    fn test_match_polygon_rejects_bad_numbers() {
        let err = parse_polygon("POLYGON((1 2,x 4,5 6))").unwrap_err();
        assert!(matches!(err, AoiError::InvalidCoordinate { ref token } if token == "x"));
    }

    #[test]
    fn test_match_polygon_rejects_wrong_arity() {
        assert!(matches!(
            parse_polygon("POLYGON((1 2,3,5 6))"),
            Err(AoiError::InvalidCoordinate { .. })
        ));
        assert!(matches!(
            parse_polygon("POLYGON((1 2 9,3 4 9,5 6 9))"),
            Err(AoiError::InvalidCoordinate { .. })
        ));
        assert!(matches!(
            parse_polygon("POLYGON((1 2,,5 6))"),
            Err(AoiError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_match_polygon_too_few_vertices() {
        assert!(matches!(
            parse_polygon("POLYGON((1 2,3 4))"),
            Err(AoiError::TooFewVertices { count: 2 })
        ));
    }

    #[test]
    fn test_roundtrip_vertex_sequence() {
        let original = pts(&[
            (44.39, 26.05),
            (44.52, 26.05),
            (44.52, 26.25),
            (44.39, 26.25),
        ]);
        let parsed = parse_polygon(&polygon_to_wkt(&original)).unwrap();
        assert_eq!(&parsed[..original.len()], &original[..]);
        assert_eq!(parsed.len(), original.len() + 1);
        assert_eq!(parsed.last(), original.first());
    }

    #[test]
    fn test_ring_always_closed() {
        let shapes = [
            pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]),
            pts(&[(-10.5, 20.25), (-11.0, 21.0), (-12.125, 19.0), (-10.5, 20.25)]),
            pts(&[(90.0, 180.0), (-90.0, -180.0), (0.0, 0.0), (45.0, 45.0)]),
        ];
        for shape in &shapes {
            let wkt = polygon_to_wkt(shape);
            let parsed = parse_polygon(&wkt).unwrap();
            assert_eq!(parsed.first(), parsed.last(), "ring not closed: {wkt}");
        }
    }
}
