//! Free-text AOI import.

use tracing::debug;

use crate::bbox::match_bbox;
use crate::error::{AoiError, Result};
use crate::region::{AoiRecord, Region};
use crate::wkt::match_polygon;

/// Parse a pasted BBOX or WKT polygon into an [`AoiRecord`].
///
/// Grammars are tried in order and are mutually exclusive:
///
/// 1. `minLng,minLat,maxLng,maxLat` becomes a rectangle.
/// 2. `POLYGON((lng lat, ...))` (case-insensitive, may be embedded in other
///    text) becomes a polygon in listed order, closing vertex included.
///
/// Blank input returns `Ok(None)`: nothing was submitted. Input matching
/// neither grammar returns [`AoiError::UnrecognizedFormat`]. A matched
/// grammar with a malformed number fails the whole import.
pub fn import_aoi(text: &str) -> Result<Option<AoiRecord>> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    if let Some(bbox) = match_bbox(text)? {
        debug!(bbox = %bbox, "Imported AOI as BBOX");
        let region = Region::rectangle(bbox.north_east(), bbox.south_west());
        return AoiRecord::from_region(region).map(Some);
    }

    if let Some(coords) = match_polygon(text)? {
        debug!(vertices = coords.len(), "Imported AOI as WKT polygon");
        return AoiRecord::from_region(Region::polygon(coords)).map(Some);
    }

    Err(AoiError::UnrecognizedFormat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;

    const TOLERANCE: f64 = 1e-9;

    fn approx_eq(a: &Region, b: &Region) -> bool {
        let close = |p: &Point, q: &Point| {
            (p.lat - q.lat).abs() < TOLERANCE && (p.lng - q.lng).abs() < TOLERANCE
        };
        match (a, b) {
            (Region::Polygon { coords: x }, Region::Polygon { coords: y }) => {
                x.len() == y.len() && x.iter().zip(y).all(|(p, q)| close(p, q))
            }
            (
                Region::Rectangle {
                    north_east: a_ne,
                    south_west: a_sw,
                },
                Region::Rectangle {
                    north_east: b_ne,
                    south_west: b_sw,
                },
            ) => close(a_ne, b_ne) && close(a_sw, b_sw),
            _ => false,
        }
    }

    #[test]
    fn test_import_bbox() {
        let record = import_aoi("25.5,44.3,26.1,44.7").unwrap().unwrap();
        assert_eq!(
            record.region(),
            &Region::rectangle(Point::new(44.7, 26.1), Point::new(44.3, 25.5))
        );
        assert_eq!(record.bbox(), "25.5,44.3,26.1,44.7");
        assert_eq!(
            record.wkt(),
            "POLYGON((25.5 44.3,26.1 44.3,26.1 44.7,25.5 44.7,25.5 44.3))"
        );
    }

    #[test]
    fn test_import_wkt() {
        let record = import_aoi(
            "POLYGON((26.05 44.39,26.25 44.39,26.25 44.52,26.05 44.52,26.05 44.39))",
        )
        .unwrap()
        .unwrap();

        let Region::Polygon { coords } = record.region() else {
            panic!("expected polygon, got {:?}", record.region());
        };
        assert_eq!(coords.len(), 5);
        assert_eq!(coords.first(), coords.last());
        assert_eq!(record.bbox(), "26.05,44.39,26.25,44.52");
        assert_eq!(
            record.wkt(),
            "POLYGON((26.05 44.39,26.25 44.39,26.25 44.52,26.05 44.52,26.05 44.39))"
        );
    }

    #[test]
    fn test_import_wkt_is_regenerated() {
        let record = import_aoi("polygon((1.50 2.000, 3 4, 5 6))").unwrap().unwrap();
        assert_eq!(record.wkt(), "POLYGON((1.5 2,3 4,5 6,1.5 2))");
    }

    #[test]
    fn test_import_unrecognized() {
        assert!(matches!(
            import_aoi("not a region"),
            Err(AoiError::UnrecognizedFormat)
        ));
        // non-ASCII digits are not part of either grammar
        assert!(matches!(
            import_aoi("١,2,3,4"),
            Err(AoiError::UnrecognizedFormat)
        ));
    }

    #[test]
    fn test_import_blank_is_noop() {
        assert!(import_aoi("").unwrap().is_none());
        assert!(import_aoi("   \n\t ").unwrap().is_none());
    }

    #[test]
    fn test_import_malformed_wkt_fails_atomically() {
        assert!(matches!(
            import_aoi("POLYGON((1 2,3 four,5 6))"),
            Err(AoiError::InvalidCoordinate { .. })
        ));
    }

    #[test]
    fn test_idempotent_on_own_output() {
        let inputs = [
            "25.5,44.3,26.1,44.7",
            "-73.99,40.7,-73.95,40.8",
            "POLYGON((26.05 44.39,26.25 44.39,26.25 44.52,26.05 44.52,26.05 44.39))",
            "POLYGON((-0.09 51.505,-0.08 51.51,-0.1 51.52))",
        ];

        for input in inputs {
            let first = import_aoi(input).unwrap().unwrap();

            let from_wkt = import_aoi(first.wkt()).unwrap().unwrap();
            assert_eq!(from_wkt.wkt(), first.wkt());
            assert_eq!(from_wkt.bbox(), first.bbox());

            let from_bbox = import_aoi(first.bbox()).unwrap().unwrap();
            assert!(matches!(from_bbox.region(), Region::Rectangle { .. }));
            assert_eq!(from_bbox.bbox(), first.bbox());

            if matches!(first.region(), Region::Rectangle { .. }) {
                assert!(approx_eq(from_bbox.region(), first.region()));
            } else {
                let (Region::Polygon { coords: before }, Region::Polygon { coords: after }) =
                    (first.region(), from_wkt.region())
                else {
                    panic!("expected polygons for {input}");
                };
                // same vertices, up to the closing duplicate
                let prefix = Region::polygon(after[..before.len()].to_vec());
                assert!(approx_eq(&prefix, first.region()));
                assert_eq!(after.first(), after.last());
            }
        }
    }

    #[test]
    fn test_grammar_exclusivity() {
        let bbox = "1,2,3,4";
        let wkt = "POLYGON((1 2,3 4,5 6,1 2))";
        assert!(match_polygon(bbox).unwrap().is_none());
        assert!(match_bbox(wkt).unwrap().is_none());

        assert!(matches!(
            import_aoi(bbox).unwrap().unwrap().region(),
            Region::Rectangle { .. }
        ));
        assert!(matches!(
            import_aoi(wkt).unwrap().unwrap().region(),
            Region::Polygon { .. }
        ));
    }
}
