use serde_json::Value;

use super::{BoundingBox, Region, Ring};

/// Coerce a loose GeoJSON coordinate array into a ring, skipping entries
/// that are not at-least-two-element numeric pairs.
fn to_ring(coords: &Value) -> Ring {
    let Some(arr) = coords.as_array() else {
        return Vec::new();
    };
    arr.iter()
        .filter_map(|p| {
            let pair = p.as_array()?;
            if pair.len() < 2 {
                return None;
            }
            Some((pair.first()?.as_f64()?, pair.get(1)?.as_f64()?))
        })
        .collect()
}

/// Build a `Region` from drawn-map geometry: a GeoJSON-shaped geometry value
/// plus the bounds computed by the drawing surface. All shape validation
/// happens here, at the boundary; unknown or missing geometry degrades to
/// the rectangle form.
pub fn region_from_geojson(geometry: Option<&Value>, bounds: BoundingBox) -> Region {
    let Some(g) = geometry else {
        return Region::rectangle(bounds);
    };
    match g.get("type").and_then(Value::as_str) {
        Some("Polygon") => {
            let outer = g
                .get("coordinates")
                .and_then(|c| c.get(0))
                .map(to_ring)
                .unwrap_or_default();
            Region::polygon(outer, bounds)
        }
        Some("MultiPolygon") => {
            let rings = g
                .get("coordinates")
                .and_then(Value::as_array)
                .map(|polys| {
                    polys
                        .iter()
                        .map(|poly| poly.get(0).map(to_ring).unwrap_or_default())
                        .collect()
                })
                .unwrap_or_default();
            Region::multi_polygon(rings, bounds)
        }
        _ => Region::rectangle(bounds),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aoi::{RegionKind, point_in_region};
    use serde_json::json;

    fn bounds() -> BoundingBox {
        BoundingBox {
            south: 0.0,
            west: 0.0,
            north: 10.0,
            east: 10.0,
        }
    }

    #[test]
    fn missing_geometry_becomes_rectangle() {
        let r = region_from_geojson(None, bounds());
        assert_eq!(r.kind, RegionKind::Rectangle);
    }

    #[test]
    fn polygon_geometry_keeps_outer_ring() {
        let g = json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0]]]
        });
        let r = region_from_geojson(Some(&g), bounds());
        match &r.kind {
            RegionKind::Polygon(ring) => assert_eq!(ring.len(), 4),
            other => panic!("expected polygon, got {other:?}"),
        }
        assert!(point_in_region(5.0, 5.0, &r));
    }

    #[test]
    fn malformed_vertices_are_skipped() {
        let g = json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], "junk", [3.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0]]]
        });
        let r = region_from_geojson(Some(&g), bounds());
        match &r.kind {
            RegionKind::Polygon(ring) => assert_eq!(ring.len(), 4),
            other => panic!("expected polygon, got {other:?}"),
        }
    }

    #[test]
    fn multi_polygon_keeps_each_outer_ring() {
        let g = json!({
            "type": "MultiPolygon",
            "coordinates": [
                [[[0.0, 0.0], [0.0, 10.0], [10.0, 10.0], [10.0, 0.0]]],
                [[[40.0, 40.0], [40.0, 50.0], [50.0, 50.0], [50.0, 40.0]]]
            ]
        });
        let r = region_from_geojson(Some(&g), bounds());
        match &r.kind {
            RegionKind::MultiPolygon(rings) => {
                assert_eq!(rings.len(), 2);
                assert_eq!(rings[1].len(), 4);
            }
            other => panic!("expected multi-polygon, got {other:?}"),
        }
    }

    #[test]
    fn unknown_type_degrades_to_rectangle() {
        let g = json!({ "type": "GeometryCollection" });
        let r = region_from_geojson(Some(&g), bounds());
        assert_eq!(r.kind, RegionKind::Rectangle);
    }

    #[test]
    fn polygon_without_coordinates_is_degenerate() {
        let g = json!({ "type": "Polygon" });
        let r = region_from_geojson(Some(&g), bounds());
        match &r.kind {
            RegionKind::Polygon(ring) => assert!(ring.is_empty()),
            other => panic!("expected polygon, got {other:?}"),
        }
        // Degenerate ring falls back to the bounds.
        assert!(point_in_region(5.0, 5.0, &r));
    }
}
