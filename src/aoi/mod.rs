pub mod convert;

use serde::{Deserialize, Serialize};

use crate::core::GeoPoint;

/// Geographic bounds in degrees. Invariant: `south <= north`. A box whose
/// west edge ends up greater than its east edge after normalization crosses
/// the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

/// Polygon outer ring as (lon, lat) vertex pairs. Rings are implicitly
/// closed; the first vertex need not repeat at the end.
pub type Ring = Vec<(f64, f64)>;

/// An area of interest drawn on a map. Carries precomputed bounds for
/// fallback when ring data is absent or degenerate. Holes are not modeled:
/// only outer rings participate in containment tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub kind: RegionKind,
    pub bounds: BoundingBox,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RegionKind {
    Rectangle,
    Polygon(Ring),
    MultiPolygon(Vec<Ring>),
}

impl Region {
    pub fn rectangle(bounds: BoundingBox) -> Self {
        Self {
            kind: RegionKind::Rectangle,
            bounds,
        }
    }

    pub fn polygon(ring: Ring, bounds: BoundingBox) -> Self {
        Self {
            kind: RegionKind::Polygon(ring),
            bounds,
        }
    }

    pub fn multi_polygon(rings: Vec<Ring>, bounds: BoundingBox) -> Self {
        Self {
            kind: RegionKind::MultiPolygon(rings),
            bounds,
        }
    }
}

/// Normalize a longitude into (-180, 180]. Terminates for any finite input.
pub fn normalize_longitude(lon: f64) -> f64 {
    let mut x = lon;
    while x <= -180.0 {
        x += 360.0;
    }
    while x > 180.0 {
        x -= 360.0;
    }
    x
}

/// Inclusive latitude range plus normalized longitude range. A wrapped box
/// (west > east) means "inside" on the longitude axis is west-or-east of the
/// antimeridian rather than between the edges.
pub fn point_in_bbox(lat: f64, lon: f64, b: &BoundingBox) -> bool {
    let lon = normalize_longitude(lon);
    let west = normalize_longitude(b.west);
    let east = normalize_longitude(b.east);
    let within_lon = if west <= east {
        lon >= west && lon <= east
    } else {
        lon >= west || lon <= east
    };
    lat >= b.south && lat <= b.north && within_lon
}

/// Even-odd ray casting. Edges are taken half-open on the latitude axis
/// (strict inequality on one side only) so a vertex shared by two edges is
/// not counted twice.
pub fn point_in_ring(lat: f64, lon: f64, ring: &Ring) -> bool {
    if ring.is_empty() {
        return false;
    }

    let x = normalize_longitude(lon);
    let y = lat;
    let mut inside = false;

    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (lon_i, lat_i) = ring[i];
        let (lon_j, lat_j) = ring[j];
        j = i;

        let straddles = (lat_i > y) != (lat_j > y);
        if !straddles {
            continue;
        }

        let xi = normalize_longitude(lon_i);
        let xj = normalize_longitude(lon_j);

        let mut denom = lat_j - lat_i;
        if denom == 0.0 {
            denom = 1e-12;
        }
        let x_intersect = (xj - xi) * (y - lat_i) / denom + xi;

        if x < x_intersect {
            inside = !inside;
        }
    }

    inside
}

/// Dispatch on the region variant. Degenerate ring data never panics; it
/// falls back to the precomputed bounds. For a multi-polygon the bounds are
/// consulted only when no constituent ring was testable.
pub fn point_in_region(lat: f64, lon: f64, region: &Region) -> bool {
    match &region.kind {
        RegionKind::Rectangle => point_in_bbox(lat, lon, &region.bounds),
        RegionKind::Polygon(ring) => {
            if ring.is_empty() {
                point_in_bbox(lat, lon, &region.bounds)
            } else {
                point_in_ring(lat, lon, ring)
            }
        }
        RegionKind::MultiPolygon(rings) => {
            let mut testable = false;
            for ring in rings {
                if ring.is_empty() {
                    continue;
                }
                testable = true;
                if point_in_ring(lat, lon, ring) {
                    return true;
                }
            }
            if testable {
                false
            } else {
                point_in_bbox(lat, lon, &region.bounds)
            }
        }
    }
}

/// Anything that may sit at a geographic point.
pub trait Located {
    fn location(&self) -> Option<GeoPoint>;
}

/// Strict filter: keeps items located inside the region, drops items without
/// a location.
pub fn filter_inside<T: Located>(items: Vec<T>, region: &Region) -> Vec<T> {
    items
        .into_iter()
        .filter(|item| {
            item.location()
                .is_some_and(|p| point_in_region(p.lat, p.lon, region))
        })
        .collect()
}

/// Soft prioritization: inside-the-region items first, nothing dropped.
/// Items without a location rank as outside. The sort is stable, so equal
/// items keep their incoming order.
pub fn rank_by_inside<T: Located>(mut items: Vec<T>, region: &Region) -> Vec<T> {
    items.sort_by_key(|item| {
        let inside = item
            .location()
            .is_some_and(|p| point_in_region(p.lat, p.lon, region));
        !inside
    });
    items
}
