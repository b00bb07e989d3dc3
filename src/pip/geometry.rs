//! Ray-casting primitives for geographic rings.
//!
//! A ray is cast from the test point toward -90° latitude. A ring contains
//! the point when the ray crosses an odd number of its edges. Edges wider
//! than 90° of longitude are taken to cross the antimeridian and are
//! shifted onto the test point's side of the seam before they are tested.

use geo::Coord;

use crate::models::Ring;

/// Edges spanning more longitude than this are treated as crossing ±180°.
pub const ANTIMERIDIAN_SPAN: f64 = 90.0;

/// Check whether the segment `a -> b` crosses the southward ray from `point`.
///
/// Coordinates are `x` = longitude, `y` = latitude, in degrees.
pub fn edge_hits_south_ray(point: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> bool {
    // Vertical edges are skipped; the edges joining them carry the crossing.
    if a.x == b.x {
        return false;
    }

    if a.y > point.y && b.y > point.y {
        return false;
    }

    let (mut a_lon, mut b_lon) = (a.x, b.x);
    if (b_lon - a_lon).abs() > ANTIMERIDIAN_SPAN {
        if point.x > 0.0 {
            if a_lon < 0.0 {
                a_lon += 360.0;
            }
            if b_lon < 0.0 {
                b_lon += 360.0;
            }
        } else {
            if a_lon > 0.0 {
                a_lon -= 360.0;
            }
            if b_lon > 0.0 {
                b_lon -= 360.0;
            }
        }
    }

    if (a_lon >= point.x && b_lon >= point.x) || (a_lon < point.x && b_lon < point.x) {
        return false;
    }

    // Straddles the test longitude and lies on or below the test latitude
    if a.y <= point.y && b.y <= point.y {
        return true;
    }

    let slope = (b.y - a.y) / (b_lon - a_lon);
    let intersect_lat = slope * (point.x - a_lon) + a.y;
    intersect_lat < point.y
}

/// Check whether `point` lies inside `ring`.
///
/// Only the explicit pairs `(v[i], v[i + 1])` are tested. No edge is added
/// from the last vertex back to the first, so callers that need a closed
/// boundary must supply one (see [`Ring::closed`]). Points exactly on an
/// edge have no defined classification.
pub fn ring_contains(point: Coord<f64>, ring: &Ring) -> bool {
    let crossings = ring
        .coords()
        .windows(2)
        .filter(|edge| edge_hits_south_ray(point, edge[0], edge[1]))
        .count();

    crossings % 2 == 1
}

/// Check whether `point` lies inside any of `parts`.
pub fn any_part_contains(point: Coord<f64>, parts: &[Ring]) -> bool {
    parts.iter().any(|ring| ring_contains(point, ring))
}
