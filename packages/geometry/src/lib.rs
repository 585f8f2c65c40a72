#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Spherical-earth geometry for field parcels.
//!
//! Pure functions over latitude-first [`Point`]s: polygon area by the
//! spherical-excess approximation, haversine great-circle distance,
//! even-odd ray-casting containment, and the arithmetic vertex centroid.
//!
//! Area and distance use different earth radii. Area is scaled by the WGS84
//! equatorial radius and distance by the mean radius; each constant belongs
//! to its formula and the two are not interchangeable.

use fieldmap_field_models::Point;

/// Earth radius used by [`polygon_area`] (WGS84 equatorial), in metres.
pub const AREA_EARTH_RADIUS_M: f64 = 6_378_137.0;

/// Earth radius used by [`haversine_distance`] (mean radius), in metres.
pub const DISTANCE_EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Approximate area of an implicitly closed ring in square metres.
///
/// Sums `Δlng × (2 + sin lat1 + sin lat2)` over every edge (including the
/// closing edge back to the first vertex) and scales by `R² / 2`. The
/// absolute value is returned, so clockwise and counter-clockwise rings
/// give the same result. Rings with fewer than three vertices have no area.
///
/// Suitable for field-scale parcels; it drifts for polygons approaching a
/// hemisphere.
#[must_use]
pub fn polygon_area(polygon: &[Point]) -> f64 {
    let n = polygon.len();
    if n < 3 {
        return 0.0;
    }

    let mut sum = 0.0;

    for i in 0..n {
        let p1 = polygon[i];
        let p2 = polygon[(i + 1) % n];
        sum += (p2.lng - p1.lng).to_radians()
            * (2.0 + p1.lat.to_radians().sin() + p2.lat.to_radians().sin());
    }

    (sum * AREA_EARTH_RADIUS_M * AREA_EARTH_RADIUS_M / 2.0).abs()
}

/// Great-circle distance between two points in metres.
#[must_use]
pub fn haversine_distance(from: Point, to: Point) -> f64 {
    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let dlat = lat2 - lat1;
    let dlng = (to.lng - from.lng).to_radians();

    let a = (dlat / 2.0)
        .sin()
        .mul_add((dlat / 2.0).sin(), lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2));
    // Rounding can push `a` just past 1 for antipodal points.
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    DISTANCE_EARTH_RADIUS_M * c
}

/// Even-odd ray-casting test.
///
/// Latitude is treated as the x axis and longitude as the y axis, matching
/// how boundary points are stored. Points exactly on an edge or vertex may
/// resolve either way depending on vertex order.
#[must_use]
pub fn point_in_polygon(point: Point, polygon: &[Point]) -> bool {
    let n = polygon.len();
    let mut inside = false;
    let mut j = n.wrapping_sub(1);

    for i in 0..n {
        let pi = polygon[i];
        let pj = polygon[j];

        if (pi.lat > point.lat) != (pj.lat > point.lat)
            && point.lng < (pj.lng - pi.lng) * (point.lat - pi.lat) / (pj.lat - pi.lat) + pi.lng
        {
            inside = !inside;
        }

        j = i;
    }

    inside
}

/// Arithmetic mean of the ring's vertices (not area-weighted).
///
/// Returns `None` for an empty ring.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn centroid(polygon: &[Point]) -> Option<Point> {
    if polygon.is_empty() {
        return None;
    }

    let (lat, lng) = polygon
        .iter()
        .fold((0.0, 0.0), |(lat, lng), p| (lat + p.lat, lng + p.lng));
    let count = polygon.len() as f64;

    Some(Point::new(lat / count, lng / count))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.001),
            Point::new(0.001, 0.001),
            Point::new(0.001, 0.0),
        ]
    }

    fn irregular_field() -> Vec<Point> {
        vec![
            Point::new(51.5012, -0.1410),
            Point::new(51.5031, -0.1362),
            Point::new(51.5008, -0.1305),
            Point::new(51.4989, -0.1333),
            Point::new(51.4991, -0.1398),
        ]
    }

    #[test]
    fn square_area_matches_spherical_excess() {
        let area = polygon_area(&unit_square());
        assert!((area - 12_392.029).abs() < 0.01, "area was {area}");
    }

    #[test]
    fn area_is_invariant_under_reversal() {
        for polygon in [unit_square(), irregular_field()] {
            let forward = polygon_area(&polygon);
            let reversed: Vec<Point> = polygon.iter().rev().copied().collect();
            let backward = polygon_area(&reversed);
            assert!(forward > 0.0);
            assert!(
                (forward - backward).abs() <= forward * 1e-9,
                "forward {forward} != backward {backward}"
            );
        }
    }

    #[test]
    fn degenerate_rings_have_zero_area() {
        let square = unit_square();
        assert!(polygon_area(&[]).abs() < f64::EPSILON);
        assert!(polygon_area(&square[..1]).abs() < f64::EPSILON);
        assert!(polygon_area(&square[1..3]).abs() < f64::EPSILON);
        assert!(polygon_area(&[Point::new(10.0, 20.0), Point::new(10.5, 21.0)]).abs() < f64::EPSILON);
    }

    #[test]
    fn distance_to_self_is_zero() {
        let p = Point::new(48.8584, 2.2945);
        assert!(haversine_distance(p, p).abs() < f64::EPSILON);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = Point::new(48.8584, 2.2945);
        let b = Point::new(40.6892, -74.0445);
        let ab = haversine_distance(a, b);
        let ba = haversine_distance(b, a);
        assert!((ab - ba).abs() < 1e-6);
    }

    #[test]
    fn one_degree_of_latitude_uses_mean_radius() {
        let d = haversine_distance(Point::new(0.0, 0.0), Point::new(1.0, 0.0));
        assert!((d - 111_194.927).abs() < 0.01, "distance was {d}");
    }

    #[test]
    fn antipodal_distance_is_half_circumference() {
        let d = haversine_distance(Point::new(0.0, 0.0), Point::new(0.0, 180.0));
        assert!((d - std::f64::consts::PI * DISTANCE_EARTH_RADIUS_M).abs() < 1e-3);
    }

    #[test]
    fn point_inside_square() {
        assert!(point_in_polygon(Point::new(0.0005, 0.0005), &unit_square()));
    }

    #[test]
    fn point_outside_square() {
        assert!(!point_in_polygon(Point::new(10.0, 10.0), &unit_square()));
        assert!(!point_in_polygon(Point::new(0.0005, 0.002), &unit_square()));
    }

    #[test]
    fn nothing_is_inside_an_empty_ring() {
        assert!(!point_in_polygon(Point::new(0.0, 0.0), &[]));
    }

    #[test]
    fn containment_handles_concave_rings() {
        // U shape opening toward +lat
        let ring = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 3.0),
            Point::new(3.0, 3.0),
            Point::new(3.0, 2.0),
            Point::new(1.0, 2.0),
            Point::new(1.0, 1.0),
            Point::new(3.0, 1.0),
            Point::new(3.0, 0.0),
        ];
        assert!(point_in_polygon(Point::new(2.0, 0.5), &ring));
        assert!(!point_in_polygon(Point::new(2.0, 1.5), &ring));
        assert!(point_in_polygon(Point::new(0.5, 1.5), &ring));
    }

    #[test]
    fn centroid_is_vertex_mean() {
        let c = centroid(&unit_square()).unwrap();
        assert!((c.lat - 0.0005).abs() < 1e-12);
        assert!((c.lng - 0.0005).abs() < 1e-12);
    }

    #[test]
    fn centroid_is_not_area_weighted() {
        // Extra vertex on one edge pulls the mean toward it.
        let ring = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(0.0, 2.0),
            Point::new(2.0, 2.0),
            Point::new(2.0, 0.0),
        ];
        let c = centroid(&ring).unwrap();
        assert!((c.lat - 0.8).abs() < 1e-12);
        assert!((c.lng - 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_ring_has_no_centroid() {
        assert!(centroid(&[]).is_none());
    }
}
