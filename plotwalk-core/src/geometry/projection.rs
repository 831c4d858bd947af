use geo::Coord;

use super::distance::{EARTH_RADIUS_METERS, distance_meters};
use crate::{GeoPoint, Meters};

/// Equirectangular projection into a planar frame in meters.
///
/// Only accurate within a few kilometers of the reference latitude.
#[derive(Debug, Clone, Copy)]
pub struct LocalProjector {
    lat0: f64,
    cos_lat0: f64,
}

impl LocalProjector {
    pub fn new(lat0: f64) -> Self {
        Self {
            lat0,
            cos_lat0: lat0.to_radians().cos(),
        }
    }

    /// Projector centered on the mean latitude of `points`
    pub fn centered_on<'a>(points: impl IntoIterator<Item = &'a GeoPoint>) -> Self {
        let (sum, count) = points
            .into_iter()
            .fold((0.0, 0_u32), |(sum, count), p| (sum + p.lat, count + 1));
        if count == 0 {
            Self::new(0.0)
        } else {
            Self::new(sum / f64::from(count))
        }
    }

    pub fn lat0(&self) -> f64 {
        self.lat0
    }

    pub fn to_xy(&self, point: GeoPoint) -> Coord<f64> {
        Coord {
            x: EARTH_RADIUS_METERS * point.lng.to_radians() * self.cos_lat0,
            y: EARTH_RADIUS_METERS * point.lat.to_radians(),
        }
    }

    pub fn to_lat_lng(&self, xy: Coord<f64>) -> GeoPoint {
        GeoPoint {
            lat: (xy.y / EARTH_RADIUS_METERS).to_degrees(),
            lng: (xy.x / (EARTH_RADIUS_METERS * self.cos_lat0)).to_degrees(),
        }
    }
}

/// Projection onto the infinite line through a segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineProjection {
    /// Unclamped parameter: 0 at A, 1 at B
    pub t: f64,
    pub point: GeoPoint,
}

/// Projection onto a finite segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    pub point: GeoPoint,
    /// Clamped to `[0, 1]`
    pub t: f64,
    pub distance_meters: Meters,
}

/// Planar projection of `p` onto AB, clamped to the segment.
/// Returns the closest point and its parameter.
pub fn closest_point_xy(p: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> (Coord<f64>, f64) {
    let t = line_parameter(p, a, b).clamp(0.0, 1.0);
    (a + (b - a) * t, t)
}

fn line_parameter(p: Coord<f64>, a: Coord<f64>, b: Coord<f64>) -> f64 {
    let ab = b - a;
    let len2 = ab.x * ab.x + ab.y * ab.y;
    if len2 <= f64::EPSILON {
        return 0.0;
    }
    let ap = p - a;
    (ap.x * ab.x + ap.y * ab.y) / len2
}

fn segment_projector(a: GeoPoint, b: GeoPoint) -> LocalProjector {
    LocalProjector::new((a.lat + b.lat) / 2.0)
}

pub fn project_point_on_infinite_line(a: GeoPoint, b: GeoPoint, p: GeoPoint) -> LineProjection {
    let projector = segment_projector(a, b);
    let (axy, bxy) = (projector.to_xy(a), projector.to_xy(b));
    let t = line_parameter(projector.to_xy(p), axy, bxy);
    LineProjection {
        t,
        point: projector.to_lat_lng(axy + (bxy - axy) * t),
    }
}

pub fn closest_point_on_segment(p: GeoPoint, a: GeoPoint, b: GeoPoint) -> SegmentProjection {
    let projector = segment_projector(a, b);
    let (xy, t) = closest_point_xy(projector.to_xy(p), projector.to_xy(a), projector.to_xy(b));
    let point = if t <= 0.0 {
        a
    } else if t >= 1.0 {
        b
    } else {
        projector.to_lat_lng(xy)
    };
    SegmentProjection {
        point,
        t,
        distance_meters: distance_meters(p, point),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint { lat, lng }
    }

    #[test]
    fn projector_round_trip() {
        let projector = LocalProjector::new(14.1);
        let original = p(14.1003, 121.2004);
        let back = projector.to_lat_lng(projector.to_xy(original));
        assert!((back.lat - original.lat).abs() < 1e-10);
        assert!((back.lng - original.lng).abs() < 1e-10);
    }

    #[test]
    fn projector_distances_match_haversine_locally() {
        let projector = LocalProjector::new(14.1);
        let a = p(14.1, 121.2);
        let b = p(14.101, 121.201);
        let (axy, bxy) = (projector.to_xy(a), projector.to_xy(b));
        let planar = ((bxy.x - axy.x).powi(2) + (bxy.y - axy.y).powi(2)).sqrt();
        assert!((planar - distance_meters(a, b)).abs() < 0.05);
    }

    #[test]
    fn closest_point_in_middle() {
        let a = p(0.0, 0.0);
        let b = p(0.0, 0.002);
        let hit = closest_point_on_segment(p(0.0001, 0.001), a, b);
        assert!((hit.t - 0.5).abs() < 1e-9);
        assert!(hit.point.lat.abs() < 1e-12);
        assert!((hit.distance_meters - 11.12).abs() < 0.01);
    }

    #[test]
    fn closest_point_clamps_to_endpoints() {
        let a = p(0.0, 0.0);
        let b = p(0.0, 0.001);
        let before = closest_point_on_segment(p(0.0, -0.001), a, b);
        assert_eq!(before.t, 0.0);
        assert_eq!(before.point, a);
        let after = closest_point_on_segment(p(0.0, 0.003), a, b);
        assert_eq!(after.t, 1.0);
        assert_eq!(after.point, b);
    }

    #[test]
    fn infinite_line_projection_is_unclamped() {
        let a = p(0.0, 0.0);
        let b = p(0.0, 0.001);
        let proj = project_point_on_infinite_line(a, b, p(0.0001, 0.002));
        assert!((proj.t - 2.0).abs() < 1e-9);
        assert!(proj.point.lat.abs() < 1e-12);
        assert!((proj.point.lng - 0.002).abs() < 1e-12);
    }

    #[test]
    fn degenerate_segment() {
        let a = p(1.0, 1.0);
        let hit = closest_point_on_segment(p(1.0, 1.001), a, a);
        assert_eq!(hit.t, 0.0);
        assert_eq!(hit.point, a);
    }
}
