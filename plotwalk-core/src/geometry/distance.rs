use itertools::Itertools;

use crate::{GeoPoint, Meters};

pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Great-circle distance using the haversine formula
pub fn distance_meters(a: GeoPoint, b: GeoPoint) -> Meters {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let sin_dlat = (dlat / 2.0).sin();
    let sin_dlng = (dlng / 2.0).sin();

    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlng * sin_dlng;
    2.0 * EARTH_RADIUS_METERS * h.sqrt().min(1.0).asin()
}

/// Initial compass bearing from `a` to `b`, in `[0, 360)` degrees
pub fn bearing_degrees(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlng = (b.lng - a.lng).to_radians();

    let y = dlng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlng.cos();
    (y.atan2(x).to_degrees() + 360.0) % 360.0
}

/// Sum of consecutive haversine distances
pub fn polyline_length(points: &[GeoPoint]) -> Meters {
    points
        .iter()
        .tuple_windows()
        .map(|(a, b)| distance_meters(*a, *b))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint { lat, lng }
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (p(14.1, 121.2), p(14.2, 121.3)),
            (p(-33.9, 151.2), p(51.5, -0.12)),
            (p(0.0, 179.9), p(0.0, -179.9)),
        ];
        for (a, b) in pairs {
            let ab = distance_meters(a, b);
            let ba = distance_meters(b, a);
            assert!((ab - ba).abs() <= ab * 1e-6, "{ab} vs {ba}");
        }
    }

    #[test]
    fn distance_to_self_is_zero() {
        let a = p(14.123, 121.456);
        assert_eq!(distance_meters(a, a), 0.0);
    }

    #[test]
    fn one_degree_of_latitude() {
        let d = distance_meters(p(0.0, 0.0), p(1.0, 0.0));
        assert!((d - 111_194.9).abs() < 1.0, "{d}");
    }

    #[test]
    fn cardinal_bearings() {
        let origin = p(10.0, 10.0);
        assert!((bearing_degrees(origin, p(10.001, 10.0)) - 0.0).abs() < 1e-6);
        assert!((bearing_degrees(origin, p(10.0, 10.001)) - 90.0).abs() < 0.01);
        assert!((bearing_degrees(origin, p(9.999, 10.0)) - 180.0).abs() < 1e-6);
        assert!((bearing_degrees(origin, p(10.0, 9.999)) - 270.0).abs() < 0.01);
    }

    #[test]
    fn polyline_length_sums_legs() {
        let line = [p(0.0, 0.0), p(0.001, 0.0), p(0.001, 0.001)];
        let expected = distance_meters(line[0], line[1]) + distance_meters(line[1], line[2]);
        assert!((polyline_length(&line) - expected).abs() < 1e-9);
        assert_eq!(polyline_length(&line[..1]), 0.0);
    }
}
