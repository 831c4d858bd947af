//! Geographic coordinate value type

use std::{fmt, str::FromStr};

use geo::{Coord, Point};
use serde::{Deserialize, Serialize};

use crate::Error;

/// A WGS84 position in decimal degrees.
///
/// Construct through [`GeoPoint::new`] to keep `lat` within ±90 and `lng`
/// within ±180.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    /// Returns `None` for non-finite or out-of-range components
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        if !lat.is_finite() || !lng.is_finite() {
            return None;
        }
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            return None;
        }
        Some(Self { lat, lng })
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6},{:.6}", self.lat, self.lng)
    }
}

/// Parses `"lat,lng"`
impl FromStr for GeoPoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| Error::InvalidData(format!("expected 'lat,lng', got '{s}'")))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .map_err(|e| Error::InvalidData(format!("bad coordinate '{part}': {e}")))
        };
        let (lat, lng) = (parse(lat)?, parse(lng)?);
        GeoPoint::new(lat, lng)
            .ok_or_else(|| Error::InvalidData(format!("coordinate out of range: {s}")))
    }
}

impl From<GeoPoint> for Coord<f64> {
    fn from(p: GeoPoint) -> Self {
        Coord { x: p.lng, y: p.lat }
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(p: GeoPoint) -> Self {
        Point::new(p.lng, p.lat)
    }
}

/// Anything that can report a latitude and longitude through accessors,
/// such as a live position fix from a location provider.
pub trait LatLngAccessor {
    fn lat(&self) -> f64;
    fn lng(&self) -> f64;
}

impl LatLngAccessor for GeoPoint {
    fn lat(&self) -> f64 {
        self.lat
    }

    fn lng(&self) -> f64 {
        self.lng
    }
}

impl LatLngAccessor for Point<f64> {
    fn lat(&self) -> f64 {
        self.y()
    }

    fn lng(&self) -> f64 {
        self.x()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range() {
        assert!(GeoPoint::new(91.0, 0.0).is_none());
        assert!(GeoPoint::new(0.0, -180.5).is_none());
        assert!(GeoPoint::new(f64::NAN, 0.0).is_none());
        assert!(GeoPoint::new(-90.0, 180.0).is_some());
    }

    #[test]
    fn parses_from_str() {
        let p: GeoPoint = " 14.1, 121.2".parse().unwrap();
        assert_eq!(p, GeoPoint { lat: 14.1, lng: 121.2 });
        assert!("14.1".parse::<GeoPoint>().is_err());
        assert!("abc,1".parse::<GeoPoint>().is_err());
    }

    #[test]
    fn geo_point_accessor_swaps_axes() {
        let p = Point::new(121.2, 14.1);
        assert_eq!(LatLngAccessor::lat(&p), 14.1);
        assert_eq!(LatLngAccessor::lng(&p), 121.2);
    }
}
