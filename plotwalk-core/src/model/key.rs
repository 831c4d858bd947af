//! Node identity: a coordinate quantized to six decimal places (~0.11 m)

use std::fmt;

use serde::{Serialize, Serializer};

use super::GeoPoint;

const SCALE: f64 = 1_000_000.0;

/// Quantized coordinate used as graph vertex identity.
///
/// Two points that round to the same micro-degree collapse into one node.
/// Displays as `"{lat:.6},{lng:.6}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
    lat_e6: i64,
    lng_e6: i64,
}

impl NodeKey {
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_point(point: GeoPoint) -> Self {
        Self {
            lat_e6: (point.lat * SCALE).round() as i64,
            lng_e6: (point.lng * SCALE).round() as i64,
        }
    }

    /// The quantized position this key stands for
    #[allow(clippy::cast_precision_loss)]
    pub fn point(self) -> GeoPoint {
        GeoPoint {
            lat: self.lat_e6 as f64 / SCALE,
            lng: self.lng_e6 as f64 / SCALE,
        }
    }
}

impl From<GeoPoint> for NodeKey {
    fn from(point: GeoPoint) -> Self {
        Self::from_point(point)
    }
}

fn write_fixed(f: &mut fmt::Formatter<'_>, value: i64) -> fmt::Result {
    let sign = if value < 0 { "-" } else { "" };
    let abs = value.unsigned_abs();
    write!(f, "{sign}{}.{:06}", abs / 1_000_000, abs % 1_000_000)
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_fixed(f, self.lat_e6)?;
        f.write_str(",")?;
        write_fixed(f, self.lng_e6)
    }
}

impl Serialize for NodeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
