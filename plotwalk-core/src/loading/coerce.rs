//! Normalization of heterogeneous point representations into [`GeoPoint`]

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::{GeoPoint, LatLngAccessor};

/// How to read a bare `[a, b]` pair when both values are within ±90 and the
/// order cannot be inferred from magnitude.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisOrder {
    /// `[lat, lng]`
    #[default]
    LatLng,
    /// `[lng, lat]`
    LngLat,
}

/// Reads a position through its accessors, rejecting non-finite or
/// out-of-range values.
pub fn coerce_accessor<A: LatLngAccessor + ?Sized>(source: &A) -> Option<GeoPoint> {
    GeoPoint::new(source.lat(), source.lng())
}

/// Coerces a JSON point into a [`GeoPoint`].
///
/// Accepted shapes, in order:
/// - `{ "lat": .., "lng": .. }`
/// - `{ "latitude": .., "longitude": .. }`
/// - `[a, b]`: whichever element exceeds 90 in magnitude is the longitude;
///   when neither does, `order` decides.
///
/// Positions that expose accessors rather than fields go through
/// [`coerce_accessor`].
pub fn coerce_to_geo_point(value: &Value, order: AxisOrder) -> Option<GeoPoint> {
    match value {
        Value::Object(map) => {
            field_pair(map, "lat", "lng").or_else(|| field_pair(map, "latitude", "longitude"))
        }
        Value::Array(items) if items.len() == 2 => {
            let first = items[0].as_f64()?;
            let second = items[1].as_f64()?;
            coerce_pair(first, second, order)
        }
        _ => None,
    }
}

/// GeoJSON positions are always `[lng, lat, ...]`
pub fn coerce_geojson_coordinate(value: &Value) -> Option<GeoPoint> {
    let items = value.as_array()?;
    if items.len() < 2 {
        return None;
    }
    GeoPoint::new(items[1].as_f64()?, items[0].as_f64()?)
}

fn field_pair(map: &Map<String, Value>, lat: &str, lng: &str) -> Option<GeoPoint> {
    GeoPoint::new(map.get(lat)?.as_f64()?, map.get(lng)?.as_f64()?)
}

fn coerce_pair(first: f64, second: f64, order: AxisOrder) -> Option<GeoPoint> {
    if first.abs() > 90.0 {
        return GeoPoint::new(second, first);
    }
    if second.abs() > 90.0 {
        return GeoPoint::new(first, second);
    }
    match order {
        AxisOrder::LatLng => GeoPoint::new(first, second),
        AxisOrder::LngLat => GeoPoint::new(second, first),
    }
}
