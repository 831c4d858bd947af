//! Decoding of raw road records into a closed set of shapes

use itertools::Itertools;
use log::trace;
use serde_json::{Map, Value};

use super::coerce::{AxisOrder, coerce_geojson_coordinate, coerce_to_geo_point};
use crate::GeoPoint;

/// A road record after shape dispatch. Points that could not be coerced have
/// already been dropped.
#[derive(Debug, Clone, PartialEq)]
pub enum RoadRecord {
    /// GeoJSON `LineString`, bare or wrapped in a `Feature`
    LineString(Vec<GeoPoint>),
    /// GeoJSON `MultiLineString`, bare or wrapped in a `Feature`
    MultiLineString(Vec<Vec<GeoPoint>>),
    /// `{ "from": .., "to": .. }`
    Segment { from: GeoPoint, to: GeoPoint },
    /// `{ "path": [..] }`, optionally tagged `"type": "polyline"`
    Polyline(Vec<GeoPoint>),
    Unrecognized,
}

/// One straight piece of road between two consecutive line points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub a: GeoPoint,
    pub b: GeoPoint,
}

impl RoadRecord {
    pub fn decode(value: &Value, order: AxisOrder) -> Self {
        let Some(map) = value.as_object() else {
            return Self::Unrecognized;
        };

        match map.get("type").and_then(Value::as_str) {
            Some("Feature") => match map.get("geometry") {
                Some(geometry) => Self::decode_geometry(geometry),
                None => Self::Unrecognized,
            },
            Some("LineString" | "MultiLineString") => Self::decode_geometry(value),
            _ => {
                if let Some(path) = map.get("path").and_then(Value::as_array) {
                    Self::Polyline(
                        path.iter()
                            .filter_map(|point| coerce_to_geo_point(point, order))
                            .collect(),
                    )
                } else {
                    Self::decode_endpoints(map, order)
                }
            }
        }
    }

    /// Reads `value` strictly as a `{from, to}` pair, ignoring every other shape
    pub fn decode_segment(value: &Value, order: AxisOrder) -> Self {
        value
            .as_object()
            .map_or(Self::Unrecognized, |map| Self::decode_endpoints(map, order))
    }

    fn decode_endpoints(map: &Map<String, Value>, order: AxisOrder) -> Self {
        let (Some(from), Some(to)) = (map.get("from"), map.get("to")) else {
            return Self::Unrecognized;
        };
        match (coerce_to_geo_point(from, order), coerce_to_geo_point(to, order)) {
            (Some(from), Some(to)) => Self::Segment { from, to },
            _ => {
                trace!("Dropping segment with an invalid endpoint: {from} -> {to}");
                Self::Unrecognized
            }
        }
    }

    fn decode_geometry(geometry: &Value) -> Self {
        let coordinates = geometry.get("coordinates").and_then(Value::as_array);
        match (geometry.get("type").and_then(Value::as_str), coordinates) {
            (Some("LineString"), Some(coordinates)) => {
                Self::LineString(geojson_positions(coordinates))
            }
            (Some("MultiLineString"), Some(lines)) => Self::MultiLineString(
                lines
                    .iter()
                    .filter_map(Value::as_array)
                    .map(|line| geojson_positions(line))
                    .collect(),
            ),
            _ => Self::Unrecognized,
        }
    }

    /// Point sequences contributed by this record, each at least two long
    pub fn lines(&self) -> Vec<Vec<GeoPoint>> {
        let lines = match self {
            Self::LineString(points) | Self::Polyline(points) => vec![points.clone()],
            Self::MultiLineString(lines) => lines.clone(),
            Self::Segment { from, to } => vec![vec![*from, *to]],
            Self::Unrecognized => Vec::new(),
        };
        lines.into_iter().filter(|line| line.len() >= 2).collect()
    }

    pub fn segments(&self) -> impl Iterator<Item = Segment> {
        self.lines().into_iter().flat_map(|line| {
            line.into_iter()
                .tuple_windows()
                .map(|(a, b)| Segment { a, b })
                .collect::<Vec<_>>()
        })
    }
}

fn geojson_positions(coordinates: &[Value]) -> Vec<GeoPoint> {
    coordinates
        .iter()
        .filter_map(coerce_geojson_coordinate)
        .collect()
}

/// Lines contributed by one record; see [`RoadRecord::lines`]
pub fn extract_lines(record: &RoadRecord) -> Vec<Vec<GeoPoint>> {
    record.lines()
}
