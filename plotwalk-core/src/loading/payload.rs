//! Unwrapping of road payloads as served by the plot road endpoint.
//!
//! Failures to read or parse a payload degrade to zero records, which in
//! turn yields an empty graph and a `no_graph` route result.

use std::path::Path;

use log::{debug, warn};
use serde_json::Value;

use crate::Error;

/// Extracts the individual road records from a payload.
///
/// Accepts a `FeatureCollection`, a bare array, a `{ "data": .. }` wrapper
/// around either of those, or a single record.
pub fn unwrap_road_payload(payload: Value) -> Vec<Value> {
    match payload {
        Value::Array(records) => records,
        Value::Object(mut map) => {
            if map.get("type").and_then(Value::as_str) == Some("FeatureCollection") {
                return match map.remove("features") {
                    Some(Value::Array(features)) => features,
                    _ => {
                        warn!("FeatureCollection without a features array");
                        Vec::new()
                    }
                };
            }
            if let Some(data) = map.remove("data") {
                return unwrap_road_payload(data);
            }
            if ["type", "path", "from"].iter().any(|key| map.contains_key(*key)) {
                return vec![Value::Object(map)];
            }
            warn!("Unrecognized road payload object, treating as empty");
            Vec::new()
        }
        other => {
            warn!("Unrecognized road payload ({}), treating as empty", json_kind(&other));
            Vec::new()
        }
    }
}

/// Parses a JSON document into road records, logging and returning no
/// records when the text is not valid JSON.
pub fn parse_road_payload(text: &str) -> Vec<Value> {
    match serde_json::from_str(text) {
        Ok(payload) => unwrap_road_payload(payload),
        Err(e) => {
            warn!("Road payload is not valid JSON: {e}");
            Vec::new()
        }
    }
}

/// Reads road records from a file, degrading any failure to no records
pub fn read_road_file(path: &Path) -> Vec<Value> {
    read_road_file_strict(path).unwrap_or_else(|e| {
        warn!("Failed to load roads from {}: {e}", path.display());
        Vec::new()
    })
}

/// Reads road records from a file, reporting I/O and parse errors
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid JSON
pub fn read_road_file_strict(path: &Path) -> Result<Vec<Value>, Error> {
    let text = std::fs::read_to_string(path)?;
    let records = unwrap_road_payload(serde_json::from_str(&text)?);
    debug!("Read {} road records from {}", records.len(), path.display());
    Ok(records)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
