//! This module is responsible for turning loosely shaped road data into a
//! routable [`RoadGraph`](crate::RoadGraph).

mod builder;
pub mod coerce;
mod config;
mod junction;
pub mod payload;
pub mod record;

pub use builder::{build_graph, build_graph_from_json};
pub use coerce::{AxisOrder, coerce_accessor, coerce_geojson_coordinate, coerce_to_geo_point};
pub use config::GraphBuildOptions;
pub use payload::{parse_road_payload, read_road_file, read_road_file_strict, unwrap_road_payload};
pub use record::{RoadRecord, Segment, extract_lines};
