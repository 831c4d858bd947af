//! On-device walking router for cemetery road networks.
//!
//! Road geometry arrives as loosely shaped JSON (GeoJSON features, bare
//! geometries, `{from, to}` segments, polylines). It is decoded into
//! [`RoadRecord`]s, turned into an undirected [`RoadGraph`] with junction
//! splitting and endpoint snapping, and routed over with Dijkstra. The
//! resulting [`RouteResult`] carries a trimmed walking polyline, its length
//! and turn-by-turn steps.

pub mod error;
pub mod geometry;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use loading::{
    AxisOrder, GraphBuildOptions, RoadRecord, build_graph, build_graph_from_json,
    unwrap_road_payload,
};
pub use model::{GeoPoint, GraphStats, NodeKey, RoadGraph};
pub use routing::{RouteOptions, RouteResult, RouteSource, build_routed_polyline};

/// Distance in meters
pub type Meters = f64;

/// Edge lengths below this are treated as the same point
pub const MIN_EDGE_METERS: Meters = 0.3;
