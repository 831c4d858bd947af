//! Walking route computation over a [`RoadGraph`](crate::RoadGraph)

pub mod dijkstra;
mod route;
pub mod snap;
mod steps;
mod to_geojson;
pub mod trim;

pub use dijkstra::{dijkstra, path_length};
pub use route::{RouteDebug, RouteOptions, RouteResult, RouteSource, build_routed_polyline};
pub use snap::{Anchor, EdgeSnap, nearest_node, snap_point_to_graph_edge};
pub use steps::{Turn, format_distance, route_to_steps};
