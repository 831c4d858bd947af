pub use crate::Meters;

// Geometry
pub use crate::geometry::{
    LocalProjector, bearing_degrees, closest_point_on_segment, distance_meters,
    project_point_on_infinite_line, segment_intersection_xy,
};

// Road data and graph construction
pub use crate::loading::{
    AxisOrder, GraphBuildOptions, RoadRecord, build_graph, build_graph_from_json,
    coerce_geojson_coordinate, coerce_to_geo_point, parse_road_payload, read_road_file,
    unwrap_road_payload,
};
pub use crate::model::{GeoPoint, GraphStats, LatLngAccessor, NodeKey, RoadGraph};

// Routing
pub use crate::routing::{
    RouteDebug, RouteOptions, RouteResult, RouteSource, Turn, build_routed_polyline, dijkstra,
    format_distance, route_to_steps,
};
