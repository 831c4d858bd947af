//! Pure geometric helpers over [`GeoPoint`](crate::GeoPoint)s and a local
//! planar frame measured in meters.

mod distance;
mod intersection;
mod projection;

pub use distance::{EARTH_RADIUS_METERS, bearing_degrees, distance_meters, polyline_length};
pub use intersection::{SegmentIntersection, bounding_boxes_overlap, segment_intersection_xy};
pub use projection::{
    LineProjection, LocalProjector, SegmentProjection, closest_point_on_segment,
    closest_point_xy, project_point_on_infinite_line,
};
