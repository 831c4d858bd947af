//! Attaching free positions (the visitor, a grave plot) to the road graph

use serde::Serialize;

use crate::{
    GeoPoint, MIN_EDGE_METERS, Meters, NodeKey, RoadGraph,
    geometry::{closest_point_on_segment, distance_meters},
};

/// Closest point on any graph edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeSnap {
    pub point: GeoPoint,
    pub distance_meters: Meters,
    pub from: NodeKey,
    pub to: NodeKey,
    /// Position along `from -> to`, in `[0, 1]`
    pub t: f64,
}

/// Where a position joined the graph
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anchor {
    /// Projected onto an edge; `key` is a request-scoped virtual node
    Edge {
        key: NodeKey,
        point: GeoPoint,
        distance_meters: Meters,
    },
    /// Fell back to the nearest existing node
    Node {
        key: NodeKey,
        point: GeoPoint,
        distance_meters: Meters,
    },
}

impl Anchor {
    pub fn key(&self) -> NodeKey {
        match self {
            Self::Edge { key, .. } | Self::Node { key, .. } => *key,
        }
    }

    pub fn point(&self) -> GeoPoint {
        match self {
            Self::Edge { point, .. } | Self::Node { point, .. } => *point,
        }
    }

    pub fn distance_meters(&self) -> Meters {
        match self {
            Self::Edge {
                distance_meters, ..
            }
            | Self::Node {
                distance_meters, ..
            } => *distance_meters,
        }
    }
}

/// Scans every edge for the one closest to `point`
pub fn snap_point_to_graph_edge(graph: &RoadGraph, point: GeoPoint) -> Option<EdgeSnap> {
    graph
        .edges()
        .map(|(from, to, _)| {
            let hit = closest_point_on_segment(point, from.point(), to.point());
            EdgeSnap {
                point: hit.point,
                distance_meters: hit.distance_meters,
                from,
                to,
                t: hit.t,
            }
        })
        .min_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters))
}

/// Closest existing node by straight-line distance
pub fn nearest_node(graph: &RoadGraph, point: GeoPoint) -> Option<(NodeKey, Meters)> {
    graph
        .nodes()
        .map(|key| (key, distance_meters(point, key.point())))
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

/// Splits the snapped edge at a virtual node, so later snaps on the same
/// copy can only land on one of its halves. Snaps landing on an edge end
/// reuse that node instead.
pub(crate) fn insert_virtual_node(graph: &mut RoadGraph, snap: &EdgeSnap) -> NodeKey {
    for end in [snap.from, snap.to] {
        if distance_meters(snap.point, end.point()) < MIN_EDGE_METERS {
            return end;
        }
    }
    let joined_from = graph.add_edge(snap.point, snap.from.point());
    let joined_to = graph.add_edge(snap.point, snap.to.point());
    if joined_from && joined_to {
        graph.remove_edge(snap.from, snap.to);
    }
    NodeKey::from(snap.point)
}

/// Joins `point` to the graph: onto the nearest edge when within
/// `max_distance`, else onto the nearest node when that is within range.
pub(crate) fn anchor_point(
    graph: &mut RoadGraph,
    point: GeoPoint,
    max_distance: Meters,
) -> Option<Anchor> {
    if let Some(snap) = snap_point_to_graph_edge(graph, point)
        && snap.distance_meters <= max_distance
    {
        let key = insert_virtual_node(graph, &snap);
        return Some(Anchor::Edge {
            key,
            point: snap.point,
            distance_meters: snap.distance_meters,
        });
    }

    let (key, distance) = nearest_node(graph, point)?;
    (distance <= max_distance).then(|| Anchor::Node {
        key,
        point: key.point(),
        distance_meters: distance,
    })
}
