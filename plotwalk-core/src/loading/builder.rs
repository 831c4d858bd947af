use log::{debug, info};
use rstar::{RTree, primitives::GeomWithData};
use serde_json::Value;

use super::{
    config::GraphBuildOptions,
    junction::split_at_junctions,
    record::{RoadRecord, Segment},
};
use crate::{GeoPoint, NodeKey, RoadGraph, geometry::LocalProjector, geometry::distance_meters};

/// Decodes raw JSON road records and builds a graph from them.
///
/// With `only_segments` set every record is read strictly as a `{from, to}`
/// pair; anything else is skipped.
pub fn build_graph_from_json(records: &[Value], options: &GraphBuildOptions) -> RoadGraph {
    let order = options.ambiguous_axis_order;
    let decoded: Vec<RoadRecord> = records
        .iter()
        .map(|value| {
            if options.only_segments {
                RoadRecord::decode_segment(value, order)
            } else {
                RoadRecord::decode(value, order)
            }
        })
        .collect();
    build_graph(&decoded, options)
}

/// Builds an undirected walking graph from road records.
///
/// Roads are split where they cross or where one ends against another,
/// nearby dangling endpoints are connected, and isolated nodes are removed.
pub fn build_graph(records: &[RoadRecord], options: &GraphBuildOptions) -> RoadGraph {
    let segments = collect_segments(records, options.only_segments);
    let mut graph = RoadGraph::new();
    if segments.is_empty() {
        debug!("No road segments in {} records", records.len());
        return graph;
    }

    if options.split_intersections {
        let junctions = split_at_junctions(&segments, options.junction_snap_distance_meters);
        for (a, b) in junctions.edges {
            graph.add_edge(a, b);
        }
    } else {
        for segment in &segments {
            graph.add_edge(segment.a, segment.b);
        }
    }

    let snapped = snap_dangling_endpoints(&mut graph, options);
    let removed = graph.remove_isolated();
    debug!("Snapped {snapped} dangling endpoint pairs, removed {removed} isolated nodes");

    let stats = graph.stats();
    info!(
        "Built road graph: {} records, {} segments, {} nodes, {} edges, {:.0} m, {} component(s)",
        records.len(),
        segments.len(),
        stats.nodes,
        stats.edges,
        stats.total_length_meters,
        stats.components
    );
    graph
}

fn collect_segments(records: &[RoadRecord], only_segments: bool) -> Vec<Segment> {
    records
        .iter()
        .filter(|record| !only_segments || matches!(record, RoadRecord::Segment { .. }))
        .flat_map(RoadRecord::segments)
        .collect()
}

/// Connects nodes of degree ≤ 1 to other such nodes within
/// `snap_distance_meters`, nearest first, up to `snap_max_neighbors` each.
/// Returns the number of new edges.
fn snap_dangling_endpoints(graph: &mut RoadGraph, options: &GraphBuildOptions) -> usize {
    let max_distance = options.snap_distance_meters;
    if options.snap_max_neighbors == 0 || max_distance <= 0.0 {
        return 0;
    }

    let dangling: Vec<(NodeKey, GeoPoint)> = graph
        .nodes()
        .filter(|&key| graph.degree(key) <= 1)
        .map(|key| (key, key.point()))
        .collect();
    if dangling.len() < 2 {
        return 0;
    }

    let projector = LocalProjector::centered_on(dangling.iter().map(|(_, point)| point));
    let tree = RTree::bulk_load(
        dangling
            .iter()
            .map(|&(key, point)| {
                let xy = projector.to_xy(point);
                GeomWithData::new([xy.x, xy.y], key)
            })
            .collect(),
    );
    // planar and haversine distances differ slightly; widen the search and
    // filter on the haversine distance afterwards
    let search_radius = max_distance * 1.01 + 0.01;

    let mut added = 0;
    for &(key, point) in &dangling {
        let xy = projector.to_xy(point);
        let mut nearby: Vec<(NodeKey, f64)> = tree
            .locate_within_distance([xy.x, xy.y], search_radius * search_radius)
            .filter(|candidate| candidate.data != key)
            .map(|candidate| (candidate.data, distance_meters(point, candidate.data.point())))
            .filter(|(_, distance)| *distance <= max_distance)
            .collect();
        nearby.sort_by(|x, y| x.1.total_cmp(&y.1).then(x.0.cmp(&y.0)));

        for (other, _) in nearby.into_iter().take(options.snap_max_neighbors) {
            if graph.weight(key, other).is_none() && graph.add_edge(point, other.point()) {
                added += 1;
            }
        }
    }
    added
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn p(lat: f64, lng: f64) -> GeoPoint {
        GeoPoint { lat, lng }
    }

    fn segment(a: GeoPoint, b: GeoPoint) -> RoadRecord {
        RoadRecord::Segment { from: a, to: b }
    }

    #[test]
    fn empty_input_gives_empty_graph() {
        let graph = build_graph(&[RoadRecord::Unrecognized], &GraphBuildOptions::default());
        assert!(graph.is_empty());
        assert!(build_graph_from_json(&[], &GraphBuildOptions::default()).is_empty());
    }

    #[test]
    fn crossing_roads_connect_only_when_splitting() {
        let records = [
            segment(p(0.0, -0.001), p(0.0, 0.001)),
            segment(p(-0.001, 0.0), p(0.001, 0.0)),
        ];
        let split = build_graph(&records, &GraphBuildOptions::default());
        assert_eq!(split.node_count(), 5);
        assert_eq!(split.stats().components, 1);

        let unsplit = build_graph(
            &records,
            &GraphBuildOptions {
                split_intersections: false,
                ..GraphBuildOptions::default()
            },
        );
        assert_eq!(unsplit.node_count(), 4);
        assert_eq!(unsplit.stats().components, 2);
    }

    #[test]
    fn dangling_endpoints_within_tolerance_are_joined() {
        // 1.1 m gap between two road ends
        let records = [
            segment(p(0.0, 0.0), p(0.0, 0.001)),
            segment(p(0.0, 0.001_01), p(0.0, 0.002)),
        ];
        let options = GraphBuildOptions::default();
        let graph = build_graph(&records, &options);
        assert_eq!(graph.stats().components, 1);

        let strict = GraphBuildOptions {
            snap_distance_meters: 0.5,
            ..options
        };
        assert_eq!(build_graph(&records, &strict).stats().components, 2);
    }

    #[test]
    fn snapping_respects_neighbour_cap() {
        // Four road ends in a row spaced 0.78 m, 0.89 m and 0.78 m apart,
        // each road leading off to a distinct far point
        let offsets = [0.0, 0.000_007, 0.000_015, 0.000_022];
        let records: Vec<RoadRecord> = offsets
            .iter()
            .enumerate()
            .map(|(i, lng)| segment(p(0.0, *lng), p(0.001, 0.001 * i as f64)))
            .collect();
        let edges_with_cap = |cap| {
            build_graph(
                &records,
                &GraphBuildOptions {
                    snap_max_neighbors: cap,
                    split_intersections: false,
                    ..GraphBuildOptions::default()
                },
            )
            .edge_count()
        };
        assert_eq!(edges_with_cap(0), 4);
        assert_eq!(edges_with_cap(1), 6);
        assert_eq!(edges_with_cap(3), 10);
    }

    #[test]
    fn edges_are_never_duplicated_or_inflated() {
        let a = p(0.0, 0.0);
        let b = p(0.0, 0.001);
        let records = [segment(a, b), segment(b, a), segment(a, b)];
        let graph = build_graph(&records, &GraphBuildOptions::default());
        assert_eq!(graph.edge_count(), 1);
        let (ka, kb) = (NodeKey::from(a), NodeKey::from(b));
        assert_eq!(graph.weight(ka, kb), graph.weight(kb, ka));
        assert!((graph.weight(ka, kb).unwrap() - distance_meters(a, b)).abs() < 1e-6);
    }

    #[test]
    fn only_segments_skips_other_shapes() {
        let values = [
            json!({"from": [0.0, 0.0], "to": [0.0, 0.001]}),
            json!({"path": [[1.0, 1.0], [1.0, 1.001]]}),
        ];
        let all = build_graph_from_json(&values, &GraphBuildOptions::default());
        assert_eq!(all.edge_count(), 2);

        let segments_only = build_graph_from_json(
            &values,
            &GraphBuildOptions {
                only_segments: true,
                ..GraphBuildOptions::default()
            },
        );
        assert_eq!(segments_only.edge_count(), 1);
    }
}
