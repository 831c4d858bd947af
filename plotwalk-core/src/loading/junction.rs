//! Junction splitting: roads that cross, or where one road ends against the
//! interior of another, are cut at the shared point so the graph connects them.

use geo::Coord;
use log::debug;
use rstar::{RTree, primitives::GeomWithData};

use super::record::Segment;
use crate::{
    GeoPoint, MIN_EDGE_METERS, Meters,
    geometry::{
        LocalProjector, bounding_boxes_overlap, closest_point_xy, distance_meters,
        segment_intersection_xy,
    },
};

/// Split parameters this close to 0 or 1 are the segment's own endpoints
const INTERIOR_EPSILON: f64 = 1e-6;
/// Splits closer than this along one segment are merged
const SPLIT_DEDUP_METERS: Meters = 0.15;

type Vertex = GeomWithData<[f64; 2], GeoPoint>;

#[derive(Debug, Clone, Copy)]
struct Split {
    t: f64,
    point: GeoPoint,
    endpoint: bool,
}

/// Road end linked onto the interior of another segment
#[derive(Debug, Clone, Copy)]
struct TeeLink {
    from: GeoPoint,
    onto: usize,
    point: GeoPoint,
}

/// Edges produced by junction splitting
#[derive(Debug, Default)]
pub(crate) struct JunctionEdges {
    pub(crate) edges: Vec<(GeoPoint, GeoPoint)>,
    pub(crate) crossings: usize,
    pub(crate) tee_links: usize,
}

/// Every split point is registered here so that two segments meeting at a
/// junction agree on the exact coordinate, and no two distinct split points
/// end up closer than [`MIN_EDGE_METERS`].
struct VertexRegistry {
    projector: LocalProjector,
    tree: RTree<Vertex>,
}

impl VertexRegistry {
    fn new(projector: LocalProjector, segments: &[Segment]) -> Self {
        let vertices = segments
            .iter()
            .flat_map(|s| [s.a, s.b])
            .map(|p| {
                let xy = projector.to_xy(p);
                Vertex::new([xy.x, xy.y], p)
            })
            .collect();
        Self {
            projector,
            tree: RTree::bulk_load(vertices),
        }
    }

    fn canonical(&mut self, xy: Coord<f64>) -> GeoPoint {
        let query = [xy.x, xy.y];
        if let Some(existing) = self.tree.nearest_neighbor(&query) {
            let [x, y] = *existing.geom();
            if (x - xy.x).hypot(y - xy.y) < MIN_EDGE_METERS {
                return existing.data;
            }
        }
        let point = self.projector.to_lat_lng(xy);
        self.tree.insert(Vertex::new(query, point));
        point
    }
}

pub(crate) fn split_at_junctions(segments: &[Segment], snap_distance: Meters) -> JunctionEdges {
    let projector = LocalProjector::centered_on(segments.iter().flat_map(|s| [&s.a, &s.b]));
    let planar: Vec<(Coord<f64>, Coord<f64>)> = segments
        .iter()
        .map(|s| (projector.to_xy(s.a), projector.to_xy(s.b)))
        .collect();

    let mut registry = VertexRegistry::new(projector, segments);
    let mut splits: Vec<Vec<Split>> = segments
        .iter()
        .map(|s| {
            vec![
                Split { t: 0.0, point: s.a, endpoint: true },
                Split { t: 1.0, point: s.b, endpoint: true },
            ]
        })
        .collect();
    let mut links = Vec::new();
    let mut result = JunctionEdges::default();

    for i in 0..segments.len() {
        for j in (i + 1)..segments.len() {
            let (a, b) = planar[i];
            let (c, d) = planar[j];
            if !bounding_boxes_overlap(a, b, c, d, snap_distance) {
                continue;
            }

            if let Some(hit) = segment_intersection_xy(a, b, c, d) {
                let point = registry.canonical(hit.point);
                splits[i].push(Split { t: hit.t, point, endpoint: false });
                splits[j].push(Split { t: hit.u, point, endpoint: false });
                result.crossings += 1;
            }

            for (from, onto) in [(i, j), (j, i)] {
                let (onto_a, onto_b) = planar[onto];
                let ends = [(segments[from].a, planar[from].0), (segments[from].b, planar[from].1)];
                for (end, end_xy) in ends {
                    let (xy, t) = closest_point_xy(end_xy, onto_a, onto_b);
                    if t <= INTERIOR_EPSILON || t >= 1.0 - INTERIOR_EPSILON {
                        continue;
                    }
                    if (xy.x - end_xy.x).hypot(xy.y - end_xy.y) > snap_distance {
                        continue;
                    }
                    let point = registry.canonical(xy);
                    splits[onto].push(Split { t, point, endpoint: false });
                    links.push(TeeLink { from: end, onto, point });
                }
            }
        }
    }

    let kept: Vec<Vec<GeoPoint>> = splits.into_iter().map(order_splits).collect();
    for points in &kept {
        result
            .edges
            .extend(points.windows(2).map(|pair| (pair[0], pair[1])));
    }

    for link in links {
        // The split may have been merged into a neighbour, so attach to
        // whatever survived closest to it.
        let target = kept[link.onto].iter().copied().min_by(|x, y| {
            distance_meters(*x, link.point).total_cmp(&distance_meters(*y, link.point))
        });
        if let Some(target) = target {
            result.edges.push((link.from, target));
            result.tee_links += 1;
        }
    }

    debug!(
        "Junction split: {} segments, {} crossings, {} T-junction links",
        segments.len(),
        result.crossings,
        result.tee_links
    );
    result
}

/// Sorts splits along the segment and merges ones closer than
/// [`SPLIT_DEDUP_METERS`], preferring the segment's own endpoints.
fn order_splits(mut splits: Vec<Split>) -> Vec<GeoPoint> {
    splits.sort_by(|x, y| x.t.total_cmp(&y.t).then(y.endpoint.cmp(&x.endpoint)));

    let mut kept: Vec<Split> = Vec::with_capacity(splits.len());
    for split in splits {
        match kept.last_mut() {
            Some(last) if distance_meters(last.point, split.point) < SPLIT_DEDUP_METERS => {
                if split.endpoint && !last.endpoint {
                    *last = split;
                }
            }
            _ => kept.push(split),
        }
    }
    kept.into_iter().map(|split| split.point).collect()
}
