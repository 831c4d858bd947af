//! Undirected walking graph keyed by quantized coordinates

use petgraph::graphmap::UnGraphMap;

use super::{GeoPoint, NodeKey};
use crate::{MIN_EDGE_METERS, Meters, geometry::distance_meters};

/// Road network graph.
///
/// Edge weights are haversine lengths in meters. The graph is undirected, so
/// `weight(a, b) == weight(b, a)` always holds, and re-adding an existing edge
/// keeps the smaller of the two weights.
#[derive(Debug, Clone)]
pub struct RoadGraph {
    pub(crate) graph: UnGraphMap<NodeKey, Meters>,
}

impl Default for RoadGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl RoadGraph {
    pub fn new() -> Self {
        Self {
            graph: UnGraphMap::new(),
        }
    }

    /// Connects two points, weighting the edge by their distance.
    ///
    /// Points closer than [`MIN_EDGE_METERS`] are treated as the same place
    /// and no edge is added. Returns whether an edge was written.
    pub fn add_edge(&mut self, a: GeoPoint, b: GeoPoint) -> bool {
        let distance = distance_meters(a, b);
        if distance < MIN_EDGE_METERS {
            return false;
        }
        self.add_weighted_edge(NodeKey::from(a), NodeKey::from(b), distance)
    }

    /// Writes an edge with an explicit weight, never raising an existing one
    pub fn add_weighted_edge(&mut self, a: NodeKey, b: NodeKey, weight: Meters) -> bool {
        if a == b {
            return false;
        }
        match self.graph.edge_weight_mut(a, b) {
            Some(existing) => *existing = existing.min(weight),
            None => {
                self.graph.add_edge(a, b, weight);
            }
        }
        true
    }

    /// Removes the edge between `a` and `b`, returning its weight
    pub fn remove_edge(&mut self, a: NodeKey, b: NodeKey) -> Option<Meters> {
        self.graph.remove_edge(a, b)
    }

    pub fn weight(&self, a: NodeKey, b: NodeKey) -> Option<Meters> {
        self.graph.edge_weight(a, b).copied()
    }

    pub fn contains(&self, key: NodeKey) -> bool {
        self.graph.contains_node(key)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.graph.nodes()
    }

    /// Neighbors of `key` with edge weights. Empty for unknown keys.
    pub fn neighbors(&self, key: NodeKey) -> impl Iterator<Item = (NodeKey, Meters)> + '_ {
        self.graph
            .edges(key)
            .map(|(_, neighbor, weight)| (neighbor, *weight))
    }

    /// Every undirected edge exactly once
    pub fn edges(&self) -> impl Iterator<Item = (NodeKey, NodeKey, Meters)> + '_ {
        self.graph.all_edges().map(|(a, b, weight)| (a, b, *weight))
    }

    pub fn degree(&self, key: NodeKey) -> usize {
        self.graph.neighbors(key).count()
    }

    /// Drops nodes without neighbors, returning how many were removed
    pub fn remove_isolated(&mut self) -> usize {
        let isolated: Vec<NodeKey> = self
            .graph
            .nodes()
            .filter(|&key| self.graph.neighbors(key).next().is_none())
            .collect();
        for key in &isolated {
            self.graph.remove_node(*key);
        }
        isolated.len()
    }
}
