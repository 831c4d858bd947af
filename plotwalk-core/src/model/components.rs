//! Summary statistics for a built road graph

use petgraph::algo::connected_components;
use serde::Serialize;

use super::RoadGraph;
use crate::Meters;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GraphStats {
    pub nodes: usize,
    pub edges: usize,
    pub total_length_meters: Meters,
    /// Number of disconnected road networks. Anything above one means some
    /// destinations cannot be reached from some positions.
    pub components: usize,
}

impl RoadGraph {
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            nodes: self.node_count(),
            edges: self.edge_count(),
            total_length_meters: self.edges().map(|(_, _, weight)| weight).sum(),
            components: connected_components(&self.graph),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::GeoPoint;

    use super::*;

    #[test]
    fn counts_components() {
        let mut graph = RoadGraph::new();
        let p = |lat, lng| GeoPoint { lat, lng };
        graph.add_edge(p(0.0, 0.0), p(0.0, 0.001));
        graph.add_edge(p(0.0, 0.001), p(0.001, 0.001));
        graph.add_edge(p(1.0, 1.0), p(1.0, 1.001));

        let stats = graph.stats();
        assert_eq!(stats.nodes, 5);
        assert_eq!(stats.edges, 3);
        assert_eq!(stats.components, 2);
        assert!(stats.total_length_meters > 300.0);
    }

    #[test]
    fn empty_graph() {
        let stats = RoadGraph::new().stats();
        assert_eq!(stats.nodes, 0);
        assert_eq!(stats.components, 0);
    }
}
