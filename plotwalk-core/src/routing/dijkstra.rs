use std::{cmp::Ordering, collections::BinaryHeap};

use hashbrown::HashMap;

use crate::{Meters, NodeKey, RoadGraph};

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: Meters,
    node: NodeKey,
}

impl Eq for State {}

// Implement Ord for State to use in BinaryHeap
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap by cost (reversed from standard Rust BinaryHeap)
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| self.node.cmp(&other.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest path between two nodes by total edge length.
///
/// Returns the node sequence from `start` to `end` inclusive, or an empty
/// vector when either node is missing or `end` is unreachable.
pub fn dijkstra(graph: &RoadGraph, start: NodeKey, end: NodeKey) -> Vec<NodeKey> {
    if !graph.contains(start) || !graph.contains(end) {
        return Vec::new();
    }

    let mut distances: HashMap<NodeKey, Meters> = HashMap::new();
    let mut predecessors: HashMap<NodeKey, NodeKey> = HashMap::new();
    let mut heap = BinaryHeap::new();

    distances.insert(start, 0.0);
    heap.push(State {
        cost: 0.0,
        node: start,
    });

    while let Some(State { cost, node }) = heap.pop() {
        if node == end {
            break;
        }

        // Skip stale heap entries
        if distances.get(&node).is_some_and(|&best| cost > best) {
            continue;
        }

        for (next, weight) in graph.neighbors(node) {
            let next_cost = cost + weight;
            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost >= *entry.get() {
                        continue;
                    }
                    *entry.get_mut() = next_cost;
                }
            }
            predecessors.insert(next, node);
            heap.push(State {
                cost: next_cost,
                node: next,
            });
        }
    }

    if !distances.contains_key(&end) {
        return Vec::new();
    }

    let mut path = vec![end];
    let mut current = end;
    while let Some(&prev) = predecessors.get(&current) {
        path.push(prev);
        current = prev;
        if current == start {
            break;
        }
    }
    path.reverse();

    if path.first() == Some(&start) {
        path
    } else {
        Vec::new()
    }
}

/// Total weight along a node path, `None` if two consecutive nodes are not
/// adjacent
pub fn path_length(graph: &RoadGraph, path: &[NodeKey]) -> Option<Meters> {
    path.windows(2)
        .map(|pair| graph.weight(pair[0], pair[1]))
        .sum()
}
