//! Single-source shortest paths with a lazy-deletion binary heap.
//!
//! Costs are `f64` seconds (or opaque grid costs), ordered with `total_cmp`.
//! The result maps contain reachable nodes only; an absent key is +∞.  All
//! weights are finite and nonnegative, so the run terminates when the heap
//! drains.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap};

use ea_core::{DistanceTable, NodeId};
use ea_spatial::RoadGraph;

/// Heap entry ordered by cost, with the node id as a deterministic
/// secondary key.
#[derive(Copy, Clone, PartialEq)]
pub(crate) struct QueueEntry {
    pub cost: f64,
    pub node: NodeId,
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.cost
            .total_cmp(&other.cost)
            .then_with(|| self.node.cmp(&other.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest travel time from `source` to every reachable node.
pub fn shortest_times(graph: &RoadGraph, source: NodeId) -> DistanceTable {
    run(graph, source, None)
}

/// As [`shortest_times`], additionally recording the predecessor of every
/// settled node.  `parents[source] == source`.
pub fn shortest_times_with_parents(
    graph: &RoadGraph,
    source: NodeId,
) -> (DistanceTable, HashMap<NodeId, NodeId>) {
    let mut parents = HashMap::new();
    let distances = run(graph, source, Some(&mut parents));
    (distances, parents)
}

fn run(
    graph: &RoadGraph,
    source: NodeId,
    mut parents: Option<&mut HashMap<NodeId, NodeId>>,
) -> DistanceTable {
    let mut dist: DistanceTable = HashMap::new();
    let mut heap: BinaryHeap<Reverse<QueueEntry>> = BinaryHeap::new();

    dist.insert(source, 0.0);
    if let Some(p) = parents.as_deref_mut() {
        p.insert(source, source);
    }
    heap.push(Reverse(QueueEntry { cost: 0.0, node: source }));

    while let Some(Reverse(QueueEntry { cost, node })) = heap.pop() {
        // Lazy deletion: skip entries superseded by a later improvement.
        if cost > dist.get(&node).copied().unwrap_or(f64::INFINITY) {
            continue;
        }

        for &(next, weight) in graph.neighbours(node) {
            let next_cost = cost + weight;
            let improved = dist
                .get(&next)
                .map_or(true, |&current| next_cost < current);
            if improved {
                dist.insert(next, next_cost);
                if let Some(p) = parents.as_deref_mut() {
                    p.insert(next, node);
                }
                heap.push(Reverse(QueueEntry { cost: next_cost, node: next }));
            }
        }
    }

    dist
}
