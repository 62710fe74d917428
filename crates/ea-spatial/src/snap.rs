//! Coordinate → graph-node snapping.
//!
//! Snapping only ever targets connected nodes (non-empty adjacency); an
//! isolated node would be a dead end for every routing query.  Snapping can
//! still land in a small disconnected island, which is a common source of
//! unreachable assignments — [`Snapper::snap_to_main_component`] retries
//! with a scan restricted to the main component, which is cheap next to the
//! Dijkstra work that follows.

use ea_core::{GeoPoint, NodeId};

use crate::graph::RoadGraph;
use crate::kdtree::KdTree;

/// Borrow of the session's graph and (optional) spatial index.
pub struct Snapper<'g> {
    graph: &'g RoadGraph,
    tree: Option<&'g KdTree>,
}

impl<'g> Snapper<'g> {
    pub fn new(graph: &'g RoadGraph, tree: Option<&'g KdTree>) -> Self {
        Self { graph, tree }
    }

    /// Nearest connected node, via the k-d tree when present, else a linear
    /// scan.  `None` only when the graph has no connected nodes.
    pub fn snap(&self, point: GeoPoint) -> Option<NodeId> {
        match self.tree {
            Some(tree) => tree.nearest(point).map(|(id, _)| id),
            None => self.linear_nearest(point, |_| true),
        }
    }

    /// The `k` nearest connected nodes, closest first, by partial selection.
    pub fn snap_k(&self, point: GeoPoint, k: usize) -> Vec<NodeId> {
        let mut candidates: Vec<(f64, NodeId)> = self
            .graph
            .connected_nodes()
            .map(|(id, pos)| (point.distance_m(pos), id))
            .collect();

        if candidates.len() > k {
            candidates.select_nth_unstable_by(k, |a, b| {
                a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1))
            });
            candidates.truncate(k);
        }
        candidates.sort_unstable_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
        candidates.into_iter().map(|(_, id)| id).collect()
    }

    /// Snap, then verify the result lies in the main component; if it landed
    /// in an island, rescan restricted to main-component nodes.
    pub fn snap_to_main_component(&self, point: GeoPoint) -> Option<NodeId> {
        let snapped = self.snap(point)?;
        if self.graph.is_in_main_component(snapped) {
            return Some(snapped);
        }
        self.nearest_in_main_component(point)
    }

    /// Linear scan over connected nodes whose label is the main component.
    pub fn nearest_in_main_component(&self, point: GeoPoint) -> Option<NodeId> {
        self.linear_nearest(point, |id| self.graph.is_in_main_component(id))
    }

    fn linear_nearest<F: Fn(NodeId) -> bool>(&self, point: GeoPoint, keep: F) -> Option<NodeId> {
        self.graph
            .connected_nodes()
            .filter(|&(id, _)| keep(id))
            .map(|(id, pos)| (point.distance_m(pos), id))
            .min_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1)))
            .map(|(_, id)| id)
    }
}
