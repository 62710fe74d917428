//! Arena-backed 2-D k-d tree over connected graph nodes.
//!
//! Entries live in one dense `Vec`; children are arena indices, so the tree
//! is cheaply cloneable and needs no lifetime or pointer juggling.  The
//! splitting axis alternates latitude (0) / longitude (1) per depth;
//! construction sorts the working slice by the axis coordinate and recurses
//! on the median.
//!
//! Queries measure haversine metres.  The far subtree is pruned with a
//! conservative lower bound: the axis-coordinate difference converted at
//! 111 000 m per degree.  That overestimates one metre-per-degree-longitude
//! away from the equator, which only costs extra visits, never misses.

use ea_core::{GeoPoint, NodeId};

use crate::graph::RoadGraph;

/// Conservative metres-per-degree factor used for axis-plane pruning.
const METRES_PER_DEGREE: f64 = 111_000.0;

#[derive(Clone, Debug)]
struct KdEntry {
    node_id: NodeId,
    pos: GeoPoint,
    /// 0 = split on latitude, 1 = split on longitude.
    axis: u8,
    left: Option<u32>,
    right: Option<u32>,
}

impl KdEntry {
    #[inline]
    fn coordinate(&self, axis: u8) -> f64 {
        if axis == 0 {
            self.pos.lat
        } else {
            self.pos.lon
        }
    }
}

/// Nearest-neighbour index over `(lat, lon)` points.
#[derive(Clone, Debug, Default)]
pub struct KdTree {
    arena: Vec<KdEntry>,
    root: Option<u32>,
}

impl KdTree {
    /// Build over the graph's connected nodes (non-empty adjacency only).
    ///
    /// Returns `None` when the graph has no connected nodes; callers keep
    /// using the linear-scan snapping path in that case.
    pub fn from_graph(graph: &RoadGraph) -> Option<Self> {
        let mut points: Vec<(NodeId, GeoPoint)> = graph.connected_nodes().collect();
        if points.is_empty() {
            return None;
        }
        // Stable arena layout regardless of map iteration order.
        points.sort_unstable_by_key(|&(id, _)| id);

        let mut tree = KdTree {
            arena: Vec::with_capacity(points.len()),
            root: None,
        };
        tree.root = tree.build_subtree(&mut points, 0);
        Some(tree)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    fn build_subtree(&mut self, points: &mut [(NodeId, GeoPoint)], depth: u32) -> Option<u32> {
        if points.is_empty() {
            return None;
        }
        let axis = (depth % 2) as u8;
        points.sort_unstable_by(|a, b| {
            let (ka, kb) = if axis == 0 {
                (a.1.lat, b.1.lat)
            } else {
                (a.1.lon, b.1.lon)
            };
            ka.total_cmp(&kb).then_with(|| a.0.cmp(&b.0))
        });

        let median = points.len() / 2;
        let (node_id, pos) = points[median];
        let (before, rest) = points.split_at_mut(median);
        let after = &mut rest[1..];

        let left = self.build_subtree(before, depth + 1);
        let right = self.build_subtree(after, depth + 1);

        let index = self.arena.len() as u32;
        self.arena.push(KdEntry { node_id, pos, axis, left, right });
        Some(index)
    }

    /// Nearest indexed node to `query` and its haversine distance in metres.
    pub fn nearest(&self, query: GeoPoint) -> Option<(NodeId, f64)> {
        let root = self.root?;
        let mut best: Option<(NodeId, f64)> = None;
        self.search(root, query, &mut best);
        best
    }

    fn search(&self, index: u32, query: GeoPoint, best: &mut Option<(NodeId, f64)>) {
        let entry = &self.arena[index as usize];

        let dist = query.distance_m(entry.pos);
        if best.map_or(true, |(_, best_dist)| dist < best_dist) {
            *best = Some((entry.node_id, dist));
        }

        let query_coord = if entry.axis == 0 { query.lat } else { query.lon };
        let split_coord = entry.coordinate(entry.axis);

        let (near, far) = if query_coord < split_coord {
            (entry.left, entry.right)
        } else {
            (entry.right, entry.left)
        };

        if let Some(near) = near {
            self.search(near, query, best);
        }

        // Visit the far side only if the splitting plane could still hide a
        // closer node than the current best.
        let plane_bound = (query_coord - split_coord).abs() * METRES_PER_DEGREE;
        if let Some(far) = far {
            if best.map_or(true, |(_, best_dist)| plane_bound < best_dist) {
                self.search(far, query, best);
            }
        }
    }
}
