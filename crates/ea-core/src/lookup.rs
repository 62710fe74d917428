//! Travel-time tables produced by the per-centre shortest-path precompute.
//!
//! A [`DistanceTable`] maps reachable node → seconds for one centre; nodes
//! absent from the table are unreachable (equivalent to +∞).  The
//! [`AllotmentLookup`] is the transposed collection over all centres,
//! keyed the way the planner reads it: `node → centre → seconds`.

use std::collections::HashMap;

use crate::ids::NodeId;

/// Travel time from one centre to every reachable node, in seconds.
pub type DistanceTable = HashMap<NodeId, f64>;

/// `node → centre_id → seconds` over every centre whose table was computed.
///
/// Unreachable pairs are simply absent.  Refreshed as a whole before each
/// allotment run; retained afterwards for diagnostic queries.
#[derive(Clone, Debug, Default)]
pub struct AllotmentLookup {
    by_node: HashMap<NodeId, HashMap<String, f64>>,
}

impl AllotmentLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one centre's distance table into the lookup.
    pub fn insert_table(&mut self, centre_id: &str, table: &DistanceTable) {
        for (&node, &seconds) in table {
            self.by_node
                .entry(node)
                .or_default()
                .insert(centre_id.to_owned(), seconds);
        }
    }

    /// Per-centre travel times from `node`, or `None` if no centre reaches it.
    #[inline]
    pub fn centre_times(&self, node: NodeId) -> Option<&HashMap<String, f64>> {
        self.by_node.get(&node)
    }

    /// Travel time from `centre_id` to `node`, if reachable.
    #[inline]
    pub fn seconds(&self, node: NodeId, centre_id: &str) -> Option<f64> {
        self.by_node.get(&node).and_then(|m| m.get(centre_id)).copied()
    }

    /// Number of nodes reachable from at least one centre.
    pub fn len(&self) -> usize {
        self.by_node.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_node.is_empty()
    }
}
