//! Strongly typed identifier wrappers.
//!
//! `NodeId` wraps the raw OSM node id.  Unlike a dense array index, OSM ids
//! are sparse `i64` values, so graph structures key maps by `NodeId` instead
//! of indexing vectors.  The inner integer is `pub` for direct access at
//! serialization boundaries.

use std::fmt;

/// Identity of a road-graph node: the OSM node id.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(pub i64);

impl NodeId {
    /// Sentinel meaning "no valid node" — used for not-yet-snapped
    /// coordinates.
    pub const INVALID: NodeId = NodeId(i64::MAX);

    /// `true` unless this is the [`INVALID`](Self::INVALID) sentinel.
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::INVALID
    }
}

impl Default for NodeId {
    /// Returns the `INVALID` sentinel so uninitialized ids are visibly invalid.
    #[inline]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

impl From<i64> for NodeId {
    #[inline]
    fn from(id: i64) -> Self {
        NodeId(id)
    }
}

/// Label of a connected component in the road graph.
///
/// Labelled components are `> 0`; nodes touching no edge at all carry
/// [`ISOLATED`](Self::ISOLATED).
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComponentId(pub i32);

impl ComponentId {
    /// The label of a node present in the node table but absent from the
    /// adjacency (no incident edges).
    pub const ISOLATED: ComponentId = ComponentId(-1);

    #[inline]
    pub fn is_isolated(self) -> bool {
        self == Self::ISOLATED
    }
}

impl Default for ComponentId {
    #[inline]
    fn default() -> Self {
        Self::ISOLATED
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentId({})", self.0)
    }
}
