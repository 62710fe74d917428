//! Road graph: node table, directed weighted adjacency, component labels.
//!
//! # Data layout
//!
//! Adjacency is a map `NodeId → Vec<(NodeId, f64)>` keyed only by nodes with
//! outgoing edges; OSM node ids are sparse `i64`s, so maps beat dense arrays
//! here.  Multi-edges between the same pair are tolerated on the OSM path
//! (the shortest-path algorithms pick the minimum by construction).
//!
//! # Component labels
//!
//! [`RoadGraph::label_components`] runs an iterative DFS over the undirected
//! closure of the adjacency: every outgoing edge counts as connectivity, so
//! one-way edges still merge components.  Nodes touching no edge at all get
//! [`ComponentId::ISOLATED`].  The "main" component is the one with the most
//! labelled nodes; snapping falls back to it when a coordinate lands in a
//! small island.

use std::collections::HashMap;

use ea_core::{ComponentId, GeoPoint, NodeId};

/// Counters reported by the graph builders, for logging and the build
/// response.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphStats {
    /// Entries in the node table.
    pub nodes: usize,
    /// Directed edges stored (a two-way segment counts twice).
    pub directed_edges: usize,
    /// Way segments ingested as one-way.
    pub oneway_segments: usize,
}

/// Directed weighted road graph plus per-node component labels.
#[derive(Clone, Debug, Default)]
pub struct RoadGraph {
    nodes: HashMap<NodeId, GeoPoint>,
    adjacency: HashMap<NodeId, Vec<(NodeId, f64)>>,
    components: HashMap<NodeId, ComponentId>,
    main_component: ComponentId,
    main_component_size: usize,
    edge_count: usize,
}

impl RoadGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Mutation (builders only) ──────────────────────────────────────────

    /// Insert a node into the node table.  Re-inserting an id overwrites its
    /// position, matching ingest semantics where the last element wins.
    pub fn add_node(&mut self, id: NodeId, pos: GeoPoint) {
        self.nodes.insert(id, pos);
    }

    /// Append a directed edge.  Both endpoints must already be in the node
    /// table; builders enforce this by skipping way segments with missing
    /// endpoints before calling.
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, weight: f64) {
        debug_assert!(weight >= 0.0, "edge weight must be nonnegative");
        debug_assert!(self.nodes.contains_key(&from) && self.nodes.contains_key(&to));
        self.adjacency.entry(from).or_default().push((to, weight));
        self.edge_count += 1;
    }

    /// `true` if a `from → to` edge already exists (any weight).  Used by the
    /// synthetic grid to filter duplicates.
    pub fn has_edge(&self, from: NodeId, to: NodeId) -> bool {
        self.adjacency
            .get(&from)
            .is_some_and(|edges| edges.iter().any(|&(n, _)| n == to))
    }

    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn position(&self, id: NodeId) -> Option<GeoPoint> {
        self.nodes.get(&id).copied()
    }

    #[inline]
    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Outgoing edges of `id`; empty slice for unknown or sink nodes.
    #[inline]
    pub fn neighbours(&self, id: NodeId) -> &[(NodeId, f64)] {
        self.adjacency.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Directed edge count.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of nodes with at least one outgoing edge.
    pub fn connected_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterator over all `(id, position)` entries in the node table.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, GeoPoint)> + '_ {
        self.nodes.iter().map(|(&id, &pos)| (id, pos))
    }

    /// Iterator over nodes with non-empty adjacency — the snapping domain.
    pub fn connected_nodes(&self) -> impl Iterator<Item = (NodeId, GeoPoint)> + '_ {
        self.adjacency.keys().map(|&id| (id, self.nodes[&id]))
    }

    // ── Component labelling ───────────────────────────────────────────────

    /// Label connected components over the undirected closure of the stored
    /// adjacency and cache the main (largest) component.
    ///
    /// Iterative DFS; recursion depth is unbounded on real road data.
    pub fn label_components(&mut self) {
        // Undirected closure: every stored edge connects both endpoints.
        let mut undirected: HashMap<NodeId, Vec<NodeId>> = HashMap::new();
        for (&from, edges) in &self.adjacency {
            for &(to, _) in edges {
                undirected.entry(from).or_default().push(to);
                undirected.entry(to).or_default().push(from);
            }
        }

        self.components.clear();
        let mut sizes: HashMap<ComponentId, usize> = HashMap::new();
        let mut next_label = 1i32;
        let mut stack: Vec<NodeId> = Vec::new();

        for &start in self.nodes.keys() {
            if self.components.contains_key(&start) {
                continue;
            }
            if !undirected.contains_key(&start) {
                self.components.insert(start, ComponentId::ISOLATED);
                continue;
            }

            let label = ComponentId(next_label);
            next_label += 1;
            let mut size = 0usize;

            stack.push(start);
            self.components.insert(start, label);
            while let Some(node) = stack.pop() {
                size += 1;
                for &next in undirected.get(&node).map(Vec::as_slice).unwrap_or(&[]) {
                    if !self.components.contains_key(&next) {
                        self.components.insert(next, label);
                        stack.push(next);
                    }
                }
            }
            sizes.insert(label, size);
        }

        let (main, main_size) = sizes
            .into_iter()
            .max_by_key(|&(label, size)| (size, std::cmp::Reverse(label.0)))
            .unwrap_or((ComponentId::ISOLATED, 0));
        self.main_component = main;
        self.main_component_size = main_size;
    }

    /// Component label of `id`; `ISOLATED` for unknown nodes.
    #[inline]
    pub fn component(&self, id: NodeId) -> ComponentId {
        self.components.get(&id).copied().unwrap_or(ComponentId::ISOLATED)
    }

    /// The largest labelled component, or `ISOLATED` when the graph has no
    /// edges at all.
    #[inline]
    pub fn main_component(&self) -> ComponentId {
        self.main_component
    }

    pub fn main_component_size(&self) -> usize {
        self.main_component_size
    }

    #[inline]
    pub fn is_in_main_component(&self, id: NodeId) -> bool {
        !self.main_component.is_isolated() && self.component(id) == self.main_component
    }
}
