//! OSM-style document model and the two-pass graph builder.
//!
//! The fetcher collaborator hands over an already-parsed node/way document
//! (Overpass JSON layout).  Building is two linear passes:
//!
//! 1. **Nodes pass** — copy every `node` element into the node table.
//! 2. **Ways pass** — for each `way` carrying a `highway` tag, resolve the
//!    segment speed (numeric `maxspeed` tag, else the class default below),
//!    honour `oneway`, and append time-weighted directed edges for every
//!    consecutive node pair.  Pairs with an endpoint missing from the node
//!    table are skipped silently.
//!
//! Component labelling runs once after both passes.
//!
//! # Default speeds (km/h)
//!
//! | class         | km/h | class          | km/h |
//! |---------------|------|----------------|------|
//! | motorway      | 100  | unclassified   | 40   |
//! | trunk         | 90   | residential    | 30   |
//! | primary       | 80   | living_street  | 20   |
//! | secondary     | 60   | service        | 20   |
//! | tertiary      | 50   | anything else  | 30   |

use std::collections::HashMap;

use serde::Deserialize;

use ea_core::geo::time_seconds;
use ea_core::{GeoPoint, NodeId};

use crate::error::{SpatialError, SpatialResult};
use crate::graph::{GraphStats, RoadGraph};

// ── Document model ────────────────────────────────────────────────────────────

/// An Overpass-layout element list.  `elements: None` means the upstream
/// call failed outright (no `elements` key in the payload).
#[derive(Clone, Debug, Default, Deserialize)]
pub struct OsmDocument {
    pub elements: Option<Vec<OsmElement>>,
}

impl OsmDocument {
    /// Parse from a raw JSON string.
    pub fn from_json_str(raw: &str) -> SpatialResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// A document with no `elements` field, as produced by a failed upstream
    /// call.  Building from it always signals fallback.
    pub fn empty() -> Self {
        Self { elements: None }
    }
}

/// One element of the document.  Unknown element types (relations and
/// friends) deserialize as `Other` and are ignored by the builder.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OsmElement {
    Node {
        id: i64,
        lat: f64,
        lon: f64,
    },
    Way {
        #[serde(default)]
        nodes: Vec<i64>,
        #[serde(default)]
        tags: HashMap<String, String>,
    },
    #[serde(other)]
    Other,
}

// ── Tag helpers ───────────────────────────────────────────────────────────────

/// Default speed in km/h for a highway class.
pub fn default_speed_kmh(highway: &str) -> f64 {
    match highway {
        "motorway" => 100.0,
        "trunk" => 90.0,
        "primary" => 80.0,
        "secondary" => 60.0,
        "tertiary" => 50.0,
        "unclassified" => 40.0,
        "residential" => 30.0,
        "living_street" => 20.0,
        "service" => 20.0,
        _ => 30.0,
    }
}

/// Parse the leading numeric part of a `maxspeed` value ("50", "50 km/h",
/// "50km/h").  Returns `None` for non-numeric or non-positive values; the
/// caller keeps the class default in that case.
fn parse_maxspeed(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let end = trimmed
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(trimmed.len());
    match trimmed[..end].parse::<f64>() {
        Ok(speed) if speed > 0.0 => Some(speed),
        _ => None,
    }
}

fn is_oneway(tags: &HashMap<String, String>) -> bool {
    matches!(
        tags.get("oneway").map(String::as_str),
        Some("yes") | Some("true") | Some("1")
    )
}

// ── Builder ───────────────────────────────────────────────────────────────────

/// Build a labelled road graph from an OSM-style document.
///
/// # Errors
///
/// [`SpatialError::MissingElements`] when the document has no `elements`
/// field, [`SpatialError::EmptyNetwork`] when it produced no nodes.  Both
/// mean "fall back to the synthetic grid"; neither leaves a half-built graph
/// in the caller's hands.
pub fn build_from_document(doc: &OsmDocument) -> SpatialResult<(RoadGraph, GraphStats)> {
    let elements = doc.elements.as_ref().ok_or(SpatialError::MissingElements)?;
    if elements.is_empty() {
        return Err(SpatialError::EmptyNetwork);
    }

    let mut graph = RoadGraph::new();

    // ── Nodes pass ────────────────────────────────────────────────────────
    for element in elements {
        if let OsmElement::Node { id, lat, lon } = element {
            graph.add_node(NodeId(*id), GeoPoint::new(*lat, *lon));
        }
    }
    if graph.is_empty() {
        return Err(SpatialError::EmptyNetwork);
    }

    // ── Ways pass ─────────────────────────────────────────────────────────
    let mut oneway_segments = 0usize;
    for element in elements {
        let (way_nodes, tags) = match element {
            OsmElement::Way { nodes, tags } => (nodes, tags),
            _ => continue,
        };
        let highway = match tags.get("highway") {
            Some(h) => h,
            None => continue,
        };

        let speed_kmh = tags
            .get("maxspeed")
            .and_then(|raw| parse_maxspeed(raw))
            .unwrap_or_else(|| default_speed_kmh(highway));
        let oneway = is_oneway(tags);

        for pair in way_nodes.windows(2) {
            let (u, v) = (NodeId(pair[0]), NodeId(pair[1]));
            let (pos_u, pos_v) = match (graph.position(u), graph.position(v)) {
                (Some(a), Some(b)) => (a, b),
                _ => continue, // endpoint outside the node table
            };

            let weight = time_seconds(pos_u.distance_m(pos_v), speed_kmh);
            graph.add_edge(u, v, weight);
            if oneway {
                oneway_segments += 1;
            } else {
                graph.add_edge(v, u, weight);
            }
        }
    }

    graph.label_components();

    let stats = GraphStats {
        nodes: graph.node_count(),
        directed_edges: graph.edge_count(),
        oneway_segments,
    };
    log::info!(
        target: "ea.osm",
        "built graph: {} nodes, {} directed edges, {} one-way segments",
        stats.nodes,
        stats.directed_edges,
        stats.oneway_segments
    );

    Ok((graph, stats))
}
