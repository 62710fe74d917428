//! Synthetic fallback network for when OSM ingestion yields nothing.
//!
//! An 80×80 lattice spanning the bounding box, every cell connected to its
//! 8 neighbours in both directions.  Edge weights here are haversine
//! *metres*, not seconds — downstream code treats weights as opaque
//! nonnegative costs, and a session never mixes the grid with an OSM graph.

use ea_core::{BoundingBox, GeoPoint, NodeId};

use crate::graph::RoadGraph;

const GRID_SIZE: usize = 80;

const DIRECTIONS: [(isize, isize); 8] = [
    (0, 1),
    (1, 0),
    (1, 1),
    (1, -1),
    (0, -1),
    (-1, 0),
    (-1, -1),
    (-1, 1),
];

/// Generate the fallback grid inside `bbox`, with component labels applied.
pub fn synthetic_grid(bbox: &BoundingBox) -> RoadGraph {
    let mut graph = RoadGraph::new();

    let lat_step = (bbox.max_lat - bbox.min_lat) / GRID_SIZE as f64;
    let lon_step = (bbox.max_lon - bbox.min_lon) / GRID_SIZE as f64;

    // Node ids are sequential from 1, row-major.
    let id_at = |row: usize, col: usize| NodeId((row * GRID_SIZE + col) as i64 + 1);
    let pos_at = |row: usize, col: usize| {
        GeoPoint::new(
            bbox.min_lat + row as f64 * lat_step,
            bbox.min_lon + col as f64 * lon_step,
        )
    };

    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            graph.add_node(id_at(row, col), pos_at(row, col));
        }
    }

    for row in 0..GRID_SIZE {
        for col in 0..GRID_SIZE {
            let current = id_at(row, col);
            for (d_row, d_col) in DIRECTIONS {
                let (n_row, n_col) = (row as isize + d_row, col as isize + d_col);
                if n_row < 0
                    || n_row >= GRID_SIZE as isize
                    || n_col < 0
                    || n_col >= GRID_SIZE as isize
                {
                    continue;
                }
                let (n_row, n_col) = (n_row as usize, n_col as usize);
                let neighbour = id_at(n_row, n_col);
                // Grid mode filters duplicate directed edges.
                if graph.has_edge(current, neighbour) {
                    continue;
                }
                let metres = pos_at(row, col).distance_m(pos_at(n_row, n_col));
                graph.add_edge(current, neighbour, metres);
            }
        }
    }

    graph.label_components();
    log::info!(
        target: "ea.osm",
        "synthetic grid: {} nodes, {} directed edges",
        graph.node_count(),
        graph.edge_count()
    );
    graph
}
