//! Per-centre single-source shortest-path coordinator.
//!
//! One Dijkstra task per centre.  The graph is read-only for the whole
//! phase and every task writes only into its own [`CentreSsspResult`], so
//! with the `parallel` feature the tasks fan out over Rayon's pool with no
//! locking.  A centre whose snapped node never made it into the graph
//! produces a failed result without disturbing the other tasks.

use std::collections::HashMap;
use std::time::Instant;

use ea_core::{AllotmentLookup, Centre, DistanceTable, NodeId};
use ea_spatial::RoadGraph;

use crate::dijkstra::shortest_times_with_parents;
use crate::error::RoutingError;

/// Outcome of one centre's Dijkstra task.
#[derive(Clone, Debug)]
pub struct CentreSsspResult {
    pub centre_id: String,
    pub start_node: NodeId,
    /// Reachable node → seconds.  Empty on failure.
    pub distances: DistanceTable,
    /// Predecessor of each settled node; `parents[start] == start`.
    pub parents: HashMap<NodeId, NodeId>,
    pub wall_time_ms: u64,
    /// `None` on success; a rendered [`RoutingError`] otherwise.
    pub error: Option<String>,
}

impl CentreSsspResult {
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }

    pub fn reachable_nodes(&self) -> usize {
        self.distances.len()
    }
}

/// The aggregated outcome of one coordinator run.
#[derive(Clone, Debug)]
pub struct SsspRun {
    pub results: Vec<CentreSsspResult>,
    /// Wall-clock duration of the whole (parallel) phase.
    pub parallel_ms: u64,
}

impl SsspRun {
    /// Sum of per-task wall times — the sequential-equivalent cost.
    pub fn total_task_ms(&self) -> u64 {
        self.results.iter().map(|r| r.wall_time_ms).sum()
    }

    /// Estimated speedup over a sequential run: `Σ task time / wall time`.
    pub fn speedup(&self) -> f64 {
        self.total_task_ms() as f64 / self.parallel_ms.max(1) as f64
    }

    /// Merge the successful tables into a fresh allotment lookup.
    pub fn lookup(&self) -> AllotmentLookup {
        let mut lookup = AllotmentLookup::new();
        for result in self.results.iter().filter(|r| r.is_success()) {
            lookup.insert_table(&result.centre_id, &result.distances);
        }
        lookup
    }
}

/// Run one Dijkstra per centre and collect the per-centre tables.
pub fn compute_centre_tables(graph: &RoadGraph, centres: &[Centre]) -> SsspRun {
    let phase_start = Instant::now();

    #[cfg(feature = "parallel")]
    let results: Vec<CentreSsspResult> = {
        use rayon::prelude::*;
        centres.par_iter().map(|c| run_one(graph, c)).collect()
    };

    #[cfg(not(feature = "parallel"))]
    let results: Vec<CentreSsspResult> = centres.iter().map(|c| run_one(graph, c)).collect();

    let run = SsspRun {
        results,
        parallel_ms: phase_start.elapsed().as_millis() as u64,
    };
    log::info!(
        target: "ea.sssp",
        "{} centre tables in {} ms (speedup {:.2})",
        run.results.iter().filter(|r| r.is_success()).count(),
        run.parallel_ms,
        run.speedup()
    );
    run
}

fn run_one(graph: &RoadGraph, centre: &Centre) -> CentreSsspResult {
    let start_node = centre.snapped_node_id;
    let task_start = Instant::now();

    if !start_node.is_valid() || !graph.contains_node(start_node) {
        let error = RoutingError::StartNotInGraph(start_node);
        log::warn!(
            target: "ea.sssp",
            "centre {}: {error}",
            centre.centre_id
        );
        return CentreSsspResult {
            centre_id: centre.centre_id.clone(),
            start_node,
            distances: DistanceTable::new(),
            parents: HashMap::new(),
            wall_time_ms: task_start.elapsed().as_millis() as u64,
            error: Some(error.to_string()),
        };
    }

    let (distances, parents) = shortest_times_with_parents(graph, start_node);
    CentreSsspResult {
        centre_id: centre.centre_id.clone(),
        start_node,
        distances,
        parents,
        wall_time_ms: task_start.elapsed().as_millis() as u64,
        error: None,
    }
}
