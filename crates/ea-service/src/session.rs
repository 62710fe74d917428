//! The owned session object and its build/allot/path operations.
//!
//! One `Session` holds everything session-scoped: graph, spatial
//! index, centres, students, travel-time lookup and the latest assignments.
//! `build` and `allot` replace that state atomically — new structures are
//! assembled into locals first and installed only once complete.

use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use ea_core::{AllotmentLookup, Centre, GeoPoint, NodeId, Student};
use ea_planner::{assign_tiered, FinalAssignments, Permissive};
use ea_routing::{compute_centre_tables, route_candidates, AStarRouter};
use ea_spatial::{build_from_document, synthetic_grid, KdTree, OsmDocument, RoadGraph, Snapper};

use crate::api::{
    AllotRequest, AllotResponse, AllotTiming, BuildRequest, BuildResponse, BuildTiming,
    CentreSsspSummary, ParallelSsspRequest, ParallelSsspResponse, PathQuery, PathResponse,
    PathTiming, SsspTiming, STATUS_SUCCESS,
};
use crate::diagnostics::{self, DiagnosticsReport};
use crate::error::{ServiceError, ServiceResult};
use crate::export;
use crate::fetch::NetworkFetcher;

/// Snap candidates tried per endpoint in the coordinate form of `path`.
const SNAP_CANDIDATES: usize = 5;

#[inline]
fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}

/// Session-scoped state plus the fetcher collaborator.
///
/// Writer operations (`build`, `allot`) take `&mut self`; readers take
/// `&self`.  Hosts that serve requests concurrently put the session behind
/// a `RwLock` and get exactly the locking discipline the data needs.
pub struct Session<F: NetworkFetcher> {
    fetcher: F,
    graph: RoadGraph,
    kdtree: Option<KdTree>,
    centres: Vec<Centre>,
    students: Vec<Student>,
    lookup: AllotmentLookup,
    assignments: FinalAssignments,
    built: bool,
}

impl<F: NetworkFetcher> Session<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            graph: RoadGraph::new(),
            kdtree: None,
            centres: Vec::new(),
            students: Vec::new(),
            lookup: AllotmentLookup::new(),
            assignments: FinalAssignments::new(),
            built: false,
        }
    }

    // ── build ─────────────────────────────────────────────────────────────

    /// Fetch road data, build the graph (or fall back to the synthetic
    /// grid), index it, snap the centres and precompute their distance
    /// tables.
    pub fn build(&mut self, request: &BuildRequest) -> ServiceResult<BuildResponse> {
        let total_start = Instant::now();

        let bbox = request.bbox();
        if !bbox.is_well_formed() {
            return Err(ServiceError::BadRequest("malformed bounding box".into()));
        }
        if request.centres.is_empty() {
            return Err(ServiceError::BadRequest("no centres supplied".into()));
        }

        let mut centres: Vec<Centre> = request.centres.iter().map(|c| c.to_centre()).collect();

        let fetch_start = Instant::now();
        let doc = match self
            .fetcher
            .fetch(&bbox, request.graph_detail.highway_classes())
        {
            Ok(doc) => doc,
            Err(error) => {
                log::warn!(target: "ea.osm", "fetch failed: {error}");
                OsmDocument::empty()
            }
        };
        let fetch_overpass_ms = elapsed_ms(fetch_start);

        let graph_start = Instant::now();
        let graph = match build_from_document(&doc) {
            Ok((graph, _stats)) => graph,
            Err(error) => {
                log::warn!(
                    target: "ea.osm",
                    "no usable road data ({error}); falling back to synthetic grid"
                );
                synthetic_grid(&bbox)
            }
        };
        let build_graph_ms = elapsed_ms(graph_start);

        let kdtree_start = Instant::now();
        let kdtree = KdTree::from_graph(&graph);
        let build_kdtree_ms = elapsed_ms(kdtree_start);

        {
            let snapper = Snapper::new(&graph, kdtree.as_ref());
            for centre in &mut centres {
                if let Some(node) = snapper.snap_to_main_component(centre.position()) {
                    centre.snapped_node_id = node;
                }
                // Unsnappable centres stay INVALID; the SSSP phase reports
                // them as failed without touching the others.
            }
        }

        let sssp_start = Instant::now();
        let run = compute_centre_tables(&graph, &centres);
        let lookup = run.lookup();
        let dijkstra_precompute_ms = elapsed_ms(sssp_start);

        // Install the fully built state in one go; prior students and
        // assignments refer to the old graph and are dropped with it.
        self.graph = graph;
        self.kdtree = kdtree;
        self.centres = centres;
        self.lookup = lookup;
        self.students.clear();
        self.assignments.clear();
        self.built = true;

        Ok(BuildResponse {
            status: STATUS_SUCCESS,
            nodes_count: self.graph.node_count(),
            edges_count: self.graph.edge_count(),
            timing: BuildTiming {
                fetch_overpass_ms,
                build_graph_ms,
                build_kdtree_ms,
                dijkstra_precompute_ms,
                total_ms: elapsed_ms(total_start),
            },
        })
    }

    // ── allot ─────────────────────────────────────────────────────────────

    /// Snap the students, refresh the per-centre tables and run the tiered
    /// planner.
    pub fn allot(&mut self, request: &AllotRequest) -> ServiceResult<AllotResponse> {
        if !self.built {
            return Err(ServiceError::GraphNotBuilt);
        }
        let total_start = Instant::now();

        let snap_start = Instant::now();
        let mut students: Vec<Student> =
            request.students.iter().map(|s| s.to_student()).collect();
        {
            let snapper = Snapper::new(&self.graph, self.kdtree.as_ref());
            for student in &mut students {
                if let Some(node) = snapper.snap_to_main_component(student.position()) {
                    student.snapped_node_id = node;
                }
            }
        }
        let snap_students_ms = elapsed_ms(snap_start);

        let dijkstra_start = Instant::now();
        let run = compute_centre_tables(&self.graph, &self.centres);
        let lookup = run.lookup();
        let dijkstra_ms = elapsed_ms(dijkstra_start);

        let allot_start = Instant::now();
        // Each allotment starts from empty centres; the previous run's
        // seats are released along with its assignments.
        for centre in &mut self.centres {
            centre.current_load = 0;
        }
        let assignments = assign_tiered(&students, &mut self.centres, &lookup, &Permissive);
        let allotment_ms = elapsed_ms(allot_start);

        let debug_distances: HashMap<String, HashMap<String, f64>> = students
            .iter()
            .map(|student| {
                let times = lookup
                    .centre_times(student.snapped_node_id)
                    .cloned()
                    .unwrap_or_default();
                (student.student_id.clone(), times)
            })
            .collect();

        self.students = students;
        self.lookup = lookup;
        self.assignments = assignments.clone();

        Ok(AllotResponse {
            status: STATUS_SUCCESS,
            assignments,
            debug_distances,
            timing: AllotTiming {
                snap_students_ms,
                dijkstra_ms,
                allotment_ms,
                total_ms: elapsed_ms(total_start),
            },
        })
    }

    // ── path ──────────────────────────────────────────────────────────────

    /// Point-to-point route as a polyline.  Empty means no route.
    pub fn path(&self, query: &PathQuery) -> ServiceResult<PathResponse> {
        if !self.built {
            return Err(ServiceError::GraphNotBuilt);
        }
        let total_start = Instant::now();

        let (starts, goals) = match query {
            PathQuery::Nodes { student_node_id, centre_node_id } => {
                (vec![NodeId(*student_node_id)], vec![NodeId(*centre_node_id)])
            }
            PathQuery::Coords { student_lat, student_lon, centre_lat, centre_lon } => {
                let snapper = Snapper::new(&self.graph, self.kdtree.as_ref());
                (
                    snapper.snap_k(GeoPoint::new(*student_lat, *student_lon), SNAP_CANDIDATES),
                    snapper.snap_k(GeoPoint::new(*centre_lat, *centre_lon), SNAP_CANDIDATES),
                )
            }
        };

        let astar_start = Instant::now();
        let found = route_candidates(&AStarRouter, &self.graph, &starts, &goals);
        let astar_ms = elapsed_ms(astar_start);

        let path: Vec<[f64; 2]> = found
            .map(|p| {
                p.nodes
                    .iter()
                    .filter_map(|&node| self.graph.position(node))
                    .map(|pos| [pos.lat, pos.lon])
                    .collect()
            })
            .unwrap_or_default();

        Ok(PathResponse {
            status: STATUS_SUCCESS,
            path,
            timing: PathTiming { astar_ms, total_ms: elapsed_ms(total_start) },
        })
    }

    // ── parallel-sssp ─────────────────────────────────────────────────────

    /// Re-run the per-centre SSSP phase and report per-task outcomes.
    pub fn parallel_sssp(
        &self,
        request: &ParallelSsspRequest,
    ) -> ServiceResult<ParallelSsspResponse> {
        if !self.built {
            return Err(ServiceError::GraphNotBuilt);
        }
        let total_start = Instant::now();

        if let Some(name) = &request.workflow_name {
            log::info!(
                target: "ea.sssp",
                "running workflow {name} ({})",
                request.workflow_type.as_deref().unwrap_or("default")
            );
        }

        let run = compute_centre_tables(&self.graph, &self.centres);

        if request.save_to_files {
            let dir = request.output_dir.as_deref().unwrap_or("sssp_output");
            export::write_distance_tables(Path::new(dir), &run.results)?;
        }

        let results = run
            .results
            .iter()
            .map(|r| CentreSsspSummary {
                centre_id: r.centre_id.clone(),
                start_node: r.start_node.0,
                success: r.is_success(),
                computation_time_ms: r.wall_time_ms,
                reachable_nodes: r.reachable_nodes(),
            })
            .collect();

        Ok(ParallelSsspResponse {
            status: STATUS_SUCCESS,
            results,
            speedup: run.speedup(),
            timing: SsspTiming {
                parallel_execution_ms: run.parallel_ms,
                total_ms: elapsed_ms(total_start),
            },
        })
    }

    // ── diagnostics ───────────────────────────────────────────────────────

    /// Snapshot report over the current session state.
    pub fn diagnostics(&self) -> DiagnosticsReport {
        diagnostics::report(
            &self.graph,
            &self.lookup,
            &self.centres,
            &self.students,
            &self.assignments,
        )
    }

    // ── Test and host introspection ───────────────────────────────────────

    pub fn is_built(&self) -> bool {
        self.built
    }

    pub fn graph(&self) -> &RoadGraph {
        &self.graph
    }

    pub fn centres(&self) -> &[Centre] {
        &self.centres
    }
}
