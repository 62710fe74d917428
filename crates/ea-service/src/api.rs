//! Request and response bodies for the call surface.
//!
//! These are plain serde types; the transport that frames them is out of
//! scope.  Success responses carry `status: "success"`, failures are
//! rendered through [`ErrorBody`].  Missing optional fields take their
//! documented defaults silently.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use ea_core::{BoundingBox, Category, Centre, Student};

use crate::error::ServiceError;

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_ERROR: &str = "error";

// ── build ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Deserialize)]
pub struct BuildRequest {
    pub min_lat: f64,
    pub min_lon: f64,
    pub max_lat: f64,
    pub max_lon: f64,
    #[serde(default)]
    pub graph_detail: GraphDetail,
    pub centres: Vec<CentreSpec>,
}

impl BuildRequest {
    pub fn bbox(&self) -> BoundingBox {
        BoundingBox::new(self.min_lat, self.min_lon, self.max_lat, self.max_lon)
    }
}

/// Road-class selection passed through to the fetcher.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphDetail {
    Low,
    #[default]
    Medium,
    High,
}

impl GraphDetail {
    /// Highway classes each detail level asks the fetcher for.
    pub fn highway_classes(self) -> &'static [&'static str] {
        match self {
            GraphDetail::Low => &["primary", "secondary", "tertiary"],
            GraphDetail::Medium => &[
                "primary",
                "secondary",
                "tertiary",
                "residential",
                "living_street",
                "service",
                "unclassified",
            ],
            GraphDetail::High => &[
                "primary",
                "secondary",
                "tertiary",
                "residential",
                "living_street",
                "service",
                "unclassified",
                "motorway",
                "trunk",
            ],
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct CentreSpec {
    pub centre_id: String,
    pub lat: f64,
    pub lon: f64,
    pub max_capacity: u32,
    pub has_wheelchair_access: bool,
    pub is_female_only: bool,
}

impl CentreSpec {
    pub fn to_centre(&self) -> Centre {
        Centre::new(
            self.centre_id.clone(),
            self.lat,
            self.lon,
            self.max_capacity,
            self.has_wheelchair_access,
            self.is_female_only,
        )
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct BuildResponse {
    pub status: &'static str,
    pub nodes_count: usize,
    pub edges_count: usize,
    pub timing: BuildTiming,
}

#[derive(Copy, Clone, Debug, Default, Serialize)]
pub struct BuildTiming {
    pub fetch_overpass_ms: u64,
    pub build_graph_ms: u64,
    pub build_kdtree_ms: u64,
    pub dijkstra_precompute_ms: u64,
    pub total_ms: u64,
}

// ── allot ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Deserialize)]
pub struct AllotRequest {
    pub students: Vec<StudentSpec>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StudentSpec {
    pub student_id: String,
    pub lat: f64,
    pub lon: f64,
    pub category: Category,
}

impl StudentSpec {
    pub fn to_student(&self) -> Student {
        Student::new(self.student_id.clone(), self.lat, self.lon, self.category)
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct AllotResponse {
    pub status: &'static str,
    /// `student_id → centre_id`; unreachable students are absent.
    pub assignments: HashMap<String, String>,
    /// Per-student travel-time snapshot: `student_id → centre_id → seconds`.
    pub debug_distances: HashMap<String, HashMap<String, f64>>,
    pub timing: AllotTiming,
}

#[derive(Copy, Clone, Debug, Default, Serialize)]
pub struct AllotTiming {
    pub snap_students_ms: u64,
    pub dijkstra_ms: u64,
    pub allotment_ms: u64,
    pub total_ms: u64,
}

// ── path ──────────────────────────────────────────────────────────────────────

/// Either direct node ids or raw coordinates (which get K-nearest snapped).
#[derive(Clone, Debug, Deserialize)]
#[serde(untagged)]
pub enum PathQuery {
    Nodes {
        student_node_id: i64,
        centre_node_id: i64,
    },
    Coords {
        student_lat: f64,
        student_lon: f64,
        centre_lat: f64,
        centre_lon: f64,
    },
}

#[derive(Clone, Debug, Serialize)]
pub struct PathResponse {
    pub status: &'static str,
    /// `[lat, lon]` per node along the route; empty means no route.
    pub path: Vec<[f64; 2]>,
    pub timing: PathTiming,
}

#[derive(Copy, Clone, Debug, Default, Serialize)]
pub struct PathTiming {
    pub astar_ms: u64,
    pub total_ms: u64,
}

// ── parallel-sssp ─────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ParallelSsspRequest {
    #[serde(default)]
    pub workflow_name: Option<String>,
    #[serde(default)]
    pub workflow_type: Option<String>,
    #[serde(default)]
    pub save_to_files: bool,
    #[serde(default)]
    pub output_dir: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ParallelSsspResponse {
    pub status: &'static str,
    pub results: Vec<CentreSsspSummary>,
    /// `Σ per-task time / parallel wall time`.
    pub speedup: f64,
    pub timing: SsspTiming,
}

#[derive(Clone, Debug, Serialize)]
pub struct CentreSsspSummary {
    pub centre_id: String,
    pub start_node: i64,
    pub success: bool,
    pub computation_time_ms: u64,
    pub reachable_nodes: usize,
}

#[derive(Copy, Clone, Debug, Default, Serialize)]
pub struct SsspTiming {
    pub parallel_execution_ms: u64,
    pub total_ms: u64,
}

// ── errors ────────────────────────────────────────────────────────────────────

/// The wire shape of every failure.
#[derive(Clone, Debug, Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
}

impl From<&ServiceError> for ErrorBody {
    fn from(error: &ServiceError) -> Self {
        Self {
            status: STATUS_ERROR,
            message: error.to_string(),
        }
    }
}
