//! Post-allotment diagnostic report.
//!
//! Read-only over the session state.  The per-student rows surface the
//! usual failure smells: snaps far from the raw coordinate, students no
//! centre can reach, and near-ties where a small data change would flip
//! the assigned centre.

use std::collections::HashMap;

use serde::Serialize;

use ea_core::geo::{near_tie_window_secs, LARGE_SNAP_METRES};
use ea_core::{AllotmentLookup, Centre, Student};
use ea_planner::FinalAssignments;
use ea_spatial::RoadGraph;

use crate::api::STATUS_SUCCESS;

#[derive(Clone, Debug, Serialize)]
pub struct DiagnosticsReport {
    pub status: &'static str,
    pub metadata: Metadata,
    pub centre_summary: Vec<CentreSummary>,
    pub students: Vec<StudentDiagnostics>,
    pub summary: Summary,
}

#[derive(Clone, Debug, Serialize)]
pub struct Metadata {
    pub nodes_count: usize,
    pub edges_count: usize,
    pub centres_count: usize,
    pub students_count: usize,
    pub main_component_size: usize,
}

#[derive(Clone, Debug, Serialize)]
pub struct CentreSummary {
    pub centre_id: String,
    pub assigned_count: usize,
    pub max_capacity: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct StudentDiagnostics {
    pub student_id: String,
    pub snap_node_id: i64,
    pub snap_distance_m: f64,
    pub assigned_centre: Option<String>,
    /// Travel seconds to every centre that reaches this student's node.
    pub alt_distances_m: HashMap<String, f64>,
    pub component_id: i32,
    pub reachable_count: usize,
    /// Second-best centre within the 20 m window of the best.
    pub near_tie: bool,
}

#[derive(Clone, Debug, Serialize)]
pub struct Summary {
    pub unreachable_count: usize,
    /// Students snapped farther than 100 m from their raw coordinate.
    pub large_snap_count: usize,
    pub avg_snap_distance_m: f64,
}

pub(crate) fn report(
    graph: &RoadGraph,
    lookup: &AllotmentLookup,
    centres: &[Centre],
    students: &[Student],
    assignments: &FinalAssignments,
) -> DiagnosticsReport {
    let mut assigned_counts: HashMap<&str, usize> = HashMap::new();
    for centre_id in assignments.values() {
        *assigned_counts.entry(centre_id.as_str()).or_default() += 1;
    }

    let centre_summary = centres
        .iter()
        .map(|c| CentreSummary {
            centre_id: c.centre_id.clone(),
            assigned_count: assigned_counts.get(c.centre_id.as_str()).copied().unwrap_or(0),
            max_capacity: c.max_capacity,
        })
        .collect();

    let mut rows = Vec::with_capacity(students.len());
    let mut unreachable_count = 0usize;
    let mut large_snap_count = 0usize;
    let mut snap_distance_total = 0.0f64;

    for student in students {
        let snap_distance_m = graph
            .position(student.snapped_node_id)
            .map(|pos| student.position().distance_m(pos))
            .unwrap_or(f64::INFINITY);

        let alt_distances: HashMap<String, f64> = lookup
            .centre_times(student.snapped_node_id)
            .cloned()
            .unwrap_or_default();

        if alt_distances.is_empty() {
            unreachable_count += 1;
        }
        if snap_distance_m > LARGE_SNAP_METRES {
            large_snap_count += 1;
        }
        snap_distance_total += if snap_distance_m.is_finite() { snap_distance_m } else { 0.0 };

        rows.push(StudentDiagnostics {
            student_id: student.student_id.clone(),
            snap_node_id: student.snapped_node_id.0,
            snap_distance_m,
            assigned_centre: assignments.get(&student.student_id).cloned(),
            near_tie: is_near_tie(&alt_distances),
            reachable_count: alt_distances.len(),
            component_id: graph.component(student.snapped_node_id).0,
            alt_distances_m: alt_distances,
        });
    }

    let avg_snap_distance_m = if students.is_empty() {
        0.0
    } else {
        snap_distance_total / students.len() as f64
    };

    DiagnosticsReport {
        status: STATUS_SUCCESS,
        metadata: Metadata {
            nodes_count: graph.node_count(),
            edges_count: graph.edge_count(),
            centres_count: centres.len(),
            students_count: students.len(),
            main_component_size: graph.main_component_size(),
        },
        centre_summary,
        students: rows,
        summary: Summary {
            unreachable_count,
            large_snap_count,
            avg_snap_distance_m,
        },
    }
}

/// `true` when the two best centre times sit within the near-tie window.
fn is_near_tie(alt_distances: &HashMap<String, f64>) -> bool {
    if alt_distances.len() < 2 {
        return false;
    }
    let mut times: Vec<f64> = alt_distances.values().copied().collect();
    times.sort_unstable_by(f64::total_cmp);
    times[1] - times[0] <= near_tie_window_secs()
}
