//! End-to-end tests for the request surface.
//!
//! Every scenario runs against a canned document through [`StaticFetcher`]
//! — no network, no files outside a temp dir.

#[cfg(test)]
mod helpers {
    use ea_spatial::OsmDocument;

    use crate::api::{AllotRequest, BuildRequest, CentreSpec, GraphDetail, StudentSpec};
    use crate::fetch::StaticFetcher;
    use crate::session::Session;

    /// Nodes `1 (0,0)`, `2 (0,0.001)`, `3 (0.001,0)` with 50 km/h roads
    /// `1↔2` and `1↔3` — the tiny exact-distance fixture.
    pub const FORK: &str = r#"{
        "elements": [
            {"type": "node", "id": 1, "lat": 0.0, "lon": 0.0},
            {"type": "node", "id": 2, "lat": 0.0, "lon": 0.001},
            {"type": "node", "id": 3, "lat": 0.001, "lon": 0.0},
            {"type": "way", "nodes": [1, 2],
             "tags": {"highway": "residential", "maxspeed": "50"}},
            {"type": "way", "nodes": [1, 3],
             "tags": {"highway": "residential", "maxspeed": "50"}}
        ]
    }"#;

    /// A six-node main line along the equator plus a far two-node island.
    pub const ISLAND: &str = r#"{
        "elements": [
            {"type": "node", "id": 1, "lat": 0.0, "lon": 0.0},
            {"type": "node", "id": 2, "lat": 0.0, "lon": 0.001},
            {"type": "node", "id": 3, "lat": 0.0, "lon": 0.002},
            {"type": "node", "id": 4, "lat": 0.0, "lon": 0.003},
            {"type": "node", "id": 5, "lat": 0.0, "lon": 0.004},
            {"type": "node", "id": 6, "lat": 0.0, "lon": 0.005},
            {"type": "node", "id": 10, "lat": 0.05, "lon": 0.05},
            {"type": "node", "id": 11, "lat": 0.05, "lon": 0.051},
            {"type": "way", "nodes": [1, 2, 3, 4, 5, 6],
             "tags": {"highway": "residential", "maxspeed": "50"}},
            {"type": "way", "nodes": [10, 11],
             "tags": {"highway": "residential", "maxspeed": "50"}}
        ]
    }"#;

    pub fn session_for(doc_json: &str) -> Session<StaticFetcher> {
        let doc = OsmDocument::from_json_str(doc_json).expect("fixture must parse");
        Session::new(StaticFetcher::new(doc))
    }

    pub fn centre(id: &str, lat: f64, lon: f64, capacity: u32) -> CentreSpec {
        CentreSpec {
            centre_id: id.to_owned(),
            lat,
            lon,
            max_capacity: capacity,
            has_wheelchair_access: false,
            is_female_only: false,
        }
    }

    pub fn build_request(centres: Vec<CentreSpec>) -> BuildRequest {
        BuildRequest {
            min_lat: -0.01,
            min_lon: -0.01,
            max_lat: 0.06,
            max_lon: 0.06,
            graph_detail: GraphDetail::Medium,
            centres,
        }
    }

    pub fn student(id: &str, lat: f64, lon: f64, category: &str) -> StudentSpec {
        StudentSpec {
            student_id: id.to_owned(),
            lat,
            lon,
            category: category.parse().expect("test category"),
        }
    }

    pub fn allot_request(students: Vec<StudentSpec>) -> AllotRequest {
        AllotRequest { students }
    }
}

// ── build ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod build {
    use super::helpers::{build_request, centre, session_for, FORK};
    use crate::error::ServiceError;
    use crate::fetch::StaticFetcher;
    use crate::session::Session;

    #[test]
    fn builds_graph_and_snaps_centres() {
        let mut session = session_for(FORK);
        let response = session
            .build(&build_request(vec![
                centre("X", 0.0, 0.001, 1),
                centre("Y", 0.001, 0.0, 1),
            ]))
            .unwrap();

        assert_eq!(response.status, "success");
        assert_eq!(response.nodes_count, 3);
        assert_eq!(response.edges_count, 4);
        assert!(session.is_built());
        assert!(session.centres().iter().all(|c| c.snapped_node_id.is_valid()));
    }

    #[test]
    fn upstream_failure_falls_back_to_grid() {
        let mut session = Session::new(StaticFetcher::unavailable());
        let response = session
            .build(&build_request(vec![centre("C", 0.01, 0.01, 5)]))
            .unwrap();

        // The 80×80 synthetic grid.
        assert_eq!(response.nodes_count, 6_400);
        assert!(response.edges_count > 0);
        assert!(session.is_built());
    }

    #[test]
    fn fetch_error_also_falls_back_to_grid() {
        use ea_core::BoundingBox;
        use ea_spatial::OsmDocument;

        use crate::fetch::{FetchError, NetworkFetcher};

        struct TimingOut;
        impl NetworkFetcher for TimingOut {
            fn fetch(
                &self,
                _bbox: &BoundingBox,
                _classes: &[&str],
            ) -> Result<OsmDocument, FetchError> {
                Err(FetchError::Timeout)
            }
        }

        let mut session = Session::new(TimingOut);
        let response = session
            .build(&build_request(vec![centre("C", 0.01, 0.01, 5)]))
            .unwrap();
        assert_eq!(response.nodes_count, 6_400);
    }

    #[test]
    fn malformed_bbox_is_rejected() {
        let mut session = session_for(FORK);
        let mut request = build_request(vec![centre("C", 0.0, 0.0, 1)]);
        request.min_lat = 1.0;
        request.max_lat = 0.0;

        let result = session.build(&request);
        assert!(matches!(result, Err(ServiceError::BadRequest(_))));
        assert!(!session.is_built());
    }

    #[test]
    fn empty_centre_list_is_rejected() {
        let mut session = session_for(FORK);
        let result = session.build(&build_request(vec![]));
        assert!(matches!(result, Err(ServiceError::BadRequest(_))));
    }
}

// ── allot ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod allot {
    use super::helpers::*;
    use crate::error::ServiceError;

    #[test]
    fn allot_before_build_is_rejected() {
        let mut session = session_for(FORK);
        let result = session.allot(&allot_request(vec![student("s1", 0.0, 0.0, "general")]));
        assert!(matches!(result, Err(ServiceError::GraphNotBuilt)));
    }

    #[test]
    fn students_get_their_nearest_centres() {
        let mut session = session_for(FORK);
        session
            .build(&build_request(vec![
                centre("X", 0.0, 0.001, 1),
                centre("Y", 0.001, 0.0, 1),
            ]))
            .unwrap();

        // s1 sits nearly on node 2 (centre X), s2 nearly on node 3 (centre Y).
        let response = session
            .allot(&allot_request(vec![
                student("s1", 0.0, 0.0007, "general"),
                student("s2", 0.0007, 0.0, "general"),
            ]))
            .unwrap();

        assert_eq!(response.assignments["s1"], "X");
        assert_eq!(response.assignments["s2"], "Y");

        // s1 snapped onto X's own node; the alternative runs through the
        // fork at ~8 s per 111 m leg.
        let s1 = &response.debug_distances["s1"];
        assert_eq!(s1["X"], 0.0);
        assert!((s1["Y"] - 16.0).abs() < 0.1, "got {}", s1["Y"]);
    }

    #[test]
    fn capacity_cascade_drops_the_farthest() {
        let mut session = session_for(ISLAND);
        session
            .build(&build_request(vec![centre("C", 0.0, 0.0, 2)]))
            .unwrap();

        // Four students along the line at increasing travel time.
        let response = session
            .allot(&allot_request(vec![
                student("s1", 0.0, 0.001, "general"),
                student("s2", 0.0, 0.002, "general"),
                student("s3", 0.0, 0.003, "general"),
                student("s4", 0.0, 0.004, "general"),
            ]))
            .unwrap();

        assert_eq!(response.assignments.len(), 2);
        assert_eq!(response.assignments["s1"], "C");
        assert_eq!(response.assignments["s2"], "C");
        assert!(!response.assignments.contains_key("s3"));
        assert!(!response.assignments.contains_key("s4"));
    }

    #[test]
    fn tier_a_takes_the_last_seat() {
        let mut session = session_for(FORK);
        session
            .build(&build_request(vec![centre("C", 0.0, 0.0, 1)]))
            .unwrap();

        let response = session
            .allot(&allot_request(vec![
                student("f", 0.0, 0.0, "female"),
                student("g", 0.0, 0.0, "general"),
            ]))
            .unwrap();

        assert_eq!(response.assignments.len(), 1);
        assert_eq!(response.assignments["g"], "C");
    }

    #[test]
    fn island_student_is_relocated_and_assigned() {
        let mut session = session_for(ISLAND);
        session
            .build(&build_request(vec![centre("C", 0.0, 0.0, 5)]))
            .unwrap();

        // Right on the island; the snap fallback moves them onto the line.
        let response = session
            .allot(&allot_request(vec![student("s1", 0.05, 0.05, "general")]))
            .unwrap();
        assert_eq!(response.assignments["s1"], "C");

        let report = session.diagnostics();
        assert_eq!(report.summary.unreachable_count, 0);
        let row = &report.students[0];
        assert!(session.graph().is_in_main_component(ea_core::NodeId(row.snap_node_id)));
    }

    #[test]
    fn reallot_releases_previous_seats() {
        let mut session = session_for(FORK);
        session
            .build(&build_request(vec![centre("C", 0.0, 0.0, 1)]))
            .unwrap();

        let first = session
            .allot(&allot_request(vec![student("a", 0.0, 0.0, "general")]))
            .unwrap();
        assert_eq!(first.assignments["a"], "C");

        // A different cohort gets the seat back.
        let second = session
            .allot(&allot_request(vec![student("b", 0.0, 0.0, "general")]))
            .unwrap();
        assert_eq!(second.assignments["b"], "C");
        assert_eq!(session.centres()[0].current_load, 1);
    }
}

// ── path ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod path {
    use super::helpers::*;
    use crate::api::PathQuery;

    #[test]
    fn node_id_form_returns_a_polyline() {
        let mut session = session_for(FORK);
        session
            .build(&build_request(vec![centre("X", 0.0, 0.001, 1)]))
            .unwrap();

        let response = session
            .path(&PathQuery::Nodes { student_node_id: 2, centre_node_id: 3 })
            .unwrap();
        // 2 → 1 → 3 through the fork.
        assert_eq!(response.path.len(), 3);
        assert_eq!(response.path[0], [0.0, 0.001]);
        assert_eq!(response.path[2], [0.001, 0.0]);
    }

    #[test]
    fn coordinate_form_rescues_island_snaps() {
        let mut session = session_for(ISLAND);
        session
            .build(&build_request(vec![centre("C", 0.0, 0.0, 1)]))
            .unwrap();

        // The student coordinate snaps onto the island first; the K×K retry
        // walks down the candidate list until a main-line pair connects.
        let response = session
            .path(&PathQuery::Coords {
                student_lat: 0.05,
                student_lon: 0.05,
                centre_lat: 0.0,
                centre_lon: 0.0,
            })
            .unwrap();
        assert!(response.path.len() >= 2, "expected a real route");
        // Every returned coordinate lies on the main line (lat 0).
        assert!(response.path.iter().all(|p| p[0] == 0.0));
    }

    #[test]
    fn disconnected_nodes_yield_an_empty_path() {
        let mut session = session_for(ISLAND);
        session
            .build(&build_request(vec![centre("C", 0.0, 0.0, 1)]))
            .unwrap();

        let response = session
            .path(&PathQuery::Nodes { student_node_id: 10, centre_node_id: 1 })
            .unwrap();
        assert!(response.path.is_empty());
        assert_eq!(response.status, "success");
    }
}

// ── parallel-sssp & export ────────────────────────────────────────────────────

#[cfg(test)]
mod sssp {
    use super::helpers::*;
    use crate::api::ParallelSsspRequest;

    #[test]
    fn reports_per_centre_outcomes() {
        let mut session = session_for(FORK);
        session
            .build(&build_request(vec![
                centre("X", 0.0, 0.001, 1),
                centre("Y", 0.001, 0.0, 1),
            ]))
            .unwrap();

        let response = session.parallel_sssp(&ParallelSsspRequest::default()).unwrap();
        assert_eq!(response.results.len(), 2);
        for result in &response.results {
            assert!(result.success);
            assert_eq!(result.reachable_nodes, 3);
        }
        assert!(response.speedup.is_finite());
    }

    #[test]
    fn save_to_files_writes_one_csv_per_centre() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let mut session = session_for(FORK);
        session
            .build(&build_request(vec![
                centre("X", 0.0, 0.001, 1),
                centre("Y", 0.001, 0.0, 1),
            ]))
            .unwrap();

        let request = ParallelSsspRequest {
            save_to_files: true,
            output_dir: Some(dir.path().to_string_lossy().into_owned()),
            ..Default::default()
        };
        session.parallel_sssp(&request).unwrap();

        for centre_id in ["X", "Y"] {
            let path = dir.path().join(format!("distances_{centre_id}.csv"));
            assert!(path.exists(), "missing {centre_id} export");

            let mut reader = csv::Reader::from_path(&path).unwrap();
            assert_eq!(
                reader.headers().unwrap(),
                &csv::StringRecord::from(vec!["node_id", "seconds"])
            );
            assert_eq!(reader.records().count(), 3);
        }
    }
}

// ── diagnostics ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod diagnostics {
    use super::helpers::*;

    #[test]
    fn summarises_loads_and_snaps() {
        let mut session = session_for(ISLAND);
        session
            .build(&build_request(vec![centre("C", 0.0, 0.0, 2)]))
            .unwrap();
        session
            .allot(&allot_request(vec![
                student("s1", 0.0, 0.001, "general"),
                student("s2", 0.0, 0.002, "general"),
                student("s3", 0.0, 0.003, "general"),
            ]))
            .unwrap();

        let report = session.diagnostics();
        assert_eq!(report.metadata.centres_count, 1);
        assert_eq!(report.metadata.students_count, 3);
        assert_eq!(report.metadata.main_component_size, 6);

        let c = &report.centre_summary[0];
        assert_eq!(c.assigned_count, 2);
        assert_eq!(c.max_capacity, 2);

        // Students sit exactly on graph nodes.
        assert_eq!(report.summary.large_snap_count, 0);
        assert!(report.summary.avg_snap_distance_m < 1.0);
        assert_eq!(report.summary.unreachable_count, 0);

        let s3 = report.students.iter().find(|s| s.student_id == "s3").unwrap();
        assert!(s3.assigned_centre.is_none());
        assert!(s3.reachable_count > 0);
    }

    #[test]
    fn flags_near_ties() {
        let mut session = session_for(FORK);
        // Two centres snapped onto the same node: equal travel times
        // everywhere, so every student is a near-tie.
        session
            .build(&build_request(vec![
                centre("C1", 0.0, 0.0, 1),
                centre("C2", 0.0, 0.0, 1),
            ]))
            .unwrap();
        session
            .allot(&allot_request(vec![student("s1", 0.0, 0.001, "general")]))
            .unwrap();

        let report = session.diagnostics();
        assert!(report.students[0].near_tie);
    }
}

// ── wire formats ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod wire {
    use crate::api::{BuildRequest, ErrorBody, GraphDetail, ParallelSsspRequest, PathQuery};
    use crate::error::ServiceError;

    #[test]
    fn graph_detail_defaults_to_medium() {
        let request: BuildRequest = serde_json::from_str(
            r#"{"min_lat": 0.0, "min_lon": 0.0, "max_lat": 1.0, "max_lon": 1.0,
                "centres": []}"#,
        )
        .unwrap();
        assert_eq!(request.graph_detail, GraphDetail::Medium);
    }

    #[test]
    fn detail_levels_select_highway_classes() {
        assert_eq!(GraphDetail::Low.highway_classes().len(), 3);
        assert!(!GraphDetail::Medium.highway_classes().contains(&"motorway"));
        assert!(GraphDetail::High.highway_classes().contains(&"motorway"));

        let request: BuildRequest = serde_json::from_str(
            r#"{"min_lat": 0.0, "min_lon": 0.0, "max_lat": 1.0, "max_lon": 1.0,
                "graph_detail": "high", "centres": []}"#,
        )
        .unwrap();
        assert_eq!(request.graph_detail, GraphDetail::High);
    }

    #[test]
    fn path_query_accepts_both_forms() {
        let nodes: PathQuery =
            serde_json::from_str(r#"{"student_node_id": 4, "centre_node_id": 9}"#).unwrap();
        assert!(matches!(nodes, PathQuery::Nodes { student_node_id: 4, centre_node_id: 9 }));

        let coords: PathQuery = serde_json::from_str(
            r#"{"student_lat": 1.0, "student_lon": 2.0, "centre_lat": 3.0, "centre_lon": 4.0}"#,
        )
        .unwrap();
        assert!(matches!(coords, PathQuery::Coords { .. }));
    }

    #[test]
    fn sssp_request_fields_all_default() {
        let request: ParallelSsspRequest = serde_json::from_str("{}").unwrap();
        assert!(!request.save_to_files);
        assert!(request.workflow_name.is_none());
        assert!(request.output_dir.is_none());
    }

    #[test]
    fn errors_render_as_error_bodies() {
        let body = ErrorBody::from(&ServiceError::GraphNotBuilt);
        assert_eq!(body.status, "error");
        assert!(body.message.contains("not been built"));

        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains(r#""status":"error""#));
    }
}
