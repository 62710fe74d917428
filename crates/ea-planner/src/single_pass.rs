//! Deprecated per-student greedy, kept as an alternative policy.
//!
//! Students are visited one at a time in tier order; each takes the
//! cheapest open centre, except that near-ties (within the 20 m window)
//! resolve toward the centre with more remaining headroom.  A 2-opt swap
//! pass then trades assigned pairs between centres whenever the trade
//! strictly lowers total travel cost, so post-processing never makes the
//! solution worse.
//!
//! The tiered greedy in [`tiered`](crate::tiered) supersedes this policy.

use std::collections::{HashMap, HashSet};

use ea_core::geo::near_tie_window_secs;
use ea_core::{AllotmentLookup, Centre, Student};

use crate::rules::CompatibilityRule;
use crate::tiered::FinalAssignments;

/// Students per centre examined by the swap pass, per centre pair.
const SWAP_SCAN_LIMIT: usize = 40;

/// One-pass greedy: each student takes the cheapest open compatible centre,
/// near-ties resolved toward capacity headroom.
pub fn assign_single_pass<R: CompatibilityRule>(
    students: &[Student],
    centres: &mut [Centre],
    lookup: &AllotmentLookup,
    rule: &R,
) -> FinalAssignments {
    let mut assignments = FinalAssignments::new();

    // Tier order first, input order within a tier.
    let mut order: Vec<usize> = (0..students.len()).collect();
    order.sort_by_key(|&i| (students[i].category.tier_rank(), i));

    for student_idx in order {
        let student = &students[student_idx];
        let times = match lookup.centre_times(student.snapped_node_id) {
            Some(times) => times,
            None => continue,
        };

        let mut feasible: Vec<(f64, usize)> = centres
            .iter()
            .enumerate()
            .filter(|(_, centre)| !centre.is_full() && rule.is_valid(student, centre))
            .filter_map(|(idx, centre)| {
                times.get(&centre.centre_id).map(|&seconds| (seconds, idx))
            })
            .collect();
        if feasible.is_empty() {
            continue;
        }

        feasible.sort_unstable_by(|a, b| {
            a.0.total_cmp(&b.0)
                .then_with(|| centres[a.1].centre_id.cmp(&centres[b.1].centre_id))
        });

        // Within the near-tie window of the cheapest, prefer headroom.
        // On the synthetic grid (metre weights) the window is narrower than
        // intended, which only makes the tie-break rarer, never wrong.
        let best_seconds = feasible[0].0;
        let window = near_tie_window_secs();
        let (_, winner_idx) = feasible
            .iter()
            .take_while(|(seconds, _)| *seconds <= best_seconds + window)
            .max_by_key(|&&(_, idx)| {
                (centres[idx].headroom(), std::cmp::Reverse(centres[idx].centre_id.clone()))
            })
            .copied()
            .unwrap_or(feasible[0]);

        centres[winner_idx].current_load += 1;
        assignments.insert(
            student.student_id.clone(),
            centres[winner_idx].centre_id.clone(),
        );
    }

    assignments
}

/// 2-opt improvement: for every centre pair, examine up to
/// `SWAP_SCAN_LIMIT`×`SWAP_SCAN_LIMIT` assigned student pairs and swap the
/// two whenever the crossed costs beat the current ones.  Returns the number
/// of swaps applied; total assigned cost never increases.
pub fn improve_by_swaps(
    students: &[Student],
    centres: &[Centre],
    lookup: &AllotmentLookup,
    assignments: &mut FinalAssignments,
) -> usize {
    let node_of: HashMap<&str, ea_core::NodeId> = students
        .iter()
        .map(|s| (s.student_id.as_str(), s.snapped_node_id))
        .collect();

    let cost = |student: &str, centre: &Centre| {
        node_of
            .get(student)
            .and_then(|&node| lookup.seconds(node, &centre.centre_id))
    };

    let mut swaps = 0usize;
    // A student who already changed centre this pass is out of the running:
    // the membership lists above them are stale.
    let mut moved: HashSet<String> = HashSet::new();

    for (i, centre_a) in centres.iter().enumerate() {
        for centre_b in centres.iter().skip(i + 1) {
            let at_a = assigned_to(students, assignments, centre_a);
            let at_b = assigned_to(students, assignments, centre_b);

            for s1 in &at_a {
                for s2 in &at_b {
                    if moved.contains(s1) || moved.contains(s2) {
                        continue;
                    }
                    let current = match (cost(s1, centre_a), cost(s2, centre_b)) {
                        (Some(x), Some(y)) => x + y,
                        _ => continue,
                    };
                    let crossed = match (cost(s1, centre_b), cost(s2, centre_a)) {
                        (Some(x), Some(y)) => x + y,
                        _ => continue,
                    };
                    if current > crossed {
                        assignments.insert(s1.clone(), centre_b.centre_id.clone());
                        assignments.insert(s2.clone(), centre_a.centre_id.clone());
                        moved.insert(s1.clone());
                        moved.insert(s2.clone());
                        swaps += 1;
                    }
                }
            }
        }
    }

    if swaps > 0 {
        log::info!(target: "ea.allot", "swap pass applied {swaps} improvements");
    }
    swaps
}

/// Student ids currently assigned to `centre`, input order, capped at
/// [`SWAP_SCAN_LIMIT`].
fn assigned_to(
    students: &[Student],
    assignments: &FinalAssignments,
    centre: &Centre,
) -> Vec<String> {
    students
        .iter()
        .filter(|s| {
            assignments.get(&s.student_id).map(String::as_str) == Some(centre.centre_id.as_str())
        })
        .take(SWAP_SCAN_LIMIT)
        .map(|s| s.student_id.clone())
        .collect()
}
