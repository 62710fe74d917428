//! The active assignment policy: tiered distance-first greedy.
//!
//! Students are partitioned into priority tiers by category (A general,
//! B PwD, C female).  Each tier in turn builds a min-heap over every
//! feasible `(travel seconds, student, centre)` candidate and drains it:
//! the cheapest surviving candidate wins its seat, so within a tier every
//! student receives their nearest still-open centre at the moment their
//! best option is popped.  Earlier tiers consume capacity before later
//! tiers see the heap — that asymmetry is the business rule, not an
//! accident.
//!
//! Ties on travel time break lexicographically on `(student_id, centre_id)`
//! to keep runs deterministic.

use std::cmp::{Ordering, Reverse};
use std::collections::{BinaryHeap, HashMap, HashSet};

use ea_core::{AllotmentLookup, Category, Centre, Student};

use crate::rules::CompatibilityRule;

/// `student_id → centre_id`; at most one entry per student.  Students
/// unreachable from every centre are simply absent.
pub type FinalAssignments = HashMap<String, String>;

#[derive(Clone, Debug, PartialEq)]
struct Candidate {
    seconds: f64,
    student_idx: usize,
    centre_idx: usize,
    student_id: String,
    centre_id: String,
}

impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.seconds
            .total_cmp(&other.seconds)
            .then_with(|| self.student_id.cmp(&other.student_id))
            .then_with(|| self.centre_id.cmp(&other.centre_id))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Run the tiered greedy.  Increments `current_load` on the winning centres;
/// loads carried in are respected, so capacity never overshoots even when
/// centres arrive partially loaded.
pub fn assign_tiered<R: CompatibilityRule>(
    students: &[Student],
    centres: &mut [Centre],
    lookup: &AllotmentLookup,
    rule: &R,
) -> FinalAssignments {
    let mut assignments = FinalAssignments::new();
    let mut assigned: HashSet<usize> = HashSet::new();

    for tier in Category::TIER_ORDER {
        let mut heap: BinaryHeap<Reverse<Candidate>> = BinaryHeap::new();

        for (student_idx, student) in students.iter().enumerate() {
            if student.category != tier {
                continue;
            }
            // Unreachable snap → no candidates → absent from the result.
            let times = match lookup.centre_times(student.snapped_node_id) {
                Some(times) => times,
                None => continue,
            };
            for (centre_idx, centre) in centres.iter().enumerate() {
                if !rule.is_valid(student, centre) {
                    continue;
                }
                if let Some(&seconds) = times.get(&centre.centre_id) {
                    heap.push(Reverse(Candidate {
                        seconds,
                        student_idx,
                        centre_idx,
                        student_id: student.student_id.clone(),
                        centre_id: centre.centre_id.clone(),
                    }));
                }
            }
        }

        while let Some(Reverse(candidate)) = heap.pop() {
            if assigned.contains(&candidate.student_idx) {
                continue;
            }
            if centres[candidate.centre_idx].is_full() {
                continue;
            }
            centres[candidate.centre_idx].current_load += 1;
            assigned.insert(candidate.student_idx);
            assignments.insert(candidate.student_id, candidate.centre_id);
        }
    }

    log::info!(
        target: "ea.allot",
        "assigned {} of {} students",
        assignments.len(),
        students.len()
    );
    assignments
}
