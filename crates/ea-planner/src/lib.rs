//! `ea-planner` — capacity-constrained assignment of students to centres.
//!
//! # Crate layout
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`rules`]       | `CompatibilityRule` seam, `Permissive`, `FacilityRule`|
//! | [`tiered`]      | The active tiered distance-first greedy               |
//! | [`single_pass`] | Deprecated per-student greedy + 2-opt swap pass       |
//!
//! The planner is pure: it reads the travel-time lookup and mutates only the
//! centre loads it is handed.  Both policies preserve the same invariants —
//! no centre over capacity, no student assigned twice — and differ only in
//! which assignment they pick among the feasible ones.

pub mod rules;
pub mod single_pass;
pub mod tiered;


pub use rules::{CompatibilityRule, FacilityRule, Permissive};
pub use single_pass::{assign_single_pass, improve_by_swaps};
pub use tiered::{assign_tiered, FinalAssignments};
