//! The student/centre compatibility seam.
//!
//! Capacity is enforced by the planner itself; everything else about whether
//! a pairing is acceptable goes through [`CompatibilityRule`].  The active
//! default is [`Permissive`] — every pair is valid and only capacity
//! constrains the outcome.  [`FacilityRule`] is the stricter variant for
//! deployments that want facility matching.

use ea_core::{Category, Centre, Student};

/// Decides whether `student` may sit at `centre` at all.
///
/// Implementations must be pure: the planner may evaluate a pair any number
/// of times and in any order.
pub trait CompatibilityRule {
    fn is_valid(&self, student: &Student, centre: &Centre) -> bool;
}

/// Every pairing is acceptable.  The active default.
pub struct Permissive;

impl CompatibilityRule for Permissive {
    #[inline]
    fn is_valid(&self, _student: &Student, _centre: &Centre) -> bool {
        true
    }
}

/// Facility matching: PwD students need wheelchair access, and female-only
/// centres seat only female students.  Female students may still use any
/// centre.
pub struct FacilityRule;

impl CompatibilityRule for FacilityRule {
    fn is_valid(&self, student: &Student, centre: &Centre) -> bool {
        if student.category == Category::Pwd && !centre.has_wheelchair_access {
            return false;
        }
        if centre.is_female_only && student.category != Category::Female {
            return false;
        }
        true
    }
}
