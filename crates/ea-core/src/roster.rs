//! The two populations being matched: students and examination centres.
//!
//! Both types are plain data.  Coordinates are the raw request coordinates;
//! `snapped_node_id` starts as [`NodeId::INVALID`] and is set exactly once
//! after the spatial index is built for the session.

use crate::geo::GeoPoint;
use crate::ids::NodeId;
use crate::category::Category;

/// A candidate to be assigned to a centre.  Immutable after ingest.
#[derive(Clone, Debug)]
pub struct Student {
    pub student_id: String,
    pub lat: f64,
    pub lon: f64,
    /// Nearest connected graph node, set by the snapper.
    pub snapped_node_id: NodeId,
    pub category: Category,
}

impl Student {
    pub fn new(student_id: impl Into<String>, lat: f64, lon: f64, category: Category) -> Self {
        Self {
            student_id: student_id.into(),
            lat,
            lon,
            snapped_node_id: NodeId::INVALID,
            category,
        }
    }

    #[inline]
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }
}

/// An examination centre with a seat capacity.
///
/// Invariant: `current_load <= max_capacity` at all times.  The planner is
/// the only writer of `current_load`.
#[derive(Clone, Debug)]
pub struct Centre {
    pub centre_id: String,
    pub lat: f64,
    pub lon: f64,
    /// Nearest connected graph node, set once per session after the build.
    pub snapped_node_id: NodeId,
    pub max_capacity: u32,
    pub current_load: u32,
    pub has_wheelchair_access: bool,
    pub is_female_only: bool,
}

impl Centre {
    pub fn new(
        centre_id: impl Into<String>,
        lat: f64,
        lon: f64,
        max_capacity: u32,
        has_wheelchair_access: bool,
        is_female_only: bool,
    ) -> Self {
        Self {
            centre_id: centre_id.into(),
            lat,
            lon,
            snapped_node_id: NodeId::INVALID,
            max_capacity,
            current_load: 0,
            has_wheelchair_access,
            is_female_only,
        }
    }

    #[inline]
    pub fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lon)
    }

    /// Seats still open at this centre.
    #[inline]
    pub fn headroom(&self) -> u32 {
        self.max_capacity - self.current_load
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.current_load >= self.max_capacity
    }
}
