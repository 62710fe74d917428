//! Student category enum shared across the planner and request surface.
//!
//! Categories double as priority tiers: the allotment planner processes all
//! tier-A students before tier B sees any capacity, and tier B before tier C.

use std::str::FromStr;

use crate::error::CoreError;

/// Reservation category of a student.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Category {
    /// Tier A — no reservation.
    #[default]
    General,
    /// Tier B — persons with disabilities.
    Pwd,
    /// Tier C — female candidates.
    Female,
}

impl Category {
    /// Tier rank used by the planner: lower ranks consume capacity first.
    #[inline]
    pub fn tier_rank(self) -> u8 {
        match self {
            Category::General => 0,
            Category::Pwd => 1,
            Category::Female => 2,
        }
    }

    /// All categories in tier order (A, B, C).
    pub const TIER_ORDER: [Category; 3] = [Category::General, Category::Pwd, Category::Female];

    /// Wire label, useful for CSV column values and log lines.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::General => "general",
            Category::Pwd => "pwd",
            Category::Female => "female",
        }
    }
}

impl FromStr for Category {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "general" => Ok(Category::General),
            "pwd" => Ok(Category::Pwd),
            "female" => Ok(Category::Female),
            other => Err(CoreError::UnknownCategory(other.to_owned())),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
