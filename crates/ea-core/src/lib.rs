//! `ea-core` — foundational types for the exam-centre allotment engine.
//!
//! This crate is a dependency of every other `ea-*` crate.  It intentionally
//! has no `ea-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                               |
//! |--------------|--------------------------------------------------------|
//! | [`ids`]      | `NodeId`, `ComponentId`                                |
//! | [`geo`]      | `GeoPoint`, haversine distance, speed/time conversion  |
//! | [`category`] | `Category` (student priority tiers)                    |
//! | [`roster`]   | `Student`, `Centre`                                    |
//! | [`lookup`]   | `DistanceTable`, `AllotmentLookup`                     |
//! | [`error`]    | `CoreError`, `CoreResult`                              |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                      |
//! |---------|-------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to the public vocabulary.    |
//!           | Required by `ea-service`.                                   |

pub mod category;
pub mod error;
pub mod geo;
pub mod ids;
pub mod lookup;
pub mod roster;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use category::Category;
pub use error::{CoreError, CoreResult};
pub use geo::{BoundingBox, GeoPoint};
pub use ids::{ComponentId, NodeId};
pub use lookup::{AllotmentLookup, DistanceTable};
pub use roster::{Centre, Student};
