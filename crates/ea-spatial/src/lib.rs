//! `ea-spatial` — road graph construction, spatial indexing and snapping.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`graph`]   | `RoadGraph` (node table + adjacency + component labels)   |
//! | [`osm`]     | `OsmDocument` model and the two-pass graph builder        |
//! | [`grid`]    | Synthetic 80×80 fallback grid for when ingestion fails    |
//! | [`kdtree`]  | Arena-backed 2-D k-d tree over connected nodes            |
//! | [`snap`]    | `Snapper` — coordinate → node with main-component retry   |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                        |
//!
//! The graph is session-scoped, built once per `build` request and immutable
//! while routing reads it.  Edge weights are opaque nonnegative costs: travel
//! seconds on the OSM path, haversine metres on the synthetic-grid path.  The
//! two modes are never mixed within one session.

pub mod error;
pub mod graph;
pub mod grid;
pub mod kdtree;
pub mod osm;
pub mod snap;


pub use error::{SpatialError, SpatialResult};
pub use graph::{GraphStats, RoadGraph};
pub use grid::synthetic_grid;
pub use kdtree::KdTree;
pub use osm::{build_from_document, OsmDocument, OsmElement};
pub use snap::Snapper;
