//! Spatial-subsystem error type.

use thiserror::Error;

/// Errors produced by `ea-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// The ingested document has no `elements` field at all (upstream
    /// failure).  The caller is expected to fall back to the synthetic grid.
    #[error("document has no elements field")]
    MissingElements,

    /// The document parsed but produced no nodes.  Same fallback contract as
    /// [`MissingElements`](Self::MissingElements).
    #[error("document produced an empty road network")]
    EmptyNetwork,

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
