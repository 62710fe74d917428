//! Service-level error type.
//!
//! Upstream fetch failures and empty documents never surface here — the
//! build operation logs them and falls back to the synthetic grid.  What
//! remains is caller mistakes and file I/O from the export path.

use thiserror::Error;

/// Errors surfaced by the request operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("graph has not been built yet")]
    GraphNotBuilt,

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
