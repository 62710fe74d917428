//! Base error type.
//!
//! Sub-crates define their own error enums and either convert into
//! `CoreError` via `From` impls or wrap it as one variant.  Both patterns are
//! acceptable; prefer whichever keeps error sites clean.

use thiserror::Error;

/// Errors produced by `ea-core` vocabulary types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown student category {0:?}")]
    UnknownCategory(String),
}

/// Shorthand result type for `ea-core`.
pub type CoreResult<T> = Result<T, CoreError>;
