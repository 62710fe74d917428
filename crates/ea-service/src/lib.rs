//! `ea-service` — the request surface over one owned allotment session.
//!
//! # Crate layout
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`session`]     | `Session` — owned state + build/allot/path operations |
//! | [`api`]         | Request/response bodies (serde)                       |
//! | [`fetch`]       | `NetworkFetcher` collaborator trait, `StaticFetcher`  |
//! | [`diagnostics`] | Per-student and aggregate diagnostic report           |
//! | [`export`]      | CSV export of per-centre distance tables              |
//! | [`error`]       | `ServiceError`, `ServiceResult<T>`                    |
//!
//! # Concurrency contract
//!
//! The HTTP transport is out of scope; whatever hosts a [`Session`] wraps it
//! in its own lock.  The borrow rules already encode the discipline the
//! session needs: `build` and `allot` take `&mut self` (writer exclusivity),
//! `path`, `parallel_sssp` and `diagnostics` take `&self` and can run on any
//! number of reader threads against a consistent snapshot.  `build`
//! assembles the new graph and index completely before installing them, so
//! no reader ever observes a half-built state.

pub mod api;
pub mod diagnostics;
pub mod error;
pub mod export;
pub mod fetch;
pub mod session;

#[cfg(test)]
mod tests;

pub use api::{
    AllotRequest, AllotResponse, BuildRequest, BuildResponse, CentreSpec, ErrorBody, GraphDetail,
    ParallelSsspRequest, ParallelSsspResponse, PathQuery, PathResponse, StudentSpec,
};
pub use diagnostics::DiagnosticsReport;
pub use error::{ServiceError, ServiceResult};
pub use fetch::{FetchError, NetworkFetcher, StaticFetcher};
pub use session::Session;
