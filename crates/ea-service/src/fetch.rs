//! The road-data collaborator contract.
//!
//! Fetching from the real geospatial API (HTTP, query building, retries) is
//! an external concern; the session only needs this trait.  The production
//! implementation lives with the transport layer — here the canned
//! [`StaticFetcher`] covers tests and offline runs.

use ea_core::BoundingBox;
use ea_spatial::OsmDocument;
use thiserror::Error;

/// Upstream request timeout implementations are expected to enforce.
pub const FETCH_TIMEOUT_SECS: u64 = 60;

/// Failures of the upstream data source.
///
/// The build operation treats every variant the same way: log and fall back
/// to the synthetic grid.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("upstream timed out after {FETCH_TIMEOUT_SECS} s")]
    Timeout,

    #[error("upstream returned HTTP {0}")]
    Http(u16),

    #[error("upstream failure: {0}")]
    Upstream(String),
}

/// Supplies the raw node/way document for a bounding box.
///
/// `highway_classes` is the road-class filter derived from the request's
/// detail level; implementations restrict the query to those classes.
/// HTTP-status failures may also surface as an `Ok` document with no
/// elements — the builder treats that identically to an error.
pub trait NetworkFetcher {
    fn fetch(
        &self,
        bbox: &BoundingBox,
        highway_classes: &[&str],
    ) -> Result<OsmDocument, FetchError>;
}

/// Returns the same canned document for every request, ignoring the
/// bounding box and class filter.
pub struct StaticFetcher {
    doc: OsmDocument,
}

impl StaticFetcher {
    pub fn new(doc: OsmDocument) -> Self {
        Self { doc }
    }

    /// A fetcher that always returns the no-`elements` document, driving
    /// every build into the synthetic-grid fallback.
    pub fn unavailable() -> Self {
        Self { doc: OsmDocument::empty() }
    }
}

impl NetworkFetcher for StaticFetcher {
    fn fetch(
        &self,
        _bbox: &BoundingBox,
        _highway_classes: &[&str],
    ) -> Result<OsmDocument, FetchError> {
        Ok(self.doc.clone())
    }
}
