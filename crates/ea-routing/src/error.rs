//! Routing-subsystem error type.

use ea_core::NodeId;
use thiserror::Error;

/// Errors produced by `ea-routing`.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("no route from {from} to {to}")]
    NoPath { from: NodeId, to: NodeId },

    #[error("expansion limit reached routing {from} to {to}")]
    ExpansionLimit { from: NodeId, to: NodeId },

    #[error("start node {0} is not in the graph")]
    StartNotInGraph(NodeId),
}

pub type RoutingResult<T> = Result<T, RoutingError>;
