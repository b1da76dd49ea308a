//! Navigation-subsystem error type.

use thiserror::Error;

use pursuit_core::NodeId;

/// Errors produced by `pursuit-nav`.
#[derive(Debug, Error)]
pub enum NavError {
    #[error("no path from {from} to {to}")]
    NoPath { from: NodeId, to: NodeId },

    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error("node name {0:?} used more than once")]
    DuplicateName(String),

    #[error("link {from} -> {to} has invalid cost {cost}")]
    BadLinkCost { from: NodeId, to: NodeId, cost: f32 },

    #[error("layout references unknown node name {0:?}")]
    UnknownName(String),
}

pub type NavResult<T> = Result<T, NavError>;
