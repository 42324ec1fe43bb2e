//! Error types for the dependency graph

use thiserror::Error;

/// Raised when an edge would make the graph cyclic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Edge {from} -> {to} would create a cycle")]
pub struct CycleError {
    pub from: String,
    pub to: String,
}

/// All errors that can occur while mutating a graph
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The edge would close a cycle
    #[error(transparent)]
    Cycle(#[from] CycleError),

    /// An edge endpoint was never added
    #[error("Unknown node: {0}")]
    UnknownNode(String),

    /// The node is already present
    #[error("Duplicate node: {0}")]
    DuplicateNode(String),
}

pub type GraphResult<T> = Result<T, GraphError>;
