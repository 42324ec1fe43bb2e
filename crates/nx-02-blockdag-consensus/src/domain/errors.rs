//! Error types for Block-DAG Consensus

use nx_01_dependency_graph::{CycleError, GraphError};
use shared_types::{short_hex, BlockId, TxId};

/// Consensus error types. None of them is fatal to the engine: the worst
/// outcome is one rejected block.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConsensusError {
    /// Parent edges would form a cycle
    #[error("Invalid DAG: {0}")]
    InvalidDag(#[from] CycleError),

    #[error("Duplicate genesis: {} already designated", short_hex(.existing))]
    DuplicateGenesis { existing: BlockId },

    #[error("Orphan timeout: block {} still missing {missing} parent(s) after {rounds} rounds", short_hex(.block))]
    OrphanTimeout {
        block: BlockId,
        missing: usize,
        rounds: u64,
    },

    #[error("Duplicate block: {}", short_hex(.0))]
    DuplicateBlock(BlockId),

    #[error("Unknown block: {}", short_hex(.0))]
    UnknownBlock(BlockId),

    #[error("Block id does not match content: {}", short_hex(.0))]
    IdMismatch(BlockId),

    #[error("Block {} carries transaction {} whose id does not match its content", short_hex(.block), short_hex(.tx))]
    TransactionIdMismatch { block: BlockId, tx: TxId },
}

pub type ConsensusResult<T> = Result<T, ConsensusError>;

impl ConsensusError {
    /// Build from a DAG mutation failure on `block`.
    pub fn from_graph(block: BlockId, err: GraphError) -> Self {
        match err {
            GraphError::Cycle(cycle) => Self::InvalidDag(cycle),
            GraphError::DuplicateNode(_) => Self::DuplicateBlock(block),
            GraphError::UnknownNode(_) => Self::UnknownBlock(block),
        }
    }
}
