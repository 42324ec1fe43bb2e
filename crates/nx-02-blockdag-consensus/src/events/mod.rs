//! Consensus events
//!
//! Every outcome of an ingestion call that is not its direct return value
//! (buffered, evicted, finalized) is recorded here so that no block is ever
//! dropped silently.

use crate::domain::errors::ConsensusError;
use shared_types::BlockId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsensusEvent {
    /// Parents missing; waiting in the orphan pool
    BlockBuffered { block: BlockId, missing: Vec<BlockId> },
    /// Added to the DAG
    BlockIngested { block: BlockId, height: u64 },
    /// Refused on structural grounds
    BlockRejected { block: BlockId, reason: ConsensusError },
    /// Dropped from the orphan pool
    OrphanEvicted { block: BlockId, reason: ConsensusError },
    /// Labels frozen, in total-order position
    BlocksFinalized { blue: Vec<BlockId>, red: Vec<BlockId> },
}

impl ConsensusEvent {
    pub fn block(&self) -> Option<&BlockId> {
        match self {
            Self::BlockBuffered { block, .. }
            | Self::BlockIngested { block, .. }
            | Self::BlockRejected { block, .. }
            | Self::OrphanEvicted { block, .. } => Some(block),
            Self::BlocksFinalized { .. } => None,
        }
    }
}
