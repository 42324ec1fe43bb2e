//! Read-only projection of the DAG for collaborators

use super::classification::Classification;
use serde::{Deserialize, Serialize};
use shared_types::BlockId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockView {
    pub id: BlockId,
    pub parents: Vec<BlockId>,
    pub height: u64,
    pub classification: Classification,
    pub blue_score: u64,
    pub finalized: bool,
    pub tx_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DagSnapshot {
    /// Ingested blocks ordered by `(height, id)`
    pub blocks: Vec<BlockView>,
    pub tips: Vec<BlockId>,
    pub total_order: Vec<BlockId>,
    /// Blocks still waiting for parents
    pub pending: Vec<BlockId>,
}
