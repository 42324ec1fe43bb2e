//! Driving ports (Inbound API)

use crate::algorithms::attack::AttackReport;
use crate::algorithms::metrics::DagMetrics;
use crate::domain::block::Block;
use crate::domain::classification::{BlockState, Classification};
use crate::domain::errors::ConsensusResult;
use crate::domain::snapshot::DagSnapshot;
use crate::events::ConsensusEvent;
use shared_types::{BlockId, Transaction};

/// Primary consensus API. Writers need `&mut self`: ingestion is serialized.
pub trait BlockDagApi: Send + Sync {
    /// Package and ingest a block proposed now.
    ///
    /// Returns the new id. A block with missing parents is buffered and
    /// still returns `Ok`; its classification reads `Pending`.
    fn ingest_block(
        &mut self,
        parents: Vec<BlockId>,
        transactions: Vec<Transaction>,
        proposer_weight: u64,
    ) -> ConsensusResult<BlockId>;

    /// Ingest a block built elsewhere. Its id must match its content.
    fn submit_block(&mut self, block: Block) -> ConsensusResult<BlockId>;

    /// Blue blocks in the order they entered the blue set.
    fn get_total_order(&self) -> Vec<BlockId>;

    fn get_classification(&self, id: &BlockId) -> ConsensusResult<Classification>;

    fn block_state(&self, id: &BlockId) -> ConsensusResult<BlockState>;

    fn detect_attack(&self) -> AttackReport;

    /// Width, order length, parent fan-in and blue share of the DAG.
    fn dag_metrics(&self) -> DagMetrics;

    fn dag_snapshot(&self) -> DagSnapshot;

    /// Hand out and clear the event log.
    fn drain_events(&mut self) -> Vec<ConsensusEvent>;
}
