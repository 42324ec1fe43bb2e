//! # Node Container
//!
//! `DagNode` owns the consensus engine and the executor behind one
//! `RwLock`: ingestion takes the write lock, queries take read locks.
//!
//! When consensus finalizes blue blocks, their transactions are applied in
//! total order inside the same write section, so a reader never observes
//! a finalized block whose effects are missing.

pub mod config;

use crate::genesis::GenesisAllocation;
use config::NodeConfig;
use nx_02_blockdag_consensus::{
    AttackReport, Block, BlockDagApi, BlockDagConsensus, BlockState, Classification,
    ConsensusError, ConsensusEvent, ConsensusResult, DagMetrics, DagSnapshot,
};
use nx_03_transaction_executor::{
    ExecutionReport, ExecutorError, ExecutorResult, ParallelismStats, TransactionExecutor,
    TransferExecutionApi,
};
use parking_lot::RwLock;
use shared_types::{push_bounded, short_hex, Address, BlockId, Transaction};
use std::collections::{BTreeMap, HashMap, VecDeque};
use tracing::{debug, error, info};

/// Node-level audit events: consensus events plus block execution.
#[derive(Debug, Clone)]
pub enum NodeEvent {
    Consensus(ConsensusEvent),
    /// A finalized blue block's transactions were applied
    BlockExecuted {
        block: BlockId,
        applied: usize,
        failed: usize,
    },
    /// A finalized blue block could not be executed as a batch
    ExecutionFailed { block: BlockId, reason: String },
}

struct NodeState {
    consensus: BlockDagConsensus,
    executor: TransactionExecutor,
    reports: HashMap<BlockId, ExecutionReport>,
    /// Blocks whose payload has been applied, in application order
    executed: Vec<BlockId>,
    /// Undrained events, oldest dropped beyond `event_log_capacity`
    events: VecDeque<NodeEvent>,
    event_log_capacity: usize,
}

pub struct DagNode {
    state: RwLock<NodeState>,
}

impl DagNode {
    pub fn new(config: &NodeConfig) -> Self {
        let mut executor = TransactionExecutor::with_config(config.executor.clone());
        seed(&mut executor, &config.genesis_allocations);
        info!(
            k = config.consensus.k,
            finality_depth = config.consensus.finality_depth,
            strategy = %config.executor.strategy,
            accounts = config.genesis_allocations.len(),
            "Node initialized"
        );
        Self {
            state: RwLock::new(NodeState {
                consensus: BlockDagConsensus::with_config(config.consensus.clone()),
                executor,
                reports: HashMap::new(),
                executed: Vec::new(),
                events: VecDeque::new(),
                event_log_capacity: config.event_log_capacity,
            }),
        }
    }

    /// Additional genesis allocations (e.g. carried by a replay feed).
    pub fn seed_allocations(&self, allocations: &[GenesisAllocation]) {
        seed(&mut self.state.write().executor, allocations);
    }

    pub fn ingest_block(
        &self,
        parents: Vec<BlockId>,
        transactions: Vec<Transaction>,
        proposer_weight: u64,
    ) -> ConsensusResult<BlockId> {
        let mut state = self.state.write();
        let result = state.consensus.ingest_block(parents, transactions, proposer_weight);
        state.settle();
        result
    }

    pub fn submit_block(&self, block: Block) -> ConsensusResult<BlockId> {
        let mut state = self.state.write();
        let result = state.consensus.submit_block(block);
        state.settle();
        result
    }

    /// Apply an ad-hoc batch outside of any block.
    pub fn ingest_transaction_batch(&self, transactions: &[Transaction]) -> ExecutorResult<ExecutionReport> {
        self.state.write().executor.ingest_transaction_batch(transactions)
    }

    pub fn get_total_order(&self) -> Vec<BlockId> {
        self.state.read().consensus.get_total_order()
    }

    pub fn get_classification(&self, id: &BlockId) -> ConsensusResult<Classification> {
        self.state.read().consensus.get_classification(id)
    }

    pub fn block_state(&self, id: &BlockId) -> ConsensusResult<BlockState> {
        self.state.read().consensus.block_state(id)
    }

    pub fn get_balance(&self, account: &Address) -> u64 {
        self.state.read().executor.get_balance(account)
    }

    /// Stats of an executed block; `None` until the block is finalized blue.
    pub fn get_parallelism_stats(&self, id: &BlockId) -> Option<ParallelismStats> {
        self.state
            .read()
            .reports
            .get(id)
            .map(|report| report.parallelism_stats)
    }

    pub fn execution_report(&self, id: &BlockId) -> Option<ExecutionReport> {
        self.state.read().reports.get(id).cloned()
    }

    /// Blocks whose payload has been applied, in application order.
    pub fn executed_blocks(&self) -> Vec<BlockId> {
        self.state.read().executed.clone()
    }

    pub fn balances(&self) -> BTreeMap<Address, u64> {
        self.state.read().executor.ledger().balances()
    }

    pub fn total_supply(&self) -> u128 {
        self.state.read().executor.ledger().total_supply()
    }

    pub fn detect_attack(&self) -> AttackReport {
        self.state.read().consensus.detect_attack()
    }

    pub fn dag_metrics(&self) -> DagMetrics {
        self.state.read().consensus.dag_metrics()
    }

    pub fn dag_snapshot(&self) -> DagSnapshot {
        self.state.read().consensus.dag_snapshot()
    }

    pub fn rejected_blocks(&self) -> Vec<(BlockId, ConsensusError)> {
        self.state.read().consensus.rejected_blocks().cloned().collect()
    }

    pub fn drain_events(&self) -> Vec<NodeEvent> {
        self.state.write().events.drain(..).collect()
    }
}

impl NodeState {
    fn record(&mut self, event: NodeEvent) {
        let dropped = push_bounded(&mut self.events, self.event_log_capacity, event);
        if dropped > 0 {
            debug!(dropped, "Undrained node events discarded");
        }
    }

    /// Move consensus events into the node log and execute newly finalized
    /// blue blocks in order.
    fn settle(&mut self) {
        for event in self.consensus.drain_events() {
            if let ConsensusEvent::BlocksFinalized { blue, .. } = &event {
                let finalized = blue.clone();
                self.record(NodeEvent::Consensus(event));
                for id in finalized {
                    self.execute(id);
                }
            } else {
                self.record(NodeEvent::Consensus(event));
            }
        }
    }

    fn execute(&mut self, id: BlockId) {
        if self.reports.contains_key(&id) {
            return;
        }
        let Some(transactions) = self.consensus.block(&id).map(|b| b.transactions.clone()) else {
            return;
        };
        match self.executor.ingest_transaction_batch(&transactions) {
            Ok(report) => {
                info!(
                    block = %short_hex(&id),
                    applied = report.applied.len(),
                    failed = report.failed.len(),
                    levels = report.parallelism_stats.levels,
                    "Block executed"
                );
                self.record(NodeEvent::BlockExecuted {
                    block: id,
                    applied: report.applied.len(),
                    failed: report.failed.len(),
                });
                self.executed.push(id);
                self.reports.insert(id, report);
            }
            Err(err) => self.execution_failed(id, err),
        }
    }

    fn execution_failed(&mut self, id: BlockId, err: ExecutorError) {
        error!(block = %short_hex(&id), %err, "Block execution failed");
        self.record(NodeEvent::ExecutionFailed {
            block: id,
            reason: err.to_string(),
        });
    }
}

fn seed(executor: &mut TransactionExecutor, allocations: &[GenesisAllocation]) {
    for allocation in allocations {
        executor.seed_balance(allocation.address(), allocation.balance);
    }
}
