//! Block-DAG Consensus Service
//!
//! Single-writer engine. Every ingestion call is one round:
//! 1. Admit the block (verify, buffer if parents are missing, or insert)
//! 2. Cascade: insert buffered children whose parents are now complete
//! 3. Reclassify every non-finalized block and advance finality
//! 4. Evict orphans that waited `orphan_timeout_rounds`

use crate::algorithms::attack::AttackReport;
use crate::algorithms::metrics::DagMetrics;
use crate::algorithms::ghostdag;
use crate::config::ConsensusConfig;
use crate::domain::block::Block;
use crate::domain::blue_set::FrozenBlueSet;
use crate::domain::classification::{BlockState, Classification};
use crate::domain::dag_store::DagStore;
use crate::domain::errors::{ConsensusError, ConsensusResult};
use crate::domain::orphan_pool::OrphanPool;
use crate::domain::snapshot::{BlockView, DagSnapshot};
use crate::events::ConsensusEvent;
use crate::ports::inbound::BlockDagApi;
use nx_01_dependency_graph::{CycleError, NodeKey};
use shared_types::{push_bounded, short_hex, BlockId, Transaction};
use std::collections::VecDeque;
use tracing::{debug, info, warn};

pub struct BlockDagConsensus {
    config: ConsensusConfig,
    store: DagStore,
    orphans: OrphanPool,
    /// Frozen prefix of the total order
    finalized_order: Vec<BlockId>,
    frozen_blue: FrozenBlueSet,
    /// Blocks in the DAG that are not finalized yet
    live: Vec<BlockId>,
    /// Non-finalized blue blocks, in blue-set entry order
    live_order: Vec<BlockId>,
    round: u64,
    /// Most recent refusals and evictions, bounded by `log_capacity`
    rejected: VecDeque<(BlockId, ConsensusError)>,
    events: VecDeque<ConsensusEvent>,
}

impl BlockDagConsensus {
    /// Create an engine with default config
    pub fn new() -> Self {
        Self::with_config(ConsensusConfig::default())
    }

    /// Create an engine with custom config
    pub fn with_config(config: ConsensusConfig) -> Self {
        Self {
            config,
            store: DagStore::new(),
            orphans: OrphanPool::new(),
            finalized_order: Vec::new(),
            frozen_blue: FrozenBlueSet::new(),
            live: Vec::new(),
            live_order: Vec::new(),
            round: 0,
            rejected: VecDeque::new(),
            events: VecDeque::new(),
        }
    }

    pub fn config(&self) -> &ConsensusConfig {
        &self.config
    }

    /// Ingestion rounds so far.
    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn genesis(&self) -> Option<BlockId> {
        self.store.genesis()
    }

    pub fn block(&self, id: &BlockId) -> Option<&Block> {
        self.store
            .get(id)
            .map(|entry| &entry.block)
            .or_else(|| self.orphans.get(id).map(|pending| &pending.block))
    }

    pub fn tips(&self) -> Vec<BlockId> {
        self.store.tips()
    }

    pub fn pending_count(&self) -> usize {
        self.orphans.len()
    }

    /// Finalized blue blocks; always a prefix of `get_total_order`.
    pub fn finalized_order(&self) -> &[BlockId] {
        &self.finalized_order
    }

    /// Recently refused or evicted blocks with their reasons, oldest first.
    /// Only the last `log_capacity` are kept.
    pub fn rejected_blocks(
        &self,
    ) -> impl DoubleEndedIterator<Item = &(BlockId, ConsensusError)> + ExactSizeIterator + '_ {
        self.rejected.iter()
    }

    /// Blue blocks in the past of `id`.
    pub fn blue_score(&self, id: &BlockId) -> ConsensusResult<u64> {
        self.store
            .get(id)
            .map(|entry| entry.blue_score)
            .ok_or(ConsensusError::UnknownBlock(*id))
    }

    /// Advance one round without a block, evicting expired orphans.
    /// Returns the evicted ids.
    pub fn tick(&mut self) -> Vec<BlockId> {
        self.round += 1;
        self.expire_orphans()
    }

    fn record(&mut self, event: ConsensusEvent) {
        let dropped = push_bounded(&mut self.events, self.config.log_capacity, event);
        if dropped > 0 {
            debug!(dropped, "Undrained consensus events discarded");
        }
    }

    fn record_rejection(&mut self, id: BlockId, reason: ConsensusError) {
        push_bounded(&mut self.rejected, self.config.log_capacity, (id, reason));
    }

    fn process(&mut self, block: Block) -> ConsensusResult<BlockId> {
        let id = block.id;
        let result = self.admit(block);
        match &result {
            Ok(true) => self.reclassify(),
            Ok(false) => {}
            Err(reason) => self.reject(id, reason.clone()),
        }
        self.expire_orphans();
        result.map(|_| id)
    }

    /// Returns whether anything entered the DAG.
    fn admit(&mut self, block: Block) -> ConsensusResult<bool> {
        let id = block.id;
        if !block.verify_id() {
            return Err(ConsensusError::IdMismatch(id));
        }
        if let Some(tx) = block.forged_transaction() {
            return Err(ConsensusError::TransactionIdMismatch { block: id, tx: tx.id });
        }
        if self.store.contains(&id) || self.orphans.contains(&id) {
            return Err(ConsensusError::DuplicateBlock(id));
        }
        if block.parents.contains(&id) {
            return Err(CycleError {
                from: id.label(),
                to: id.label(),
            }
            .into());
        }
        if block.is_genesis() {
            if let Some(existing) = self.store.genesis() {
                return Err(ConsensusError::DuplicateGenesis { existing });
            }
        }

        let missing = self.store.missing_parents(&block);
        if !missing.is_empty() {
            self.orphans
                .insert(block, missing.clone(), self.round)
                .map_err(|err| ConsensusError::from_graph(id, err))?;
            debug!(block = %short_hex(&id), missing = missing.len(), "Block buffered");
            self.record(ConsensusEvent::BlockBuffered { block: id, missing });
            return Ok(false);
        }

        self.connect(block)?;

        let mut ready: VecDeque<_> = self.orphans.release(&id).into();
        while let Some(pending) = ready.pop_front() {
            let child = pending.block.id;
            match self.connect(pending.block) {
                Ok(()) => ready.extend(self.orphans.release(&child)),
                Err(reason) => self.reject(child, reason),
            }
        }
        Ok(true)
    }

    fn connect(&mut self, block: Block) -> ConsensusResult<()> {
        let entry = self.store.insert(block)?;
        let (id, height) = (entry.block.id, entry.height);
        self.live.push(id);
        debug!(block = %short_hex(&id), height, "Block ingested");
        self.record(ConsensusEvent::BlockIngested { block: id, height });
        Ok(())
    }

    fn reject(&mut self, id: BlockId, reason: ConsensusError) {
        warn!(block = %short_hex(&id), %reason, "Block rejected");
        self.record(ConsensusEvent::BlockRejected {
            block: id,
            reason: reason.clone(),
        });
        self.record_rejection(id, reason);
    }

    /// Relabel every non-finalized block on top of the frozen blue set,
    /// then freeze blocks that fell `finality_depth` levels behind.
    fn reclassify(&mut self) {
        let ordered = ghostdag::order_blocks(&self.store, &self.live, self.config.tie_break);
        let verdicts = ghostdag::classify(
            &self.store,
            &self.frozen_blue,
            &ordered,
            self.config.k,
            self.config.concurrency_window(),
        );
        let horizon = self.store.max_height().checked_sub(self.config.finality_depth);

        let mut live_order = Vec::new();
        let mut newly_blue = Vec::new();
        let mut newly_red = Vec::new();

        for verdict in verdicts {
            let Some(entry) = self.store.get_mut(&verdict.block) else {
                continue;
            };
            if let Some(previous) = entry.label {
                if previous != verdict.label {
                    debug!(
                        block = %short_hex(&verdict.block),
                        from = %previous,
                        to = %verdict.label,
                        "Classification revised"
                    );
                }
            }
            entry.label = Some(verdict.label);
            entry.blue_score = verdict.blue_score;

            let blue = verdict.label.is_blue();
            if horizon.is_some_and(|h| entry.height <= h) {
                entry.finalized = true;
                if blue {
                    self.finalized_order.push(verdict.block);
                    self.frozen_blue.insert(verdict.block, entry.height);
                    newly_blue.push(verdict.block);
                } else {
                    newly_red.push(verdict.block);
                }
            } else if blue {
                live_order.push(verdict.block);
            }
        }
        self.live_order = live_order;
        let store = &self.store;
        self.live
            .retain(|id| store.get(id).is_some_and(|entry| !entry.finalized));

        if !newly_blue.is_empty() || !newly_red.is_empty() {
            info!(
                blue = newly_blue.len(),
                red = newly_red.len(),
                finalized_total = self.finalized_order.len(),
                "Blocks finalized"
            );
            self.record(ConsensusEvent::BlocksFinalized {
                blue: newly_blue,
                red: newly_red,
            });
        }
    }

    fn expire_orphans(&mut self) -> Vec<BlockId> {
        let evicted = self
            .orphans
            .evict_expired(self.round, self.config.orphan_timeout_rounds);
        let mut ids = Vec::with_capacity(evicted.len());
        for pending in evicted {
            let id = pending.block.id;
            let reason = ConsensusError::OrphanTimeout {
                block: id,
                missing: pending.missing.len(),
                rounds: self.round.saturating_sub(pending.buffered_round),
            };
            warn!(block = %short_hex(&id), %reason, "Orphan evicted");
            self.record(ConsensusEvent::OrphanEvicted {
                block: id,
                reason: reason.clone(),
            });
            self.record_rejection(id, reason);
            ids.push(id);
        }
        ids
    }

    fn view(&self, id: &BlockId) -> Option<BlockView> {
        let entry = self.store.get(id)?;
        Some(BlockView {
            id: *id,
            parents: entry.block.parents.clone(),
            height: entry.height,
            classification: entry.label.unwrap_or(Classification::Pending),
            blue_score: entry.blue_score,
            finalized: entry.finalized,
            tx_count: entry.block.transactions.len(),
        })
    }
}

impl Default for BlockDagConsensus {
    fn default() -> Self {
        Self::new()
    }
}

impl BlockDagApi for BlockDagConsensus {
    fn ingest_block(
        &mut self,
        parents: Vec<BlockId>,
        transactions: Vec<Transaction>,
        proposer_weight: u64,
    ) -> ConsensusResult<BlockId> {
        self.round += 1;
        let block = Block::new(parents, transactions, proposer_weight, self.round);
        self.process(block)
    }

    fn submit_block(&mut self, block: Block) -> ConsensusResult<BlockId> {
        self.round += 1;
        self.process(block)
    }

    fn get_total_order(&self) -> Vec<BlockId> {
        let mut order = self.finalized_order.clone();
        order.extend_from_slice(&self.live_order);
        order
    }

    fn get_classification(&self, id: &BlockId) -> ConsensusResult<Classification> {
        if let Some(entry) = self.store.get(id) {
            return Ok(entry.label.unwrap_or(Classification::Pending));
        }
        if self.orphans.contains(id) {
            return Ok(Classification::Pending);
        }
        Err(ConsensusError::UnknownBlock(*id))
    }

    fn block_state(&self, id: &BlockId) -> ConsensusResult<BlockState> {
        if let Some(entry) = self.store.get(id) {
            return Ok(entry.state());
        }
        if self.orphans.contains(id) {
            return Ok(BlockState::Pending);
        }
        Err(ConsensusError::UnknownBlock(*id))
    }

    fn detect_attack(&self) -> AttackReport {
        let (mut blue, mut red) = (0, 0);
        for entry in self.store.entries() {
            match entry.label {
                Some(Classification::Blue) => blue += 1,
                Some(Classification::Red) => red += 1,
                _ => {}
            }
        }
        let report = AttackReport::assess(blue, red);
        if report.attack_detected {
            warn!(
                red_ratio = report.red_ratio,
                severity = ?report.severity,
                "Elevated red-block ratio"
            );
        }
        report
    }

    fn dag_metrics(&self) -> DagMetrics {
        let chain_length = self.finalized_order.len() + self.live_order.len();
        DagMetrics::measure(&self.store, chain_length)
    }

    fn dag_snapshot(&self) -> DagSnapshot {
        let mut ids: Vec<(u64, BlockId)> = self
            .store
            .entries()
            .map(|entry| (entry.height, entry.block.id))
            .collect();
        ids.sort_unstable();
        DagSnapshot {
            blocks: ids.iter().filter_map(|(_, id)| self.view(id)).collect(),
            tips: self.store.tips(),
            total_order: self.get_total_order(),
            pending: self.orphans.pending_ids(),
        }
    }

    fn drain_events(&mut self) -> Vec<ConsensusEvent> {
        self.events.drain(..).collect()
    }
}
