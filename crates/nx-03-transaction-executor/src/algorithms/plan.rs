//! Execution plan: canonical order plus its level schedule.

use super::canonical::canonical_order;
use super::dependency_builder::build_dependency_graph;
use crate::domain::ledger::Ledger;
use crate::domain::report::ParallelismStats;
use nx_01_dependency_graph::{GraphResult, LevelSchedule};
use shared_types::Transaction;

/// Everything a strategy needs to apply one batch.
#[derive(Debug, Clone)]
pub struct ExecutionPlan {
    /// Transfers in canonical order; schedule nodes index into this
    pub transactions: Vec<Transaction>,
    /// Ledger slots `(sender, receiver)` per canonical position
    pub slots: Vec<(usize, usize)>,
    pub schedule: LevelSchedule<usize>,
    pub stats: ParallelismStats,
}

impl ExecutionPlan {
    /// Order the batch, build its contention graph and register every
    /// touched account in the ledger (in canonical order, so arena layout
    /// does not depend on the strategy).
    pub fn build(ledger: &mut Ledger, batch: &[Transaction]) -> GraphResult<Self> {
        let transactions: Vec<Transaction> = canonical_order(batch)
            .into_iter()
            .map(|index| batch[index].clone())
            .collect();

        let graph = build_dependency_graph(&transactions)?;
        let schedule = graph.topological_levels();
        let stats = ParallelismStats {
            levels: schedule.len(),
            max_level_width: schedule.max_width,
            speedup_estimate: schedule.speedup_estimate(),
            critical_path_length: graph.critical_path_length(),
        };

        let slots = transactions
            .iter()
            .map(|tx| (ledger.slot_or_insert(tx.sender), ledger.slot_or_insert(tx.receiver)))
            .collect();

        Ok(Self {
            transactions,
            slots,
            schedule,
            stats,
        })
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
