//! Execution report

use super::errors::FailureReason;
use serde::{Deserialize, Serialize};
use shared_types::TxId;

/// Shape of the batch's dependency graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParallelismStats {
    pub levels: usize,
    pub max_level_width: usize,
    /// Transfers per level; `1.0` for an empty batch
    pub speedup_estimate: f64,
    pub critical_path_length: usize,
}

impl Default for ParallelismStats {
    fn default() -> Self {
        Self {
            levels: 0,
            max_level_width: 0,
            speedup_estimate: 1.0,
            critical_path_length: 0,
        }
    }
}

/// Outcome of one batch. `applied` and `failed` are in canonical order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionReport {
    pub applied: Vec<TxId>,
    pub failed: Vec<(TxId, FailureReason)>,
    pub parallelism_stats: ParallelismStats,
}

impl ExecutionReport {
    pub fn tx_count(&self) -> usize {
        self.applied.len() + self.failed.len()
    }

    pub fn failure_of(&self, id: &TxId) -> Option<FailureReason> {
        self.failed
            .iter()
            .find(|(failed, _)| failed == id)
            .map(|(_, reason)| *reason)
    }

    pub fn is_applied(&self, id: &TxId) -> bool {
        self.applied.contains(id)
    }
}
