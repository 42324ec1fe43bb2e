//! Configuration for Block-DAG Consensus

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order among blocks of equal height when they compete for the blue set.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreakPolicy {
    /// Higher proposer weight first, then lower id
    #[default]
    WeightThenId,
    /// Higher proposer weight first, then earlier ingestion
    WeightThenArrival,
}

impl fmt::Display for TieBreakPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WeightThenId => f.write_str("weight_then_id"),
            Self::WeightThenArrival => f.write_str("weight_then_arrival"),
        }
    }
}

impl FromStr for TieBreakPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weight_then_id" => Ok(Self::WeightThenId),
            "weight_then_arrival" => Ok(Self::WeightThenArrival),
            other => Err(format!("unknown tie-break policy: {other}")),
        }
    }
}

/// Consensus configuration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsensusConfig {
    /// Anticone bound: a block is blue iff at most `k` blue blocks are
    /// concurrent with it
    pub k: usize,
    /// Levels of DAG growth after which a block's label is frozen
    pub finality_depth: u64,
    /// Ingestion rounds a block may wait for missing parents
    pub orphan_timeout_rounds: u64,
    pub tie_break: TieBreakPolicy,
    /// Entries kept in the rejection log and the undrained event log
    pub log_capacity: usize,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            k: 3,
            finality_depth: 6,
            orphan_timeout_rounds: 8,
            tie_break: TieBreakPolicy::WeightThenId,
            log_capacity: 1024,
        }
    }
}

impl ConsensusConfig {
    /// Config with the given `k` and defaults elsewhere.
    pub fn with_k(k: usize) -> Self {
        Self {
            k,
            ..Self::default()
        }
    }

    /// Levels below a block within which blue blocks are checked for
    /// concurrency. Anything deeper has fallen behind finality and counts
    /// as the block's past.
    pub fn concurrency_window(&self) -> u64 {
        self.finality_depth.saturating_add(1)
    }
}
