//! Configuration for the Transaction Executor

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a batch is applied. All strategies produce identical ledgers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStrategy {
    /// One transfer at a time in canonical order
    Sequential,
    /// Level by level with frozen snapshots, levels evaluated on rayon
    #[default]
    DagOptimized,
    /// Level by level over gathered columns with masked scatter
    Vectorized,
}

impl fmt::Display for ExecutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Sequential => "sequential",
            Self::DagOptimized => "dag_optimized",
            Self::Vectorized => "vectorized",
        };
        f.write_str(name)
    }
}

impl FromStr for ExecutionStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "dag_optimized" | "dag-optimized" | "dag" => Ok(Self::DagOptimized),
            "vectorized" => Ok(Self::Vectorized),
            other => Err(format!("unknown execution strategy: {other}")),
        }
    }
}

/// Executor configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Strategy used by `ingest_transaction_batch`
    pub strategy: ExecutionStrategy,
    /// Levels narrower than this are evaluated on the calling thread
    pub parallel_threshold: usize,
    /// Largest accepted batch
    pub max_batch_size: usize,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            strategy: ExecutionStrategy::DagOptimized,
            parallel_threshold: 4,
            max_batch_size: 10_000,
        }
    }
}
