//! Block labels and lifecycle states

use serde::{Deserialize, Serialize};
use std::fmt;

/// Label exposed to collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    /// Counted: at most `k` blue blocks in its anticone
    Blue,
    /// Excluded from the total order, kept in the DAG
    Red,
    /// Waiting for parents
    Pending,
}

impl Classification {
    pub fn is_blue(&self) -> bool {
        matches!(self, Self::Blue)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Blue => f.write_str("blue"),
            Self::Red => f.write_str("red"),
            Self::Pending => f.write_str("pending"),
        }
    }
}

/// Per-block state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BlockState {
    Pending,
    Ingested,
    Classified,
    Finalized,
}
