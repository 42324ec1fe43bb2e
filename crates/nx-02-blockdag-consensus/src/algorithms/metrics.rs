//! Structural summary of the DAG.

use crate::domain::classification::Classification;
use crate::domain::dag_store::DagStore;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DagMetrics {
    /// Blocks in the DAG (buffered orphans excluded)
    pub total_blocks: usize,
    pub blue_blocks: usize,
    pub red_blocks: usize,
    /// Blue share of classified blocks, in percent
    pub blue_percentage: f64,
    /// Number of tips
    pub dag_width: usize,
    /// Length of the total order
    pub consensus_chain_length: usize,
    pub average_parents_per_block: f64,
    pub max_height: u64,
}

impl DagMetrics {
    pub fn measure(store: &DagStore, consensus_chain_length: usize) -> Self {
        let (mut blue_blocks, mut red_blocks, mut parent_links) = (0, 0, 0);
        for entry in store.entries() {
            parent_links += entry.block.parents.len();
            match entry.label {
                Some(Classification::Blue) => blue_blocks += 1,
                Some(Classification::Red) => red_blocks += 1,
                _ => {}
            }
        }
        let total_blocks = store.len();
        let classified = blue_blocks + red_blocks;
        Self {
            total_blocks,
            blue_blocks,
            red_blocks,
            blue_percentage: ratio(blue_blocks, classified) * 100.0,
            dag_width: store.tip_count(),
            consensus_chain_length,
            average_parents_per_block: ratio(parent_links, total_blocks),
            max_height: store.max_height(),
        }
    }
}

fn ratio(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}
