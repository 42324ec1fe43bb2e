//! Value objects produced by graph analysis

use serde::{Deserialize, Serialize};

/// One Kahn round: nodes with no edges among them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopologicalLevel<K> {
    /// Position of this level in the schedule (0-based)
    pub index: usize,
    /// Nodes linearized by `(insertion_sequence, id)`
    pub nodes: Vec<K>,
}

impl<K> TopologicalLevel<K> {
    pub fn new(index: usize, nodes: Vec<K>) -> Self {
        Self { index, nodes }
    }

    pub fn width(&self) -> usize {
        self.nodes.len()
    }
}

/// Ordered sequence of levels covering every node exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSchedule<K> {
    pub levels: Vec<TopologicalLevel<K>>,
    /// Width of the widest level
    pub max_width: usize,
    /// Number of scheduled nodes
    pub total_nodes: usize,
}

impl<K: Copy> LevelSchedule<K> {
    pub fn new(levels: Vec<TopologicalLevel<K>>) -> Self {
        let max_width = levels.iter().map(TopologicalLevel::width).max().unwrap_or(0);
        let total_nodes = levels.iter().map(TopologicalLevel::width).sum();
        Self {
            levels,
            max_width,
            total_nodes,
        }
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// The deterministic linearization: levels in order, each level in
    /// `(insertion_sequence, id)` order.
    pub fn flatten(&self) -> Vec<K> {
        self.levels
            .iter()
            .flat_map(|level| level.nodes.iter().copied())
            .collect()
    }

    /// Nodes per level on average; `1.0` for an empty schedule.
    pub fn speedup_estimate(&self) -> f64 {
        if self.levels.is_empty() {
            1.0
        } else {
            self.total_nodes as f64 / self.levels.len() as f64
        }
    }
}

/// Sequential vs. level-parallel step counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParallelizationGain {
    pub sequential_steps: usize,
    pub parallel_steps: usize,
    pub speedup: f64,
}
