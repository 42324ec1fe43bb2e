//! Bottleneck detection.
//!
//! A node many others wait on serializes the schedule behind it; a node
//! waiting on many others is the last to become ready.

use crate::domain::graph::DependencyGraph;
use crate::domain::key::NodeKey;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BottleneckKind {
    /// `threshold` or more nodes depend on this one
    Dependency,
    /// This node waits on `threshold` or more nodes
    Waiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BottleneckSeverity {
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bottleneck<K> {
    pub node: K,
    pub kind: BottleneckKind,
    pub degree: usize,
    pub severity: BottleneckSeverity,
}

/// All bottlenecks, ordered by `(insertion_sequence, id)` then kind.
pub fn find_bottlenecks<K: NodeKey>(graph: &DependencyGraph<K>, threshold: usize) -> Vec<Bottleneck<K>> {
    let threshold = threshold.max(1);
    let mut nodes: Vec<K> = graph.node_ids().copied().collect();
    graph.sort_canonical(&mut nodes);

    let mut found = Vec::new();
    for node in nodes {
        let candidates = [
            (BottleneckKind::Dependency, graph.dependents(&node).len()),
            (BottleneckKind::Waiting, graph.dependencies(&node).len()),
        ];
        for (kind, degree) in candidates {
            if degree >= threshold {
                found.push(Bottleneck {
                    node,
                    kind,
                    degree,
                    severity: severity(degree, threshold),
                });
            }
        }
    }
    found
}

fn severity(degree: usize, threshold: usize) -> BottleneckSeverity {
    if degree >= threshold.saturating_mul(2) {
        BottleneckSeverity::High
    } else {
        BottleneckSeverity::Medium
    }
}
