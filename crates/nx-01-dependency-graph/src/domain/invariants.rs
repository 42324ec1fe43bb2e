//! Invariant checks over schedules.
//!
//! Used by tests and by callers that want to assert a schedule before
//! acting on it.

use super::graph::DependencyGraph;
use super::key::NodeKey;
use super::value_objects::LevelSchedule;
use std::collections::{HashMap, HashSet};

/// Every edge `from -> to` has `from` in a strictly earlier level.
pub fn invariant_topological_order<K: NodeKey>(
    graph: &DependencyGraph<K>,
    schedule: &LevelSchedule<K>,
) -> bool {
    let level_of = level_index(schedule);
    graph.node_ids().all(|node| {
        graph.dependents(node).iter().all(|dependent| {
            match (level_of.get(node), level_of.get(dependent)) {
                (Some(a), Some(b)) => a < b,
                _ => false,
            }
        })
    })
}

/// No level contains both endpoints of an edge.
pub fn invariant_level_independence<K: NodeKey>(
    graph: &DependencyGraph<K>,
    schedule: &LevelSchedule<K>,
) -> bool {
    schedule.levels.iter().all(|level| {
        let members: HashSet<&K> = level.nodes.iter().collect();
        level
            .nodes
            .iter()
            .all(|node| graph.dependents(node).iter().all(|d| !members.contains(d)))
    })
}

/// Every node is scheduled exactly once.
pub fn invariant_completeness<K: NodeKey>(
    graph: &DependencyGraph<K>,
    schedule: &LevelSchedule<K>,
) -> bool {
    let flat = schedule.flatten();
    let unique: HashSet<&K> = flat.iter().collect();
    flat.len() == graph.len() && unique.len() == flat.len() && flat.iter().all(|n| graph.contains(n))
}

fn level_index<K: NodeKey>(schedule: &LevelSchedule<K>) -> HashMap<K, usize> {
    schedule
        .levels
        .iter()
        .flat_map(|level| level.nodes.iter().map(move |n| (*n, level.index)))
        .collect()
}
