//! Kahn's topological sort, grouped into levels.
//!
//! O(V + E). Each round removes every zero in-degree node at once; that set
//! is one level. Nodes within a level are sorted by `(insertion_sequence, id)`.

use crate::domain::graph::DependencyGraph;
use crate::domain::key::NodeKey;
use crate::domain::value_objects::{LevelSchedule, TopologicalLevel};
use std::collections::HashMap;

pub fn topological_levels<K: NodeKey>(graph: &DependencyGraph<K>) -> LevelSchedule<K> {
    if graph.is_empty() {
        return LevelSchedule::new(vec![]);
    }

    let mut in_degree: HashMap<K, usize> = graph
        .node_ids()
        .map(|id| (*id, graph.dependencies(id).len()))
        .collect();

    let mut frontier: Vec<K> = graph.roots();
    let mut levels: Vec<TopologicalLevel<K>> = Vec::new();

    while !frontier.is_empty() {
        let mut next: Vec<K> = Vec::new();
        for node in &frontier {
            for dependent in graph.dependents(node) {
                let Some(degree) = in_degree.get_mut(dependent) else {
                    continue;
                };
                *degree -= 1;
                if *degree == 0 {
                    next.push(*dependent);
                }
            }
        }
        graph.sort_canonical(&mut next);
        levels.push(TopologicalLevel::new(levels.len(), frontier));
        frontier = next;
    }

    let schedule = LevelSchedule::new(levels);
    debug_assert_eq!(schedule.total_nodes, graph.len(), "graph must stay acyclic");
    schedule
}
