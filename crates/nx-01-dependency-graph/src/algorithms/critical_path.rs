//! Longest dependency chain, for diagnostics only.

use crate::domain::graph::DependencyGraph;
use crate::domain::key::NodeKey;
use std::collections::HashMap;

/// Returns the nodes of a longest chain, first to last.
///
/// Among equally long predecessors or endpoints the earliest one in
/// `(insertion_sequence, id)` order is chosen.
pub fn longest_chain<K: NodeKey>(graph: &DependencyGraph<K>) -> Vec<K> {
    let order = graph.topological_levels().flatten();
    let mut depth: HashMap<K, usize> = HashMap::with_capacity(order.len());
    let mut via: HashMap<K, K> = HashMap::new();

    for node in &order {
        let mut deps: Vec<K> = graph.dependencies(node).to_vec();
        graph.sort_canonical(&mut deps);
        let mut best: Option<(usize, K)> = None;
        for dep in deps {
            let d = depth.get(&dep).copied().unwrap_or(0);
            if best.map_or(true, |(bd, _)| d > bd) {
                best = Some((d, dep));
            }
        }
        match best {
            Some((d, dep)) => {
                depth.insert(*node, d + 1);
                via.insert(*node, dep);
            }
            None => {
                depth.insert(*node, 1);
            }
        }
    }

    let mut end: Option<(usize, K)> = None;
    for node in &order {
        let d = depth.get(node).copied().unwrap_or(0);
        if end.map_or(true, |(bd, _)| d > bd) {
            end = Some((d, *node));
        }
    }

    let Some((_, mut current)) = end else {
        return Vec::new();
    };
    let mut path = vec![current];
    while let Some(prev) = via.get(&current) {
        path.push(*prev);
        current = *prev;
    }
    path.reverse();
    path
}
