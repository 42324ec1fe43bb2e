//! Dependency Graph Builder
//!
//! Nodes are canonical positions. For every account, each transfer depends
//! on the previous transfer touching that account, so any two transfers
//! sharing an account end up in different levels, earlier first.

use nx_01_dependency_graph::{DependencyGraph, GraphResult};
use shared_types::{Address, Transaction};
use std::collections::HashMap;

/// Build the contention graph over transfers already in canonical order.
pub fn build_dependency_graph(ordered: &[Transaction]) -> GraphResult<DependencyGraph<usize>> {
    let mut graph = DependencyGraph::with_capacity(ordered.len());
    let mut last_touch: HashMap<Address, usize> = HashMap::new();

    for (position, tx) in ordered.iter().enumerate() {
        let mut deps: Vec<usize> = tx
            .accounts()
            .filter_map(|account| last_touch.get(&account).copied())
            .collect();
        deps.sort_unstable();
        deps.dedup();
        graph.add_node_with_dependencies(position, &deps)?;
        for account in tx.accounts() {
            last_touch.insert(account, position);
        }
    }

    Ok(graph)
}
