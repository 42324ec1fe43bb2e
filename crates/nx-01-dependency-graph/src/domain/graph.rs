//! The dependency graph entity.
//!
//! An edge `from -> to` means `to` depends on `from`: `from` must be
//! processed first. Nodes carry an insertion sequence used as the primary
//! key of every deterministic linearization.

use super::errors::{CycleError, GraphError, GraphResult};
use super::key::NodeKey;
use super::value_objects::{LevelSchedule, ParallelizationGain};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
struct NodeEntry<K> {
    sequence: u64,
    /// Nodes this node waits on
    dependencies: Vec<K>,
    /// Nodes waiting on this node
    dependents: Vec<K>,
}

impl<K> NodeEntry<K> {
    fn new(sequence: u64) -> Self {
        Self {
            sequence,
            dependencies: Vec::new(),
            dependents: Vec::new(),
        }
    }
}

/// Acyclic directed graph over `K`.
#[derive(Debug, Clone)]
pub struct DependencyGraph<K: NodeKey> {
    nodes: HashMap<K, NodeEntry<K>>,
    next_sequence: u64,
    edge_count: usize,
}

impl<K: NodeKey> Default for DependencyGraph<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: NodeKey> DependencyGraph<K> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: HashMap::with_capacity(capacity),
            next_sequence: 0,
            edge_count: 0,
        }
    }

    /// Add an isolated node. Returns `false` if it was already present.
    pub fn add_node(&mut self, id: K) -> bool {
        if self.nodes.contains_key(&id) {
            return false;
        }
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.nodes.insert(id, NodeEntry::new(sequence));
        true
    }

    /// Add the edge `from -> to`.
    ///
    /// Fails with [`CycleError`] if `to` already reaches `from` (or
    /// `from == to`). Re-adding an existing edge is a no-op. The graph is
    /// never modified on failure.
    pub fn add_edge(&mut self, from: K, to: K) -> GraphResult<()> {
        self.require(&from)?;
        self.require(&to)?;
        if self.has_edge(&from, &to) {
            return Ok(());
        }
        if from == to || self.reaches(&to, &from) {
            tracing::debug!(from = %from.label(), to = %to.label(), "rejected cyclic edge");
            return Err(cycle(from, to));
        }
        self.link(from, to);
        Ok(())
    }

    /// Insert `id` together with all of its dependencies in one step.
    ///
    /// Every dependency must exist and `id` must be new; either the node and
    /// all its edges are added or nothing is.
    pub fn add_node_with_dependencies(&mut self, id: K, dependencies: &[K]) -> GraphResult<()> {
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateNode(id.label()));
        }
        if let Some(own) = dependencies.iter().find(|dep| **dep == id) {
            return Err(cycle(*own, id));
        }
        for dep in dependencies {
            self.require(dep)?;
        }
        // A fresh node has no dependents, so none of these edges can close a cycle.
        self.add_node(id);
        for dep in dependencies {
            if !self.has_edge(dep, &id) {
                self.link(*dep, id);
            }
        }
        Ok(())
    }

    /// Remove a node and every edge touching it. Returns `false` if absent.
    pub fn remove_node(&mut self, id: &K) -> bool {
        let Some(entry) = self.nodes.remove(id) else {
            return false;
        };
        for dep in &entry.dependencies {
            if let Some(parent) = self.nodes.get_mut(dep) {
                parent.dependents.retain(|k| k != id);
            }
        }
        for child in &entry.dependents {
            if let Some(node) = self.nodes.get_mut(child) {
                node.dependencies.retain(|k| k != id);
            }
        }
        self.edge_count -= entry.dependencies.len() + entry.dependents.len();
        true
    }

    pub fn contains(&self, id: &K) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn has_edge(&self, from: &K, to: &K) -> bool {
        self.nodes
            .get(from)
            .is_some_and(|entry| entry.dependents.contains(to))
    }

    pub fn insertion_sequence(&self, id: &K) -> Option<u64> {
        self.nodes.get(id).map(|entry| entry.sequence)
    }

    /// Nodes `id` waits on, in edge insertion order.
    pub fn dependencies(&self, id: &K) -> &[K] {
        self.nodes
            .get(id)
            .map(|entry| entry.dependencies.as_slice())
            .unwrap_or(&[])
    }

    /// Nodes waiting on `id`, in edge insertion order.
    pub fn dependents(&self, id: &K) -> &[K] {
        self.nodes
            .get(id)
            .map(|entry| entry.dependents.as_slice())
            .unwrap_or(&[])
    }

    /// Nodes with no dependencies.
    pub fn roots(&self) -> Vec<K> {
        let mut roots: Vec<K> = self
            .nodes
            .iter()
            .filter(|(_, entry)| entry.dependencies.is_empty())
            .map(|(id, _)| *id)
            .collect();
        self.sort_canonical(&mut roots);
        roots
    }

    /// Nodes nothing depends on.
    pub fn sinks(&self) -> Vec<K> {
        let mut sinks: Vec<K> = self
            .nodes
            .iter()
            .filter(|(_, entry)| entry.dependents.is_empty())
            .map(|(id, _)| *id)
            .collect();
        self.sort_canonical(&mut sinks);
        sinks
    }

    /// Whether a directed path `from ->* to` exists (a node reaches itself).
    pub fn reaches(&self, from: &K, to: &K) -> bool {
        if from == to {
            return self.nodes.contains_key(from);
        }
        let mut visited: HashSet<K> = HashSet::new();
        let mut stack = vec![*from];
        while let Some(current) = stack.pop() {
            for next in self.dependents(&current) {
                if next == to {
                    return true;
                }
                if visited.insert(*next) {
                    stack.push(*next);
                }
            }
        }
        false
    }

    /// Every node `id` transitively depends on (excluding `id`).
    pub fn ancestors(&self, id: &K) -> HashSet<K> {
        let mut seen: HashSet<K> = HashSet::new();
        let mut stack: Vec<K> = self.dependencies(id).to_vec();
        while let Some(current) = stack.pop() {
            if seen.insert(current) {
                stack.extend_from_slice(self.dependencies(&current));
            }
        }
        seen
    }

    /// Kahn's algorithm grouped into levels.
    pub fn topological_levels(&self) -> LevelSchedule<K> {
        crate::algorithms::kahns::topological_levels(self)
    }

    /// Number of nodes on a longest dependency chain.
    pub fn critical_path_length(&self) -> usize {
        self.critical_path().len()
    }

    /// Nodes of a longest dependency chain, first to last.
    pub fn critical_path(&self) -> Vec<K> {
        crate::algorithms::critical_path::longest_chain(self)
    }

    /// Nodes with `threshold` or more dependents or dependencies.
    pub fn bottlenecks(&self, threshold: usize) -> Vec<crate::algorithms::Bottleneck<K>> {
        crate::algorithms::bottlenecks::find_bottlenecks(self, threshold)
    }

    pub fn parallelization_gain(&self) -> ParallelizationGain {
        let schedule = self.topological_levels();
        let sequential_steps = schedule.total_nodes;
        let parallel_steps = schedule.len();
        ParallelizationGain {
            sequential_steps,
            parallel_steps,
            speedup: schedule.speedup_estimate(),
        }
    }

    /// Iterate over all node ids (arbitrary order).
    pub fn node_ids(&self) -> impl Iterator<Item = &K> {
        self.nodes.keys()
    }

    /// Sort by `(insertion_sequence, id)`.
    pub fn sort_canonical(&self, ids: &mut [K]) {
        ids.sort_by_key(|id| (self.insertion_sequence(id).unwrap_or(u64::MAX), *id));
    }

    fn require(&self, id: &K) -> GraphResult<()> {
        if self.nodes.contains_key(id) {
            Ok(())
        } else {
            Err(GraphError::UnknownNode(id.label()))
        }
    }

    fn link(&mut self, from: K, to: K) {
        if let Some(entry) = self.nodes.get_mut(&from) {
            entry.dependents.push(to);
        }
        if let Some(entry) = self.nodes.get_mut(&to) {
            entry.dependencies.push(from);
        }
        self.edge_count += 1;
    }
}

fn cycle<K: NodeKey>(from: K, to: K) -> GraphError {
    GraphError::Cycle(CycleError {
        from: from.label(),
        to: to.label(),
    })
}
