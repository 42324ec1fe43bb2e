//! Orphan pool for blocks with missing parents
//!
//! Pending blocks are tracked in a wait graph with an edge
//! `missing_parent -> child`. Missing parents that are not themselves
//! pending appear as placeholder nodes. When a block is ingested its
//! waiting children lose one missing parent; children with none left are
//! released for ingestion.

use super::block::Block;
use nx_01_dependency_graph::{CycleError, DependencyGraph, GraphError, GraphResult, NodeKey};
use shared_types::BlockId;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct PendingBlock {
    pub block: Block,
    pub missing: HashSet<BlockId>,
    /// Round in which the block was buffered
    pub buffered_round: u64,
}

#[derive(Debug, Default)]
pub struct OrphanPool {
    pending: HashMap<BlockId, PendingBlock>,
    waits: DependencyGraph<BlockId>,
}

impl OrphanPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.pending.contains_key(id)
    }

    pub fn get(&self, id: &BlockId) -> Option<&PendingBlock> {
        self.pending.get(id)
    }

    /// Pending ids ordered by `(buffered_round, id)`.
    pub fn pending_ids(&self) -> Vec<BlockId> {
        let mut ids: Vec<(u64, BlockId)> = self
            .pending
            .values()
            .map(|p| (p.buffered_round, p.block.id))
            .collect();
        ids.sort_unstable();
        ids.into_iter().map(|(_, id)| id).collect()
    }

    /// Buffer `block` until `missing` are ingested.
    ///
    /// Fails if a wait edge would close a cycle; the pool is unchanged in
    /// that case.
    pub fn insert(&mut self, block: Block, missing: Vec<BlockId>, round: u64) -> GraphResult<()> {
        let id = block.id;
        if let Some(parent) = missing
            .iter()
            .find(|parent| **parent == id || self.waits.reaches(&id, parent))
        {
            return Err(GraphError::Cycle(CycleError {
                from: parent.label(),
                to: id.label(),
            }));
        }

        self.waits.add_node(id);
        for parent in &missing {
            self.waits.add_node(*parent);
            self.waits.add_edge(*parent, id)?;
        }

        self.pending.insert(
            id,
            PendingBlock {
                block,
                missing: missing.into_iter().collect(),
                buffered_round: round,
            },
        );
        Ok(())
    }

    /// `parent` has been ingested. Returns children that no longer miss
    /// any parent, ordered by `(buffered_round, id)`.
    pub fn release(&mut self, parent: &BlockId) -> Vec<PendingBlock> {
        let children: Vec<BlockId> = self.waits.dependents(parent).to_vec();
        self.waits.remove_node(parent);

        let mut ready: Vec<PendingBlock> = Vec::new();
        for child in children {
            let Some(pending) = self.pending.get_mut(&child) else {
                continue;
            };
            pending.missing.remove(parent);
            if pending.missing.is_empty() {
                if let Some(done) = self.pending.remove(&child) {
                    ready.push(done);
                }
            }
        }
        ready.sort_by_key(|p| (p.buffered_round, p.block.id));
        ready
    }

    /// Remove every block buffered for `timeout` rounds or more, together
    /// with the pending blocks waiting on them.
    pub fn evict_expired(&mut self, round: u64, timeout: u64) -> Vec<PendingBlock> {
        let mut queue: Vec<BlockId> = self
            .pending_ids()
            .into_iter()
            .filter(|id| {
                self.pending
                    .get(id)
                    .is_some_and(|p| round.saturating_sub(p.buffered_round) >= timeout)
            })
            .collect();

        let mut evicted: Vec<PendingBlock> = Vec::new();
        while let Some(id) = queue.pop() {
            let Some(pending) = self.pending.remove(&id) else {
                continue;
            };
            let mut waiting: Vec<BlockId> = self
                .waits
                .dependents(&id)
                .iter()
                .filter(|child| self.pending.contains_key(*child))
                .copied()
                .collect();
            waiting.sort_unstable();
            queue.extend(waiting);

            self.waits.remove_node(&id);
            for parent in &pending.missing {
                self.drop_placeholder(parent);
            }
            evicted.push(pending);
        }
        evicted.sort_by_key(|p| (p.buffered_round, p.block.id));
        evicted
    }

    /// Forget a node that is neither pending nor waited on.
    fn drop_placeholder(&mut self, id: &BlockId) {
        if !self.pending.contains_key(id) && self.waits.dependents(id).is_empty() {
            self.waits.remove_node(id);
        }
    }
}
