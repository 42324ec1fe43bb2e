//! In-memory block DAG.
//!
//! Append-only: blocks are inserted once their parents are present and are
//! never removed. Each entry caches its height (longest path from genesis,
//! equal to its Kahn level). Ancestry is answered by walking parent links
//! downward and stopping at a height floor, so a query only touches the
//! height band it asks about.

use super::block::Block;
use super::classification::{BlockState, Classification};
use super::errors::{ConsensusError, ConsensusResult};
use nx_01_dependency_graph::DependencyGraph;
use shared_types::BlockId;
use std::collections::{BTreeSet, HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct BlockEntry {
    pub block: Block,
    pub height: u64,
    /// Ingestion sequence number
    pub arrival: u64,
    /// `None` until the first classification pass sees the block
    pub label: Option<Classification>,
    /// Blue blocks in the block's past
    pub blue_score: u64,
    pub finalized: bool,
}

impl BlockEntry {
    pub fn state(&self) -> BlockState {
        match (self.finalized, self.label) {
            (true, _) => BlockState::Finalized,
            (false, Some(_)) => BlockState::Classified,
            (false, None) => BlockState::Ingested,
        }
    }
}

#[derive(Debug, Default)]
pub struct DagStore {
    graph: DependencyGraph<BlockId>,
    entries: HashMap<BlockId, BlockEntry>,
    tips: BTreeSet<BlockId>,
    genesis: Option<BlockId>,
    max_height: u64,
    next_arrival: u64,
}

impl DagStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn get(&self, id: &BlockId) -> Option<&BlockEntry> {
        self.entries.get(id)
    }

    pub(crate) fn get_mut(&mut self, id: &BlockId) -> Option<&mut BlockEntry> {
        self.entries.get_mut(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn genesis(&self) -> Option<BlockId> {
        self.genesis
    }

    pub fn max_height(&self) -> u64 {
        self.max_height
    }

    /// Blocks with no known child, in id order.
    pub fn tips(&self) -> Vec<BlockId> {
        self.tips.iter().copied().collect()
    }

    pub fn tip_count(&self) -> usize {
        self.tips.len()
    }

    pub fn graph(&self) -> &DependencyGraph<BlockId> {
        &self.graph
    }

    pub fn entries(&self) -> impl Iterator<Item = &BlockEntry> {
        self.entries.values()
    }

    /// Parents of `block` not yet in the store.
    pub fn missing_parents(&self, block: &Block) -> Vec<BlockId> {
        block
            .parents
            .iter()
            .filter(|parent| !self.entries.contains_key(*parent))
            .copied()
            .collect()
    }

    /// Ancestors of `id` with height at or above `floor`.
    pub fn past_within(&self, id: &BlockId, floor: u64) -> HashSet<BlockId> {
        let mut seen: HashSet<BlockId> = HashSet::new();
        let mut stack: Vec<BlockId> = match self.entries.get(id) {
            Some(entry) => entry.block.parents.clone(),
            None => return seen,
        };
        while let Some(current) = stack.pop() {
            let Some(entry) = self.entries.get(&current) else {
                continue;
            };
            if entry.height < floor || !seen.insert(current) {
                continue;
            }
            stack.extend_from_slice(&entry.block.parents);
        }
        seen
    }

    /// Whether `ancestor` is in the past of `descendant`.
    pub fn is_ancestor(&self, ancestor: &BlockId, descendant: &BlockId) -> bool {
        match (self.entries.get(ancestor), self.entries.get(descendant)) {
            (Some(a), Some(d)) if a.height < d.height => {
                self.past_within(descendant, a.height).contains(ancestor)
            }
            _ => false,
        }
    }

    /// Insert a block whose parents are all present.
    ///
    /// A parentless block becomes genesis if none exists yet.
    pub fn insert(&mut self, block: Block) -> ConsensusResult<&BlockEntry> {
        let id = block.id;
        if block.is_genesis() {
            if let Some(existing) = self.genesis {
                return Err(ConsensusError::DuplicateGenesis { existing });
            }
        }

        self.graph
            .add_node_with_dependencies(id, &block.parents)
            .map_err(|err| ConsensusError::from_graph(id, err))?;

        let mut height = 0;
        for parent in &block.parents {
            if let Some(entry) = self.entries.get(parent) {
                height = height.max(entry.height + 1);
            }
            self.tips.remove(parent);
        }

        if block.is_genesis() {
            self.genesis = Some(id);
        }
        self.tips.insert(id);
        self.max_height = self.max_height.max(height);

        let arrival = self.next_arrival;
        self.next_arrival += 1;
        let entry = BlockEntry {
            block,
            height,
            arrival,
            label: None,
            blue_score: 0,
            finalized: false,
        };
        Ok(self.entries.entry(id).or_insert(entry))
    }
}
