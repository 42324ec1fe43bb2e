//! Finalized blue blocks, indexed by height.
//!
//! Classification only inspects frozen blue blocks inside a block's
//! concurrency window, so lookups go by height range; everything deeper is
//! summarized by a per-height running count.

use shared_types::BlockId;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct FrozenBlueSet {
    by_height: BTreeMap<u64, Vec<BlockId>>,
    members: HashSet<BlockId>,
    /// `below[h]` counts members with height < h
    below: Vec<u64>,
}

impl FrozenBlueSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Freeze `id` at `height`. Returns `false` if it was already frozen.
    pub fn insert(&mut self, id: BlockId, height: u64) -> bool {
        if !self.members.insert(id) {
            return false;
        }
        let before = self.members.len() as u64 - 1;
        let slot = height as usize;
        if self.below.len() < slot + 2 {
            self.below.resize(slot + 2, before);
        }
        for count in &mut self.below[slot + 1..] {
            *count += 1;
        }
        self.by_height.entry(height).or_default().push(id);
        true
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.members.contains(id)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members strictly below `height`.
    pub fn count_below(&self, height: u64) -> u64 {
        self.below
            .get(height as usize)
            .copied()
            .unwrap_or(self.members.len() as u64)
    }

    /// Members at or above `height`, lowest first.
    pub fn from_height(&self, height: u64) -> impl Iterator<Item = &BlockId> + '_ {
        self.by_height.range(height..).flat_map(|(_, ids)| ids.iter())
    }
}
