//! Blue/red classification.
//!
//! Blocks are visited ancestors-first: by height (Kahn level), then by the
//! configured tie-break. A block is blue iff at most `k` blocks already in
//! the blue set are in its anticone, i.e. are neither its ancestors nor its
//! descendants.
//!
//! Concurrency is tracked inside a window of `window` levels below each
//! block. Blue blocks deeper than that are counted as its past, which keeps
//! a pass proportional to the live region rather than to the whole DAG.

use crate::config::TieBreakPolicy;
use crate::domain::blue_set::FrozenBlueSet;
use crate::domain::classification::Classification;
use crate::domain::dag_store::{BlockEntry, DagStore};
use shared_types::BlockId;
use std::cmp::{Ordering, Reverse};
use std::collections::HashSet;

/// Label assigned to one block by a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub block: BlockId,
    pub label: Classification,
    pub blue_score: u64,
}

/// Compare two entries in classification order.
pub fn compare(a: &BlockEntry, b: &BlockEntry, policy: TieBreakPolicy) -> Ordering {
    let primary = (a.height, Reverse(a.block.proposer_weight))
        .cmp(&(b.height, Reverse(b.block.proposer_weight)));
    primary.then_with(|| match policy {
        TieBreakPolicy::WeightThenId => a.block.id.cmp(&b.block.id),
        TieBreakPolicy::WeightThenArrival => a.arrival.cmp(&b.arrival),
    })
}

/// Sort ids in classification order. Unknown ids are dropped.
pub fn order_blocks(store: &DagStore, ids: &[BlockId], policy: TieBreakPolicy) -> Vec<BlockId> {
    let mut entries: Vec<&BlockEntry> = ids.iter().filter_map(|id| store.get(id)).collect();
    entries.sort_by(|a, b| compare(a, b, policy));
    entries.into_iter().map(|entry| entry.block.id).collect()
}

/// Blue blocks admitted during the current pass, in admission order.
#[derive(Debug, Default)]
struct PassBlue {
    members: HashSet<BlockId>,
    by_height: Vec<(u64, BlockId)>,
}

impl PassBlue {
    fn insert(&mut self, id: BlockId, height: u64) {
        self.members.insert(id);
        self.by_height.push((height, id));
    }

    fn contains(&self, id: &BlockId) -> bool {
        self.members.contains(id)
    }

    fn count_below(&self, height: u64) -> u64 {
        self.by_height.partition_point(|(h, _)| *h < height) as u64
    }

    fn from_height(&self, height: u64) -> impl Iterator<Item = &BlockId> + '_ {
        let start = self.by_height.partition_point(|(h, _)| *h < height);
        self.by_height[start..].iter().map(|(_, id)| id)
    }
}

/// Number of `candidates` outside `past` (and other than `id`), counting
/// no further than `limit + 1`.
///
/// Candidates must not descend from `id`; a pass only offers blocks that
/// entered the blue set before `id` was visited.
pub fn blue_anticone_size<'a>(
    id: &BlockId,
    past: &HashSet<BlockId>,
    candidates: impl IntoIterator<Item = &'a BlockId>,
    limit: usize,
) -> usize {
    let mut count = 0;
    for candidate in candidates {
        if candidate == id || past.contains(candidate) {
            continue;
        }
        count += 1;
        if count > limit {
            break;
        }
    }
    count
}

/// Classify `ordered` (already in classification order) on top of the
/// `frozen` blue set.
pub fn classify(
    store: &DagStore,
    frozen: &FrozenBlueSet,
    ordered: &[BlockId],
    k: usize,
    window: u64,
) -> Vec<Verdict> {
    let mut blue = PassBlue::default();
    let mut verdicts = Vec::with_capacity(ordered.len());

    for id in ordered {
        let Some(entry) = store.get(id) else {
            continue;
        };
        let floor = entry.height.saturating_sub(window);
        let past = store.past_within(id, floor);

        let blue_in_band = past
            .iter()
            .filter(|p| frozen.contains(p) || blue.contains(p))
            .count() as u64;
        let blue_score = frozen.count_below(floor) + blue.count_below(floor) + blue_in_band;

        let candidates = frozen.from_height(floor).chain(blue.from_height(floor));
        let label = if blue_anticone_size(id, &past, candidates, k) <= k {
            blue.insert(*id, entry.height);
            Classification::Blue
        } else {
            Classification::Red
        };
        verdicts.push(Verdict {
            block: *id,
            label,
            blue_score,
        });
    }
    verdicts
}
