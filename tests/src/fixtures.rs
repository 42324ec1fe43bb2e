//! Shared generators for the test suite and the benchmarks.

use nx_02_blockdag_consensus::{Block, ConsensusConfig, TieBreakPolicy};
use nx_03_transaction_executor::Ledger;
use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};
use shared_types::{address_from_u64, BlockId, Transaction};

/// Consensus config with orphan eviction effectively disabled.
pub fn consensus_config(k: usize, finality_depth: u64) -> ConsensusConfig {
    ConsensusConfig {
        k,
        finality_depth,
        orphan_timeout_rounds: 10_000,
        tie_break: TieBreakPolicy::WeightThenId,
        ..ConsensusConfig::default()
    }
}

/// A random DAG rooted at one genesis, as self-verifying blocks listed
/// parents-first. Block `i` picks between one and `max_parents` parents
/// among the previous `window` blocks.
pub fn random_dag(seed: u64, blocks: usize, max_parents: usize, window: usize) -> Vec<Block> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out: Vec<Block> = Vec::with_capacity(blocks);
    if blocks == 0 {
        return out;
    }
    out.push(Block::new(vec![], vec![], 1, 0));
    for i in 1..blocks {
        let start = i.saturating_sub(window.max(1));
        let span = i - start;
        let count = rng.gen_range(1..=max_parents.max(1).min(span));
        let parents: Vec<BlockId> = sample(&mut rng, span, count)
            .into_iter()
            .map(|offset| out[start + offset].id)
            .collect();
        let weight = rng.gen_range(1..=4);
        out.push(Block::new(parents, vec![], weight, i as u64));
    }
    out
}

/// `count` random transfers among accounts `1..=accounts`, with nonces
/// drawn from a small range so that replays and gaps both occur.
pub fn random_transfers(seed: u64, accounts: u64, count: usize) -> Vec<Transaction> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let sender = rng.gen_range(1..=accounts);
            let receiver = rng.gen_range(1..=accounts);
            Transaction::new(
                address_from_u64(sender),
                address_from_u64(receiver),
                rng.gen_range(0..60),
                rng.gen_range(0..6),
            )
        })
        .collect()
}

/// Ledger crediting `balance` to each of accounts `1..=accounts`.
pub fn funded_ledger(accounts: u64, balance: u64) -> Ledger {
    Ledger::with_genesis((1..=accounts).map(|n| (address_from_u64(n), balance)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_dag_is_parents_first() {
        let blocks = random_dag(7, 40, 3, 5);
        assert_eq!(blocks.len(), 40);
        assert!(blocks[0].is_genesis());
        for (i, block) in blocks.iter().enumerate().skip(1) {
            assert!(!block.parents.is_empty());
            assert!(block
                .parents
                .iter()
                .all(|p| blocks[..i].iter().any(|b| b.id == *p)));
        }
    }

    #[test]
    fn test_generators_are_seeded() {
        assert_eq!(random_transfers(3, 4, 20), random_transfers(3, 4, 20));
        let a: Vec<_> = random_dag(3, 10, 2, 4).into_iter().map(|b| b.id).collect();
        let b: Vec<_> = random_dag(3, 10, 2, 4).into_iter().map(|b| b.id).collect();
        assert_eq!(a, b);
    }
}
