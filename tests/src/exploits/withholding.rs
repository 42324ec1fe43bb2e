//! Block withholding: the adversary extends a private chain from genesis
//! while the honest network extends the public one, then publishes the
//! whole private chain in one burst.
//!
//! Each private block's anticone contains the honest blocks built in the
//! meantime, so beyond the first one the private chain exceeds `k` and is
//! classified red.

#[cfg(test)]
mod tests {
    use crate::fixtures::consensus_config;
    use node_runtime::{DagNode, NodeConfig};
    use nx_02_blockdag_consensus::{AttackSeverity, Block, Classification};
    use shared_types::BlockId;

    const DEPTH: usize = 6;

    fn node(k: usize) -> DagNode {
        DagNode::new(&NodeConfig {
            consensus: consensus_config(k, 1_000),
            ..NodeConfig::default()
        })
    }

    /// Honest chain of `DEPTH` blocks over genesis, weight 2.
    fn honest_chain(node: &DagNode, genesis: BlockId) -> Vec<BlockId> {
        let mut tip = genesis;
        (0..DEPTH)
            .map(|_| {
                tip = node.ingest_block(vec![tip], vec![], 2).unwrap();
                tip
            })
            .collect()
    }

    /// Private chain of `DEPTH` blocks over genesis, weight 1.
    fn private_chain(genesis: BlockId) -> Vec<Block> {
        let mut tip = genesis;
        (0..DEPTH)
            .map(|i| {
                let block = Block::new(vec![tip], vec![], 1, 10_000 + i as u64);
                tip = block.id;
                block
            })
            .collect()
    }

    #[test]
    fn test_honest_chain_raises_nothing() {
        let node = node(1);
        let g = node.ingest_block(vec![], vec![], 1).unwrap();
        honest_chain(&node, g);

        let report = node.detect_attack();
        assert_eq!(report.red_blocks, 0);
        assert_eq!(report.severity, AttackSeverity::None);
        assert!(!report.attack_detected);
    }

    #[test]
    fn test_released_private_chain_is_red() {
        let node = node(1);
        let g = node.ingest_block(vec![], vec![], 1).unwrap();
        let honest = honest_chain(&node, g);
        let private = private_chain(g);
        let private_ids: Vec<BlockId> = private.iter().map(|b| b.id).collect();

        // released in reverse: everything but the first buffers, then cascades
        for block in private.into_iter().rev() {
            node.submit_block(block).unwrap();
        }
        assert!(node.dag_snapshot().pending.is_empty());

        for id in &honest {
            assert_eq!(node.get_classification(id), Ok(Classification::Blue));
        }
        for id in &private_ids[1..] {
            assert_eq!(node.get_classification(id), Ok(Classification::Red));
        }
        let order = node.get_total_order();
        assert!(private_ids[1..].iter().all(|id| !order.contains(id)));

        let report = node.detect_attack();
        assert_eq!(report.red_blocks, DEPTH - 1);
        assert_eq!(report.severity, AttackSeverity::High);
        assert!(report.attack_detected);
    }

    #[test]
    fn test_honest_chain_keeps_growing_after_release() {
        let node = node(1);
        let g = node.ingest_block(vec![], vec![], 1).unwrap();
        let honest = honest_chain(&node, g);
        for block in private_chain(g) {
            node.submit_block(block).unwrap();
        }

        let Some(tip) = honest.last().copied() else {
            panic!("honest chain is empty");
        };
        let next = node.ingest_block(vec![tip], vec![], 2).unwrap();
        assert_eq!(node.get_classification(&next), Ok(Classification::Blue));
        assert_eq!(node.get_total_order().last(), Some(&next));
    }
}
