//! # Consensus Flows
//!
//! Block ingestion as seen by a collaborator of `DagNode`: only the
//! external operations are used (`ingest_block`, `submit_block`,
//! `get_total_order`, `get_classification`, `block_state`).

#[cfg(test)]
mod tests {
    use crate::fixtures::consensus_config;
    use node_runtime::{DagNode, NodeConfig, NodeEvent};
    use nx_02_blockdag_consensus::{
        Block, BlockState, Classification, ConsensusConfig, ConsensusError, ConsensusEvent,
        TieBreakPolicy,
    };
    use shared_types::BlockId;

    fn node(consensus: ConsensusConfig) -> DagNode {
        DagNode::new(&NodeConfig {
            consensus,
            ..NodeConfig::default()
        })
    }

    fn arrival_ordered(k: usize) -> DagNode {
        node(ConsensusConfig {
            tie_break: TieBreakPolicy::WeightThenArrival,
            ..consensus_config(k, 100)
        })
    }

    fn blue_count(node: &DagNode, ids: &[BlockId]) -> usize {
        ids.iter()
            .filter(|id| node.get_classification(id) == Ok(Classification::Blue))
            .count()
    }

    // =========================================================================
    // GENESIS
    // =========================================================================

    #[test]
    fn test_second_genesis_rejected() {
        let node = node(consensus_config(3, 6));
        let g = node.ingest_block(vec![], vec![], 1).unwrap();
        assert_eq!(node.get_classification(&g), Ok(Classification::Blue));

        let err = node.ingest_block(vec![], vec![], 9).unwrap_err();
        assert_eq!(err, ConsensusError::DuplicateGenesis { existing: g });
        assert_eq!(node.get_total_order(), vec![g]);

        let rejected = node.rejected_blocks();
        assert_eq!(rejected.len(), 1);
        assert!(node.drain_events().iter().any(|event| matches!(
            event,
            NodeEvent::Consensus(ConsensusEvent::BlockRejected { .. })
        )));
    }

    // =========================================================================
    // K-BOUND
    // =========================================================================

    #[test]
    fn test_three_concurrent_blue_fourth_red() {
        let node = arrival_ordered(2);
        let g = node.ingest_block(vec![], vec![], 1).unwrap();
        let siblings: Vec<BlockId> = (0..3)
            .map(|_| node.ingest_block(vec![g], vec![], 1).unwrap())
            .collect();
        assert_eq!(blue_count(&node, &siblings), 3);

        let b4 = node.ingest_block(vec![g], vec![], 1).unwrap();
        assert_eq!(node.get_classification(&b4), Ok(Classification::Red));
        assert!(!node.get_total_order().contains(&b4));
        assert_eq!(node.get_total_order().len(), 4);
    }

    #[test]
    fn test_anticone_bound_for_each_k() {
        for k in 0..5 {
            let node = arrival_ordered(k);
            let g = node.ingest_block(vec![], vec![], 1).unwrap();
            let peers: Vec<BlockId> = (0..k)
                .map(|_| node.ingest_block(vec![g], vec![], 1).unwrap())
                .collect();

            // anticone of size k: still blue
            let at_bound = node.ingest_block(vec![g], vec![], 1).unwrap();
            assert_eq!(node.get_classification(&at_bound), Ok(Classification::Blue), "k = {k}");
            assert_eq!(blue_count(&node, &peers), k);

            // anticone of size k + 1: red
            let over = node.ingest_block(vec![g], vec![], 1).unwrap();
            assert_eq!(node.get_classification(&over), Ok(Classification::Red), "k = {k}");
        }
    }

    #[test]
    fn test_heavier_block_wins_the_bound() {
        let node = node(consensus_config(1, 100));
        let g = node.ingest_block(vec![], vec![], 1).unwrap();
        let light: Vec<BlockId> = (0..2)
            .map(|_| node.ingest_block(vec![g], vec![], 1).unwrap())
            .collect();
        let heavy = node.ingest_block(vec![g], vec![], 10).unwrap();

        assert_eq!(node.get_classification(&heavy), Ok(Classification::Blue));
        assert_eq!(blue_count(&node, &light), 1);
        assert_eq!(node.get_total_order()[1], heavy);
    }

    #[test]
    fn test_merge_block_is_blue() {
        let node = node(consensus_config(3, 100));
        let g = node.ingest_block(vec![], vec![], 1).unwrap();
        let a = node.ingest_block(vec![g], vec![], 1).unwrap();
        let b = node.ingest_block(vec![g], vec![], 1).unwrap();
        let m = node.ingest_block(vec![a, b], vec![], 1).unwrap();

        assert_eq!(node.get_classification(&m), Ok(Classification::Blue));
        assert_eq!(node.get_total_order().last(), Some(&m));
        assert_eq!(node.dag_snapshot().tips, vec![m]);
    }

    // =========================================================================
    // ORPHANS
    // =========================================================================

    #[test]
    fn test_orphan_connects_in_the_parent_round() {
        let node = node(consensus_config(3, 100));
        let g = Block::new(vec![], vec![], 1, 0);
        let a = Block::new(vec![g.id], vec![], 1, 1);
        let b = Block::new(vec![a.id], vec![], 1, 2);
        let (a_id, b_id) = (a.id, b.id);

        node.submit_block(g).unwrap();
        node.submit_block(b).unwrap();
        assert_eq!(node.block_state(&b_id), Ok(BlockState::Pending));
        assert_eq!(node.get_classification(&b_id), Ok(Classification::Pending));
        assert_eq!(node.dag_snapshot().pending, vec![b_id]);

        node.submit_block(a).unwrap();
        assert_eq!(node.block_state(&b_id), Ok(BlockState::Classified));
        assert_eq!(node.get_total_order()[1..], [a_id, b_id]);
        assert!(node.dag_snapshot().pending.is_empty());
    }

    #[test]
    fn test_orphan_evicted_and_reported() {
        let node = node(ConsensusConfig {
            orphan_timeout_rounds: 3,
            ..consensus_config(3, 100)
        });
        let g = node.ingest_block(vec![], vec![], 1).unwrap();
        let ghost = Block::new(vec![g], vec![], 7, 999).id;
        let orphan = node.ingest_block(vec![ghost], vec![], 1).unwrap();

        node.ingest_block(vec![g], vec![], 1).unwrap();
        node.ingest_block(vec![g], vec![], 2).unwrap();
        assert_eq!(node.block_state(&orphan), Ok(BlockState::Pending));

        node.ingest_block(vec![g], vec![], 3).unwrap();
        assert_eq!(node.get_classification(&orphan), Err(ConsensusError::UnknownBlock(orphan)));
        assert!(node
            .rejected_blocks()
            .iter()
            .any(|(id, reason)| *id == orphan && matches!(reason, ConsensusError::OrphanTimeout { .. })));
        assert!(node.drain_events().iter().any(|event| matches!(
            event,
            NodeEvent::Consensus(ConsensusEvent::OrphanEvicted { block, .. }) if *block == orphan
        )));
    }

    #[test]
    fn test_tampered_parent_list_rejected() {
        let node = node(consensus_config(3, 6));
        let g = node.ingest_block(vec![], vec![], 1).unwrap();
        let mut block = Block::new(vec![g], vec![], 1, 50);
        block.parents.push(block.id);
        let err = node.submit_block(block).unwrap_err();
        assert!(matches!(err, ConsensusError::IdMismatch(_)));
        assert_eq!(node.get_total_order(), vec![g]);
    }

    // =========================================================================
    // FINALITY
    // =========================================================================

    #[test]
    fn test_finalized_prefix_is_stable() {
        let node = node(consensus_config(1, 2));
        let g = node.ingest_block(vec![], vec![], 1).unwrap();
        let mut tip = g;
        for _ in 0..4 {
            tip = node.ingest_block(vec![tip], vec![], 1).unwrap();
        }
        let before = node.get_total_order();
        assert_eq!(node.block_state(&g), Ok(BlockState::Finalized));

        // a heavy late sibling of genesis' child cannot displace finalized blocks
        node.ingest_block(vec![g], vec![], 100).unwrap();
        let after = node.get_total_order();
        assert_eq!(after[..3], before[..3]);
    }
}
