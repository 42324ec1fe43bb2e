//! Concurrency flooding: one proposer publishes many blocks on the same
//! parent, hoping to crowd the blue set.
//!
//! Honest concurrency stays within `k` and merges back; the flood exceeds
//! it and everything past the bound is red.

#[cfg(test)]
mod tests {
    use crate::fixtures::consensus_config;
    use node_runtime::{DagNode, NodeConfig};
    use nx_02_blockdag_consensus::{AttackSeverity, Classification, ConsensusConfig, TieBreakPolicy};
    use shared_types::BlockId;

    fn node(k: usize) -> DagNode {
        DagNode::new(&NodeConfig {
            consensus: ConsensusConfig {
                tie_break: TieBreakPolicy::WeightThenArrival,
                ..consensus_config(k, 1_000)
            },
            ..NodeConfig::default()
        })
    }

    #[test]
    fn test_paired_honest_blocks_stay_blue() {
        let node = node(3);
        let g = node.ingest_block(vec![], vec![], 1).unwrap();
        let mut tips = vec![g];
        for _ in 0..8 {
            let x = node.ingest_block(tips.clone(), vec![], 1).unwrap();
            let y = node.ingest_block(tips.clone(), vec![], 1).unwrap();
            tips = vec![x, y];
        }

        let report = node.detect_attack();
        assert_eq!(report.red_blocks, 0);
        assert_eq!(report.total_blocks, 17);
        assert!(!report.attack_detected);
    }

    #[test]
    fn test_flood_past_the_bound_is_red() {
        let node = node(2);
        let g = node.ingest_block(vec![], vec![], 1).unwrap();
        let flood: Vec<BlockId> = (0..10)
            .map(|_| node.ingest_block(vec![g], vec![], 1).unwrap())
            .collect();

        let blue = flood
            .iter()
            .filter(|id| node.get_classification(id) == Ok(Classification::Blue))
            .count();
        assert_eq!(blue, 3);
        assert_eq!(node.get_total_order().len(), 4);

        let report = node.detect_attack();
        assert_eq!(report.red_blocks, 7);
        assert_eq!(report.severity, AttackSeverity::High);
    }

    #[test]
    fn test_heavier_honest_block_keeps_its_place() {
        let node = node(1);
        let g = node.ingest_block(vec![], vec![], 1).unwrap();
        let flood: Vec<BlockId> = (0..4)
            .map(|_| node.ingest_block(vec![g], vec![], 1).unwrap())
            .collect();
        let honest = node.ingest_block(vec![g], vec![], 50).unwrap();

        assert_eq!(node.get_classification(&honest), Ok(Classification::Blue));
        assert_eq!(node.get_total_order()[1], honest);
        assert_eq!(
            flood
                .iter()
                .filter(|id| node.get_classification(id) == Ok(Classification::Red))
                .count(),
            3
        );
    }
}
