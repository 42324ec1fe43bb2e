//! # Execution Flows
//!
//! Transfer batches through the executor directly and as block payloads
//! applied by `DagNode` once their block is finalized blue.

#[cfg(test)]
mod tests {
    use crate::fixtures::consensus_config;
    use node_runtime::{DagNode, GenesisAllocation, NodeConfig, NodeEvent};
    use nx_03_transaction_executor::{
        ExecutionStrategy, ExecutorConfig, FailureReason, Ledger, TransactionExecutor,
        TransferExecutionApi,
    };
    use shared_types::{address_from_u64, Transaction};

    const A: u64 = 1;
    const B: u64 = 2;
    const C: u64 = 3;
    const D: u64 = 4;

    fn pay(from: u64, to: u64, amount: u64, nonce: u64) -> Transaction {
        Transaction::new(address_from_u64(from), address_from_u64(to), amount, nonce)
    }

    fn balance_of(node: &DagNode, account: u64) -> u64 {
        node.get_balance(&address_from_u64(account))
    }

    fn node(finality_depth: u64, allocations: Vec<GenesisAllocation>) -> DagNode {
        DagNode::new(&NodeConfig {
            consensus: consensus_config(3, finality_depth),
            genesis_allocations: allocations,
            ..NodeConfig::default()
        })
    }

    fn two_level_batch() -> Vec<Transaction> {
        vec![pay(A, B, 10, 0), pay(C, D, 5, 0), pay(B, C, 3, 0)]
    }

    #[test]
    fn test_two_level_batch_every_strategy() {
        for strategy in [
            ExecutionStrategy::Sequential,
            ExecutionStrategy::DagOptimized,
            ExecutionStrategy::Vectorized,
        ] {
            let ledger = Ledger::with_genesis([(address_from_u64(A), 20)]);
            let mut executor = TransactionExecutor::with_ledger(
                ExecutorConfig {
                    strategy,
                    ..ExecutorConfig::default()
                },
                ledger,
            );
            let batch = two_level_batch();
            let report = executor.ingest_transaction_batch(&batch).unwrap();

            let balances: Vec<u64> = [A, B, C, D]
                .iter()
                .map(|n| executor.get_balance(&address_from_u64(*n)))
                .collect();
            assert_eq!(balances, vec![10, 7, 3, 0], "{strategy}");
            assert_eq!(report.failed, vec![(batch[1].id, FailureReason::InsufficientBalance)]);
            assert_eq!(report.parallelism_stats.levels, 2);
            assert_eq!(report.parallelism_stats.max_level_width, 2);
        }
    }

    #[test]
    fn test_block_payload_applied_on_finality() {
        let node = node(1, vec![GenesisAllocation::new(A, 20)]);
        let g = node.ingest_block(vec![], vec![], 1).unwrap();
        let payload = node.ingest_block(vec![g], two_level_batch(), 1).unwrap();
        assert_eq!(balance_of(&node, B), 0);
        assert!(node.get_parallelism_stats(&payload).is_none());

        node.ingest_block(vec![payload], vec![], 1).unwrap();
        assert_eq!(
            [A, B, C, D].map(|n| balance_of(&node, n)),
            [10, 7, 3, 0]
        );
        let stats = node.get_parallelism_stats(&payload).unwrap();
        assert_eq!(stats.levels, 2);
        assert_eq!(node.execution_report(&payload).unwrap().failed.len(), 1);
    }

    #[test]
    fn test_reused_nonce_rejected_siblings_apply() {
        let node = node(0, vec![GenesisAllocation::new(A, 50), GenesisAllocation::new(C, 50)]);
        let g = node.ingest_block(vec![], vec![pay(A, B, 5, 3)], 1).unwrap();
        let next = node
            .ingest_block(vec![g], vec![pay(A, B, 7, 3), pay(C, D, 9, 0)], 1)
            .unwrap();

        let report = node.execution_report(&next).unwrap();
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].1, FailureReason::InvalidNonce);
        assert_eq!(report.applied.len(), 1);
        assert_eq!(balance_of(&node, B), 5);
        assert_eq!(balance_of(&node, D), 9);
    }

    #[test]
    fn test_replayed_transaction_applies_once_across_blocks() {
        let node = node(0, vec![GenesisAllocation::new(A, 100)]);
        let tx = pay(A, B, 25, 0);
        let g = node.ingest_block(vec![], vec![tx.clone()], 1).unwrap();
        let a = node.ingest_block(vec![g], vec![tx.clone()], 1).unwrap();
        node.ingest_block(vec![a], vec![tx.clone(), tx], 1).unwrap();

        assert_eq!(balance_of(&node, B), 25);
        assert_eq!(node.total_supply(), 100);
        assert_eq!(node.executed_blocks().len(), 3);
    }

    #[test]
    fn test_red_block_payload_not_applied() {
        let mut config = NodeConfig {
            genesis_allocations: vec![GenesisAllocation::new(A, 100)],
            ..NodeConfig::default()
        };
        config.consensus = consensus_config(0, 1);
        let node = DagNode::new(&config);

        let g = node.ingest_block(vec![], vec![], 1).unwrap();
        let kept = node.ingest_block(vec![g], vec![], 5).unwrap();
        let dropped = node.ingest_block(vec![g], vec![pay(A, C, 40, 0)], 1).unwrap();
        node.ingest_block(vec![kept], vec![], 1).unwrap();

        assert!(node.executed_blocks().contains(&kept));
        assert!(!node.executed_blocks().contains(&dropped));
        assert!(node.get_parallelism_stats(&dropped).is_none());
        assert_eq!(balance_of(&node, C), 0);
    }

    #[test]
    fn test_execution_events_follow_finality() {
        let node = node(0, vec![GenesisAllocation::new(A, 10)]);
        let g = node.ingest_block(vec![], vec![pay(A, B, 1, 0)], 1).unwrap();
        let events = node.drain_events();

        let executed = events
            .iter()
            .position(|e| matches!(e, NodeEvent::BlockExecuted { block, .. } if *block == g))
            .unwrap();
        let finalized = events
            .iter()
            .position(|e| matches!(e, NodeEvent::Consensus(nx_02_blockdag_consensus::ConsensusEvent::BlocksFinalized { .. })))
            .unwrap();
        assert!(finalized < executed);
    }

    #[test]
    fn test_ad_hoc_batch_and_block_share_the_ledger() {
        let node = node(0, vec![GenesisAllocation::new(A, 30)]);
        node.ingest_transaction_batch(&[pay(A, B, 10, 0)]).unwrap();
        node.ingest_block(vec![], vec![pay(A, B, 10, 0), pay(A, B, 5, 1)], 1)
            .unwrap();
        assert_eq!(balance_of(&node, B), 15);
        assert_eq!(balance_of(&node, A), 15);
    }
}
