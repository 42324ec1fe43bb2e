//! # Randomized Properties
//!
//! Seeded DAGs and transfer batches checked across crates:
//! acyclicity of the shared graph, classification determinism,
//! strategy equivalence, conservation and replay rejection.

#[cfg(test)]
mod tests {
    use crate::fixtures::{consensus_config, funded_ledger, random_dag, random_transfers};
    use nx_01_dependency_graph::DependencyGraph;
    use nx_02_blockdag_consensus::{BlockDagApi, BlockDagConsensus, Classification};
    use nx_03_transaction_executor::{
        ExecutionStrategy, ExecutorConfig, TransactionExecutor, TransferExecutionApi,
    };
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::SeedableRng;
    use shared_types::BlockId;
    use std::collections::BTreeMap;

    fn labels(engine: &BlockDagConsensus, ids: &[BlockId]) -> BTreeMap<BlockId, Classification> {
        ids.iter()
            .map(|id| (*id, engine.get_classification(id).unwrap_or(Classification::Pending)))
            .collect()
    }

    fn executor(strategy: ExecutionStrategy, accounts: u64, balance: u64) -> TransactionExecutor {
        TransactionExecutor::with_ledger(
            ExecutorConfig {
                strategy,
                parallel_threshold: 2,
                ..ExecutorConfig::default()
            },
            funded_ledger(accounts, balance),
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Parent links of a block DAG level exactly by height, and any
        /// edge pointing back into the past is refused without mutation.
        #[test]
        fn prop_block_graph_rejects_back_edges(seed in any::<u64>(), size in 2usize..40) {
            let blocks = random_dag(seed, size, 3, 6);
            let mut graph: DependencyGraph<BlockId> = DependencyGraph::new();
            for block in &blocks {
                graph.add_node_with_dependencies(block.id, &block.parents).unwrap();
            }
            let edges = graph.edge_count();

            let mut rng = StdRng::seed_from_u64(seed);
            for _ in 0..16 {
                let (Some(old), Some(new)) = (blocks.choose(&mut rng), blocks.choose(&mut rng)) else {
                    continue;
                };
                if old.id == new.id || graph.reaches(&old.id, &new.id) {
                    prop_assert!(graph.add_edge(new.id, old.id).is_err());
                    prop_assert_eq!(graph.edge_count(), edges);
                }
            }

            let schedule = graph.topological_levels();
            prop_assert_eq!(schedule.total_nodes, blocks.len());
            prop_assert_eq!(schedule.levels[0].nodes.clone(), vec![blocks[0].id]);
        }

        /// Two engines fed the same blocks agree; so does one fed them in
        /// a shuffled arrival order.
        #[test]
        fn prop_classification_is_deterministic(seed in any::<u64>(), size in 1usize..30, k in 0usize..4) {
            let blocks = random_dag(seed, size, 3, 5);
            let ids: Vec<BlockId> = blocks.iter().map(|b| b.id).collect();

            let mut first = BlockDagConsensus::with_config(consensus_config(k, 1_000));
            let mut second = BlockDagConsensus::with_config(consensus_config(k, 1_000));
            let mut shuffled = BlockDagConsensus::with_config(consensus_config(k, 1_000));
            for block in &blocks {
                first.submit_block(block.clone()).unwrap();
                second.submit_block(block.clone()).unwrap();
            }
            let mut arrival = blocks.clone();
            arrival.shuffle(&mut StdRng::seed_from_u64(seed ^ 0x5eed));
            for block in arrival {
                shuffled.submit_block(block).unwrap();
            }

            prop_assert_eq!(first.get_total_order(), second.get_total_order());
            prop_assert_eq!(labels(&first, &ids), labels(&second, &ids));
            prop_assert_eq!(first.get_total_order(), shuffled.get_total_order());
            prop_assert_eq!(labels(&first, &ids), labels(&shuffled, &ids));
            prop_assert_eq!(shuffled.pending_count(), 0);
        }

        /// Every block receives a label and the total order is exactly the
        /// blue set, ancestors first.
        #[test]
        fn prop_total_order_is_blue_and_topological(seed in any::<u64>(), size in 1usize..30) {
            let blocks = random_dag(seed, size, 2, 4);
            let mut engine = BlockDagConsensus::with_config(consensus_config(1, 1_000));
            for block in &blocks {
                engine.submit_block(block.clone()).unwrap();
            }
            let order = engine.get_total_order();
            for block in &blocks {
                let label = engine.get_classification(&block.id).unwrap();
                prop_assert_ne!(label, Classification::Pending);
                prop_assert_eq!(label == Classification::Blue, order.contains(&block.id));
            }
            for (position, id) in order.iter().enumerate() {
                let Some(block) = blocks.iter().find(|b| b.id == *id) else {
                    continue;
                };
                for parent in &block.parents {
                    if let Some(parent_position) = order.iter().position(|p| p == parent) {
                        prop_assert!(parent_position < position);
                    }
                }
            }
        }

        /// The three strategies end in the same ledger with the same report,
        /// and none of them creates or destroys value.
        #[test]
        fn prop_strategies_equivalent(seed in any::<u64>(), accounts in 2u64..8, count in 0usize..48) {
            let batch = random_transfers(seed, accounts, count);
            let mut sequential = executor(ExecutionStrategy::Sequential, accounts, 100);
            let mut dag = executor(ExecutionStrategy::DagOptimized, accounts, 100);
            let mut vectorized = executor(ExecutionStrategy::Vectorized, accounts, 100);
            let supply = sequential.ledger().total_supply();

            let expected = sequential.apply_sequential(&batch).unwrap();
            let dag_report = dag.apply_dag_optimized(&batch).unwrap();
            let vec_report = vectorized.apply_vectorized(&batch).unwrap();

            prop_assert_eq!(&expected, &dag_report);
            prop_assert_eq!(&expected, &vec_report);
            prop_assert_eq!(sequential.ledger().snapshot(), dag.ledger().snapshot());
            prop_assert_eq!(sequential.ledger().snapshot(), vectorized.ledger().snapshot());
            prop_assert_eq!(expected.tx_count(), batch.len());
            prop_assert_eq!(dag.ledger().total_supply(), supply);
        }

        /// Re-submitting a batch never applies an already applied transfer.
        #[test]
        fn prop_replayed_batch_applies_nothing_twice(seed in any::<u64>(), count in 1usize..32) {
            let batch = random_transfers(seed, 4, count);
            let mut executor = executor(ExecutionStrategy::DagOptimized, 4, 80);
            let first = executor.ingest_transaction_batch(&batch).unwrap();
            let second = executor.ingest_transaction_batch(&batch).unwrap();
            for id in &first.applied {
                prop_assert!(!second.is_applied(id));
            }
            prop_assert_eq!(executor.ledger().total_supply(), 320);
        }
    }
}
