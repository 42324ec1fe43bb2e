//! # Nexus-DAG Benchmarks
//!
//! | Area | Measured |
//! |------|----------|
//! | nx-01 Dependency Graph | Kahn levels over a wide, shallow graph |
//! | nx-02 Consensus | Ingesting a random DAG with reclassification |
//! | nx-03 Executor | The three strategies on the same batch |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nx_01_dependency_graph::DependencyGraph;
use nx_02_blockdag_consensus::{BlockDagApi, BlockDagConsensus};
use nx_03_transaction_executor::{ExecutionStrategy, ExecutorConfig, TransactionExecutor};
use nx_tests::fixtures::{consensus_config, funded_ledger, random_dag, random_transfers};
use std::time::Duration;

// ============================================================================
// NX-01: Topological levels
// ============================================================================

fn bench_topological_levels(c: &mut Criterion) {
    let mut group = c.benchmark_group("nx-01-dependency-graph");

    for width in [16u32, 128, 1024] {
        let mut graph = DependencyGraph::new();
        for layer in 0..8u32 {
            for i in 0..width {
                let id = layer * width + i;
                let deps: Vec<u32> = if layer == 0 {
                    Vec::new()
                } else {
                    vec![(layer - 1) * width + i, (layer - 1) * width + (i + 1) % width]
                };
                graph.add_node_with_dependencies(id, &deps).ok();
            }
        }
        group.throughput(Throughput::Elements(u64::from(width) * 8));
        group.bench_with_input(BenchmarkId::new("levels", width), &graph, |b, graph| {
            b.iter(|| black_box(graph.topological_levels().len()))
        });
    }

    group.finish();
}

// ============================================================================
// NX-02: Ingestion and classification
// ============================================================================

fn bench_block_ingestion(c: &mut Criterion) {
    let mut group = c.benchmark_group("nx-02-blockdag-consensus");
    group.measurement_time(Duration::from_secs(10));

    for size in [32usize, 128] {
        let blocks = random_dag(42, size, 3, 6);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("ingest_random_dag", size), &blocks, |b, blocks| {
            b.iter(|| {
                let mut engine = BlockDagConsensus::with_config(consensus_config(3, 6));
                for block in blocks {
                    engine.submit_block(block.clone()).ok();
                }
                black_box(engine.get_total_order().len())
            })
        });
    }

    group.finish();
}

// ============================================================================
// NX-03: Execution strategies
// ============================================================================

fn bench_execution_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("nx-03-transaction-executor");

    let batch = random_transfers(7, 256, 2_000);
    group.throughput(Throughput::Elements(batch.len() as u64));
    for strategy in [
        ExecutionStrategy::Sequential,
        ExecutionStrategy::DagOptimized,
        ExecutionStrategy::Vectorized,
    ] {
        group.bench_function(BenchmarkId::new("apply", strategy), |b| {
            b.iter(|| {
                let mut executor = TransactionExecutor::with_ledger(
                    ExecutorConfig {
                        strategy,
                        ..ExecutorConfig::default()
                    },
                    funded_ledger(256, 1_000),
                );
                black_box(executor.apply_with(strategy, &batch).map(|r| r.applied.len()))
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_topological_levels,
    bench_block_ingestion,
    bench_execution_strategies
);
criterion_main!(benches);
