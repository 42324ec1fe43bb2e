//! # Nexus-DAG Node
//!
//! Replays a block feed through the node and reports the resulting total
//! order, balances, DAG metrics, red-block ratio and audit events.
//!
//! ```text
//! node-runtime [FEED.json]
//! ```
//!
//! Without a feed path a small built-in DAG is replayed. Configuration comes
//! from the file named by `NX_CONFIG` (if set) and `NX_*` overrides; the log
//! filter from `RUST_LOG`, falling back to the configured `log_level`.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use node_runtime::{spawn_ingestion, BlockFeed, DagNode, NodeConfig, NodeEvent};
use shared_types::short_hex;

/// Diamond with a conflicting sender plus an independent transfer.
const DEMO_FEED: &str = r#"{
    "allocations": [
        { "account": 1, "balance": 100 },
        { "account": 3, "balance": 50 }
    ],
    "blocks": [
        { "label": "G" },
        { "label": "A", "parents": ["G"],
          "transactions": [
            { "sender": 1, "receiver": 2, "amount": 40, "nonce": 0 },
            { "sender": 3, "receiver": 4, "amount": 20, "nonce": 0 }
          ] },
        { "label": "B", "parents": ["G"],
          "transactions": [{ "sender": 1, "receiver": 5, "amount": 70, "nonce": 1 }] },
        { "label": "C", "parents": ["A", "B"] },
        { "label": "D", "parents": ["C"] },
        { "label": "E", "parents": ["D"] }
    ]
}"#;

#[tokio::main]
async fn main() -> Result<()> {
    let config = NodeConfig::load().context("Failed to load node configuration")?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("Invalid log filter")?;
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    config.validate().context("Invalid node configuration")?;

    let feed = match std::env::args().nth(1) {
        Some(path) => BlockFeed::from_file(&path).with_context(|| format!("Failed to load feed {path}"))?,
        None => BlockFeed::from_json_str(DEMO_FEED).context("Built-in feed is malformed")?,
    };

    info!("===========================================");
    info!("  Nexus-DAG Node v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let node = Arc::new(DagNode::new(&config));
    node.seed_allocations(&feed.allocations);

    let (sender, ingestion) = spawn_ingestion(Arc::clone(&node), config.channel_capacity);
    let outcome = feed.replay(&sender).await.context("Feed replay failed")?;
    drop(sender);
    let summary = ingestion.await.context("Ingestion task panicked")?;

    info!(
        accepted = summary.accepted,
        rejected = summary.rejected,
        "Ingestion finished"
    );
    for (label, reason) in &outcome.rejected {
        warn!(%label, %reason, "Block not ingested");
    }

    let labels: std::collections::HashMap<_, _> =
        outcome.ids.iter().map(|(label, id)| (*id, label.as_str())).collect();
    for (position, id) in node.get_total_order().iter().enumerate() {
        let label = labels.get(id).copied().unwrap_or("?");
        let stats = node.get_parallelism_stats(id);
        info!(
            position,
            block = %short_hex(id),
            %label,
            executed = stats.is_some(),
            levels = stats.map(|s| s.levels).unwrap_or_default(),
            "Total order"
        );
    }

    for (account, balance) in node.balances() {
        info!(account = %short_hex(&account), balance, "Balance");
    }
    info!(total_supply = %node.total_supply(), "Ledger");

    let metrics = node.dag_metrics();
    info!(
        blocks = metrics.total_blocks,
        width = metrics.dag_width,
        chain_length = metrics.consensus_chain_length,
        avg_parents = metrics.average_parents_per_block,
        blue_percentage = metrics.blue_percentage,
        max_height = metrics.max_height,
        "DAG metrics"
    );

    let attack = node.detect_attack();
    info!(
        blue = attack.blue_blocks,
        red = attack.red_blocks,
        red_ratio = attack.red_ratio,
        severity = ?attack.severity,
        "Attack assessment"
    );

    let events = node.drain_events();
    let executed = events
        .iter()
        .filter(|event| matches!(event, NodeEvent::BlockExecuted { .. }))
        .count();
    for event in &events {
        if let NodeEvent::ExecutionFailed { block, reason } = event {
            warn!(block = %short_hex(block), %reason, "Block execution failed");
        }
    }
    info!(events = events.len(), executed, "Event log drained");

    Ok(())
}
