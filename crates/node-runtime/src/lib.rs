//! # Node Runtime Library
//!
//! Couples the consensus engine to the executor:
//!
//! ```text
//! proposals ──mpsc──→ ingestion task ──→ DagNode::ingest_block
//!                                            │
//!                         BlockDAGConsensus (classify, order, finalize)
//!                                            │ finalized blue blocks, in total order
//!                                            ↓
//!                         TransactionExecutor (apply once) ──→ ledger
//! ```
//!
//! - `container/` - `DagNode` facade and `NodeConfig`
//! - `genesis/` - genesis balance allocations
//! - `ingestion` - tokio task serializing proposals into the single writer
//! - `feed` - JSON block feed replayed by the binary

pub mod container;
pub mod feed;
pub mod genesis;
pub mod ingestion;

pub use container::config::{ConfigError, NodeConfig};
pub use container::{DagNode, NodeEvent};
pub use feed::{BlockFeed, FeedBlock, FeedError, FeedTransaction, ReplayOutcome};
pub use genesis::GenesisAllocation;
pub use ingestion::{spawn_ingestion, BlockProposal, IngestionSummary};
