//! # Block Feed
//!
//! A JSON description of a block DAG used by the binary to drive the node.
//! Blocks name their parents by label; ids are only known once a block has
//! been ingested, so replay awaits each proposal before sending the next.
//!
//! ```json
//! {
//!   "allocations": [{ "account": 1, "balance": 100 }],
//!   "blocks": [
//!     { "label": "G" },
//!     { "label": "A", "parents": ["G"],
//!       "transactions": [{ "sender": 1, "receiver": 2, "amount": 30, "nonce": 0 }] }
//!   ]
//! }
//! ```

use crate::genesis::GenesisAllocation;
use crate::ingestion::BlockProposal;
use serde::{Deserialize, Serialize};
use shared_types::{address_from_u64, BlockId, Transaction};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Failed to read feed {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed feed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Block {block} references unknown parent {parent}")]
    UnknownLabel { block: String, parent: String },

    #[error("Duplicate block label: {0}")]
    DuplicateLabel(String),

    #[error("Ingestion channel closed")]
    ChannelClosed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedTransaction {
    pub sender: u64,
    pub receiver: u64,
    pub amount: u64,
    pub nonce: u64,
}

impl FeedTransaction {
    pub fn to_transaction(&self) -> Transaction {
        Transaction::new(
            address_from_u64(self.sender),
            address_from_u64(self.receiver),
            self.amount,
            self.nonce,
        )
    }
}

fn default_weight() -> u64 {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedBlock {
    pub label: String,
    #[serde(default)]
    pub parents: Vec<String>,
    #[serde(default = "default_weight")]
    pub proposer_weight: u64,
    #[serde(default)]
    pub transactions: Vec<FeedTransaction>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockFeed {
    #[serde(default)]
    pub allocations: Vec<GenesisAllocation>,
    pub blocks: Vec<FeedBlock>,
}

/// Result of replaying a feed.
#[derive(Debug, Clone, Default)]
pub struct ReplayOutcome {
    /// Label to id for every block the node accepted
    pub ids: HashMap<String, BlockId>,
    /// Labels refused by the node (or skipped because a parent was), with the reason
    pub rejected: Vec<(String, String)>,
}

impl ReplayOutcome {
    pub fn id(&self, label: &str) -> Option<BlockId> {
        self.ids.get(label).copied()
    }
}

impl BlockFeed {
    pub fn from_json_str(raw: &str) -> Result<Self, FeedError> {
        let feed: Self = serde_json::from_str(raw)?;
        feed.check_labels()?;
        Ok(feed)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, FeedError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| FeedError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Every parent must be declared by an earlier block.
    fn check_labels(&self) -> Result<(), FeedError> {
        let mut seen = HashSet::new();
        for block in &self.blocks {
            if let Some(parent) = block.parents.iter().find(|p| !seen.contains(p.as_str())) {
                return Err(FeedError::UnknownLabel {
                    block: block.label.clone(),
                    parent: parent.clone(),
                });
            }
            if !seen.insert(block.label.as_str()) {
                return Err(FeedError::DuplicateLabel(block.label.clone()));
            }
        }
        Ok(())
    }

    /// Send every block through the ingestion channel in feed order.
    pub async fn replay(&self, sender: &mpsc::Sender<BlockProposal>) -> Result<ReplayOutcome, FeedError> {
        self.check_labels()?;
        let mut outcome = ReplayOutcome::default();
        for block in &self.blocks {
            let parents: Option<Vec<BlockId>> =
                block.parents.iter().map(|label| outcome.id(label)).collect();
            let Some(parents) = parents else {
                warn!(label = %block.label, "Skipping block with a rejected parent");
                outcome
                    .rejected
                    .push((block.label.clone(), "parent rejected".to_string()));
                continue;
            };
            let transactions = block.transactions.iter().map(FeedTransaction::to_transaction).collect();
            let (proposal, reply) =
                BlockProposal::new(parents, transactions, block.proposer_weight).with_reply();
            sender.send(proposal).await.map_err(|_| FeedError::ChannelClosed)?;
            match reply.await.map_err(|_| FeedError::ChannelClosed)? {
                Ok(id) => {
                    outcome.ids.insert(block.label.clone(), id);
                }
                Err(err) => outcome.rejected.push((block.label.clone(), err.to_string())),
            }
        }
        info!(
            accepted = outcome.ids.len(),
            rejected = outcome.rejected.len(),
            "Feed replayed"
        );
        Ok(outcome)
    }
}
