//! Ingestion task
//!
//! Proposals arrive over a bounded mpsc channel and are applied one at a
//! time, so block ingestion has a single writer no matter how many
//! producers hold a sender. The task ends when every sender is dropped.
//!
//! Ingestion takes the node's write lock and may execute finalized blocks,
//! so each proposal runs on the blocking pool while the task awaits it.

use crate::container::DagNode;
use nx_02_blockdag_consensus::ConsensusResult;
use shared_types::{short_hex, BlockId, Transaction};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::{self, JoinHandle};
use tracing::{debug, error, info, warn};

/// A block proposal submitted to the ingestion task.
#[derive(Debug)]
pub struct BlockProposal {
    pub parents: Vec<BlockId>,
    pub transactions: Vec<Transaction>,
    pub proposer_weight: u64,
    /// Receives the ingestion result when set
    pub reply: Option<oneshot::Sender<ConsensusResult<BlockId>>>,
}

impl BlockProposal {
    pub fn new(parents: Vec<BlockId>, transactions: Vec<Transaction>, proposer_weight: u64) -> Self {
        Self {
            parents,
            transactions,
            proposer_weight,
            reply: None,
        }
    }

    /// Attach a reply channel and return its receiving half.
    pub fn with_reply(mut self) -> (Self, oneshot::Receiver<ConsensusResult<BlockId>>) {
        let (tx, rx) = oneshot::channel();
        self.reply = Some(tx);
        (self, rx)
    }
}

/// Counts reported when the ingestion task exits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestionSummary {
    pub accepted: usize,
    pub rejected: usize,
}

/// Spawn the ingestion loop on the current runtime.
pub fn spawn_ingestion(
    node: Arc<DagNode>,
    capacity: usize,
) -> (mpsc::Sender<BlockProposal>, JoinHandle<IngestionSummary>) {
    let (sender, mut receiver) = mpsc::channel::<BlockProposal>(capacity.max(1));
    let handle = tokio::spawn(async move {
        info!(capacity, "Ingestion task started");
        let mut summary = IngestionSummary::default();
        while let Some(proposal) = receiver.recv().await {
            let BlockProposal {
                parents,
                transactions,
                proposer_weight,
                reply,
            } = proposal;
            let writer = Arc::clone(&node);
            let joined = task::spawn_blocking(move || {
                writer.ingest_block(parents, transactions, proposer_weight)
            })
            .await;
            let result = match joined {
                Ok(result) => result,
                Err(err) => {
                    // the reply sender is dropped with the proposal
                    summary.rejected += 1;
                    error!(%err, "Ingestion worker failed");
                    continue;
                }
            };
            match &result {
                Ok(id) => {
                    summary.accepted += 1;
                    debug!(block = %short_hex(id), "Proposal accepted");
                }
                Err(err) => {
                    summary.rejected += 1;
                    warn!(%err, "Proposal rejected");
                }
            }
            if let Some(reply) = reply {
                if reply.send(result).is_err() {
                    debug!("Proposal reply dropped by caller");
                }
            }
        }
        info!(
            accepted = summary.accepted,
            rejected = summary.rejected,
            "Ingestion task stopped"
        );
        summary
    });
    (sender, handle)
}
