//! Block entity

use serde::{Deserialize, Serialize};
use shared_types::{BlockId, ContentHasher, Transaction};

/// A proposed block. Immutable once built; `id` commits to every other field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    /// Parent ids, duplicates removed, declaration order kept
    pub parents: Vec<BlockId>,
    pub transactions: Vec<Transaction>,
    /// Proposer stake, used for tie-breaking
    pub proposer_weight: u64,
    /// Logical proposal time
    pub timestamp: u64,
}

impl Block {
    pub fn new(
        parents: Vec<BlockId>,
        transactions: Vec<Transaction>,
        proposer_weight: u64,
        timestamp: u64,
    ) -> Self {
        let mut unique: Vec<BlockId> = Vec::with_capacity(parents.len());
        for parent in parents {
            if !unique.contains(&parent) {
                unique.push(parent);
            }
        }
        let id = Self::compute_id(&unique, &transactions, proposer_weight, timestamp);
        Self {
            id,
            parents: unique,
            transactions,
            proposer_weight,
            timestamp,
        }
    }

    pub fn compute_id(
        parents: &[BlockId],
        transactions: &[Transaction],
        proposer_weight: u64,
        timestamp: u64,
    ) -> BlockId {
        ContentHasher::new(b"nx/block")
            .hashes(parents.iter())
            .hashes(transactions.iter().map(|tx| &tx.id))
            .u64(proposer_weight)
            .u64(timestamp)
            .finish()
    }

    /// Whether `id` matches the block's content.
    pub fn verify_id(&self) -> bool {
        self.id == Self::compute_id(&self.parents, &self.transactions, self.proposer_weight, self.timestamp)
    }

    /// First transaction whose id does not match its fields.
    pub fn forged_transaction(&self) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| !tx.verify_id())
    }

    pub fn is_genesis(&self) -> bool {
        self.parents.is_empty()
    }
}
