//! Value transfer between two accounts.

use crate::entities::{Address, TxId};
use crate::hashing::ContentHasher;
use serde::{Deserialize, Serialize};

/// A transfer of `amount` from `sender` to `receiver`.
///
/// `nonce` is per-sender: a transfer applies only if its nonce is greater
/// than the last nonce applied for the sender.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TxId,
    pub sender: Address,
    pub receiver: Address,
    pub amount: u64,
    pub nonce: u64,
}

impl Transaction {
    /// Build a transaction whose id is the digest of its fields.
    pub fn new(sender: Address, receiver: Address, amount: u64, nonce: u64) -> Self {
        let id = Self::compute_id(&sender, &receiver, amount, nonce);
        Self {
            id,
            sender,
            receiver,
            amount,
            nonce,
        }
    }

    pub fn compute_id(sender: &Address, receiver: &Address, amount: u64, nonce: u64) -> TxId {
        ContentHasher::new(b"nx/tx")
            .bytes(sender)
            .bytes(receiver)
            .u64(amount)
            .u64(nonce)
            .finish()
    }

    /// Whether `id` matches the transfer's fields.
    pub fn verify_id(&self) -> bool {
        self.id == Self::compute_id(&self.sender, &self.receiver, self.amount, self.nonce)
    }

    /// Accounts touched by this transfer (one entry for a self-transfer).
    pub fn accounts(&self) -> impl Iterator<Item = Address> {
        let receiver = (self.receiver != self.sender).then_some(self.receiver);
        std::iter::once(self.sender).chain(receiver)
    }

    pub fn touches(&self, account: &Address) -> bool {
        self.sender == *account || self.receiver == *account
    }
}
