//! Transfer evaluation against a frozen view of two accounts.
//!
//! Pure: callers decide when the effect becomes visible.

use crate::domain::errors::FailureReason;
use crate::domain::ledger::Account;
use shared_types::Transaction;

/// Post-transfer state of the two touched slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferEffect {
    pub sender_slot: usize,
    pub sender: Account,
    pub receiver_slot: usize,
    pub receiver: Account,
}

/// Checks run in order: id, nonce, balance, receiver overflow. A failed
/// transfer leaves both accounts (including the sender's nonce) untouched.
pub fn evaluate(
    tx: &Transaction,
    sender_slot: usize,
    sender: Account,
    receiver_slot: usize,
    receiver: Account,
) -> Result<TransferEffect, FailureReason> {
    if !tx.verify_id() {
        return Err(FailureReason::IdMismatch);
    }
    if !sender.accepts_nonce(tx.nonce) {
        return Err(FailureReason::InvalidNonce);
    }
    let debited = sender
        .balance
        .checked_sub(tx.amount)
        .ok_or(FailureReason::InsufficientBalance)?;

    let next_sender = Account {
        balance: debited,
        last_nonce: Some(tx.nonce),
    };

    if sender_slot == receiver_slot {
        let unchanged = Account {
            balance: sender.balance,
            last_nonce: Some(tx.nonce),
        };
        return Ok(TransferEffect {
            sender_slot,
            sender: unchanged,
            receiver_slot,
            receiver: unchanged,
        });
    }

    let credited = receiver
        .balance
        .checked_add(tx.amount)
        .ok_or(FailureReason::BalanceOverflow)?;

    Ok(TransferEffect {
        sender_slot,
        sender: next_sender,
        receiver_slot,
        receiver: Account {
            balance: credited,
            last_nonce: receiver.last_nonce,
        },
    })
}
