//! Columnar strategy.
//!
//! Each level is gathered into dense columns (balances, nonces, amounts),
//! validity masks are computed column-wise, and surviving effects are
//! scattered back into the ledger arena. Levels have disjoint account sets,
//! so a level's scatter never overwrites another member's slot.

use super::Outcomes;
use crate::algorithms::ExecutionPlan;
use crate::domain::errors::FailureReason;
use crate::domain::ledger::{Account, Ledger};

#[derive(Debug, Default)]
struct LevelColumns {
    positions: Vec<usize>,
    intact: Vec<bool>,
    sender_slots: Vec<usize>,
    receiver_slots: Vec<usize>,
    amounts: Vec<u64>,
    nonces: Vec<u64>,
    sender_balances: Vec<u64>,
    sender_nonces: Vec<Option<u64>>,
    receiver_balances: Vec<u64>,
}

impl LevelColumns {
    fn gather(ledger: &Ledger, plan: &ExecutionPlan, nodes: &[usize]) -> Self {
        let mut columns = Self::default();
        for &position in nodes {
            let tx = &plan.transactions[position];
            let (sender_slot, receiver_slot) = plan.slots[position];
            let sender = ledger.get(sender_slot);
            columns.positions.push(position);
            columns.intact.push(tx.verify_id());
            columns.sender_slots.push(sender_slot);
            columns.receiver_slots.push(receiver_slot);
            columns.amounts.push(tx.amount);
            columns.nonces.push(tx.nonce);
            columns.sender_balances.push(sender.balance);
            columns.sender_nonces.push(sender.last_nonce);
            columns.receiver_balances.push(ledger.get(receiver_slot).balance);
        }
        columns
    }
}

pub fn execute(ledger: &mut Ledger, plan: &ExecutionPlan) -> Outcomes {
    let mut outcomes: Outcomes = vec![Ok(()); plan.len()];

    for level in &plan.schedule.levels {
        let cols = LevelColumns::gather(ledger, plan, &level.nodes);

        let nonce_ok: Vec<bool> = cols
            .nonces
            .iter()
            .zip(&cols.sender_nonces)
            .map(|(nonce, last)| last.map_or(true, |last| *nonce > last))
            .collect();
        let debited: Vec<Option<u64>> = cols
            .sender_balances
            .iter()
            .zip(&cols.amounts)
            .map(|(balance, amount)| balance.checked_sub(*amount))
            .collect();
        let self_transfer: Vec<bool> = cols
            .sender_slots
            .iter()
            .zip(&cols.receiver_slots)
            .map(|(s, r)| s == r)
            .collect();
        let credited: Vec<Option<u64>> = cols
            .receiver_balances
            .iter()
            .zip(&cols.amounts)
            .map(|(balance, amount)| balance.checked_add(*amount))
            .collect();

        for i in 0..cols.positions.len() {
            let verdict = if !cols.intact[i] {
                Err(FailureReason::IdMismatch)
            } else if !nonce_ok[i] {
                Err(FailureReason::InvalidNonce)
            } else if debited[i].is_none() {
                Err(FailureReason::InsufficientBalance)
            } else if !self_transfer[i] && credited[i].is_none() {
                Err(FailureReason::BalanceOverflow)
            } else {
                Ok(())
            };

            if let Err(reason) = verdict {
                outcomes[cols.positions[i]] = Err(reason);
                continue;
            }

            let nonce = Some(cols.nonces[i]);
            if self_transfer[i] {
                ledger.set(
                    cols.sender_slots[i],
                    Account {
                        balance: cols.sender_balances[i],
                        last_nonce: nonce,
                    },
                );
                continue;
            }
            ledger.set(
                cols.sender_slots[i],
                Account {
                    balance: debited[i].unwrap_or(cols.sender_balances[i]),
                    last_nonce: nonce,
                },
            );
            let receiver = ledger.get(cols.receiver_slots[i]);
            ledger.set(
                cols.receiver_slots[i],
                Account {
                    balance: credited[i].unwrap_or(cols.receiver_balances[i]),
                    last_nonce: receiver.last_nonce,
                },
            );
        }
    }

    outcomes
}
