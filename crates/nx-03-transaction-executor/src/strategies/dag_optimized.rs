//! Level-parallel strategy with frozen snapshots.
//!
//! For each level: read every touched account, evaluate all transfers
//! against that read (on rayon once the level reaches the threshold), then
//! commit. The next level starts only after the commit loop finishes.

use super::{commit, Outcomes};
use crate::algorithms::{evaluate, ExecutionPlan, TransferEffect};
use crate::domain::errors::FailureReason;
use crate::domain::ledger::{Account, Ledger};
use rayon::prelude::*;

/// One transfer's view of the ledger, frozen at the start of its level.
#[derive(Debug, Clone, Copy)]
struct LevelRead {
    position: usize,
    sender_slot: usize,
    sender: Account,
    receiver_slot: usize,
    receiver: Account,
}

pub fn execute(ledger: &mut Ledger, plan: &ExecutionPlan, parallel_threshold: usize) -> Outcomes {
    let mut outcomes: Outcomes = vec![Ok(()); plan.len()];

    for level in &plan.schedule.levels {
        let reads: Vec<LevelRead> = level
            .nodes
            .iter()
            .map(|&position| {
                let (sender_slot, receiver_slot) = plan.slots[position];
                LevelRead {
                    position,
                    sender_slot,
                    sender: ledger.get(sender_slot),
                    receiver_slot,
                    receiver: ledger.get(receiver_slot),
                }
            })
            .collect();

        let apply = |read: &LevelRead| -> (usize, Result<TransferEffect, FailureReason>) {
            let tx = &plan.transactions[read.position];
            let effect = evaluate(tx, read.sender_slot, read.sender, read.receiver_slot, read.receiver);
            (read.position, effect)
        };

        let effects: Vec<(usize, Result<TransferEffect, FailureReason>)> =
            if reads.len() < parallel_threshold {
                reads.iter().map(apply).collect()
            } else {
                reads.par_iter().map(apply).collect()
            };

        for (position, effect) in effects {
            match effect {
                Ok(effect) => commit(ledger, &effect),
                Err(reason) => outcomes[position] = Err(reason),
            }
        }

        tracing::trace!(level = level.index, width = level.width(), "level committed");
    }

    outcomes
}
