//! Reference strategy: one transfer at a time in canonical order.

use super::{commit, Outcomes};
use crate::algorithms::{evaluate, ExecutionPlan};
use crate::domain::errors::FailureReason;
use crate::domain::ledger::Ledger;

pub fn execute(ledger: &mut Ledger, plan: &ExecutionPlan) -> Outcomes {
    plan.transactions
        .iter()
        .zip(&plan.slots)
        .map(|(tx, &(sender, receiver))| -> Result<(), FailureReason> {
            let effect = evaluate(tx, sender, ledger.get(sender), receiver, ledger.get(receiver))?;
            commit(ledger, &effect);
            Ok(())
        })
        .collect()
}
