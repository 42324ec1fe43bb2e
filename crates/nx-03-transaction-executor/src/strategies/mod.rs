//! Execution strategies.
//!
//! Each strategy applies an `ExecutionPlan` to a ledger and returns one
//! outcome per canonical position. They differ only in how work is
//! scheduled; for the same plan and ledger they produce the same outcomes
//! and the same final ledger.

pub mod dag_optimized;
pub mod sequential;
pub mod vectorized;

use crate::algorithms::{ExecutionPlan, TransferEffect};
use crate::domain::errors::FailureReason;
use crate::domain::ledger::Ledger;
use crate::domain::report::ExecutionReport;

/// Outcome per canonical position.
pub type Outcomes = Vec<Result<(), FailureReason>>;

/// Write both touched slots. For a self-transfer both writes are identical.
pub(crate) fn commit(ledger: &mut Ledger, effect: &TransferEffect) {
    ledger.set(effect.sender_slot, effect.sender);
    ledger.set(effect.receiver_slot, effect.receiver);
}

pub(crate) fn into_report(plan: &ExecutionPlan, outcomes: Outcomes) -> ExecutionReport {
    let mut report = ExecutionReport {
        parallelism_stats: plan.stats,
        ..ExecutionReport::default()
    };
    for (tx, outcome) in plan.transactions.iter().zip(outcomes) {
        match outcome {
            Ok(()) => report.applied.push(tx.id),
            Err(reason) => report.failed.push((tx.id, reason)),
        }
    }
    report
}
