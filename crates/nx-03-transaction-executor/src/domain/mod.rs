//! Domain module for the Transaction Executor
//!
//! Contains the ledger arena, the execution report and error types.

pub mod errors;
pub mod ledger;
pub mod report;
