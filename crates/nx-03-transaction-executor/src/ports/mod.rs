//! Ports for the Transaction Executor

pub mod inbound;
