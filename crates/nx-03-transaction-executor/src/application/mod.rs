//! Application layer for the Transaction Executor

pub mod service;
