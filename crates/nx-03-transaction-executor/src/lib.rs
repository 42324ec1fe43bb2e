//! # NX-03: Transaction Executor
//!
//! Applies a block's transfers with parallelism extracted from account
//! independence while matching sequential application balance-for-balance.
//!
//! ## Architecture
//!
//! - **Domain**: Ledger arena, execution report, failure reasons
//! - **Algorithms**: canonical order, account-contention graph, transfer evaluation
//! - **Strategies**: sequential, level-parallel (frozen snapshots), vectorized
//! - **Ports**: Inbound (`TransferExecutionApi`)
//! - **Application**: `TransactionExecutor` service
//!
//! ## Pipeline
//!
//! 1. Canonical order: list order, with each sender's transfers sorted by nonce
//! 2. Dependency graph: an edge between any two transfers sharing an account
//! 3. Kahn levels: disjoint account sets, applied level by level
//! 4. Per level: snapshot, evaluate (rayon above the threshold), commit

pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod strategies;

pub use application::service::TransactionExecutor;
pub use config::{ExecutionStrategy, ExecutorConfig};
pub use domain::errors::{ExecutorError, ExecutorResult, FailureReason};
pub use domain::ledger::{Account, Ledger};
pub use domain::report::{ExecutionReport, ParallelismStats};
pub use ports::inbound::TransferExecutionApi;
