//! Error types for the Transaction Executor

use nx_01_dependency_graph::GraphError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Batch-level errors. A batch that fails this way touches no balance.
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// Batch size exceeded limits
    #[error("Batch size exceeded: {size} > {max}")]
    BatchTooLarge { size: usize, max: usize },

    /// The contention graph could not be built
    #[error("Invalid execution schedule: {0}")]
    InvalidSchedule(#[from] GraphError),
}

pub type ExecutorResult<T> = Result<T, ExecutorError>;

/// Why a single transfer was skipped. Recorded in the report, never raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum FailureReason {
    #[error("Insufficient balance")]
    InsufficientBalance,

    /// Nonce not greater than the sender's last applied nonce
    #[error("Invalid nonce")]
    InvalidNonce,

    /// Crediting the receiver would overflow `u64`
    #[error("Balance overflow")]
    BalanceOverflow,

    /// `id` is not the digest of the transfer's fields
    #[error("Transaction id does not match content")]
    IdMismatch,
}
