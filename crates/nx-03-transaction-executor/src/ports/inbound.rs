//! Inbound Ports (Driving Ports / API)

use crate::domain::errors::ExecutorResult;
use crate::domain::report::ExecutionReport;
use shared_types::{Address, Transaction};

/// Primary transfer execution API
pub trait TransferExecutionApi: Send + Sync {
    /// Apply a batch with the configured strategy.
    fn ingest_transaction_batch(&mut self, transactions: &[Transaction]) -> ExecutorResult<ExecutionReport>;

    /// Apply one transfer at a time in canonical order.
    fn apply_sequential(&mut self, transactions: &[Transaction]) -> ExecutorResult<ExecutionReport>;

    /// Apply level by level with frozen snapshots.
    fn apply_dag_optimized(&mut self, transactions: &[Transaction]) -> ExecutorResult<ExecutionReport>;

    /// Apply level by level over gathered columns.
    fn apply_vectorized(&mut self, transactions: &[Transaction]) -> ExecutorResult<ExecutionReport>;

    fn get_balance(&self, account: &Address) -> u64;
}
