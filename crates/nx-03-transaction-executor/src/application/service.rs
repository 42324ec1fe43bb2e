//! Transaction Executor Service
//!
//! Owns the ledger and runs the execution pipeline:
//! 1. Validate batch size
//! 2. Build the plan (canonical order, contention graph, levels)
//! 3. Run the selected strategy
//! 4. Assemble the report

use crate::algorithms::ExecutionPlan;
use crate::config::{ExecutionStrategy, ExecutorConfig};
use crate::domain::errors::{ExecutorError, ExecutorResult};
use crate::domain::ledger::Ledger;
use crate::domain::report::ExecutionReport;
use crate::ports::inbound::TransferExecutionApi;
use crate::strategies::{self, dag_optimized, sequential, vectorized};
use shared_types::{Address, Transaction};
use tracing::{debug, info};

pub struct TransactionExecutor {
    config: ExecutorConfig,
    ledger: Ledger,
}

impl TransactionExecutor {
    /// Create an executor with default config and an empty ledger
    pub fn new() -> Self {
        Self::with_config(ExecutorConfig::default())
    }

    /// Create an executor with custom config
    pub fn with_config(config: ExecutorConfig) -> Self {
        Self::with_ledger(config, Ledger::new())
    }

    pub fn with_ledger(config: ExecutorConfig, ledger: Ledger) -> Self {
        Self { config, ledger }
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Genesis allocation; not a transfer and not nonce-checked.
    pub fn seed_balance(&mut self, account: Address, amount: u64) {
        self.ledger.credit_genesis(account, amount);
    }

    /// Apply a batch with an explicit strategy.
    pub fn apply_with(
        &mut self,
        strategy: ExecutionStrategy,
        transactions: &[Transaction],
    ) -> ExecutorResult<ExecutionReport> {
        self.validate_batch(transactions)?;
        if transactions.is_empty() {
            return Ok(ExecutionReport::default());
        }

        let plan = ExecutionPlan::build(&mut self.ledger, transactions)?;
        debug!(
            tx_count = plan.len(),
            levels = plan.stats.levels,
            max_width = plan.stats.max_level_width,
            %strategy,
            "Execution plan built"
        );

        let outcomes = match strategy {
            ExecutionStrategy::Sequential => sequential::execute(&mut self.ledger, &plan),
            ExecutionStrategy::DagOptimized => {
                dag_optimized::execute(&mut self.ledger, &plan, self.config.parallel_threshold)
            }
            ExecutionStrategy::Vectorized => vectorized::execute(&mut self.ledger, &plan),
        };
        let report = strategies::into_report(&plan, outcomes);

        info!(
            applied = report.applied.len(),
            failed = report.failed.len(),
            levels = report.parallelism_stats.levels,
            speedup = report.parallelism_stats.speedup_estimate,
            "Transaction batch applied"
        );
        Ok(report)
    }

    fn validate_batch(&self, transactions: &[Transaction]) -> ExecutorResult<()> {
        if transactions.len() > self.config.max_batch_size {
            return Err(ExecutorError::BatchTooLarge {
                size: transactions.len(),
                max: self.config.max_batch_size,
            });
        }
        Ok(())
    }
}

impl Default for TransactionExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferExecutionApi for TransactionExecutor {
    fn ingest_transaction_batch(&mut self, transactions: &[Transaction]) -> ExecutorResult<ExecutionReport> {
        self.apply_with(self.config.strategy, transactions)
    }

    fn apply_sequential(&mut self, transactions: &[Transaction]) -> ExecutorResult<ExecutionReport> {
        self.apply_with(ExecutionStrategy::Sequential, transactions)
    }

    fn apply_dag_optimized(&mut self, transactions: &[Transaction]) -> ExecutorResult<ExecutionReport> {
        self.apply_with(ExecutionStrategy::DagOptimized, transactions)
    }

    fn apply_vectorized(&mut self, transactions: &[Transaction]) -> ExecutorResult<ExecutionReport> {
        self.apply_with(ExecutionStrategy::Vectorized, transactions)
    }

    fn get_balance(&self, account: &Address) -> u64 {
        self.ledger.balance(account)
    }
}
