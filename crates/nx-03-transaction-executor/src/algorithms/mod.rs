//! Algorithms module for the Transaction Executor
//!
//! Contains:
//! - Canonical ordering (nonce-authoritative per sender)
//! - Account-contention dependency graph
//! - Transfer evaluation against a snapshot
//! - Execution plan assembly

pub mod canonical;
pub mod dependency_builder;
pub mod plan;
pub mod transfer;

pub use canonical::canonical_order;
pub use dependency_builder::build_dependency_graph;
pub use plan::ExecutionPlan;
pub use transfer::{evaluate, TransferEffect};
