//! Domain module for Block-DAG Consensus
//!
//! Contains the block entity, the DAG store, the orphan pool, labels and
//! error types.

pub mod block;
pub mod blue_set;
pub mod classification;
pub mod dag_store;
pub mod errors;
pub mod orphan_pool;
pub mod snapshot;
