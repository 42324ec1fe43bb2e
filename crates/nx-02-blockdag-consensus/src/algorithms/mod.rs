//! Algorithms for Block-DAG Consensus
//!
//! Contains:
//! - The blue/red classification pass
//! - Red-ratio attack assessment
//! - Structural DAG metrics

pub mod attack;
pub mod ghostdag;
pub mod metrics;
