//! Domain module for the dependency graph
//!
//! Contains the graph entity, node keys, schedule value objects, errors and
//! invariant checks.

pub mod errors;
pub mod graph;
pub mod invariants;
pub mod key;
pub mod value_objects;
