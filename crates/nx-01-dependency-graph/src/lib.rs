//! # NX-01: Dependency Graph
//!
//! Generic acyclic graph over abstract node ids, shared by block consensus
//! (parent edges) and the transfer executor (account-contention edges).
//!
//! ## Architecture
//!
//! - **Domain**: `DependencyGraph`, node keys, schedules, errors, invariants
//! - **Algorithms**: Kahn's leveling, critical path, bottleneck detection
//!
//! ## Guarantees
//!
//! - `add_edge` rejects any edge that would close a cycle and leaves the
//!   graph untouched when it does.
//! - `topological_levels` groups every node removable in the same Kahn round
//!   into one level; nodes inside a level are mutually independent.
//! - Within a level, nodes are linearized by `(insertion_sequence, id)`.

pub mod algorithms;
pub mod domain;

pub use algorithms::{Bottleneck, BottleneckKind, BottleneckSeverity};
pub use domain::errors::{CycleError, GraphError, GraphResult};
pub use domain::graph::DependencyGraph;
pub use domain::key::NodeKey;
pub use domain::value_objects::{LevelSchedule, ParallelizationGain, TopologicalLevel};
