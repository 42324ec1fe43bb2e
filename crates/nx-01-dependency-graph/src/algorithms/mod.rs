//! Algorithms over `DependencyGraph`

pub mod bottlenecks;
pub mod critical_path;
pub mod kahns;

pub use bottlenecks::{Bottleneck, BottleneckKind, BottleneckSeverity};
