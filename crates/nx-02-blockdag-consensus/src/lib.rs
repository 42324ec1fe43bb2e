//! # NX-02: Block-DAG Consensus
//!
//! GhostDAG-style consensus over a block DAG. Blocks may reference several
//! parents; each ingested block is labelled blue or red by a k-bounded
//! anticone rule and blue blocks form a deterministic total order.
//!
//! ## Architecture
//!
//! - **Domain**: Block, DAG store, orphan pool, classification, errors
//! - **Algorithms**: blue/red classification pass, attack assessment,
//!   DAG metrics
//! - **Events**: audit log of buffered, ingested, rejected, evicted and
//!   finalized blocks
//! - **Ports**: Inbound (`BlockDagApi`)
//! - **Service**: `BlockDagConsensus`, the single-writer engine
//!
//! ## Block lifecycle
//!
//! `Pending` (parents missing) -> `Ingested` -> `Classified` -> `Finalized`.
//! A block is finalized once the DAG has grown `finality_depth` levels past
//! it; finalized labels never change and finalized blue blocks form an
//! append-only prefix of the total order.

pub mod algorithms;
pub mod config;
pub mod domain;
pub mod events;
pub mod ports;
pub mod service;

pub use algorithms::attack::{AttackReport, AttackSeverity};
pub use algorithms::metrics::DagMetrics;
pub use config::{ConsensusConfig, TieBreakPolicy};
pub use domain::block::Block;
pub use domain::classification::{BlockState, Classification};
pub use domain::errors::{ConsensusError, ConsensusResult};
pub use domain::snapshot::{BlockView, DagSnapshot};
pub use events::ConsensusEvent;
pub use ports::inbound::BlockDagApi;
pub use service::BlockDagConsensus;
