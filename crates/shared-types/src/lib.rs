//! # Shared Types
//!
//! Identifiers, the transfer transaction, content hashing and bounded audit
//! logs used by every Nexus-DAG subsystem.

pub mod audit;
pub mod entities;
pub mod hashing;
pub mod transaction;

pub use audit::push_bounded;
pub use entities::*;
pub use hashing::ContentHasher;
pub use transaction::Transaction;
