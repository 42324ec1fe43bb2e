//! # Nexus-DAG Test Suite
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Seeded DAG and transfer generators
//! ├── exploits/         # Adversarial block patterns vs. the red-ratio report
//! └── integration/      # Cross-crate flows and randomized properties
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p nx-tests
//! cargo test -p nx-tests integration::properties
//! cargo bench -p nx-tests
//! ```

pub mod fixtures;
