//! Content hashing for ids.
//!
//! Every id in the system is produced through `ContentHasher` so that field
//! encoding (little-endian integers, length-prefixed lists) stays identical
//! across subsystems.

use crate::entities::Hash;
use sha2::{Digest, Sha256};

/// Incremental SHA-256 builder with a domain tag.
pub struct ContentHasher {
    inner: Sha256,
}

impl ContentHasher {
    /// Start a digest under the given domain tag (e.g. `b"nx/block"`).
    pub fn new(domain: &[u8]) -> Self {
        let mut inner = Sha256::new();
        inner.update((domain.len() as u32).to_le_bytes());
        inner.update(domain);
        Self { inner }
    }

    pub fn bytes(mut self, data: &[u8]) -> Self {
        self.inner.update(data);
        self
    }

    pub fn u64(mut self, value: u64) -> Self {
        self.inner.update(value.to_le_bytes());
        self
    }

    /// Length-prefixed list of hashes, so `[a, b] + []` never equals `[a] + [b]`.
    pub fn hashes<'a>(mut self, items: impl ExactSizeIterator<Item = &'a Hash>) -> Self {
        self.inner.update((items.len() as u64).to_le_bytes());
        for item in items {
            self.inner.update(item);
        }
        self
    }

    pub fn finish(self) -> Hash {
        self.inner.finalize().into()
    }
}
