//! # Core Identifiers
//!
//! - `Hash` / `BlockId` / `TxId`: 32-byte content digests.
//! - `Address`: 20-byte account identifier.

/// A 32-byte SHA-256 digest.
pub type Hash = [u8; 32];

/// Identifier of a block in the DAG.
pub type BlockId = Hash;

/// Identifier of a transfer transaction.
pub type TxId = Hash;

/// A 20-byte account address.
pub type Address = [u8; 20];

/// The all-zero hash.
pub const ZERO_HASH: Hash = [0u8; 32];

/// Abbreviated hex rendering for log fields (first 4 bytes).
pub fn short_hex(bytes: &[u8]) -> String {
    let end = bytes.len().min(4);
    hex::encode(&bytes[..end])
}

/// Full hex rendering.
pub fn full_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Build an address from a small integer (tests, fixtures, feeds).
pub fn address_from_u64(value: u64) -> Address {
    let mut address = [0u8; 20];
    address[12..].copy_from_slice(&value.to_be_bytes());
    address
}
