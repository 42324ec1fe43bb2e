//! # Genesis Module
//!
//! Initial balances. Allocations are credited directly to the ledger before
//! any block is ingested; they are not transfers and carry no nonce.

use serde::{Deserialize, Serialize};
use shared_types::{address_from_u64, Address};

/// Balance credited to an account at genesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisAllocation {
    /// Small-integer account number, mapped with `address_from_u64`
    pub account: u64,
    pub balance: u64,
}

impl GenesisAllocation {
    pub fn new(account: u64, balance: u64) -> Self {
        Self { account, balance }
    }

    pub fn address(&self) -> Address {
        address_from_u64(self.account)
    }
}

/// Total supply created by `allocations`.
pub fn total_allocated(allocations: &[GenesisAllocation]) -> u128 {
    allocations.iter().map(|a| u128::from(a.balance)).sum()
}
