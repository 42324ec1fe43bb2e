//! Account ledger.
//!
//! Accounts live in a dense arena; addresses map to arena slots. Slots are
//! stable for the ledger's lifetime, which is what lets the executor read a
//! level's snapshot and scatter its commits by index.

use serde::{Deserialize, Serialize};
use shared_types::Address;
use std::collections::{BTreeMap, HashMap};

/// Balance plus replay-protection state for one address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub balance: u64,
    /// Highest nonce applied for this account as sender
    pub last_nonce: Option<u64>,
}

impl Account {
    pub fn with_balance(balance: u64) -> Self {
        Self {
            balance,
            last_nonce: None,
        }
    }

    /// Whether a transfer with `nonce` may still be applied.
    pub fn accepts_nonce(&self, nonce: u64) -> bool {
        self.last_nonce.map_or(true, |last| nonce > last)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    accounts: Vec<Account>,
    addresses: Vec<Address>,
    slots: HashMap<Address, usize>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger seeded with genesis balances. Repeated addresses accumulate.
    pub fn with_genesis(allocations: impl IntoIterator<Item = (Address, u64)>) -> Self {
        let mut ledger = Self::new();
        for (address, amount) in allocations {
            ledger.credit_genesis(address, amount);
        }
        ledger
    }

    /// Add a genesis allocation. Saturates rather than wrapping.
    pub fn credit_genesis(&mut self, address: Address, amount: u64) {
        let slot = self.slot_or_insert(address);
        let account = &mut self.accounts[slot];
        account.balance = account.balance.saturating_add(amount);
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    pub fn slot(&self, address: &Address) -> Option<usize> {
        self.slots.get(address).copied()
    }

    /// Slot for `address`, creating an empty account if needed.
    pub fn slot_or_insert(&mut self, address: Address) -> usize {
        if let Some(slot) = self.slots.get(&address) {
            return *slot;
        }
        let slot = self.accounts.len();
        self.accounts.push(Account::default());
        self.addresses.push(address);
        self.slots.insert(address, slot);
        slot
    }

    /// Account at `slot`; empty if the slot is out of range.
    pub fn get(&self, slot: usize) -> Account {
        self.accounts.get(slot).copied().unwrap_or_default()
    }

    pub(crate) fn set(&mut self, slot: usize, account: Account) {
        if let Some(existing) = self.accounts.get_mut(slot) {
            *existing = account;
        }
    }

    /// Account for `address`; empty if never seen.
    pub fn account(&self, address: &Address) -> Account {
        self.slot(address).map(|slot| self.get(slot)).unwrap_or_default()
    }

    pub fn balance(&self, address: &Address) -> u64 {
        self.account(address).balance
    }

    /// Sum of all balances.
    pub fn total_supply(&self) -> u128 {
        self.accounts.iter().map(|a| u128::from(a.balance)).sum()
    }

    /// Address-ordered view, independent of arena layout.
    pub fn snapshot(&self) -> BTreeMap<Address, Account> {
        self.addresses
            .iter()
            .copied()
            .zip(self.accounts.iter().copied())
            .collect()
    }

    /// Address-ordered balances, skipping empty untouched accounts.
    pub fn balances(&self) -> BTreeMap<Address, u64> {
        self.snapshot()
            .into_iter()
            .filter(|(_, account)| account.balance > 0 || account.last_nonce.is_some())
            .map(|(address, account)| (address, account.balance))
            .collect()
    }
}
