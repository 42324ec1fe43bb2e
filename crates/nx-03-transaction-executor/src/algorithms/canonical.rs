//! Canonical sequential order.
//!
//! List order, except that each sender's transfers are redistributed over
//! that sender's list slots in ascending `(nonce, position)`. Nonce order is
//! authoritative per sender; position only breaks ties and interleaves
//! different senders.

use shared_types::{Address, Transaction};
use std::collections::HashMap;

/// Original indices of `transactions` in canonical order.
pub fn canonical_order(transactions: &[Transaction]) -> Vec<usize> {
    let mut slots_by_sender: HashMap<Address, Vec<usize>> = HashMap::new();
    for (position, tx) in transactions.iter().enumerate() {
        slots_by_sender.entry(tx.sender).or_default().push(position);
    }

    let mut order: Vec<usize> = (0..transactions.len()).collect();
    for slots in slots_by_sender.values() {
        let mut by_nonce = slots.clone();
        by_nonce.sort_by_key(|&position| (transactions[position].nonce, position));
        for (slot, source) in slots.iter().zip(by_nonce) {
            order[*slot] = source;
        }
    }
    order
}
