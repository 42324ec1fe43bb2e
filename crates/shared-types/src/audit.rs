//! Bounded audit logs.

use std::collections::VecDeque;

/// Append `entry`, dropping the oldest entries so that at most `capacity`
/// remain. Returns how many were dropped. A zero capacity keeps one entry.
pub fn push_bounded<T>(log: &mut VecDeque<T>, capacity: usize, entry: T) -> usize {
    let mut dropped = 0;
    while log.len() >= capacity.max(1) {
        log.pop_front();
        dropped += 1;
    }
    log.push_back(entry);
    dropped
}
