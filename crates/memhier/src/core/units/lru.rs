//! Least Recently Used (LRU) victim selection.
//!
//! Usage counters stand in for recency: each slot counts the hits it has taken
//! since it was filled, and the victim is the slot with the smallest count, the
//! lowest way winning ties. Empty slots carry a count of 0, so they are chosen
//! before any slot that has been hit at least once, with no separate search for
//! a free way.
//!
//! # Performance
//!
//! - **Time Complexity:** O(W) per selection, W being the number of ways.
//! - **Space Complexity:** one counter per slot, stored in the slot itself.

use super::set::Slot;

/// Returns the way to evict from `slots`, or `None` when `slots` is empty.
///
/// Deterministic: the first slot with the minimum usage counter is chosen.
pub fn select_victim<T>(slots: &[Slot<T>]) -> Option<usize> {
    slots
        .iter()
        .enumerate()
        .min_by_key(|(_, slot)| slot.usage)
        .map(|(way, _)| way)
}
