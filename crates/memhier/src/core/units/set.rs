//! Slots and sets.
//!
//! Every structure in the hierarchy is an array of [`Set`]s of [`Slot`]s: the TLB
//! and both caches have one set per index value, and the page table is a single
//! set with one slot per physical page.

use serde::Serialize;

use super::lru;

/// One entry of a set: a tag, a validity bit, a usage counter, and a payload.
///
/// The usage counter starts at 0 when the slot is filled and grows by one on
/// every later hit. Only refilling the slot resets it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Slot<T> {
    /// Tag the slot is matched against.
    pub tag: u64,
    /// Set once the slot has been filled.
    pub valid: bool,
    /// Hits since the slot was filled.
    pub usage: u64,
    /// Structure-specific data.
    pub payload: T,
}

impl<T> Slot<T> {
    /// Whether this slot holds `tag`.
    #[inline]
    pub fn matches(&self, tag: u64) -> bool {
        self.valid && self.tag == tag
    }
}

/// A fixed-size group of slots searched linearly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Set<T> {
    slots: Vec<Slot<T>>,
}

impl<T: Clone + Default> Set<T> {
    /// Creates a set of `ways` empty slots.
    ///
    /// A zero-way set is widened to one way so victim selection always has a
    /// candidate.
    pub fn new(ways: usize) -> Self {
        let safe_ways = if ways == 0 { 1 } else { ways };
        Self {
            slots: vec![Slot::default(); safe_ways],
        }
    }

    /// Way holding `tag`, if any.
    pub fn find(&self, tag: u64) -> Option<usize> {
        self.slots.iter().position(|slot| slot.matches(tag))
    }

    /// Records a hit on `way` and returns the slot.
    pub fn touch(&mut self, way: usize) -> &mut Slot<T> {
        let slot = &mut self.slots[way];
        slot.usage += 1;
        slot
    }

    /// Way the replacement selector would evict next.
    pub fn victim(&self) -> usize {
        lru::select_victim(&self.slots).unwrap_or(0)
    }

    /// Overwrites `way` with a fresh entry and returns what it held, if valid.
    pub fn fill(&mut self, way: usize, tag: u64, payload: T) -> Option<Slot<T>> {
        let fresh = Slot {
            tag,
            valid: true,
            usage: 0,
            payload,
        };
        let old = std::mem::replace(&mut self.slots[way], fresh);
        old.valid.then_some(old)
    }

    /// Fills the LRU victim with a fresh entry.
    ///
    /// Returns the way that was filled and the evicted entry, if it was valid.
    pub fn install(&mut self, tag: u64, payload: T) -> (usize, Option<Slot<T>>) {
        let way = self.victim();
        (way, self.fill(way, tag, payload))
    }

    /// All slots in way order.
    pub fn slots(&self) -> &[Slot<T>] {
        &self.slots
    }

    /// Number of ways.
    pub fn ways(&self) -> usize {
        self.slots.len()
    }
}
