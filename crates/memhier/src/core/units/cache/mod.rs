//! Set-Associative Cache Simulator.
//!
//! Models one cache level as sets of tagged lines. Only tags are tracked: a
//! lookup classifies the access as a hit or a miss, and a miss installs the tag
//! over the set's LRU line. The same type serves as the L1 data cache and as
//! the terminal L2 level.

use serde::Serialize;

use crate::common::{AccessType, PhysAddr};
use crate::core::access::Outcome;
use crate::core::plan::FieldLayout;
use crate::core::units::set::Set;

/// Per-line state carried alongside the tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct LineState {
    /// Written since it was filled, under a write-back policy.
    pub dirty: bool,
}

/// Result of a cache lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CacheLookup {
    /// Tag field of the physical address.
    pub tag: u64,
    /// Set index field of the physical address.
    pub index: u64,
    /// Hit or miss.
    pub outcome: Outcome,
}

/// Cache simulator implementing a set-associative cache with LRU replacement.
#[derive(Clone, Debug)]
pub struct CacheSim {
    name: &'static str,
    sets: Vec<Set<LineState>>,
    layout: FieldLayout,
    write_back: bool,
}

impl CacheSim {
    /// Creates an empty cache.
    ///
    /// # Arguments
    ///
    /// * `name` - Level name used in log events (`"dc"`, `"l2"`).
    /// * `sets` - Number of sets; must equal `2^layout.index_bits`.
    /// * `ways` - Lines per set.
    /// * `layout` - Tag/index/offset split of physical addresses.
    /// * `write_back` - Mark written lines dirty.
    pub fn new(
        name: &'static str,
        sets: usize,
        ways: usize,
        layout: FieldLayout,
        write_back: bool,
    ) -> Self {
        Self {
            name,
            sets: vec![Set::new(ways); sets.max(1)],
            layout,
            write_back,
        }
    }

    /// Looks up `addr`, installing its tag on a miss.
    ///
    /// A hit bumps the line's usage counter; a miss overwrites the set's LRU
    /// line with a fresh one. Under a write-back policy the touched line is
    /// marked dirty on writes.
    pub fn access(&mut self, addr: PhysAddr, access: AccessType) -> CacheLookup {
        let tag = self.layout.tag(addr.val());
        let index = self.layout.index(addr.val());
        let dirty = self.write_back && access.is_write();
        let set = &mut self.sets[index as usize];

        if let Some(way) = set.find(tag) {
            let line = &mut set.touch(way).payload;
            line.dirty |= dirty;
            return CacheLookup {
                tag,
                index,
                outcome: Outcome::Hit,
            };
        }

        let (way, evicted) = set.install(tag, LineState { dirty });
        if let Some(old) = evicted {
            tracing::debug!(
                cache = self.name,
                index,
                way,
                old_tag = old.tag,
                new_tag = tag,
                dirty = old.payload.dirty,
                "cache eviction"
            );
        }

        CacheLookup {
            tag,
            index,
            outcome: Outcome::Miss,
        }
    }

    /// Checks if the cache holds `addr`, without touching usage counters.
    pub fn contains(&self, addr: PhysAddr) -> bool {
        let tag = self.layout.tag(addr.val());
        self.sets[self.layout.index(addr.val()) as usize]
            .find(tag)
            .is_some()
    }

    /// Whether the line holding `addr` is dirty; `None` when it is not cached.
    pub fn is_dirty(&self, addr: PhysAddr) -> Option<bool> {
        let tag = self.layout.tag(addr.val());
        let set = &self.sets[self.layout.index(addr.val()) as usize];
        set.find(tag).map(|way| set.slots()[way].payload.dirty)
    }

    /// Field layout used to split addresses.
    pub const fn layout(&self) -> FieldLayout {
        self.layout
    }

    /// Level name.
    pub const fn name(&self) -> &'static str {
        self.name
    }
}
