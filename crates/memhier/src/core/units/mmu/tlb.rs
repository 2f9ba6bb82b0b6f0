//! Translation Lookaside Buffer (TLB).
//!
//! A set-associative cache of virtual-page-tag to physical-page mappings, backed
//! by the [`PageTable`] on a miss. The set is chosen by the TLB index bits of
//! the virtual page number; the remaining high bits form the tag.

use crate::common::VirtAddr;
use crate::core::access::Outcome;
use crate::core::plan::BitPlan;
use crate::core::units::set::Set;

use super::page_table::PageTable;

/// Result of a TLB lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TlbLookup {
    /// Virtual page number of the address.
    pub virtual_page: u64,
    /// TLB tag (virtual page number above the index bits).
    pub tag: u64,
    /// Set index.
    pub index: u64,
    /// Whether the translation was cached.
    pub outcome: Outcome,
    /// Outcome of the page-table walk; `Skipped` on a TLB hit.
    pub page_table: Outcome,
    /// Translated physical page number.
    pub physical_page: u64,
}

/// Translation Lookaside Buffer structure.
#[derive(Clone, Debug)]
pub struct Tlb {
    /// One set per index value; the payload is the physical page number.
    sets: Vec<Set<u64>>,
    plan: BitPlan,
}

impl Tlb {
    /// Creates an empty TLB with `sets` sets of `ways` entries.
    ///
    /// `sets` must equal `2^plan.tlb_index_bits`, which a validated config
    /// guarantees.
    pub fn new(sets: usize, ways: usize, plan: BitPlan) -> Self {
        Self {
            sets: vec![Set::new(ways); sets.max(1)],
            plan,
        }
    }

    /// Translates `vaddr`, walking `page_table` on a miss.
    ///
    /// A miss installs the translation over the set's LRU entry. Every call
    /// updates exactly one entry: the one that hit or the one that was filled.
    pub fn lookup(&mut self, vaddr: VirtAddr, page_table: &mut PageTable) -> TlbLookup {
        let layout = self.plan.virtual_layout();
        let virtual_page = self.plan.virtual_page_number(vaddr.val());
        let tag = layout.tag(vaddr.val());
        let index = layout.index(vaddr.val());
        let set = &mut self.sets[index as usize];

        if let Some(way) = set.find(tag) {
            let physical_page = set.touch(way).payload;
            return TlbLookup {
                virtual_page,
                tag,
                index,
                outcome: Outcome::Hit,
                page_table: Outcome::Skipped,
                physical_page,
            };
        }

        let walk = page_table.lookup(virtual_page);
        let (way, evicted) = set.install(tag, walk.physical_page);
        if let Some(old) = evicted {
            tracing::debug!(index, way, old_tag = old.tag, new_tag = tag, "tlb eviction");
        }

        TlbLookup {
            virtual_page,
            tag,
            index,
            outcome: Outcome::Miss,
            page_table: walk.outcome,
            physical_page: walk.physical_page,
        }
    }

    /// Cached physical page for `vaddr`, without touching usage counters.
    pub fn peek(&self, vaddr: VirtAddr) -> Option<u64> {
        let layout = self.plan.virtual_layout();
        let tag = layout.tag(vaddr.val());
        let set = &self.sets[layout.index(vaddr.val()) as usize];
        set.find(tag).map(|way| set.slots()[way].payload)
    }

    /// Number of sets.
    pub fn sets(&self) -> usize {
        self.sets.len()
    }
}
