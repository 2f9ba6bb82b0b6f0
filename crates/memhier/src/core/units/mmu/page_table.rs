//! Page Table.
//!
//! A fully associative map from virtual page number to physical page number
//! with one slot per physical page. A slot's index is its physical page number,
//! so physical pages are never relocated: a fault either claims the next unused
//! page or takes over the LRU page.

use serde::Serialize;

use crate::core::access::Outcome;
use crate::core::units::set::Set;

/// Payload of a page-table slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct PageMapping {
    /// Virtual page mapped into this frame.
    pub virtual_page: u64,
    /// Physical page number (the slot index).
    pub physical_page: u64,
}

/// Result of a page-table lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageLookup {
    /// Frame now holding the virtual page.
    pub physical_page: u64,
    /// `Hit` when the mapping was resident, `Miss` on a page fault.
    pub outcome: Outcome,
    /// Virtual page that lost its frame, if the fault evicted one.
    pub evicted: Option<u64>,
}

/// Page table with a next-free frame allocator.
#[derive(Clone, Debug)]
pub struct PageTable {
    frames: Set<PageMapping>,
    next_free: usize,
}

impl PageTable {
    /// Creates an empty page table with `physical_pages` frames.
    pub fn new(physical_pages: usize) -> Self {
        Self {
            frames: Set::new(physical_pages),
            next_free: 0,
        }
    }

    /// Translates `virtual_page`, allocating a frame on a fault.
    ///
    /// Frames are handed out in index order until every one is in use; after
    /// that the LRU frame is reassigned.
    pub fn lookup(&mut self, virtual_page: u64) -> PageLookup {
        if let Some(frame) = self.frames.find(virtual_page) {
            let slot = self.frames.touch(frame);
            return PageLookup {
                physical_page: slot.payload.physical_page,
                outcome: Outcome::Hit,
                evicted: None,
            };
        }

        let frame = if self.next_free < self.frames.ways() {
            self.next_free += 1;
            self.next_free - 1
        } else {
            self.frames.victim()
        };
        let physical_page = frame as u64;
        let evicted = self
            .frames
            .fill(
                frame,
                virtual_page,
                PageMapping {
                    virtual_page,
                    physical_page,
                },
            )
            .map(|old| old.payload.virtual_page);

        tracing::debug!(
            virtual_page,
            physical_page,
            ?evicted,
            "page fault"
        );

        PageLookup {
            physical_page,
            outcome: Outcome::Miss,
            evicted,
        }
    }

    /// Frame currently mapping `virtual_page`, without touching usage counters.
    pub fn resident(&self, virtual_page: u64) -> Option<u64> {
        self.frames
            .find(virtual_page)
            .map(|frame| self.frames.slots()[frame].payload.physical_page)
    }

    /// Number of frames.
    pub fn frames(&self) -> usize {
        self.frames.ways()
    }

    /// Number of frames handed out so far.
    pub fn allocated(&self) -> usize {
        self.next_free
    }
}
