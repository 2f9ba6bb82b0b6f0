//! Memory Management Unit (MMU).
//!
//! Translates virtual trace addresses into physical page numbers. It provides:
//! 1. **TLB:** Set-associative translation cache consulted first when enabled.
//! 2. **Page Table:** Fully associative VPN-to-PPN map that owns the frame allocator.

/// Page table and frame allocator.
pub mod page_table;

/// Translation Lookaside Buffer.
pub mod tlb;

use crate::common::VirtAddr;
use crate::config::Config;
use crate::core::access::Outcome;
use crate::core::plan::BitPlan;

use self::page_table::PageTable;
use self::tlb::Tlb;

/// Result of translating one virtual address.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Translation {
    /// Virtual page number.
    pub virtual_page: u64,
    /// TLB tag, when the TLB was consulted.
    pub tlb_tag: Option<u64>,
    /// TLB set index, when the TLB was consulted.
    pub tlb_index: Option<u64>,
    /// TLB outcome; `Skipped` when the TLB is disabled.
    pub tlb: Outcome,
    /// Page-table outcome; `Skipped` when the TLB hit.
    pub page_table: Outcome,
    /// Physical page number.
    pub physical_page: u64,
}

/// TLB plus page table.
#[derive(Clone, Debug)]
pub struct Mmu {
    tlb: Option<Tlb>,
    page_table: PageTable,
    plan: BitPlan,
}

impl Mmu {
    /// Builds the translation structures for `config`.
    ///
    /// No TLB is built unless [`Config::tlb_active`] holds.
    pub fn new(config: &Config, plan: BitPlan) -> Self {
        let tlb = config.tlb_active().then(|| {
            Tlb::new(
                config.tlb.sets as usize,
                config.tlb.ways as usize,
                plan,
            )
        });
        Self {
            tlb,
            page_table: PageTable::new(config.page_table.physical_pages as usize),
            plan,
        }
    }

    /// Translates `vaddr` through the TLB, or straight through the page table
    /// when the TLB is disabled.
    pub fn translate(&mut self, vaddr: VirtAddr) -> Translation {
        match &mut self.tlb {
            Some(tlb) => {
                let hit = tlb.lookup(vaddr, &mut self.page_table);
                Translation {
                    virtual_page: hit.virtual_page,
                    tlb_tag: Some(hit.tag),
                    tlb_index: Some(hit.index),
                    tlb: hit.outcome,
                    page_table: hit.page_table,
                    physical_page: hit.physical_page,
                }
            }
            None => {
                let virtual_page = self.plan.virtual_page_number(vaddr.val());
                let walk = self.page_table.lookup(virtual_page);
                Translation {
                    virtual_page,
                    tlb_tag: None,
                    tlb_index: None,
                    tlb: Outcome::Skipped,
                    page_table: walk.outcome,
                    physical_page: walk.physical_page,
                }
            }
        }
    }

    /// The TLB, when enabled.
    pub const fn tlb(&self) -> Option<&Tlb> {
        self.tlb.as_ref()
    }

    /// The page table.
    pub const fn page_table(&self) -> &PageTable {
        &self.page_table
    }
}
