//! Memory hierarchy core.
//!
//! This module owns the simulated structures and routes accesses through them:
//! 1. **Plan:** Tag/index/offset widths derived from the configuration.
//! 2. **Units:** TLB, page table, data cache, and L2 cache.
//! 3. **Driver:** [`Hierarchy::process_access`], which runs one trace record
//!    through every level and updates the counters.
//!
//! All state lives in one [`Hierarchy`] value. Accesses must be applied in
//! trace order: replacement decisions depend on the usage counters left behind
//! by earlier accesses.

/// Per-access result records.
pub mod access;
/// Bit-field planning.
pub mod plan;
/// TLB, page table, and cache structures.
pub mod units;

use crate::common::error::ConfigError;
use crate::common::{AccessType, PhysAddr, VirtAddr, extract_field};
use crate::config::Config;
use crate::stats::SimStats;

use self::access::{Outcome, TraceResult};
use self::plan::BitPlan;
use self::units::cache::CacheSim;
use self::units::mmu::Mmu;

/// The whole simulated hierarchy plus its counters.
#[derive(Clone, Debug)]
pub struct Hierarchy {
    config: Config,
    plan: BitPlan,
    mmu: Mmu,
    dc: CacheSim,
    l2: Option<CacheSim>,
    stats: SimStats,
}

impl Hierarchy {
    /// Validates `config` and builds an empty hierarchy for it.
    ///
    /// # Errors
    ///
    /// Returns the configuration error that [`Config::validate`] reports.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let plan = BitPlan::new(config)?;

        if config.use_tlb && !config.tlb_active() {
            tracing::warn!("TLB enabled with physical addresses; the TLB will not be used");
        }

        let write_back = !config.data_cache.write_through_no_allocate;
        let dc = CacheSim::new(
            "dc",
            config.data_cache.sets as usize,
            config.data_cache.ways as usize,
            plan.dc_layout(),
            write_back,
        );
        let l2 = config.use_l2.then(|| {
            CacheSim::new(
                "l2",
                config.l2.sets as usize,
                config.l2.ways as usize,
                plan.l2_layout(),
                write_back,
            )
        });

        tracing::debug!(?plan, "hierarchy initialized");

        Ok(Self {
            config: *config,
            plan,
            mmu: Mmu::new(config, plan),
            dc,
            l2,
            stats: SimStats::default(),
        })
    }

    /// Routes one access through the hierarchy.
    ///
    /// Translates the address (TLB, then page table on a miss), forms the
    /// physical address, looks it up in the data cache and, on a data-cache
    /// miss, in L2. Updates the counters and returns the full record.
    pub fn process_access(&mut self, access: AccessType, address: u64) -> TraceResult {
        let plan = self.plan;

        let (virtual_page, page_offset, translation, paddr) = if self.config.virtual_addresses {
            let page_offset = plan.page_offset(address);
            let translation = self.mmu.translate(VirtAddr::new(address));
            let paddr = PhysAddr::from_parts(
                translation.physical_page,
                page_offset,
                plan.physical_page_bits,
                plan.page_offset_bits,
            );
            (Some(translation.virtual_page), page_offset, Some(translation), paddr)
        } else {
            let total = plan.dc_address_bits;
            let page_bits = total - plan.page_offset_bits;
            let page = extract_field(address, 0, page_bits, total);
            let page_offset = extract_field(address, page_bits, total, total);
            let paddr = PhysAddr::from_parts(page, page_offset, page_bits, plan.page_offset_bits);
            (None, page_offset, None, paddr)
        };

        let physical_page = translation.map_or(
            paddr.val() >> plan.page_offset_bits,
            |t| t.physical_page,
        );

        let dc = self.dc.access(paddr, access);
        let l2 = match &mut self.l2 {
            Some(l2) if dc.outcome == Outcome::Miss => Some(l2.access(paddr, access)),
            _ => None,
        };

        let result = TraceResult {
            access,
            virtual_address: address,
            virtual_page,
            page_offset,
            tlb_tag: translation.and_then(|t| t.tlb_tag),
            tlb_index: translation.and_then(|t| t.tlb_index),
            tlb: translation.map_or(Outcome::Skipped, |t| t.tlb),
            page_table: translation.map_or(Outcome::Skipped, |t| t.page_table),
            physical_page,
            physical_address: paddr.val(),
            dc_tag: dc.tag,
            dc_index: dc.index,
            dc: dc.outcome,
            l2_tag: l2.map(|l| l.tag),
            l2_index: l2.map(|l| l.index),
            l2: l2.map_or(Outcome::Skipped, |l| l.outcome),
        };

        self.stats.record(&result);
        tracing::trace!(
            address,
            physical = paddr.val(),
            tlb = ?result.tlb,
            page_table = ?result.page_table,
            dc = ?result.dc,
            l2 = ?result.l2,
            "access"
        );
        result
    }

    /// Counters accumulated so far.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Derived bit widths.
    pub const fn plan(&self) -> &BitPlan {
        &self.plan
    }

    /// Configuration the hierarchy was built from.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Translation structures.
    pub const fn mmu(&self) -> &Mmu {
        &self.mmu
    }

    /// L1 data cache.
    pub const fn data_cache(&self) -> &CacheSim {
        &self.dc
    }

    /// L2 cache, when enabled.
    pub const fn l2_cache(&self) -> Option<&CacheSim> {
        self.l2.as_ref()
    }
}
