//! Configuration system for the memory hierarchy simulator.
//!
//! This module defines the configuration structures used to parameterize a run.
//! It provides:
//! 1. **Defaults:** Baseline geometry for every structure.
//! 2. **Structures:** Per-structure config for the TLB, page table, data cache, and L2.
//! 3. **Validation:** Every count and size must be a positive power of two, and
//!    no structure may exceed [`MAX_SLOTS`] slots.
//!
//! Configuration is loaded from the sectioned text format or JSON by
//! [`crate::sim::loader`], or built with `Config::default()`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;
use crate::common::log2_exact;
use crate::core::plan::BitPlan;

/// Default geometry used when a field is not supplied.
mod defaults {
    /// Number of TLB sets.
    pub const TLB_SETS: u64 = 2;
    /// TLB associativity.
    pub const TLB_WAYS: u64 = 1;

    /// Number of virtual pages.
    pub const VIRTUAL_PAGES: u64 = 64;
    /// Number of physical pages (page-table slots).
    pub const PHYSICAL_PAGES: u64 = 4;
    /// Page size in bytes.
    pub const PAGE_SIZE: u64 = 256;

    /// Number of data-cache sets.
    pub const DC_SETS: u64 = 4;
    /// Data-cache associativity.
    pub const DC_WAYS: u64 = 1;
    /// Data-cache line size in bytes.
    pub const DC_LINE: u64 = 16;

    /// Number of L2 sets.
    pub const L2_SETS: u64 = 16;
    /// L2 associativity.
    pub const L2_WAYS: u64 = 4;
    /// L2 line size in bytes.
    pub const L2_LINE: u64 = 16;
}

/// Largest slot count any one structure may have (`sets * ways`, or physical pages).
pub const MAX_SLOTS: u64 = 1 << 24;

/// Data TLB geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TlbConfig {
    /// Number of sets.
    pub sets: u64,
    /// Entries per set.
    pub ways: u64,
}

impl Default for TlbConfig {
    fn default() -> Self {
        Self {
            sets: defaults::TLB_SETS,
            ways: defaults::TLB_WAYS,
        }
    }
}

/// Page table and physical memory geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageTableConfig {
    /// Number of virtual pages.
    pub virtual_pages: u64,
    /// Number of physical pages; the page table holds one slot per physical page.
    pub physical_pages: u64,
    /// Page size in bytes.
    pub page_size: u64,
}

impl Default for PageTableConfig {
    fn default() -> Self {
        Self {
            virtual_pages: defaults::VIRTUAL_PAGES,
            physical_pages: defaults::PHYSICAL_PAGES,
            page_size: defaults::PAGE_SIZE,
        }
    }
}

/// L1 data cache geometry and write policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataCacheConfig {
    /// Number of sets.
    pub sets: u64,
    /// Lines per set.
    pub ways: u64,
    /// Line size in bytes.
    pub line_size: u64,
    /// Write-through / no-write-allocate when `true`; write-back otherwise.
    ///
    /// Only tags are simulated, so the policy decides whether written lines are
    /// marked dirty and is shown in the configuration summary.
    pub write_through_no_allocate: bool,
}

impl Default for DataCacheConfig {
    fn default() -> Self {
        Self {
            sets: defaults::DC_SETS,
            ways: defaults::DC_WAYS,
            line_size: defaults::DC_LINE,
            write_through_no_allocate: true,
        }
    }
}

/// L2 cache geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct L2CacheConfig {
    /// Number of sets.
    pub sets: u64,
    /// Lines per set.
    pub ways: u64,
    /// Line size in bytes.
    pub line_size: u64,
}

impl Default for L2CacheConfig {
    fn default() -> Self {
        Self {
            sets: defaults::L2_SETS,
            ways: defaults::L2_WAYS,
            line_size: defaults::L2_LINE,
        }
    }
}

/// Root configuration for one simulation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Data TLB geometry.
    pub tlb: TlbConfig,
    /// Page table geometry.
    pub page_table: PageTableConfig,
    /// L1 data cache geometry.
    pub data_cache: DataCacheConfig,
    /// L2 cache geometry.
    pub l2: L2CacheConfig,
    /// Trace addresses are virtual and go through translation.
    pub virtual_addresses: bool,
    /// Consult the TLB before the page table.
    pub use_tlb: bool,
    /// Back data-cache misses with the L2 cache.
    pub use_l2: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tlb: TlbConfig::default(),
            page_table: PageTableConfig::default(),
            data_cache: DataCacheConfig::default(),
            l2: L2CacheConfig::default(),
            virtual_addresses: true,
            use_tlb: true,
            use_l2: true,
        }
    }
}

impl Config {
    /// Deserializes and validates a JSON configuration.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed input, or any error from
    /// [`Config::validate`].
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configuration describes a buildable hierarchy.
    ///
    /// Every count and size must be a positive power of two, no structure may
    /// exceed [`MAX_SLOTS`] slots, and every derived bit width must be
    /// non-negative.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("tlb.sets", self.tlb.sets),
            ("tlb.ways", self.tlb.ways),
            ("page_table.virtual_pages", self.page_table.virtual_pages),
            ("page_table.physical_pages", self.page_table.physical_pages),
            ("page_table.page_size", self.page_table.page_size),
            ("data_cache.sets", self.data_cache.sets),
            ("data_cache.ways", self.data_cache.ways),
            ("data_cache.line_size", self.data_cache.line_size),
            ("l2.sets", self.l2.sets),
            ("l2.ways", self.l2.ways),
            ("l2.line_size", self.l2.line_size),
        ];
        for (field, value) in fields {
            if log2_exact(value).is_none() {
                return Err(ConfigError::NotPowerOfTwo { field, value });
            }
        }

        let slot_counts = [
            ("tlb", u128::from(self.tlb.sets) * u128::from(self.tlb.ways)),
            ("page_table", u128::from(self.page_table.physical_pages)),
            (
                "data_cache",
                u128::from(self.data_cache.sets) * u128::from(self.data_cache.ways),
            ),
            ("l2", u128::from(self.l2.sets) * u128::from(self.l2.ways)),
        ];
        for (structure, slots) in slot_counts {
            if slots > u128::from(MAX_SLOTS) {
                return Err(ConfigError::TooManySlots {
                    structure,
                    slots,
                    max: MAX_SLOTS,
                });
            }
        }

        BitPlan::new(self).map(drop)
    }

    /// Whether the TLB takes part in translation.
    ///
    /// A TLB only caches translations, so it is inert for physical traces.
    pub const fn tlb_active(&self) -> bool {
        self.virtual_addresses && self.use_tlb
    }
}

impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plan = BitPlan::new(self).ok();

        writeln!(f, "Data TLB contains {} sets.", self.tlb.sets)?;
        writeln!(f, "Each set contains {} entries.", self.tlb.ways)?;
        if let Some(plan) = &plan {
            writeln!(f, "Number of bits used for the index is {}.", plan.tlb_index_bits)?;
        }
        writeln!(f)?;

        writeln!(f, "Number of virtual pages is {}.", self.page_table.virtual_pages)?;
        writeln!(f, "Number of physical pages is {}.", self.page_table.physical_pages)?;
        writeln!(f, "Each page contains {} bytes.", self.page_table.page_size)?;
        if let Some(plan) = &plan {
            writeln!(
                f,
                "Number of bits used for the page table index is {}.",
                plan.virtual_page_number_bits
            )?;
            writeln!(f, "Number of bits used for the page offset is {}.", plan.page_offset_bits)?;
        }
        writeln!(f)?;

        writeln!(f, "D-cache contains {} sets.", self.data_cache.sets)?;
        writeln!(f, "Each set contains {} entries.", self.data_cache.ways)?;
        writeln!(f, "Each line is {} bytes.", self.data_cache.line_size)?;
        writeln!(
            f,
            "The cache uses a {} policy.",
            if self.data_cache.write_through_no_allocate {
                "no write-allocate and write-through"
            } else {
                "write-allocate and write-back"
            }
        )?;
        if let Some(plan) = &plan {
            writeln!(f, "Number of bits used for the index is {}.", plan.dc_index_bits)?;
            writeln!(f, "Number of bits used for the offset is {}.", plan.dc_offset_bits)?;
        }
        writeln!(f)?;

        writeln!(f, "L2-cache contains {} sets.", self.l2.sets)?;
        writeln!(f, "Each set contains {} entries.", self.l2.ways)?;
        writeln!(f, "Each line is {} bytes.", self.l2.line_size)?;
        if let Some(plan) = &plan {
            writeln!(f, "Number of bits used for the index is {}.", plan.l2_index_bits)?;
            writeln!(f, "Number of bits used for the offset is {}.", plan.l2_offset_bits)?;
        }
        writeln!(f)?;

        writeln!(
            f,
            "The addresses read in are {} addresses.",
            if self.virtual_addresses { "virtual" } else { "physical" }
        )?;
        if !self.use_tlb {
            writeln!(f, "TLB is disabled in this configuration.")?;
        }
        if !self.use_l2 {
            writeln!(f, "L2 cache is disabled in this configuration.")?;
        }
        Ok(())
    }
}
