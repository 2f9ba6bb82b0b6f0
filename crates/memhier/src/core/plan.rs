//! Bit-field planning.
//!
//! Derives the tag/index/offset widths of every structure from the configured
//! capacities. The plan is computed once per run and is read-only afterwards.
//!
//! The virtual address width is `log2(physical_pages * virtual_pages * page_size)`
//! and the physical page field is `log2(virtual_pages)` bits wide. Reports from
//! older runs depend on both widths, so they are not normalized.

use serde::Serialize;

use crate::common::bits::{MAX_FIELD_BITS, extract_field};
use crate::common::error::ConfigError;
use crate::common::log2_exact;
use crate::config::Config;

/// Tag/index/offset widths of one cache level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FieldLayout {
    /// Width of the tag field.
    pub tag_bits: u32,
    /// Width of the set-index field.
    pub index_bits: u32,
    /// Width of the line-offset field.
    pub offset_bits: u32,
    /// Total width; always `tag_bits + index_bits + offset_bits`.
    pub address_bits: u32,
}

impl FieldLayout {
    /// Tag field of `addr`.
    #[inline]
    pub fn tag(&self, addr: u64) -> u64 {
        extract_field(addr, 0, self.tag_bits, self.address_bits)
    }

    /// Set-index field of `addr`.
    #[inline]
    pub fn index(&self, addr: u64) -> u64 {
        extract_field(
            addr,
            self.tag_bits,
            self.tag_bits + self.index_bits,
            self.address_bits,
        )
    }

    /// Line-offset field of `addr`.
    #[inline]
    pub fn offset(&self, addr: u64) -> u64 {
        extract_field(
            addr,
            self.tag_bits + self.index_bits,
            self.address_bits,
            self.address_bits,
        )
    }
}

/// Derived bit widths for every structure in the hierarchy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BitPlan {
    /// `log2(page_size)`.
    pub page_offset_bits: u32,
    /// `log2(tlb.sets)`.
    pub tlb_index_bits: u32,
    /// Width of a virtual address.
    pub virtual_address_bits: u32,
    /// Virtual page number bits above the TLB index.
    pub virtual_page_tag_bits: u32,
    /// `virtual_page_tag_bits + tlb_index_bits`.
    pub virtual_page_number_bits: u32,
    /// Width of the physical page field of a physical address.
    pub physical_page_bits: u32,
    /// Data-cache set-index width.
    pub dc_index_bits: u32,
    /// Data-cache line-offset width.
    pub dc_offset_bits: u32,
    /// Data-cache tag width.
    pub dc_tag_bits: u32,
    /// Physical address width seen by the data cache.
    pub dc_address_bits: u32,
    /// L2 set-index width.
    pub l2_index_bits: u32,
    /// L2 line-offset width.
    pub l2_offset_bits: u32,
    /// L2 tag width.
    pub l2_tag_bits: u32,
    /// Physical address width seen by the L2 cache.
    pub l2_address_bits: u32,
}

fn log2(field: &'static str, value: u64) -> Result<u32, ConfigError> {
    log2_exact(value).ok_or(ConfigError::NotPowerOfTwo { field, value })
}

fn remaining(field: &'static str, total: u32, used: &[u32]) -> Result<u32, ConfigError> {
    let value = i64::from(total) - used.iter().map(|&b| i64::from(b)).sum::<i64>();
    u32::try_from(value).map_err(|_| ConfigError::NegativeWidth { field, value })
}

impl BitPlan {
    /// Computes the plan for `config`.
    ///
    /// Fails when a capacity feeding a width is not a positive power of two,
    /// when a tag width would be negative, or when an address would be wider
    /// than the field extractor supports.
    ///
    /// # Errors
    ///
    /// [`ConfigError::NotPowerOfTwo`], [`ConfigError::NegativeWidth`], or
    /// [`ConfigError::AddressTooWide`].
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        let pt = &config.page_table;
        let page_offset_bits = log2("page_table.page_size", pt.page_size)?;
        let physical_page_count_bits = log2("page_table.physical_pages", pt.physical_pages)?;
        let virtual_page_count_bits = log2("page_table.virtual_pages", pt.virtual_pages)?;
        let tlb_index_bits = log2("tlb.sets", config.tlb.sets)?;

        // log2 of a product of powers of two is the sum of their logs.
        let virtual_address_bits =
            physical_page_count_bits + virtual_page_count_bits + page_offset_bits;
        let physical_address_bits = physical_page_count_bits + page_offset_bits;
        for bits in [virtual_address_bits, physical_address_bits] {
            if bits > MAX_FIELD_BITS {
                return Err(ConfigError::AddressTooWide {
                    bits,
                    max: MAX_FIELD_BITS,
                });
            }
        }

        let virtual_page_tag_bits = remaining(
            "virtual_page_tag_bits",
            virtual_address_bits,
            &[page_offset_bits, tlb_index_bits],
        )?;

        let dc_index_bits = log2("data_cache.sets", config.data_cache.sets)?;
        let dc_offset_bits = log2("data_cache.line_size", config.data_cache.line_size)?;
        let dc_tag_bits = remaining(
            "dc_tag_bits",
            physical_address_bits,
            &[dc_index_bits, dc_offset_bits],
        )?;

        let l2_index_bits = log2("l2.sets", config.l2.sets)?;
        let l2_offset_bits = log2("l2.line_size", config.l2.line_size)?;
        let l2_tag_bits = remaining(
            "l2_tag_bits",
            physical_address_bits,
            &[l2_index_bits, l2_offset_bits],
        )?;

        Ok(Self {
            page_offset_bits,
            tlb_index_bits,
            virtual_address_bits,
            virtual_page_tag_bits,
            virtual_page_number_bits: virtual_page_tag_bits + tlb_index_bits,
            physical_page_bits: virtual_page_count_bits,
            dc_index_bits,
            dc_offset_bits,
            dc_tag_bits,
            dc_address_bits: physical_address_bits,
            l2_index_bits,
            l2_offset_bits,
            l2_tag_bits,
            l2_address_bits: physical_address_bits,
        })
    }

    /// Field layout of the data cache.
    pub const fn dc_layout(&self) -> FieldLayout {
        FieldLayout {
            tag_bits: self.dc_tag_bits,
            index_bits: self.dc_index_bits,
            offset_bits: self.dc_offset_bits,
            address_bits: self.dc_address_bits,
        }
    }

    /// Field layout of the L2 cache.
    pub const fn l2_layout(&self) -> FieldLayout {
        FieldLayout {
            tag_bits: self.l2_tag_bits,
            index_bits: self.l2_index_bits,
            offset_bits: self.l2_offset_bits,
            address_bits: self.l2_address_bits,
        }
    }

    /// Virtual address split as TLB tag / TLB index / page offset.
    pub const fn virtual_layout(&self) -> FieldLayout {
        FieldLayout {
            tag_bits: self.virtual_page_tag_bits,
            index_bits: self.tlb_index_bits,
            offset_bits: self.page_offset_bits,
            address_bits: self.virtual_address_bits,
        }
    }

    /// Virtual page number of `vaddr` (TLB tag and index together).
    #[inline]
    pub fn virtual_page_number(&self, vaddr: u64) -> u64 {
        extract_field(
            vaddr,
            0,
            self.virtual_page_number_bits,
            self.virtual_address_bits,
        )
    }

    /// Page offset of `vaddr`.
    #[inline]
    pub fn page_offset(&self, vaddr: u64) -> u64 {
        extract_field(
            vaddr,
            self.virtual_page_number_bits,
            self.virtual_page_number_bits + self.page_offset_bits,
            self.virtual_address_bits,
        )
    }
}
