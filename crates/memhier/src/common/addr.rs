//! Physical and Virtual Address types.
//!
//! Strong types keep trace addresses (virtual, when translation is on) apart
//! from the physical addresses the caches are indexed with.

use serde::{Deserialize, Serialize};

/// A virtual address as read from the trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VirtAddr(pub u64);

/// A physical address, formed from a physical page number and a page offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhysAddr(pub u64);

impl VirtAddr {
    /// Creates a new virtual address from a raw 64-bit value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(&self) -> u64 {
        self.0
    }
}

impl PhysAddr {
    /// Creates a new physical address from a raw 64-bit value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Concatenates a physical page number and a page offset.
    ///
    /// The page number is treated as a `page_bits`-wide field and the offset as an
    /// `offset_bits`-wide field, so bits outside either width are dropped.
    ///
    /// # Arguments
    ///
    /// * `page` - Physical page number.
    /// * `offset` - Byte offset within the page.
    /// * `page_bits` - Width of the page-number field.
    /// * `offset_bits` - Width of the page-offset field.
    pub fn from_parts(page: u64, offset: u64, page_bits: u32, offset_bits: u32) -> Self {
        let page = page & width_mask(page_bits);
        let offset = offset & width_mask(offset_bits);
        Self(page.checked_shl(offset_bits).unwrap_or(0) | offset)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(&self) -> u64 {
        self.0
    }
}

const fn width_mask(bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        (1u64 << bits) - 1
    }
}

impl std::fmt::Display for VirtAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

impl std::fmt::Display for PhysAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
