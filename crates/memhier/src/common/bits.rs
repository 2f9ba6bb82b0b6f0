//! Bit-field extraction.
//!
//! Every tag/index/offset split in the hierarchy goes through [`extract_field`].
//! Addresses are treated as fixed-width values whose bit 0 is the most
//! significant bit of that width, so a field is named by the half-open range of
//! positions it occupies when the address is written out left to right.

/// Widest address the extractor accepts, in bits.
pub const MAX_FIELD_BITS: u32 = u128::BITS;

/// Mask of the low `bits` bits.
#[inline]
const fn low_mask(bits: u32) -> u128 {
    if bits >= u128::BITS {
        u128::MAX
    } else {
        (1u128 << bits) - 1
    }
}

/// Extracts bit positions `[start, end)` of `value` viewed as a `total`-bit number.
///
/// Position 0 is the most significant bit of the `total`-bit representation.
/// When `value` needs more than `total` bits only its low `total` bits are
/// considered (`value mod 2^total`); when `total` exceeds 64 the value is
/// zero-extended, so leading positions read as zero.
///
/// An empty range (`start >= end`) yields 0, which is how zero-width index
/// fields (a single set) are read. A range reaching past `total` also yields 0.
///
/// # Examples
///
/// ```
/// use memhier_core::common::extract_field;
///
/// // 0b10110 as a 5-bit value: positions [0, 3) are 0b101.
/// assert_eq!(extract_field(0b10110, 0, 3, 5), 0b101);
/// // Positions [3, 5) are the low two bits.
/// assert_eq!(extract_field(0b10110, 3, 5, 5), 0b10);
/// ```
#[inline]
pub fn extract_field(value: u64, start: u32, end: u32, total: u32) -> u64 {
    if start >= end || end > total || total > MAX_FIELD_BITS {
        return 0;
    }
    let truncated = u128::from(value) & low_mask(total);
    let shifted = truncated.checked_shr(total - end).unwrap_or(0);
    (shifted & low_mask(end - start)) as u64
}

/// Returns `log2(n)` when `n` is a positive power of two.
///
/// # Examples
///
/// ```
/// use memhier_core::common::log2_exact;
///
/// assert_eq!(log2_exact(256), Some(8));
/// assert_eq!(log2_exact(1), Some(0));
/// assert_eq!(log2_exact(0), None);
/// assert_eq!(log2_exact(12), None);
/// ```
#[inline]
pub const fn log2_exact(n: u64) -> Option<u32> {
    if n.is_power_of_two() {
        Some(n.trailing_zeros())
    } else {
        None
    }
}
