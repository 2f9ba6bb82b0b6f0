//! # Bit Plan Tests
//!
//! Verifies the derived tag/index/offset widths and that every split sums to
//! its address width.

use memhier_core::config::Config;
use memhier_core::core::plan::BitPlan;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::common::tiny_config;

#[test]
fn default_plan_widths() {
    let plan = BitPlan::new(&Config::default()).unwrap();

    assert_eq!(plan.page_offset_bits, 8);
    assert_eq!(plan.tlb_index_bits, 1);
    // log2(4 * 64 * 256)
    assert_eq!(plan.virtual_address_bits, 16);
    assert_eq!(plan.virtual_page_tag_bits, 7);
    assert_eq!(plan.virtual_page_number_bits, 8);
    assert_eq!(plan.physical_page_bits, 6);

    assert_eq!(plan.dc_address_bits, 10);
    assert_eq!(plan.dc_index_bits, 2);
    assert_eq!(plan.dc_offset_bits, 4);
    assert_eq!(plan.dc_tag_bits, 4);

    assert_eq!(plan.l2_address_bits, 10);
    assert_eq!(plan.l2_index_bits, 4);
    assert_eq!(plan.l2_offset_bits, 4);
    assert_eq!(plan.l2_tag_bits, 2);
}

#[test]
fn tiny_plan_widths() {
    let plan = BitPlan::new(&tiny_config()).unwrap();
    assert_eq!(plan.virtual_address_bits, 5);
    assert_eq!(plan.page_offset_bits, 2);
    assert_eq!(plan.tlb_index_bits, 0);
    assert_eq!(plan.virtual_page_number_bits, 3);
    assert_eq!(plan.dc_address_bits, 3);
    assert_eq!(plan.dc_tag_bits, 1);
    assert_eq!(plan.dc_index_bits, 0);
}

#[test]
fn virtual_fields_of_an_address() {
    let plan = BitPlan::new(&Config::default()).unwrap();
    // 16-bit virtual address 0x0c84: page 0x0c, offset 0x84.
    assert_eq!(plan.virtual_page_number(0x0c84), 0x0c);
    assert_eq!(plan.page_offset(0x0c84), 0x84);

    let layout = plan.virtual_layout();
    assert_eq!(layout.tag(0x0c84), 0x06);
    assert_eq!(layout.index(0x0c84), 0);
    assert_eq!(layout.offset(0x0c84), 0x84);
}

#[test]
fn cache_layout_splits_physical_address() {
    let plan = BitPlan::new(&Config::default()).unwrap();
    let dc = plan.dc_layout();
    // 10-bit physical address 0b11_0110_0101: tag 0b1101, index 0b10, offset 0b0101.
    let addr = 0b11_0110_0101;
    assert_eq!(dc.tag(addr), 0b1101);
    assert_eq!(dc.index(addr), 0b10);
    assert_eq!(dc.offset(addr), 0b0101);
}

#[test]
fn address_wider_than_extractor_is_rejected() {
    let mut config = Config::default();
    config.page_table.virtual_pages = 1 << 63;
    config.page_table.physical_pages = 1 << 62;
    config.page_table.page_size = 1 << 20;
    assert!(BitPlan::new(&config).is_err());
}

fn pow2(max: u32) -> impl Strategy<Value = u64> {
    (0..=max).prop_map(|e| 1u64 << e)
}

proptest! {
    /// Every successfully derived layout sums to its address width.
    #[test]
    fn widths_sum_to_address_width(
        tlb_sets in pow2(4),
        vp in pow2(12),
        pp in pow2(10),
        page in pow2(12),
        dc_sets in pow2(6),
        dc_line in pow2(6),
        l2_sets in pow2(8),
        l2_line in pow2(7),
    ) {
        let mut config = Config::default();
        config.tlb.sets = tlb_sets;
        config.page_table.virtual_pages = vp;
        config.page_table.physical_pages = pp;
        config.page_table.page_size = page;
        config.data_cache.sets = dc_sets;
        config.data_cache.line_size = dc_line;
        config.l2.sets = l2_sets;
        config.l2.line_size = l2_line;

        if let Ok(plan) = BitPlan::new(&config) {
            prop_assert_eq!(
                plan.virtual_page_tag_bits + plan.tlb_index_bits + plan.page_offset_bits,
                plan.virtual_address_bits
            );
            prop_assert_eq!(
                plan.dc_tag_bits + plan.dc_index_bits + plan.dc_offset_bits,
                plan.dc_address_bits
            );
            prop_assert_eq!(
                plan.l2_tag_bits + plan.l2_index_bits + plan.l2_offset_bits,
                plan.l2_address_bits
            );
            prop_assert_eq!(
                plan.virtual_page_number_bits,
                plan.virtual_page_tag_bits + plan.tlb_index_bits
            );
        } else {
            prop_assert!(config.validate().is_err());
        }
    }
}
