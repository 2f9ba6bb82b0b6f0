//! # TLB Tests
//!
//! Verifies hits, page-table walks on misses, and set-local replacement.

use memhier_core::common::VirtAddr;
use memhier_core::config::Config;
use memhier_core::core::access::Outcome;
use memhier_core::core::plan::BitPlan;
use memhier_core::core::units::mmu::page_table::PageTable;
use memhier_core::core::units::mmu::tlb::Tlb;

/// Default geometry: 2 sets x 1 way, 16-bit virtual addresses, 256-byte pages.
fn setup() -> (Tlb, PageTable) {
    let config = Config::default();
    let plan = BitPlan::new(&config).unwrap();
    (Tlb::new(2, 1, plan), PageTable::new(4))
}

#[test]
fn miss_walks_page_table_then_hits() {
    let (mut tlb, mut pt) = setup();

    let first = tlb.lookup(VirtAddr::new(0x0c84), &mut pt);
    assert_eq!(first.outcome, Outcome::Miss);
    assert_eq!(first.page_table, Outcome::Miss);
    assert_eq!(first.virtual_page, 0x0c);
    assert_eq!(first.tag, 0x06);
    assert_eq!(first.index, 0);
    assert_eq!(first.physical_page, 0);

    let second = tlb.lookup(VirtAddr::new(0x0c00), &mut pt);
    assert_eq!(second.outcome, Outcome::Hit);
    assert_eq!(second.page_table, Outcome::Skipped);
    assert_eq!(second.physical_page, 0);
}

#[test]
fn index_selects_set() {
    let (mut tlb, mut pt) = setup();
    // Pages 0x0c and 0x0d differ only in the index bit.
    let a = tlb.lookup(VirtAddr::new(0x0c00), &mut pt);
    let b = tlb.lookup(VirtAddr::new(0x0d00), &mut pt);
    assert_eq!((a.index, b.index), (0, 1));
    assert_eq!(a.tag, b.tag);
    assert_eq!(tlb.peek(VirtAddr::new(0x0c00)), Some(0));
    assert_eq!(tlb.peek(VirtAddr::new(0x0d00)), Some(1));
}

#[test]
fn conflict_evicts_but_page_table_keeps_mapping() {
    let (mut tlb, mut pt) = setup();
    // 0x0c and 0x0e share set 0.
    let _ = tlb.lookup(VirtAddr::new(0x0c00), &mut pt);
    let _ = tlb.lookup(VirtAddr::new(0x0e00), &mut pt);
    assert_eq!(tlb.peek(VirtAddr::new(0x0c00)), None);

    let back = tlb.lookup(VirtAddr::new(0x0c00), &mut pt);
    assert_eq!(back.outcome, Outcome::Miss);
    assert_eq!(back.page_table, Outcome::Hit);
    assert_eq!(back.physical_page, 0);
}

#[test]
fn sets_match_geometry() {
    let (tlb, _) = setup();
    assert_eq!(tlb.sets(), 2);
}
