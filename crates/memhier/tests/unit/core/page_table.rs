//! # Page Table Tests
//!
//! Frames are handed out in order until physical memory is full, after which
//! the least-used frame is reassigned. A frame's index is its physical page
//! number.

use memhier_core::core::access::Outcome;
use memhier_core::core::units::mmu::page_table::PageTable;

#[test]
fn first_touch_faults_and_claims_next_frame() {
    let mut pt = PageTable::new(4);
    let a = pt.lookup(0x10);
    let b = pt.lookup(0x20);

    assert_eq!(a.outcome, Outcome::Miss);
    assert_eq!(a.physical_page, 0);
    assert_eq!(b.physical_page, 1);
    assert_eq!(pt.allocated(), 2);
    assert_eq!(a.evicted, None);
}

#[test]
fn resident_page_hits_same_frame() {
    let mut pt = PageTable::new(4);
    let _ = pt.lookup(0x10);
    let again = pt.lookup(0x10);
    assert_eq!(again.outcome, Outcome::Hit);
    assert_eq!(again.physical_page, 0);
    assert_eq!(pt.allocated(), 1);
}

#[test]
fn full_table_reassigns_least_used_frame() {
    let mut pt = PageTable::new(2);
    let _ = pt.lookup(0xa); // frame 0
    let _ = pt.lookup(0xb); // frame 1
    let _ = pt.lookup(0xa); // frame 0 usage 1

    let c = pt.lookup(0xc);
    assert_eq!(c.outcome, Outcome::Miss);
    assert_eq!(c.physical_page, 1);
    assert_eq!(c.evicted, Some(0xb));
    assert_eq!(pt.resident(0xb), None);
    assert_eq!(pt.resident(0xa), Some(0));
    assert_eq!(pt.resident(0xc), Some(1));
}

#[test]
fn frame_count_is_fixed() {
    let mut pt = PageTable::new(2);
    for vpn in 0..10 {
        let _ = pt.lookup(vpn);
    }
    assert_eq!(pt.frames(), 2);
    assert_eq!(pt.allocated(), 2);
}

#[test]
fn physical_page_stays_below_frame_count() {
    let mut pt = PageTable::new(4);
    for vpn in [3, 9, 3, 12, 40, 9, 7, 3, 1] {
        assert!(pt.lookup(vpn).physical_page < 4);
    }
}
