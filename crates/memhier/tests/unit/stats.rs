//! # SimStats Unit Tests
//!
//! Verifies counter updates from result rows, derived ratios, and the
//! sectioned report.

use memhier_core::common::AccessType;
use memhier_core::core::access::{Outcome, TraceResult};
use memhier_core::stats::{STATS_SECTIONS, SimStats};
use rstest::rstest;

fn result(access: AccessType, tlb: Outcome, page_table: Outcome, dc: Outcome, l2: Outcome) -> TraceResult {
    TraceResult {
        access,
        virtual_address: 0,
        virtual_page: Some(0),
        page_offset: 0,
        tlb_tag: None,
        tlb_index: None,
        tlb,
        page_table,
        physical_page: 0,
        physical_address: 0,
        dc_tag: 0,
        dc_index: 0,
        dc,
        l2_tag: None,
        l2_index: None,
        l2,
    }
}

#[test]
fn default_stats_all_zero() {
    let stats = SimStats::default();
    assert_eq!(stats.total_accesses(), 0);
    assert_eq!(stats.main_memory_refs, 0);
    assert_eq!(stats.disk_refs, 0);
}

#[test]
fn ratios_are_zero_without_samples() {
    let stats = SimStats::default();
    assert_eq!(stats.tlb_hit_ratio(), 0.0);
    assert_eq!(stats.pt_hit_ratio(), 0.0);
    assert_eq!(stats.dc_hit_ratio(), 0.0);
    assert_eq!(stats.l2_hit_ratio(), 0.0);
    assert_eq!(stats.read_ratio(), 0.0);
}

// ══════════════════════════════════════════════════════════
// 1. Recording
// ══════════════════════════════════════════════════════════

#[test]
fn tlb_hit_skips_page_table_counters() {
    use Outcome::{Hit, Skipped};
    let mut stats = SimStats::default();
    stats.record(&result(AccessType::Read, Hit, Skipped, Hit, Skipped));

    assert_eq!(stats.tlb_hits, 1);
    assert_eq!(stats.pt_hits + stats.pt_faults, 0);
    assert_eq!(stats.page_table_refs, 0);
    assert_eq!(stats.dc_hits, 1);
    assert_eq!(stats.l2_hits + stats.l2_misses, 0);
    assert_eq!(stats.main_memory_refs, 1);
}

#[test]
fn page_fault_counts_disk_reference() {
    use Outcome::{Miss, Skipped};
    let mut stats = SimStats::default();
    stats.record(&result(AccessType::Write, Miss, Miss, Miss, Skipped));

    assert_eq!(stats.tlb_misses, 1);
    assert_eq!(stats.pt_faults, 1);
    assert_eq!(stats.page_table_refs, 1);
    assert_eq!(stats.disk_refs, 1);
    assert_eq!(stats.total_writes, 1);
}

#[test]
fn ratios_from_counts() {
    let stats = SimStats {
        tlb_hits: 3,
        tlb_misses: 1,
        dc_hits: 1,
        dc_misses: 1,
        total_reads: 3,
        total_writes: 1,
        ..SimStats::default()
    };
    assert!((stats.tlb_hit_ratio() - 0.75).abs() < f64::EPSILON);
    assert!((stats.dc_hit_ratio() - 0.5).abs() < f64::EPSILON);
    assert!((stats.read_ratio() - 0.75).abs() < f64::EPSILON);
}

// ══════════════════════════════════════════════════════════
// 2. Report
// ══════════════════════════════════════════════════════════

#[test]
fn full_report_has_every_section() {
    let text = SimStats::default().to_string();
    assert!(text.contains("Simulation statistics"));
    assert!(text.contains("dtlb hits        : 0"));
    assert!(text.contains("pt faults        : 0"));
    assert!(text.contains("dc hit ratio     : 0.000000"));
    assert!(text.contains("L2 misses        : 0"));
    assert!(text.contains("Ratio of reads   : 0.000000"));
    assert!(text.contains("disk refs        : 0"));
}

#[rstest]
#[case("tlb", "dtlb hits", "pt hits")]
#[case("page_table", "pt hits", "dtlb hits")]
#[case("cache", "dc hits", "Total reads")]
#[case("references", "main memory refs", "dc hits")]
fn selected_section_only(#[case] section: &str, #[case] present: &str, #[case] absent: &str) {
    let text = SimStats::default().render_sections(&[section.to_owned()]);
    assert!(text.contains(present));
    assert!(!text.contains(absent));
}

#[test]
fn section_names_are_stable() {
    assert_eq!(STATS_SECTIONS, &["tlb", "page_table", "cache", "references"]);
}

#[test]
fn serializes_counters() {
    let stats = SimStats {
        dc_hits: 9,
        ..SimStats::default()
    };
    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["dc_hits"], 9);
    let back: SimStats = serde_json::from_value(json).unwrap();
    assert_eq!(back, stats);
}
