//! # Configuration Tests
//!
//! Verifies defaults, power-of-two validation, slot limits, derived-width
//! checks, JSON loading, and the configuration summary.

use memhier_core::common::ConfigError;
use memhier_core::config::{Config, MAX_SLOTS};
use rstest::rstest;

use crate::common::tiny_config;

// ══════════════════════════════════════════════════════════
// 1. Defaults
// ══════════════════════════════════════════════════════════

#[test]
fn default_config_is_valid() {
    let config = Config::default();
    assert!(config.validate().is_ok());
    assert!(config.virtual_addresses);
    assert!(config.use_tlb);
    assert!(config.use_l2);
    assert!(config.tlb_active());
}

#[test]
fn tlb_is_inert_for_physical_traces() {
    let config = Config {
        virtual_addresses: false,
        ..Config::default()
    };
    assert!(config.use_tlb);
    assert!(!config.tlb_active());
}

// ══════════════════════════════════════════════════════════
// 2. Validation
// ══════════════════════════════════════════════════════════

#[rstest]
#[case::tlb_sets(|c: &mut Config| { c.tlb.sets = 3 }, "tlb.sets")]
#[case::tlb_ways(|c: &mut Config| { c.tlb.ways = 0 }, "tlb.ways")]
#[case::virtual_pages(|c: &mut Config| { c.page_table.virtual_pages = 48 }, "page_table.virtual_pages")]
#[case::physical_pages(|c: &mut Config| { c.page_table.physical_pages = 0 }, "page_table.physical_pages")]
#[case::page_size(|c: &mut Config| { c.page_table.page_size = 100 }, "page_table.page_size")]
#[case::dc_sets(|c: &mut Config| { c.data_cache.sets = 6 }, "data_cache.sets")]
#[case::dc_ways(|c: &mut Config| { c.data_cache.ways = 5 }, "data_cache.ways")]
#[case::dc_line(|c: &mut Config| { c.data_cache.line_size = 24 }, "data_cache.line_size")]
#[case::l2_sets(|c: &mut Config| { c.l2.sets = 7 }, "l2.sets")]
#[case::l2_ways(|c: &mut Config| { c.l2.ways = 0 }, "l2.ways")]
#[case::l2_line(|c: &mut Config| { c.l2.line_size = 9 }, "l2.line_size")]
fn rejects_non_power_of_two(#[case] mutate: fn(&mut Config), #[case] expected: &str) {
    let mut config = Config::default();
    mutate(&mut config);
    match config.validate() {
        Err(ConfigError::NotPowerOfTwo { field, .. }) => assert_eq!(field, expected),
        other => panic!("expected NotPowerOfTwo for {expected}, got {other:?}"),
    }
}

#[rstest]
#[case::tlb(|c: &mut Config| { c.tlb.sets = 1 << 20; c.tlb.ways = 1 << 10 }, "tlb")]
#[case::page_table(|c: &mut Config| { c.page_table.physical_pages = 1 << 60 }, "page_table")]
#[case::data_cache(|c: &mut Config| { c.data_cache.sets = 1 << 16; c.data_cache.ways = 1 << 16 }, "data_cache")]
#[case::l2(|c: &mut Config| { c.l2.sets = 1 << 40; c.l2.ways = 1 << 40 }, "l2")]
fn rejects_oversized_structures(#[case] mutate: fn(&mut Config), #[case] expected: &str) {
    let mut config = Config::default();
    mutate(&mut config);
    match config.validate() {
        Err(ConfigError::TooManySlots { structure, max, .. }) => {
            assert_eq!(structure, expected);
            assert_eq!(max, MAX_SLOTS);
        }
        other => panic!("expected TooManySlots for {expected}, got {other:?}"),
    }
}

#[test]
fn accepts_structure_at_slot_limit() {
    // Validation may still fail on derived widths, but not on the slot count.
    let mut config = Config::default();
    config.page_table.physical_pages = MAX_SLOTS;
    assert!(!matches!(
        config.validate(),
        Err(ConfigError::TooManySlots { .. })
    ));
}

#[test]
fn rejects_cache_wider_than_physical_address() {
    // 4 physical pages of 256 bytes is a 10-bit physical address; a 64-set
    // cache with 32-byte lines needs 11 bits below the tag.
    let mut config = Config::default();
    config.data_cache.sets = 64;
    config.data_cache.line_size = 32;
    match config.validate() {
        Err(ConfigError::NegativeWidth { field, value }) => {
            assert_eq!(field, "dc_tag_bits");
            assert_eq!(value, -1);
        }
        other => panic!("expected NegativeWidth, got {other:?}"),
    }
}

#[test]
fn rejects_l2_wider_than_physical_address() {
    let mut config = Config::default();
    config.l2.sets = 1024;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NegativeWidth {
            field: "l2_tag_bits",
            ..
        })
    ));
}

#[test]
fn rejects_tlb_wider_than_virtual_page_number() {
    // Tiny config has a 3-bit virtual page number.
    let mut config = tiny_config();
    config.tlb.sets = 16;
    assert!(matches!(
        config.validate(),
        Err(ConfigError::NegativeWidth {
            field: "virtual_page_tag_bits",
            ..
        })
    ));
}

// ══════════════════════════════════════════════════════════
// 3. JSON
// ══════════════════════════════════════════════════════════

#[test]
fn json_fills_missing_fields_with_defaults() {
    let config = Config::from_json(r#"{ "use_l2": false, "tlb": { "sets": 4 } }"#).unwrap();
    assert!(!config.use_l2);
    assert_eq!(config.tlb.sets, 4);
    assert_eq!(config.tlb.ways, Config::default().tlb.ways);
    assert_eq!(config.page_table, Config::default().page_table);
}

#[test]
fn json_round_trips() {
    let original = tiny_config();
    let text = serde_json::to_string(&original).unwrap();
    assert_eq!(Config::from_json(&text).unwrap(), original);
}

#[test]
fn json_syntax_error() {
    assert!(matches!(
        Config::from_json("{ not json"),
        Err(ConfigError::Json(_))
    ));
}

#[test]
fn json_is_validated() {
    assert!(matches!(
        Config::from_json(r#"{ "data_cache": { "sets": 3 } }"#),
        Err(ConfigError::NotPowerOfTwo {
            field: "data_cache.sets",
            ..
        })
    ));
}

// ══════════════════════════════════════════════════════════
// 4. Summary
// ══════════════════════════════════════════════════════════

#[test]
fn summary_reports_geometry_and_widths() {
    let text = Config::default().to_string();
    assert!(text.contains("Data TLB contains 2 sets."));
    assert!(text.contains("Number of virtual pages is 64."));
    assert!(text.contains("Each page contains 256 bytes."));
    assert!(text.contains("Number of bits used for the page offset is 8."));
    assert!(text.contains("D-cache contains 4 sets."));
    assert!(text.contains("no write-allocate and write-through"));
    assert!(text.contains("L2-cache contains 16 sets."));
    assert!(text.contains("The addresses read in are virtual addresses."));
    assert!(!text.contains("disabled"));
}

#[test]
fn summary_mentions_disabled_levels() {
    let config = Config {
        use_tlb: false,
        use_l2: false,
        virtual_addresses: false,
        ..Config::default()
    };
    let text = config.to_string();
    assert!(text.contains("TLB is disabled in this configuration."));
    assert!(text.contains("L2 cache is disabled in this configuration."));
    assert!(text.contains("physical addresses"));
}

#[test]
fn summary_of_invalid_config_omits_widths() {
    let mut config = Config::default();
    config.page_table.page_size = 100;
    let text = config.to_string();
    assert!(text.contains("Each page contains 100 bytes."));
    assert!(!text.contains("Number of bits used"));
}
