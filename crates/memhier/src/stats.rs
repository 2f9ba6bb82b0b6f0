//! Simulation statistics collection and reporting.
//!
//! This module tracks the counters of a run. It provides:
//! 1. **TLB and page table:** Hits, misses, and faults.
//! 2. **Caches:** Hit/miss counts for the L1 data cache and L2.
//! 3. **References:** Reads, writes, and main-memory, page-table, and disk references.
//!
//! Counters start at zero and only ever increase.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::access::{Outcome, TraceResult};

/// Hit/miss and reference counters for one run.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimStats {
    /// TLB hits.
    pub tlb_hits: u64,
    /// TLB misses.
    pub tlb_misses: u64,
    /// Page-table hits.
    pub pt_hits: u64,
    /// Page-table faults.
    pub pt_faults: u64,
    /// L1 data-cache hits.
    pub dc_hits: u64,
    /// L1 data-cache misses.
    pub dc_misses: u64,
    /// L2 hits.
    pub l2_hits: u64,
    /// L2 misses.
    pub l2_misses: u64,
    /// Read accesses processed.
    pub total_reads: u64,
    /// Write accesses processed.
    pub total_writes: u64,
    /// Main-memory references.
    pub main_memory_refs: u64,
    /// Page-table references (TLB disabled or missed).
    pub page_table_refs: u64,
    /// Disk references (page faults).
    pub disk_refs: u64,
}

/// Section names for selective stats output.
///
/// Pass an empty slice to [`SimStats::print_sections`] to print all sections.
pub const STATS_SECTIONS: &[&str] = &["tlb", "page_table", "cache", "references"];

/// `num / den`, or 0 when nothing was counted.
fn ratio(num: u64, den: u64) -> f64 {
    if den == 0 { 0.0 } else { num as f64 / den as f64 }
}

fn bump(outcome: Outcome, hits: &mut u64, misses: &mut u64) {
    match outcome {
        Outcome::Hit => *hits += 1,
        Outcome::Miss => *misses += 1,
        Outcome::Skipped => {}
    }
}

impl SimStats {
    /// Folds one processed access into the counters.
    ///
    /// Every access counts as one main-memory reference. A page-table
    /// reference is counted whenever the page table was consulted (TLB
    /// disabled or missed), and a disk reference whenever it faulted.
    pub fn record(&mut self, result: &TraceResult) {
        bump(result.tlb, &mut self.tlb_hits, &mut self.tlb_misses);
        bump(result.page_table, &mut self.pt_hits, &mut self.pt_faults);
        bump(result.dc, &mut self.dc_hits, &mut self.dc_misses);
        bump(result.l2, &mut self.l2_hits, &mut self.l2_misses);

        if result.access.is_write() {
            self.total_writes += 1;
        } else {
            self.total_reads += 1;
        }
        self.main_memory_refs += 1;
        if result.page_table != Outcome::Skipped {
            self.page_table_refs += 1;
        }
        if result.page_table == Outcome::Miss {
            self.disk_refs += 1;
        }
    }

    /// Accesses processed.
    pub const fn total_accesses(&self) -> u64 {
        self.total_reads + self.total_writes
    }

    /// TLB hit ratio.
    pub fn tlb_hit_ratio(&self) -> f64 {
        ratio(self.tlb_hits, self.tlb_hits + self.tlb_misses)
    }

    /// Page-table hit ratio.
    pub fn pt_hit_ratio(&self) -> f64 {
        ratio(self.pt_hits, self.pt_hits + self.pt_faults)
    }

    /// Data-cache hit ratio.
    pub fn dc_hit_ratio(&self) -> f64 {
        ratio(self.dc_hits, self.dc_hits + self.dc_misses)
    }

    /// L2 hit ratio.
    pub fn l2_hit_ratio(&self) -> f64 {
        ratio(self.l2_hits, self.l2_hits + self.l2_misses)
    }

    /// Fraction of accesses that were reads.
    pub fn read_ratio(&self) -> f64 {
        ratio(self.total_reads, self.total_accesses())
    }

    /// Renders only the requested sections.
    ///
    /// Each element of `sections` should be one of [`STATS_SECTIONS`]; an empty
    /// slice selects every section.
    pub fn render_sections(&self, sections: &[String]) -> String {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let mut out = String::from("\nSimulation statistics\n\n");

        if want("tlb") {
            out.push_str(&format!("dtlb hits        : {}\n", self.tlb_hits));
            out.push_str(&format!("dtlb misses      : {}\n", self.tlb_misses));
            out.push_str(&format!("dtlb hit ratio   : {:.6}\n\n", self.tlb_hit_ratio()));
        }
        if want("page_table") {
            out.push_str(&format!("pt hits          : {}\n", self.pt_hits));
            out.push_str(&format!("pt faults        : {}\n", self.pt_faults));
            out.push_str(&format!("pt hit ratio     : {:.6}\n\n", self.pt_hit_ratio()));
        }
        if want("cache") {
            out.push_str(&format!("dc hits          : {}\n", self.dc_hits));
            out.push_str(&format!("dc misses        : {}\n", self.dc_misses));
            out.push_str(&format!("dc hit ratio     : {:.6}\n\n", self.dc_hit_ratio()));
            out.push_str(&format!("L2 hits          : {}\n", self.l2_hits));
            out.push_str(&format!("L2 misses        : {}\n", self.l2_misses));
            out.push_str(&format!("L2 hit ratio     : {:.6}\n\n", self.l2_hit_ratio()));
        }
        if want("references") {
            out.push_str(&format!("Total reads      : {}\n", self.total_reads));
            out.push_str(&format!("Total writes     : {}\n", self.total_writes));
            out.push_str(&format!("Ratio of reads   : {:.6}\n\n", self.read_ratio()));
            out.push_str(&format!("main memory refs : {}\n", self.main_memory_refs));
            out.push_str(&format!("page table refs  : {}\n", self.page_table_refs));
            out.push_str(&format!("disk refs        : {}\n", self.disk_refs));
        }
        out
    }

    /// Prints only the requested sections to stdout.
    pub fn print_sections(&self, sections: &[String]) {
        print!("{}", self.render_sections(sections));
    }

    /// Prints every section to stdout.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_sections(&[]))
    }
}
