//! Per-access results.
//!
//! A [`TraceResult`] records every intermediate field and outcome of one access
//! so the reporter can print the routing table row for it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::AccessType;

/// Outcome of consulting one structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The entry was resident.
    Hit,
    /// The entry was not resident and has been installed.
    Miss,
    /// The structure was not consulted for this access.
    Skipped,
}

impl Outcome {
    /// Report text; blank for `Skipped`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hit => "hit",
            Self::Miss => "miss",
            Self::Skipped => "",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Everything observed while routing one access through the hierarchy.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceResult {
    /// Read or write.
    pub access: AccessType,
    /// Address as given in the trace.
    pub virtual_address: u64,
    /// Virtual page number; absent for physical traces.
    pub virtual_page: Option<u64>,
    /// Offset within the page.
    pub page_offset: u64,
    /// TLB tag, when the TLB was consulted.
    pub tlb_tag: Option<u64>,
    /// TLB set index, when the TLB was consulted.
    pub tlb_index: Option<u64>,
    /// TLB outcome.
    pub tlb: Outcome,
    /// Page-table outcome.
    pub page_table: Outcome,
    /// Physical page number.
    pub physical_page: u64,
    /// Physical address the caches were indexed with.
    pub physical_address: u64,
    /// Data-cache tag.
    pub dc_tag: u64,
    /// Data-cache set index.
    pub dc_index: u64,
    /// Data-cache outcome.
    pub dc: Outcome,
    /// L2 tag, when L2 was consulted.
    pub l2_tag: Option<u64>,
    /// L2 set index, when L2 was consulted.
    pub l2_index: Option<u64>,
    /// L2 outcome.
    pub l2: Outcome,
}

/// Column header printed above the per-access rows.
pub const TRACE_HEADER: &str = "\
Virtual  Virt.  Page TLB    TLB TLB  PT   Phys        DC  DC          L2  L2
Address  Page # Off  Tag    Ind Res. Res. Pg # DC Tag Ind Res. L2 Tag Ind Res.
-------- ------ ---- ------ --- ---- ---- ---- ------ --- ---- ------ --- ----";

/// Hex rendering of an optional field; blank when absent.
struct Hex(Option<u64>);

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => f.pad(&format!("{v:x}")),
            None => f.pad(""),
        }
    }
}

impl fmt::Display for TraceResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:08x} {:>6} {:>4x} {:>6} {:>3} {:<4} {:<4} {:>4x} {:>6x} {:>3x} {:<4} {:>6} {:>3} {:<4}",
            self.virtual_address,
            Hex(self.virtual_page),
            self.page_offset,
            Hex(self.tlb_tag),
            Hex(self.tlb_index),
            self.tlb,
            self.page_table,
            self.physical_page,
            self.dc_tag,
            self.dc_index,
            self.dc,
            Hex(self.l2_tag),
            Hex(self.l2_index),
            self.l2,
        )
    }
}
