//! Trace-driven simulation.
//!
//! This module drives a [`Hierarchy`] over a whole trace. It provides:
//! 1. **Loading:** Configuration files and trace files (see [`loader`]).
//! 2. **Parsing:** The `R:addr` / `W:addr` record format (see [`trace`]).
//! 3. **Running:** [`Simulator`], which applies records in order, skips
//!    malformed ones, and collects a [`RunReport`].

/// Configuration and trace loading.
pub mod loader;
/// Trace record parsing.
pub mod trace;

use serde::Serialize;

use crate::common::error::{ConfigError, RecordParseError};
use crate::config::Config;
use crate::core::Hierarchy;
use crate::core::access::TraceResult;
use crate::core::plan::BitPlan;
use crate::stats::SimStats;

use self::trace::TraceRecord;

/// Everything a finished run produced.
#[derive(Clone, Debug, Serialize)]
pub struct RunReport {
    /// Configuration the run used.
    pub config: Config,
    /// Derived bit widths.
    pub plan: BitPlan,
    /// One row per processed record, in trace order.
    pub results: Vec<TraceResult>,
    /// Records that failed to parse and were skipped.
    pub skipped: Vec<RecordParseError>,
    /// Final counters.
    pub stats: SimStats,
}

/// Runs trace records through a hierarchy.
#[derive(Clone, Debug)]
pub struct Simulator {
    hierarchy: Hierarchy,
    results: Vec<TraceResult>,
    skipped: Vec<RecordParseError>,
}

impl Simulator {
    /// Creates a simulator with an empty hierarchy for `config`.
    ///
    /// # Errors
    ///
    /// Fails if the configuration is invalid.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Ok(Self {
            hierarchy: Hierarchy::new(config)?,
            results: Vec::new(),
            skipped: Vec::new(),
        })
    }

    /// Applies one record; malformed records are logged and skipped.
    ///
    /// Returns the row for the access, or `None` if the record was skipped.
    pub fn step(&mut self, record: Result<TraceRecord, RecordParseError>) -> Option<&TraceResult> {
        match record {
            Ok(record) => {
                let result = self.hierarchy.process_access(record.access, record.address);
                self.results.push(result);
                self.results.last()
            }
            Err(err) => {
                tracing::warn!(line = err.line(), %err, "skipping malformed trace record");
                self.skipped.push(err);
                None
            }
        }
    }

    /// Applies every record in order.
    pub fn run<I>(&mut self, records: I)
    where
        I: IntoIterator<Item = Result<TraceRecord, RecordParseError>>,
    {
        for record in records {
            let _ = self.step(record);
        }
        tracing::debug!(
            processed = self.results.len(),
            skipped = self.skipped.len(),
            "trace finished"
        );
    }

    /// The hierarchy in its current state.
    pub const fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    /// Rows produced so far.
    pub fn results(&self) -> &[TraceResult] {
        &self.results
    }

    /// Records skipped so far.
    pub fn skipped(&self) -> &[RecordParseError] {
        &self.skipped
    }

    /// Consumes the simulator and returns its report.
    pub fn finish(self) -> RunReport {
        RunReport {
            config: *self.hierarchy.config(),
            plan: *self.hierarchy.plan(),
            stats: self.hierarchy.stats().clone(),
            results: self.results,
            skipped: self.skipped,
        }
    }
}
