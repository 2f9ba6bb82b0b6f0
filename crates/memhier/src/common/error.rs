//! Error definitions.
//!
//! This module defines the failure modes of a simulation run. It provides:
//! 1. **Configuration Errors:** Fatal; raised before any access is processed.
//! 2. **Record Errors:** Per trace line; the record is skipped and the run continues.
//! 3. **Loader Errors:** I/O failures while reading configuration or trace files.
//!
//! Lookups themselves never fail: every structure has find-or-create semantics.

use std::io;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// A configuration that cannot describe a valid hierarchy.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A count or size that must be a positive power of two is not.
    #[error("{field} must be a positive power of two (got {value})")]
    NotPowerOfTwo {
        /// Dotted name of the offending field, e.g. `data_cache.sets`.
        field: &'static str,
        /// The rejected value.
        value: u64,
    },

    /// A derived bit width came out negative.
    #[error("derived width {field} is negative ({value} bits)")]
    NegativeWidth {
        /// Name of the derived width, e.g. `dc_tag_bits`.
        field: &'static str,
        /// The computed (negative) width.
        value: i64,
    },

    /// The derived address width exceeds what the field extractor supports.
    #[error("derived address width of {bits} bits exceeds the supported {max} bits")]
    AddressTooWide {
        /// Derived width.
        bits: u32,
        /// Supported maximum.
        max: u32,
    },

    /// A structure would need more slots than the simulator will allocate.
    #[error("{structure} needs {slots} slots, more than the supported {max}")]
    TooManySlots {
        /// Dotted name of the structure, e.g. `page_table`.
        structure: &'static str,
        /// Requested slot count (`sets * ways`, or physical pages).
        slots: u128,
        /// Supported maximum.
        max: u64,
    },

    /// A required key is missing from a configuration file.
    #[error("missing configuration key '{key}' in section '{section}'")]
    MissingKey {
        /// Section header the key belongs to.
        section: String,
        /// Key name as written in the file.
        key: String,
    },

    /// A key is present but its value cannot be parsed.
    #[error("invalid value '{value}' for configuration key '{key}'")]
    InvalidValue {
        /// Key name as written in the file.
        key: String,
        /// Raw value text.
        value: String,
    },

    /// A JSON configuration failed to deserialize.
    #[error("invalid JSON configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// A trace line that could not be turned into an access.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecordParseError {
    /// The line has no `:` between direction and address.
    #[error("line {line}: expected '<R|W>:<hex address>', got '{text}'")]
    MissingSeparator {
        /// 1-based line number.
        line: usize,
        /// The raw line.
        text: String,
    },

    /// The direction is neither `R` nor `W`.
    #[error("line {line}: unknown access direction '{direction}'")]
    InvalidDirection {
        /// 1-based line number.
        line: usize,
        /// The rejected direction text.
        direction: String,
    },

    /// The address is not a hexadecimal number that fits in 64 bits.
    #[error("line {line}: invalid hexadecimal address '{address}'")]
    InvalidAddress {
        /// 1-based line number.
        line: usize,
        /// The rejected address text.
        address: String,
    },
}

impl RecordParseError {
    /// Line number of the offending record.
    pub const fn line(&self) -> usize {
        match self {
            Self::MissingSeparator { line, .. }
            | Self::InvalidDirection { line, .. }
            | Self::InvalidAddress { line, .. } => *line,
        }
    }
}

/// Failure of a whole simulation run.
#[derive(Debug, Error)]
pub enum SimError {
    /// The configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A configuration or trace file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}
