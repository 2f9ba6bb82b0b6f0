//! Configuration and trace loading.
//!
//! This module reads the inputs of a run from disk. It performs:
//! 1. **Config parsing:** The sectioned `Key: value` text format, or JSON when the
//!    file name ends in `.json`.
//! 2. **Trace loading:** Reads a trace file (or stdin for `-`) into parsed records.
//!
//! The text format groups keys under section headers:
//!
//! ```text
//! Data TLB configuration
//! Number of sets: 2
//! Set size: 1
//!
//! Page Table configuration
//! Number of virtual pages: 64
//! Number of physical pages: 4
//! Page size: 256
//!
//! Data Cache configuration
//! Number of sets: 4
//! Set size: 1
//! Line size: 16
//! Write through/no write allocate: n
//!
//! L2 Cache configuration
//! Number of sets: 16
//! Set size: 4
//! Line size: 16
//!
//! Virtual addresses: y
//! TLB: y
//! L2 cache: y
//! ```

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::common::error::{ConfigError, RecordParseError, SimError};
use crate::config::{Config, DataCacheConfig};

use super::trace::{TraceRecord, parse_trace};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    Tlb,
    PageTable,
    DataCache,
    L2,
    Global,
}

impl Section {
    fn from_header(header: &str) -> Option<Self> {
        if header.contains("Data TLB configuration") {
            Some(Self::Tlb)
        } else if header.contains("Page Table configuration") {
            Some(Self::PageTable)
        } else if header.contains("Data Cache configuration") {
            Some(Self::DataCache)
        } else if header.contains("L2 Cache configuration") {
            Some(Self::L2)
        } else {
            None
        }
    }

    const fn name(self) -> &'static str {
        match self {
            Self::Tlb => "Data TLB configuration",
            Self::PageTable => "Page Table configuration",
            Self::DataCache => "Data Cache configuration",
            Self::L2 => "L2 Cache configuration",
            Self::Global => "global",
        }
    }
}

/// Values collected while scanning; numeric keys are mandatory.
///
/// A missing write-policy key takes the [`DataCacheConfig`] default; other
/// missing flags read as `n`.
#[derive(Debug, Default)]
struct RawConfig {
    tlb_sets: Option<u64>,
    tlb_ways: Option<u64>,
    virtual_pages: Option<u64>,
    physical_pages: Option<u64>,
    page_size: Option<u64>,
    dc_sets: Option<u64>,
    dc_ways: Option<u64>,
    dc_line: Option<u64>,
    dc_write_through: Option<bool>,
    l2_sets: Option<u64>,
    l2_ways: Option<u64>,
    l2_line: Option<u64>,
    virtual_addresses: Option<bool>,
    use_tlb: Option<bool>,
    use_l2: Option<bool>,
}

fn number(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_owned(),
        value: value.to_owned(),
    })
}

fn flag(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "y" | "yes" => Ok(true),
        "n" | "no" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.to_owned(),
            value: value.to_owned(),
        }),
    }
}

fn require(value: Option<u64>, section: Section, key: &str) -> Result<u64, ConfigError> {
    value.ok_or_else(|| ConfigError::MissingKey {
        section: section.name().to_owned(),
        key: key.to_owned(),
    })
}

impl RawConfig {
    fn set(&mut self, section: Section, key: &str, value: &str) -> Result<(), ConfigError> {
        let slot = match (section, key) {
            (_, "Virtual addresses") => {
                self.virtual_addresses = Some(flag(key, value)?);
                return Ok(());
            }
            (_, "TLB") => {
                self.use_tlb = Some(flag(key, value)?);
                return Ok(());
            }
            (_, "L2 cache") => {
                self.use_l2 = Some(flag(key, value)?);
                return Ok(());
            }
            (Section::DataCache, "Write through/no write allocate") => {
                self.dc_write_through = Some(flag(key, value)?);
                return Ok(());
            }
            (Section::L2, "Write through/no write allocate") => {
                // L2 follows the data-cache policy.
                let _ = flag(key, value)?;
                return Ok(());
            }
            (Section::Tlb, "Number of sets") => &mut self.tlb_sets,
            (Section::Tlb, "Set size") => &mut self.tlb_ways,
            (Section::PageTable, "Number of virtual pages") => &mut self.virtual_pages,
            (Section::PageTable, "Number of physical pages") => &mut self.physical_pages,
            (Section::PageTable, "Page size") => &mut self.page_size,
            (Section::DataCache, "Number of sets") => &mut self.dc_sets,
            (Section::DataCache, "Set size") => &mut self.dc_ways,
            (Section::DataCache, "Line size") => &mut self.dc_line,
            (Section::L2, "Number of sets") => &mut self.l2_sets,
            (Section::L2, "Set size") => &mut self.l2_ways,
            (Section::L2, "Line size") => &mut self.l2_line,
            _ => {
                tracing::warn!(section = section.name(), key, "ignoring unknown configuration key");
                return Ok(());
            }
        };
        *slot = Some(number(key, value)?);
        Ok(())
    }

    fn build(self) -> Result<Config, ConfigError> {
        use crate::config::{L2CacheConfig, PageTableConfig, TlbConfig};

        Ok(Config {
            tlb: TlbConfig {
                sets: require(self.tlb_sets, Section::Tlb, "Number of sets")?,
                ways: require(self.tlb_ways, Section::Tlb, "Set size")?,
            },
            page_table: PageTableConfig {
                virtual_pages: require(
                    self.virtual_pages,
                    Section::PageTable,
                    "Number of virtual pages",
                )?,
                physical_pages: require(
                    self.physical_pages,
                    Section::PageTable,
                    "Number of physical pages",
                )?,
                page_size: require(self.page_size, Section::PageTable, "Page size")?,
            },
            data_cache: DataCacheConfig {
                sets: require(self.dc_sets, Section::DataCache, "Number of sets")?,
                ways: require(self.dc_ways, Section::DataCache, "Set size")?,
                line_size: require(self.dc_line, Section::DataCache, "Line size")?,
                write_through_no_allocate: self
                    .dc_write_through
                    .unwrap_or(DataCacheConfig::default().write_through_no_allocate),
            },
            l2: L2CacheConfig {
                sets: require(self.l2_sets, Section::L2, "Number of sets")?,
                ways: require(self.l2_ways, Section::L2, "Set size")?,
                line_size: require(self.l2_line, Section::L2, "Line size")?,
            },
            virtual_addresses: self.virtual_addresses.unwrap_or(false),
            use_tlb: self.use_tlb.unwrap_or(false),
            use_l2: self.use_l2.unwrap_or(false),
        })
    }
}

/// Parses and validates the sectioned text configuration format.
///
/// Lines without a `:` that name a known section switch the current section;
/// `Key: value` lines assign within it. `Virtual addresses`, `TLB`, and
/// `L2 cache` are accepted anywhere. Unknown keys are logged and ignored.
///
/// # Errors
///
/// [`ConfigError::MissingKey`] when a size is absent,
/// [`ConfigError::InvalidValue`] when a value does not parse, and any
/// validation error.
pub fn parse_config(text: &str) -> Result<Config, ConfigError> {
    let mut raw = RawConfig::default();
    let mut section = Section::Global;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match line.split_once(':') {
            Some((key, value)) => raw.set(section, key.trim(), value.trim())?,
            None => {
                section = Section::from_header(line).unwrap_or_else(|| {
                    tracing::warn!(line, "unrecognized configuration section");
                    Section::Global
                });
            }
        }
    }

    let config = raw.build()?;
    config.validate()?;
    Ok(config)
}

fn read_input(path: &Path) -> Result<String, SimError> {
    let io_err = |source: io::Error| SimError::Io {
        path: path.to_path_buf(),
        source,
    };
    if path == Path::new("-") {
        let mut text = String::new();
        let _ = io::stdin().lock().read_to_string(&mut text).map_err(io_err)?;
        Ok(text)
    } else {
        fs::read_to_string(path).map_err(io_err)
    }
}

/// Loads a configuration file, as JSON when it ends in `.json`.
///
/// # Errors
///
/// [`SimError::Io`] if the file cannot be read, otherwise [`SimError::Config`].
pub fn load_config(path: &Path) -> Result<Config, SimError> {
    let text = read_input(path)?;
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let config = if is_json {
        Config::from_json(&text)?
    } else {
        parse_config(&text)?
    };
    tracing::debug!(path = %path.display(), "configuration loaded");
    Ok(config)
}

/// Loads and parses a trace file; `-` reads stdin.
///
/// Malformed lines are returned as errors in place, so the caller can skip
/// them and keep going.
///
/// # Errors
///
/// [`SimError::Io`] if the input cannot be read.
pub fn load_trace(path: &Path) -> Result<Vec<Result<TraceRecord, RecordParseError>>, SimError> {
    let text = read_input(path)?;
    Ok(parse_trace(&text).collect())
}
