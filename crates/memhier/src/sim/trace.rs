//! Trace records.
//!
//! A trace is line oriented: each non-blank line is `<R|W>:<hex address>`, for
//! example `R:00000c84` or `w: 0x1f0`. Lines that do not parse become
//! [`RecordParseError`]s and are skipped by the runner.

use serde::{Deserialize, Serialize};

use crate::common::AccessType;
use crate::common::error::RecordParseError;

/// One parsed trace line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceRecord {
    /// 1-based line number in the trace.
    pub line: usize,
    /// Read or write.
    pub access: AccessType,
    /// Address, virtual or physical depending on the configuration.
    pub address: u64,
}

/// Parses one trace line.
///
/// # Arguments
///
/// * `line` - 1-based line number, carried into errors.
/// * `text` - The raw line.
///
/// # Errors
///
/// Returns a [`RecordParseError`] describing the first problem found.
pub fn parse_record(line: usize, text: &str) -> Result<TraceRecord, RecordParseError> {
    let text = text.trim();
    let Some((direction, address)) = text.split_once(':') else {
        return Err(RecordParseError::MissingSeparator {
            line,
            text: text.to_owned(),
        });
    };

    let direction = direction.trim();
    let mut chars = direction.chars();
    let access = match (chars.next(), chars.next()) {
        (Some(c), None) => AccessType::from_char(c),
        _ => None,
    }
    .ok_or_else(|| RecordParseError::InvalidDirection {
        line,
        direction: direction.to_owned(),
    })?;

    let raw = address.trim();
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);
    let invalid = || RecordParseError::InvalidAddress {
        line,
        address: raw.to_owned(),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let address = u64::from_str_radix(digits, 16).map_err(|_| invalid())?;

    Ok(TraceRecord {
        line,
        access,
        address,
    })
}

/// Parses every non-blank line of `text`, in order.
pub fn parse_trace(text: &str) -> impl Iterator<Item = Result<TraceRecord, RecordParseError>> + '_ {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| parse_record(idx + 1, line))
}
