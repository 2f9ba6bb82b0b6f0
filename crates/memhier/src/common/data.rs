//! Memory Access Types.
//!
//! This module defines the direction of a trace record. It is used for:
//! 1. **Statistics Tracking:** Counting reads and writes separately.
//! 2. **Cache Bookkeeping:** Marking lines dirty under a write-back policy.

use serde::{Deserialize, Serialize};

/// Direction of a memory access.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessType {
    /// Data read access.
    Read,

    /// Data write access.
    Write,
}

impl AccessType {
    /// Parses the direction character used in trace files (`R`/`r`, `W`/`w`).
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'R' | 'r' => Some(Self::Read),
            'W' | 'w' => Some(Self::Write),
            _ => None,
        }
    }

    /// Returns `true` for [`AccessType::Write`].
    #[inline]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::Write)
    }

    /// Single-letter tag used in reports.
    pub const fn as_char(self) -> char {
        match self {
            Self::Read => 'R',
            Self::Write => 'W',
        }
    }
}
