//! Common utilities and types used throughout the simulator.
//!
//! This module provides the building blocks shared by every structure in the
//! hierarchy. It includes:
//! 1. **Address Types:** Strong types for virtual and physical addresses.
//! 2. **Bit Fields:** Exact-width field extraction used for every tag/index/offset split.
//! 3. **Memory Access:** Read/write classification of trace records.
//! 4. **Error Handling:** Configuration, trace-record, and loader errors.

/// Address type definitions (physical and virtual addresses).
pub mod addr;

/// Exact-width bit-field extraction and power-of-two helpers.
pub mod bits;

/// Memory access type definitions.
pub mod data;

/// Error types.
pub mod error;

pub use addr::{PhysAddr, VirtAddr};
pub use bits::{extract_field, log2_exact};
pub use data::AccessType;
pub use error::{ConfigError, RecordParseError, SimError};
