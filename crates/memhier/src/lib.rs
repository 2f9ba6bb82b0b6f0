//! Trace-driven memory hierarchy simulator library.
//!
//! This crate replays memory-reference traces against a simulated hierarchy and
//! reports per-access routing decisions plus aggregate statistics:
//! 1. **Core:** Bit-field planning, the data TLB, the page table, the L1 data cache,
//!    the L2 cache, and the shared LRU victim selector.
//! 2. **Configuration:** Geometry of every structure, validated up front.
//! 3. **Simulation:** Config and trace loaders plus a runner that collects results.
//! 4. **Statistics:** Hit/miss and reference counters with derived ratios.

/// Common types and helpers (bit-field extraction, addresses, access types, errors).
pub mod common;
/// Simulator configuration (defaults, per-structure geometry, validation).
pub mod config;
/// Memory hierarchy (bit plan, TLB, page table, caches, per-access driver).
pub mod core;
/// Loaders for configuration and trace files, and the trace runner.
pub mod sim;
/// Hit/miss and reference counters with reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or load one with [`sim::loader`].
pub use crate::config::Config;
/// The simulated hierarchy; feed it accesses with `Hierarchy::process_access`.
pub use crate::core::Hierarchy;
/// Drives a [`Hierarchy`] over a whole trace and collects a `RunReport`.
pub use crate::sim::Simulator;
