//! Hierarchy building blocks.
//!
//! This module contains the structures an access passes through:
//! 1. **Sets:** Tagged slots with usage counters, shared by every structure.
//! 2. **LRU:** The victim selector all structures use.
//! 3. **MMU:** Data TLB and page table.
//! 4. **Cache:** Set-associative tag store used for the L1 data cache and L2.

/// Set-associative tag store.
pub mod cache;

/// LRU victim selection.
pub mod lru;

/// TLB and page table.
pub mod mmu;

/// Slots and sets.
pub mod set;
