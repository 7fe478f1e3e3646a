//! Read-only arena snapshots
//!
//! Provides a cloned, point-in-time view of the free lists and the
//! allocated-block registry for diagnostics and tests.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

/// Point-in-time view of the arena's bookkeeping.
///
/// All data is cloned out of the arena; mutating a snapshot has no effect on
/// the arena itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArenaStatus {
    /// Arena capacity in bytes.
    pub total_bytes: usize,
    /// Free block addresses per size class, in queue (FIFO) order. Every
    /// tracked class appears, including empty ones.
    pub free_lists: BTreeMap<usize, Vec<usize>>,
    /// Live allocations, address to granted size.
    pub allocated: BTreeMap<usize, usize>,
}

impl ArenaStatus {
    /// Bytes sitting on the free lists.
    pub fn free_bytes(&self) -> usize {
        self.free_lists
            .iter()
            .map(|(size, addrs)| size * addrs.len())
            .sum()
    }

    /// Bytes held by live allocations.
    pub fn allocated_bytes(&self) -> usize {
        self.allocated.values().sum()
    }

    /// Free block count per size class.
    pub fn free_blocks_by_class(&self) -> BTreeMap<usize, usize> {
        self.free_lists
            .iter()
            .map(|(&size, addrs)| (size, addrs.len()))
            .collect()
    }
}
