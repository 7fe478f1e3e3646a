//! Single-arena buddy allocator
//!
//! Implements the core buddy system for one fixed arena: size-class free
//! lists, the allocated-block registry, and the split/coalesce loops that
//! move blocks between them.

use alloc::collections::BTreeMap;

#[cfg(feature = "log")]
use log::{debug, error, warn};

use crate::{AllocError, AllocResult};

use super::{block::Block, free_lists::FreeLists, status::ArenaStatus};

/// A buddy-system allocator over the address range `[0, total_size)`.
///
/// The arena hands out power-of-two blocks between `min_block_size` and
/// `total_size`, splitting larger free blocks on demand and merging freed
/// blocks with their buddy (`addr ^ size`) as long as the buddy is free.
///
/// Every call validates before it mutates: a failed `alloc` or `free` leaves
/// the arena exactly as it was.
pub struct BuddyArena {
    total_size: usize,
    min_block_size: usize,
    max_splits: u32,
    free_lists: FreeLists,
    /// Live allocations, address to granted size.
    allocated: BTreeMap<usize, usize>,
}

impl BuddyArena {
    /// Create an arena of `total_size` bytes that may be halved at most
    /// `max_splits` times, so the smallest block ever handed out is
    /// `total_size / 2^max_splits`.
    ///
    /// Fails with [`AllocError::InvalidConfig`] when `total_size` is zero or
    /// not a power of two, or when `2^max_splits` does not divide it evenly.
    pub fn new(total_size: usize, max_splits: u32) -> AllocResult<Self> {
        if total_size == 0 || !total_size.is_power_of_two() {
            error!(
                "arena: total size {:#x} is not a power of two",
                total_size
            );
            return Err(AllocError::InvalidConfig);
        }
        let max_order = total_size.trailing_zeros();
        if max_splits > max_order {
            error!(
                "arena: {} splits of {:#x} do not divide into whole blocks",
                max_splits, total_size
            );
            return Err(AllocError::InvalidConfig);
        }
        let min_order = max_order - max_splits;

        // The whole arena starts as one free block at address 0.
        let mut free_lists = FreeLists::new(min_order, max_order);
        free_lists.push(max_order, 0);

        Ok(Self {
            total_size,
            min_block_size: 1 << min_order,
            max_splits,
            free_lists,
            allocated: BTreeMap::new(),
        })
    }

    /// Arena capacity in bytes.
    pub const fn total_size(&self) -> usize {
        self.total_size
    }

    /// Smallest block size the arena hands out.
    pub const fn min_block_size(&self) -> usize {
        self.min_block_size
    }

    /// Maximum number of times a block may be halved.
    pub const fn max_splits(&self) -> u32 {
        self.max_splits
    }

    const fn max_order(&self) -> u32 {
        self.total_size.trailing_zeros()
    }

    /// Smallest power of two covering `size`, clamped up to the minimum
    /// block size.
    fn size_class_for(&self, size: usize) -> usize {
        if size <= self.min_block_size {
            self.min_block_size
        } else {
            size.next_power_of_two()
        }
    }

    /// Allocate a block of at least `size` bytes.
    ///
    /// The granted block is the smallest power-of-two class covering `size`,
    /// never smaller than [`min_block_size`](Self::min_block_size). The
    /// oldest free block of the smallest sufficient class is consumed;
    /// oversized blocks are split down, each split queueing the upper half as
    /// a free buddy and retaining the lower half.
    pub fn alloc(&mut self, size: usize) -> AllocResult<Block> {
        if size == 0 {
            return Err(AllocError::InvalidParam);
        }
        if size > self.total_size {
            debug!(
                "arena: request of {:#x} bytes exceeds arena size {:#x}",
                size, self.total_size
            );
            return Err(AllocError::SizeExceedsArena);
        }

        let target = self.size_class_for(size);

        // Scan classes upward from the target until one has a free block.
        for order in target.trailing_zeros()..=self.max_order() {
            if let Some(addr) = self.free_lists.pop_front(order) {
                return Ok(self.split_down(addr, 1 << order, target));
            }
        }

        debug!(
            "arena: allocation failure: {:#x} bytes (class {:#x})",
            size, target
        );
        Err(AllocError::OutOfMemory)
    }

    /// Halve a free block of `current_size` at `addr` down to `target`,
    /// queueing the upper half of each split and keeping the lower half,
    /// then record the final block as allocated.
    fn split_down(&mut self, addr: usize, mut current_size: usize, target: usize) -> Block {
        while current_size > target {
            current_size >>= 1;
            let buddy_addr = addr + current_size;
            self.free_lists.push(current_size.trailing_zeros(), buddy_addr);
        }
        self.allocated.insert(addr, target);
        Block::new(addr, target)
    }

    /// Return the block at `addr` of granted size `size` to the arena.
    ///
    /// The pair must match a live allocation exactly; an unknown address, a
    /// size mismatch, or a repeated free fails with
    /// [`AllocError::InvalidFree`] and changes nothing. After the registry
    /// entry is removed the block is merged with its buddy (`addr ^ size`)
    /// as long as the buddy is free, doubling at most
    /// [`max_splits`](Self::max_splits) times, and the result joins the back
    /// of its class queue.
    pub fn free(&mut self, addr: usize, size: usize) -> AllocResult {
        match self.allocated.get(&addr) {
            Some(&granted) if granted == size => {}
            _ => {
                warn!(
                    "arena: invalid free of {:#x} bytes at {:#x}",
                    size, addr
                );
                return Err(AllocError::InvalidFree);
            }
        }
        self.allocated.remove(&addr);

        let mut current_addr = addr;
        let mut current_size = size;
        while current_size < self.total_size {
            let buddy = current_addr ^ current_size;
            if !self.free_lists.remove(current_size.trailing_zeros(), buddy) {
                break;
            }
            current_addr = current_addr.min(buddy);
            current_size <<= 1;
        }
        self.free_lists
            .push(current_size.trailing_zeros(), current_addr);
        Ok(())
    }

    /// Read-only snapshot of every free list and the allocated registry.
    pub fn status(&self) -> ArenaStatus {
        let min_order = self.min_block_size.trailing_zeros();
        let mut free_lists = BTreeMap::new();
        for order in min_order..=self.max_order() {
            free_lists.insert(1usize << order, self.free_lists.iter(order).collect());
        }
        ArenaStatus {
            total_bytes: self.total_size,
            free_lists,
            allocated: self.allocated.clone(),
        }
    }

    /// Number of free blocks currently queued for one size class.
    ///
    /// Returns 0 for sizes the arena does not track.
    pub fn free_block_count(&self, size: usize) -> usize {
        if !size.is_power_of_two() || size < self.min_block_size || size > self.total_size {
            return 0;
        }
        self.free_lists.len(size.trailing_zeros())
    }

    /// Bytes currently sitting on the free lists.
    pub fn free_bytes(&self) -> usize {
        self.free_lists.free_bytes()
    }

    /// Bytes currently held by live allocations.
    pub fn allocated_bytes(&self) -> usize {
        self.allocated.values().sum()
    }
}
