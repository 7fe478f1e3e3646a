//! Per-size-class FIFO free lists
//!
//! Maintains one queue of free block addresses per size class. Blocks are
//! appended at the back and consumed from the front, so queue order is the
//! allocation policy: first-fit over the oldest free block of a class.

use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;

use crate::is_aligned;

/// Free-list table indexed by size-class order.
///
/// Covers the contiguous range of orders `min_order ..= max_order` fixed at
/// construction. Each entry of a queue is the address of one free block of
/// that class, aligned to the class size.
pub(crate) struct FreeLists {
    min_order: u32,
    /// One queue per size class; index 0 holds `min_order`.
    lists: Vec<VecDeque<usize>>,
}

impl FreeLists {
    /// Create an empty table spanning `min_order ..= max_order`.
    pub fn new(min_order: u32, max_order: u32) -> Self {
        let classes = (max_order - min_order + 1) as usize;
        Self {
            min_order,
            lists: vec![VecDeque::new(); classes],
        }
    }

    fn index(&self, order: u32) -> usize {
        debug_assert!(order >= self.min_order);
        (order - self.min_order) as usize
    }

    /// Append a free block address to the back of its class queue.
    pub fn push(&mut self, order: u32, addr: usize) {
        debug_assert!(is_aligned(addr, 1 << order));
        let idx = self.index(order);
        self.lists[idx].push_back(addr);
    }

    /// Pop the oldest free address of exactly this class, if any.
    pub fn pop_front(&mut self, order: u32) -> Option<usize> {
        let idx = self.index(order);
        self.lists[idx].pop_front()
    }

    /// Remove a specific address from its class queue.
    ///
    /// Returns whether the address was present. The queue order of the
    /// remaining entries is preserved.
    pub fn remove(&mut self, order: u32, addr: usize) -> bool {
        let idx = self.index(order);
        match self.lists[idx].iter().position(|&a| a == addr) {
            Some(pos) => {
                self.lists[idx].remove(pos);
                true
            }
            None => false,
        }
    }

    /// Number of free blocks queued for one class.
    pub fn len(&self, order: u32) -> usize {
        self.lists[self.index(order)].len()
    }

    /// Iterate the addresses of one class in queue (FIFO) order.
    pub fn iter(&self, order: u32) -> impl Iterator<Item = usize> + '_ {
        self.lists[self.index(order)].iter().copied()
    }

    /// Total bytes sitting on all free lists.
    pub fn free_bytes(&self) -> usize {
        self.lists
            .iter()
            .enumerate()
            .map(|(i, list)| list.len() << (self.min_order as usize + i))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn test_fifo_order() {
        let mut lists = FreeLists::new(4, 8);

        lists.push(4, 0x10);
        lists.push(4, 0x30);
        lists.push(4, 0x20);

        assert_eq!(lists.len(4), 3);
        assert_eq!(lists.pop_front(4), Some(0x10));
        assert_eq!(lists.pop_front(4), Some(0x30));
        assert_eq!(lists.pop_front(4), Some(0x20));
        assert_eq!(lists.pop_front(4), None);
    }

    #[test]
    fn test_remove_preserves_queue_order() {
        let mut lists = FreeLists::new(4, 8);

        lists.push(5, 0x20);
        lists.push(5, 0x60);
        lists.push(5, 0x40);

        assert!(lists.remove(5, 0x60));
        assert!(!lists.remove(5, 0x60));

        let remaining: Vec<usize> = lists.iter(5).collect();
        assert_eq!(remaining, [0x20, 0x40]);
    }

    #[test]
    fn test_classes_are_independent() {
        let mut lists = FreeLists::new(4, 6);

        lists.push(4, 0x10);
        lists.push(6, 0x40);

        assert_eq!(lists.len(4), 1);
        assert_eq!(lists.len(5), 0);
        assert_eq!(lists.len(6), 1);
        assert_eq!(lists.free_bytes(), 0x10 + 0x40);
    }
}
