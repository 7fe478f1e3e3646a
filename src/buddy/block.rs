//! Buddy block metadata
//!
//! Represents one block handed out by the arena, with size and address
//! information.

use core::cmp::PartialOrd;

/// A power-of-two block within the arena.
#[derive(Debug, Clone, Copy)]
pub struct Block {
    /// Byte offset of the block within the arena.
    pub addr: usize,
    /// Block size in bytes; always a power of two and always divides `addr`.
    pub size: usize,
}

impl Block {
    /// Create a new block descriptor
    pub const fn new(addr: usize, size: usize) -> Self {
        Self { addr, size }
    }

    /// Calculate the buddy address for this block
    /// The buddy is the other half of the parent block at the next larger size
    /// For a block of size S at address A, its buddy is at A ^ S
    pub const fn buddy_addr(&self) -> usize {
        self.addr ^ self.size
    }

    /// Size-class exponent of this block (`log2(size)`)
    pub const fn order(&self) -> u32 {
        self.size.trailing_zeros()
    }
}

impl PartialOrd for Block {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        self.addr.partial_cmp(&other.addr)
    }
}

impl PartialEq for Block {
    fn eq(&self, other: &Self) -> bool {
        self.addr == other.addr && self.size == other.size
    }
}

impl Eq for Block {}
