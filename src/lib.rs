//! Buddy Arena Allocator
//!
//! This crate implements a buddy-system allocator over a fixed arena,
//! featuring:
//! - Power-of-two size classes with per-class FIFO free lists
//! - On-demand block splitting and buddy coalescing on release
//! - An allocated-block registry that rejects invalid and double frees
//! - Read-only status snapshots for diagnostics
//!
//! The arena is pure bookkeeping over integer addresses in
//! `[0, total_size)`; no real memory is mapped or touched. All operations
//! are synchronous and take `&mut self`, so a shared arena must be wrapped
//! in the caller's own lock around whole calls.

#![no_std]

extern crate alloc;

// Logging support - conditionally import log crate
#[cfg(feature = "log")]
extern crate log;

// Stub macros when log is disabled - these become no-ops
#[cfg(not(feature = "log"))]
macro_rules! error {
    ($($arg:tt)*) => {};
}
#[cfg(not(feature = "log"))]
macro_rules! warn {
    ($($arg:tt)*) => {};
}
#[cfg(not(feature = "log"))]
macro_rules! debug {
    ($($arg:tt)*) => {};
}

/// The error type used for arena operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    /// Invalid request parameter (e.g. zero size).
    InvalidParam,
    /// Invalid arena configuration: `total_size` is zero or not a power of
    /// two, or `2^max_splits` does not divide it evenly.
    InvalidConfig,
    /// The requested size rounds up past the arena itself.
    SizeExceedsArena,
    /// No free block of sufficient size exists anywhere in the arena.
    OutOfMemory,
    /// Freeing an address/size pair that is not a live allocation.
    InvalidFree,
}

/// A [`Result`] type with [`AllocError`] as the error type.
pub type AllocResult<T = ()> = Result<T, AllocError>;

impl core::fmt::Display for AllocError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            Self::InvalidParam => "request size must be non-zero",
            Self::InvalidConfig => "total size must be a power of two divisible by 2^max_splits",
            Self::SizeExceedsArena => "requested size exceeds the arena",
            Self::OutOfMemory => "no free block large enough",
            Self::InvalidFree => "address/size pair is not a live allocation",
        };
        f.write_str(msg)
    }
}

impl core::error::Error for AllocError {}

/// Checks whether the address has the demanded alignment.
///
/// Equivalent to `addr % align == 0`, but the alignment must be a power of two.
#[inline]
pub(crate) const fn is_aligned(addr: usize, align: usize) -> bool {
    addr & (align - 1) == 0
}

pub mod buddy;
pub use buddy::{ArenaStatus, Block, BuddyArena};
