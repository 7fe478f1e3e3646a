//! Buddy arena module
//!
//! This module provides the complete buddy-system bookkeeping:
//! - Per-size-class FIFO free lists
//! - The allocated-block registry
//! - Split and coalesce machinery that keeps both consistent

pub mod arena;
pub mod block;
mod free_lists;
pub mod status;

pub use arena::BuddyArena;
pub use block::Block;
pub use status::ArenaStatus;
