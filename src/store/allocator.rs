//! # Identity Allocator
//!
//! Process-wide source of unique, strictly increasing record ids.

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic id counter. Two concurrent calls never observe the same
/// value, and the sequence has no gaps.
#[derive(Debug)]
pub struct IdAllocator {
    next: AtomicU64,
}

impl IdAllocator {
    /// Allocator whose first id is 1.
    pub fn new() -> Self {
        Self::starting_after(0)
    }

    /// Allocator whose first id is `highest + 1`. Used when the store is
    /// seeded with pre-assigned ids.
    pub fn starting_after(highest: u64) -> Self {
        Self {
            next: AtomicU64::new(highest),
        }
    }

    /// Next unique id, strictly greater than every id returned so far.
    ///
    /// Counter exhaustion panics: wrapping would reissue ids and break
    /// uniqueness, so it is treated as fatal.
    pub fn next_id(&self) -> u64 {
        self.next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                current.checked_add(1)
            })
            .map(|previous| previous + 1)
            .expect("id counter exhausted")
    }

    /// Highest id handed out so far (0 if none).
    pub fn current(&self) -> u64 {
        self.next.load(Ordering::SeqCst)
    }
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self::new()
    }
}
