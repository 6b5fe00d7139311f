//! TTL Queue Module
//!
//! Min-heap of expiry registrations ordered by deathtime.
//!
//! References are never removed when an entry is deleted or re-armed; instead
//! each reference carries the entry version it was issued for, and the sweep
//! skips references whose entry is gone or has moved on to a newer version.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use tokio::time::Instant;

// == TTL Reference ==
/// One expiry registration for the entry at (`namespace`, `key`).
#[derive(Debug, Clone)]
pub(crate) struct TtlRef {
    pub deathtime: Instant,
    pub version: u64,
    pub namespace: String,
    pub key: String,
}

impl PartialEq for TtlRef {
    fn eq(&self, other: &Self) -> bool {
        self.deathtime == other.deathtime && self.version == other.version
    }
}

impl Eq for TtlRef {}

impl PartialOrd for TtlRef {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TtlRef {
    // Versions are unique per cache, so they only break deathtime ties
    fn cmp(&self, other: &Self) -> Ordering {
        match self.deathtime.cmp(&other.deathtime) {
            Ordering::Equal => self.version.cmp(&other.version),
            ordering => ordering,
        }
    }
}

// == TTL Queue ==
/// Earliest-deathtime-first queue of [`TtlRef`]s, stale ones included.
#[derive(Debug, Default)]
pub(crate) struct TtlQueue {
    heap: BinaryHeap<Reverse<TtlRef>>,
}

impl TtlQueue {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
        }
    }

    pub fn push(&mut self, entry: TtlRef) {
        self.heap.push(Reverse(entry));
    }

    /// Removes and returns the reference with the earliest deathtime.
    pub fn pop_earliest(&mut self) -> Option<TtlRef> {
        self.heap.pop().map(|Reverse(entry)| entry)
    }

    /// Number of references, including stale ones.
    pub fn len(&self) -> usize {
        self.heap.len()
    }
}
