//! Cache Statistics Module
//!
//! Tracks lookups, removals, expirations and sweep activity.

use serde::Serialize;

// == Cache Stats ==
/// Snapshot of cache activity counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CacheStats {
    /// Lookups that found a value
    pub hits: u64,
    /// Lookups that found nothing
    pub misses: u64,
    /// Entries evicted by a sweep because their TTL ran out
    pub expirations: u64,
    /// Explicit removals that found an entry
    pub removals: u64,
    /// Completed sweeps
    pub sweeps: u64,
    /// Live entries across all namespaces
    pub total_entries: usize,
    /// TTL queue length, stale references included
    pub pending_ttl_refs: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 if no lookups have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_lookup(&mut self, hit: bool) {
        if hit {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
    }

    pub fn record_expiration(&mut self) {
        self.expirations += 1;
    }

    pub fn record_removal(&mut self) {
        self.removals += 1;
    }

    pub fn record_sweep(&mut self) {
        self.sweeps += 1;
    }
}
