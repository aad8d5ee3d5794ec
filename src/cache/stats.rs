//! Cache statistics
//!
//! Tracks query cache metrics: serves from cache, reads that had to wait on
//! the network, fetches issued, invalidations, discarded stale responses and
//! evictions.

use serde::Serialize;

// == Query Stats ==
/// Counters of the query cache.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryStats {
    /// Reads served from a cached value (fresh or stale-while-revalidate)
    pub hits: u64,
    /// Reads that had to wait for a network fetch
    pub misses: u64,
    /// Fetches issued to the network
    pub fetches: u64,
    /// Entries marked stale by mutations
    pub invalidations: u64,
    /// Responses discarded because a newer fetch superseded them
    pub stale_discards: u64,
    /// Entries removed by the eviction policy
    pub evictions: u64,
    /// Current number of entries in the cache
    pub total_entries: usize,
}

impl QueryStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// hits / (hits + misses), or 0.0 if no reads have been made.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub fn record_fetch(&mut self) {
        self.fetches += 1;
    }

    pub fn record_invalidations(&mut self, count: u64) {
        self.invalidations += count;
    }

    pub fn record_stale_discard(&mut self) {
        self.stale_discards += 1;
    }

    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }
}
