//! Query Store
//!
//! Synchronous core of the cache: one arena map of entries keyed by
//! resource+parameters, with the fetch-sequence bookkeeping, family
//! invalidation and policy-driven sweeps. The async wrapper in `swr`
//! owns the locking and request deduplication.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::cache::entry::{current_timestamp_ms, FetchTicket, QueryEntry, QuerySnapshot};
use crate::cache::eviction::EvictionPolicy;
use crate::cache::key::QueryKey;
use crate::cache::stats::QueryStats;
use crate::error::AdminError;

// == Query Store ==
/// Arena of cache entries shared by every screen of the dashboard.
#[derive(Debug, Default)]
pub struct QueryStore {
    entries: HashMap<QueryKey, QueryEntry>,
    stats: QueryStats,
}

impl QueryStore {
    pub fn new() -> Self {
        Self::default()
    }

    // == Snapshots ==
    /// Observable state of one entry, if it exists. No side effects.
    pub fn snapshot(&self, key: &QueryKey) -> Option<QuerySnapshot> {
        self.entries.get(key).map(QueryEntry::snapshot)
    }

    /// Records that a read served the entry's cached value.
    pub fn record_serve(&mut self, key: &QueryKey) {
        if let Some(entry) = self.entries.get_mut(key) {
            entry.touch();
            self.stats.record_hit();
        }
    }

    /// Records a read that had to wait on the network.
    pub fn record_wait(&mut self) {
        self.stats.record_miss();
    }

    // == Fetch Lifecycle ==
    /// Starts a fetch for the key, creating the entry on first reference.
    /// Any fetch still in flight for the key is superseded.
    pub fn begin_fetch(&mut self, key: &QueryKey) -> FetchTicket {
        let entry = self.entries.entry(key.clone()).or_default();
        let ticket = entry.begin_fetch();
        self.stats.record_fetch();
        self.stats.set_total_entries(self.entries.len());
        debug!(key = %key, "fetch started");
        ticket
    }

    /// Applies a fetch result. Returns false when the result was discarded:
    /// either the ticket was superseded by a newer fetch, or the entry was
    /// evicted while the request was in flight.
    pub fn complete_fetch(
        &mut self,
        key: &QueryKey,
        ticket: FetchTicket,
        result: Result<Value, AdminError>,
    ) -> bool {
        let applied = match self.entries.get_mut(key) {
            Some(entry) => entry.complete_fetch(ticket, result),
            None => false,
        };
        if applied {
            debug!(key = %key, "fetch applied");
        } else {
            self.stats.record_stale_discard();
            debug!(key = %key, "stale fetch discarded");
        }
        applied
    }

    // == Invalidation ==
    /// Marks every entry of the resource family stale. Returns the number of
    /// entries touched.
    pub fn invalidate_resource(&mut self, resource: &str) -> usize {
        let mut count = 0;
        for (key, entry) in self.entries.iter_mut() {
            if key.matches(resource) {
                entry.invalidate();
                count += 1;
            }
        }
        if count > 0 {
            self.stats.record_invalidations(count as u64);
            debug!(resource, count, "entries invalidated");
        }
        count
    }

    // == Sweep ==
    /// Removes entries the policy allows to go. Returns the number removed.
    pub fn sweep(&mut self, policy: &dyn EvictionPolicy) -> usize {
        let now = current_timestamp_ms();
        let doomed: Vec<QueryKey> = self
            .entries
            .iter()
            .filter(|(_, entry)| policy.should_evict(entry, now))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &doomed {
            self.entries.remove(key);
            self.stats.record_eviction();
        }
        self.stats.set_total_entries(self.entries.len());
        doomed.len()
    }

    // == Introspection ==
    pub fn stats(&self) -> QueryStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
