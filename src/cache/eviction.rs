//! Eviction policies
//!
//! The query store keeps every entry in one arena map; whether an entry may
//! be dropped is decided by a swappable policy object applied during sweeps.

use std::time::Duration;

use crate::cache::entry::{QueryEntry, QueryStatus};

// == Eviction Policy Trait ==
/// Decides whether an unreferenced cache entry may be removed.
pub trait EvictionPolicy: Send + Sync {
    fn should_evict(&self, entry: &QueryEntry, now_ms: u64) -> bool;
}

// == Retain All ==
/// Keeps every entry indefinitely.
#[derive(Debug, Default, Clone)]
pub struct RetainAll;

impl EvictionPolicy for RetainAll {
    fn should_evict(&self, _entry: &QueryEntry, _now_ms: u64) -> bool {
        false
    }
}

// == Idle Window ==
/// Evicts entries that no read has served within the window. Entries still
/// on their first fetch are never evicted.
#[derive(Debug, Clone)]
pub struct IdleWindow {
    window: Duration,
}

impl IdleWindow {
    pub fn new(window: Duration) -> Self {
        Self { window }
    }

    pub fn from_secs(secs: u64) -> Self {
        Self::new(Duration::from_secs(secs))
    }
}

impl EvictionPolicy for IdleWindow {
    fn should_evict(&self, entry: &QueryEntry, now_ms: u64) -> bool {
        if entry.status() == QueryStatus::Loading {
            return false;
        }
        let idle_ms = now_ms.saturating_sub(entry.last_read_at());
        idle_ms >= self.window.as_millis() as u64
    }
}
