//! Cache entries
//!
//! Defines the per-key record the query store keeps: fetch status, the last
//! successful value, the last error, the invalidation flag, and the fetch
//! sequence number that orders overlapping requests.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

use crate::error::AdminError;

// == Query Status ==
/// Lifecycle state of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    /// Created but never fetched
    Idle,
    /// First fetch outstanding, no value to serve yet
    Loading,
    /// Last fetch resolved with a value
    Success,
    /// Last fetch failed and no fresher value exists
    Error,
}

// == Fetch Ticket ==
/// Proof that a fetch was started, carrying its per-key sequence number.
/// A result can only be applied through the ticket of the fetch that
/// produced it; superseded tickets are rejected by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket(pub(crate) u64);

// == Query Entry ==
/// One cached fetch result with its bookkeeping.
#[derive(Debug)]
pub struct QueryEntry {
    status: QueryStatus,
    value: Option<Value>,
    error: Option<AdminError>,
    invalidated: bool,
    /// Sequence number of the most recently started fetch for this key
    seq: u64,
    /// Creation timestamp (Unix milliseconds)
    created_at: u64,
    /// Timestamp of the last read that served this entry (Unix milliseconds)
    last_read_at: u64,
}

impl QueryEntry {
    pub fn new() -> Self {
        let now = current_timestamp_ms();
        Self {
            status: QueryStatus::Idle,
            value: None,
            error: None,
            invalidated: false,
            seq: 0,
            created_at: now,
            last_read_at: now,
        }
    }

    pub fn status(&self) -> QueryStatus {
        self.status
    }

    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn error(&self) -> Option<&AdminError> {
        self.error.as_ref()
    }

    pub fn is_invalidated(&self) -> bool {
        self.invalidated
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    pub fn last_read_at(&self) -> u64 {
        self.last_read_at
    }

    /// A fresh entry can be served without any fetch.
    pub fn is_fresh(&self) -> bool {
        self.status == QueryStatus::Success && !self.invalidated
    }

    // == Transitions ==

    /// Marks the entry stale. The value stays available for
    /// stale-while-revalidate serving.
    pub(crate) fn invalidate(&mut self) {
        self.invalidated = true;
    }

    /// Starts a new fetch: bumps the sequence number (superseding any fetch
    /// still in flight) and clears the invalidation flag, since the fetch
    /// now underway is the revalidation. Entries without a prior value show
    /// Loading; entries with one keep serving it.
    pub(crate) fn begin_fetch(&mut self) -> FetchTicket {
        self.seq += 1;
        self.invalidated = false;
        if self.value.is_none() {
            self.status = QueryStatus::Loading;
        }
        FetchTicket(self.seq)
    }

    /// Applies a fetch result if the ticket is still current. Returns false
    /// when the ticket was superseded and the result must be discarded.
    pub(crate) fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Value, AdminError>,
    ) -> bool {
        if ticket.0 != self.seq {
            return false;
        }
        match result {
            Ok(value) => {
                self.status = QueryStatus::Success;
                self.value = Some(value);
                self.error = None;
            }
            Err(err) => {
                self.status = QueryStatus::Error;
                self.error = Some(err);
            }
        }
        true
    }

    /// Records that a read served this entry.
    pub(crate) fn touch(&mut self) {
        self.last_read_at = current_timestamp_ms();
    }

    /// Snapshot for readers outside the store lock.
    pub fn snapshot(&self) -> QuerySnapshot {
        QuerySnapshot {
            status: self.status,
            value: self.value.clone(),
            error: self.error.clone(),
            invalidated: self.invalidated,
        }
    }
}

impl Default for QueryEntry {
    fn default() -> Self {
        Self::new()
    }
}

// == Query Snapshot ==
/// Owned copy of an entry's observable state.
#[derive(Debug, Clone)]
pub struct QuerySnapshot {
    pub status: QueryStatus,
    pub value: Option<Value>,
    pub error: Option<AdminError>,
    pub invalidated: bool,
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_entry_starts_idle() {
        let entry = QueryEntry::new();
        assert_eq!(entry.status(), QueryStatus::Idle);
        assert!(entry.value().is_none());
        assert!(!entry.is_fresh());
    }

    #[test]
    fn test_first_fetch_shows_loading() {
        let mut entry = QueryEntry::new();
        let ticket = entry.begin_fetch();
        assert_eq!(entry.status(), QueryStatus::Loading);

        assert!(entry.complete_fetch(ticket, Ok(json!({"cases": []}))));
        assert_eq!(entry.status(), QueryStatus::Success);
        assert!(entry.is_fresh());
    }

    #[test]
    fn test_refetch_keeps_serving_old_value() {
        let mut entry = QueryEntry::new();
        let t1 = entry.begin_fetch();
        entry.complete_fetch(t1, Ok(json!(1)));
        entry.invalidate();
        assert!(!entry.is_fresh());

        // Revalidation in flight: still Success with the old value visible.
        let _t2 = entry.begin_fetch();
        assert_eq!(entry.status(), QueryStatus::Success);
        assert_eq!(entry.value(), Some(&json!(1)));
    }

    #[test]
    fn test_superseded_ticket_is_discarded() {
        let mut entry = QueryEntry::new();
        let t1 = entry.begin_fetch();
        let t2 = entry.begin_fetch();

        // t2 lands first, then t1 arrives late and must be rejected.
        assert!(entry.complete_fetch(t2, Ok(json!("new"))));
        assert!(!entry.complete_fetch(t1, Ok(json!("old"))));
        assert_eq!(entry.value(), Some(&json!("new")));
    }

    #[test]
    fn test_error_keeps_last_value() {
        let mut entry = QueryEntry::new();
        let t1 = entry.begin_fetch();
        entry.complete_fetch(t1, Ok(json!(41)));

        let t2 = entry.begin_fetch();
        entry.complete_fetch(t2, Err(AdminError::Network("boom".to_string())));

        assert_eq!(entry.status(), QueryStatus::Error);
        assert_eq!(entry.value(), Some(&json!(41)));
        assert!(entry.error().is_some());
    }

    #[test]
    fn test_begin_fetch_clears_invalidation() {
        let mut entry = QueryEntry::new();
        let t1 = entry.begin_fetch();
        entry.complete_fetch(t1, Ok(json!(1)));
        entry.invalidate();
        assert!(entry.is_invalidated());

        let _t2 = entry.begin_fetch();
        assert!(!entry.is_invalidated());
    }

    #[test]
    fn test_invalidate_during_flight_survives_completion() {
        let mut entry = QueryEntry::new();
        let t1 = entry.begin_fetch();
        entry.complete_fetch(t1, Ok(json!(1)));

        let t2 = entry.begin_fetch();
        // A mutation lands while the refetch is in flight.
        entry.invalidate();
        assert!(entry.complete_fetch(t2, Ok(json!(2))));

        // The applied value predates the mutation, so the entry stays stale.
        assert!(entry.is_invalidated());
        assert_eq!(entry.value(), Some(&json!(2)));
    }
}
