//! Query Cache
//!
//! Async wrapper around the query store. Owns the locking, deduplicates
//! concurrent fetches per key, serves stale values while revalidating in the
//! background, and applies the invalidation targets of successful mutations.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::sync::{watch, RwLock};
use tracing::debug;

use crate::cache::entry::{FetchTicket, QuerySnapshot, QueryStatus};
use crate::cache::eviction::EvictionPolicy;
use crate::cache::key::QueryKey;
use crate::cache::mutation::MutationDescriptor;
use crate::cache::stats::QueryStats;
use crate::cache::store::QueryStore;
use crate::error::AdminError;

type InflightMap = Arc<Mutex<HashMap<QueryKey, watch::Sender<bool>>>>;

// == Query Cache ==
/// Process-wide cache handle. Cheap to clone; all clones share one store.
#[derive(Clone, Default)]
pub struct QueryCache {
    store: Arc<RwLock<QueryStore>>,
    inflight: InflightMap,
}

/// Wakes readers waiting on a fetch when the fetch settles, including when
/// its future is dropped mid-flight.
struct InflightGuard {
    map: InflightMap,
    key: QueryKey,
}

impl Drop for InflightGuard {
    fn drop(&mut self) {
        if let Ok(mut map) = self.map.lock() {
            if let Some(tx) = map.remove(&self.key) {
                let _ = tx.send(true);
            }
        }
    }
}

/// What a read decided to do, settled inside one locked section so two
/// readers can never both become the fetcher for a key.
enum ReadPlan {
    /// Serve the cached value, nothing to do
    Serve(Value),
    /// Serve the stale value and refresh in the background
    Revalidate {
        stale: Value,
        ticket: FetchTicket,
        guard: InflightGuard,
    },
    /// Run the fetch and wait for it
    Fetch {
        ticket: FetchTicket,
        guard: InflightGuard,
    },
    /// Another reader's fetch is in flight; wait for it to settle
    Join(watch::Receiver<bool>),
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    // == Read ==
    /// Returns the value for the key, fetching it with `fetcher` when the
    /// cache cannot serve it.
    ///
    /// - A fresh entry is returned without any fetch.
    /// - An invalidated entry with a prior value is returned immediately
    ///   while one background refresh runs (stale-while-revalidate).
    /// - Otherwise the fetch runs inline; concurrent readers of the same key
    ///   share the single in-flight request.
    pub async fn read<F, Fut>(&self, key: QueryKey, fetcher: F) -> Result<Value, AdminError>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<Value, AdminError>> + Send + 'static,
    {
        let plan = self.plan_read(&key).await;

        match plan {
            ReadPlan::Serve(value) => Ok(value),
            ReadPlan::Revalidate {
                stale,
                ticket,
                guard,
            } => {
                let cache = self.clone();
                let refresh_key = key.clone();
                tokio::spawn(async move {
                    let _ = cache.run_fetch(refresh_key, ticket, guard, fetcher).await;
                });
                Ok(stale)
            }
            ReadPlan::Fetch { ticket, guard } => self.run_fetch(key, ticket, guard, fetcher).await,
            ReadPlan::Join(mut rx) => {
                // Err means the fetch was abandoned; the snapshot below still
                // reflects the best known state either way.
                let _ = rx.wait_for(|done| *done).await;
                self.settled(&key).await
            }
        }
    }

    /// Decides how to serve one read. Runs entirely under the store lock,
    /// with the in-flight registry locked inside it, so planning is atomic.
    async fn plan_read(&self, key: &QueryKey) -> ReadPlan {
        let mut store = self.store.write().await;
        let snapshot = store.snapshot(key);
        let mut inflight = self.inflight.lock().expect("inflight registry poisoned");

        match snapshot {
            Some(snap) if snap.status == QueryStatus::Success && !snap.invalidated => {
                store.record_serve(key);
                ReadPlan::Serve(snap.value.unwrap_or(Value::Null))
            }
            Some(snap) if snap.status == QueryStatus::Success => {
                // Stale but servable. At most one refresh runs at a time.
                store.record_serve(key);
                let stale = snap.value.unwrap_or(Value::Null);
                if inflight.contains_key(key) {
                    ReadPlan::Serve(stale)
                } else {
                    let guard = Self::register(&mut inflight, &self.inflight, key);
                    let ticket = store.begin_fetch(key);
                    ReadPlan::Revalidate {
                        stale,
                        ticket,
                        guard,
                    }
                }
            }
            _ => {
                // Idle, first load, or a previous error: the reader waits on
                // the network either way.
                store.record_wait();
                if let Some(tx) = inflight.get(key) {
                    ReadPlan::Join(tx.subscribe())
                } else {
                    let guard = Self::register(&mut inflight, &self.inflight, key);
                    let ticket = store.begin_fetch(key);
                    ReadPlan::Fetch { ticket, guard }
                }
            }
        }
    }

    fn register(
        inflight: &mut HashMap<QueryKey, watch::Sender<bool>>,
        map: &InflightMap,
        key: &QueryKey,
    ) -> InflightGuard {
        let (tx, _rx) = watch::channel(false);
        inflight.insert(key.clone(), tx);
        InflightGuard {
            map: Arc::clone(map),
            key: key.clone(),
        }
    }

    /// Runs one fetch to completion and applies its result. The caller's own
    /// outcome is the fetch result even if the store discarded it as stale.
    async fn run_fetch<F, Fut>(
        &self,
        key: QueryKey,
        ticket: FetchTicket,
        guard: InflightGuard,
        fetcher: F,
    ) -> Result<Value, AdminError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, AdminError>>,
    {
        let result = fetcher().await;
        {
            let mut store = self.store.write().await;
            store.complete_fetch(&key, ticket, result.clone());
        }
        // Waiters wake only after the result is visible in the store.
        drop(guard);
        result
    }

    /// Outcome for a reader that waited on someone else's fetch.
    async fn settled(&self, key: &QueryKey) -> Result<Value, AdminError> {
        let store = self.store.read().await;
        match store.snapshot(key) {
            Some(QuerySnapshot {
                status: QueryStatus::Success,
                value: Some(value),
                ..
            }) => Ok(value),
            Some(QuerySnapshot {
                error: Some(err), ..
            }) => Err(err),
            Some(QuerySnapshot {
                value: Some(value), ..
            }) => Ok(value),
            _ => Err(AdminError::Network(
                "request was interrupted before completing".to_string(),
            )),
        }
    }

    // == Mutate ==
    /// Runs a remote write. On success every cache key matching the
    /// descriptor's targets is invalidated; on failure the cache is left
    /// untouched and the error is returned without retry.
    pub async fn mutate<T, F, Fut>(
        &self,
        descriptor: &MutationDescriptor,
        op: F,
    ) -> Result<T, AdminError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, AdminError>>,
    {
        match op().await {
            Ok(value) => {
                let mut store = self.store.write().await;
                for resource in descriptor.invalidates {
                    store.invalidate_resource(resource);
                }
                debug!(mutation = descriptor.name, "mutation applied");
                Ok(value)
            }
            Err(err) => {
                debug!(mutation = descriptor.name, error = %err, "mutation failed, caches untouched");
                Err(err)
            }
        }
    }

    // == Maintenance ==
    /// Marks every entry of the resource family stale.
    pub async fn invalidate(&self, resource: &str) -> usize {
        self.store.write().await.invalidate_resource(resource)
    }

    /// Applies the eviction policy once. Returns the number of entries removed.
    pub async fn sweep(&self, policy: &dyn EvictionPolicy) -> usize {
        self.store.write().await.sweep(policy)
    }

    // == Introspection ==
    pub async fn snapshot(&self, key: &QueryKey) -> Option<QuerySnapshot> {
        self.store.read().await.snapshot(key)
    }

    pub async fn stats(&self) -> QueryStats {
        self.store.read().await.stats()
    }

    pub async fn len(&self) -> usize {
        self.store.read().await.len()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::key;
    use crate::cache::mutation;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn counting_fetcher(
        counter: Arc<AtomicUsize>,
        value: Value,
        delay: Duration,
    ) -> impl FnOnce() -> std::pin::Pin<Box<dyn Future<Output = Result<Value, AdminError>> + Send>>
    {
        move || {
            Box::pin(async move {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(delay).await;
                Ok(value)
            })
        }
    }

    #[tokio::test]
    async fn test_second_read_is_served_from_cache() {
        let cache = QueryCache::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let first = cache
            .read(
                key::admin_cases(),
                counting_fetcher(counter.clone(), json!(["a"]), Duration::ZERO),
            )
            .await
            .unwrap();
        let second = cache
            .read(
                key::admin_cases(),
                counting_fetcher(counter.clone(), json!(["b"]), Duration::ZERO),
            )
            .await
            .unwrap();

        assert_eq!(first, json!(["a"]));
        assert_eq!(second, json!(["a"]));
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_concurrent_reads_share_one_fetch() {
        let cache = QueryCache::new();
        let counter = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..5 {
            let cache = cache.clone();
            let fetcher = counting_fetcher(
                counter.clone(),
                json!({"gifts": []}),
                Duration::from_millis(50),
            );
            handles.push(tokio::spawn(async move {
                cache.read(key::admin_gifts(), fetcher).await
            }));
        }

        for handle in handles {
            let value = handle.await.unwrap().unwrap();
            assert_eq!(value, json!({"gifts": []}));
        }
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invalidated_entry_serves_stale_then_revalidates() {
        let cache = QueryCache::new();
        let counter = Arc::new(AtomicUsize::new(0));

        cache
            .read(
                key::admin_cases(),
                counting_fetcher(counter.clone(), json!("v1"), Duration::ZERO),
            )
            .await
            .unwrap();
        cache.invalidate(key::ADMIN_CASES).await;

        // Stale value comes back immediately; the refresh runs behind it.
        let stale = cache
            .read(
                key::admin_cases(),
                counting_fetcher(counter.clone(), json!("v2"), Duration::from_millis(20)),
            )
            .await
            .unwrap();
        assert_eq!(stale, json!("v1"));

        tokio::time::sleep(Duration::from_millis(100)).await;
        let refreshed = cache
            .read(
                key::admin_cases(),
                counting_fetcher(counter.clone(), json!("v3"), Duration::ZERO),
            )
            .await
            .unwrap();
        assert_eq!(refreshed, json!("v2"));
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_failed_read_surfaces_error_and_retries_next_time() {
        let cache = QueryCache::new();
        let attempts = Arc::new(AtomicUsize::new(0));

        let failing = {
            let attempts = attempts.clone();
            move || {
                let attempts = attempts.clone();
                async move {
                    attempts.fetch_add(1, Ordering::SeqCst);
                    Err::<Value, _>(AdminError::Network("connection refused".to_string()))
                }
            }
        };
        let err = cache.read(key::admin_stats(), failing).await.unwrap_err();
        assert!(matches!(err, AdminError::Network(_)));

        let snap = cache.snapshot(&key::admin_stats()).await.unwrap();
        assert_eq!(snap.status, QueryStatus::Error);

        // No automatic retry happened, but a new read fetches again.
        let counter = Arc::new(AtomicUsize::new(0));
        let value = cache
            .read(
                key::admin_stats(),
                counting_fetcher(counter.clone(), json!(7), Duration::ZERO),
            )
            .await
            .unwrap();
        assert_eq!(value, json!(7));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_waiters_see_the_shared_failure() {
        let cache = QueryCache::new();

        let slow_failure = || async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Err::<Value, _>(AdminError::Http {
                status: 500,
                message: "500 - Internal Server Error".to_string(),
            })
        };

        let first = {
            let cache = cache.clone();
            tokio::spawn(async move { cache.read(key::admin_logs(1, 25), slow_failure).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        let joined_fetches = Arc::new(AtomicUsize::new(0));
        let second = {
            let cache = cache.clone();
            let fetcher =
                counting_fetcher(joined_fetches.clone(), json!("unused"), Duration::ZERO);
            tokio::spawn(async move { cache.read(key::admin_logs(1, 25), fetcher).await })
        };

        assert!(first.await.unwrap().is_err());
        let err = second.await.unwrap().unwrap_err();
        assert!(matches!(err, AdminError::Http { status: 500, .. }));
        assert_eq!(joined_fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_mutation_success_invalidates_targets() {
        let cache = QueryCache::new();
        let counter = Arc::new(AtomicUsize::new(0));

        cache
            .read(
                key::admin_cases(),
                counting_fetcher(counter.clone(), json!(["old"]), Duration::ZERO),
            )
            .await
            .unwrap();

        let outcome: Result<Value, AdminError> = cache
            .mutate(&mutation::CREATE_CASE, || async { Ok(json!({"ok": true})) })
            .await;
        assert!(outcome.is_ok());

        let snap = cache.snapshot(&key::admin_cases()).await.unwrap();
        assert!(snap.invalidated);
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_cache_untouched() {
        let cache = QueryCache::new();
        let counter = Arc::new(AtomicUsize::new(0));

        cache
            .read(
                key::admin_promocodes(),
                counting_fetcher(counter.clone(), json!(["PROMO"]), Duration::ZERO),
            )
            .await
            .unwrap();

        let outcome: Result<Value, AdminError> = cache
            .mutate(&mutation::CREATE_PROMOCODE, || async {
                Err(AdminError::Http {
                    status: 400,
                    message: "code already exists".to_string(),
                })
            })
            .await;
        assert!(outcome.is_err());

        let snap = cache.snapshot(&key::admin_promocodes()).await.unwrap();
        assert!(!snap.invalidated);

        // Next read is still a cache hit.
        let later_fetches = Arc::new(AtomicUsize::new(0));
        let value = cache
            .read(
                key::admin_promocodes(),
                counting_fetcher(later_fetches.clone(), json!("unused"), Duration::ZERO),
            )
            .await
            .unwrap();
        assert_eq!(value, json!(["PROMO"]));
        assert_eq!(later_fetches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_user_mutations_invalidate_every_page() {
        use crate::models::requests::UserListQuery;

        let cache = QueryCache::new();
        for page in 1..=3 {
            let query = UserListQuery {
                page,
                ..UserListQuery::default()
            };
            cache
                .read(key::admin_users(&query), move || async move {
                    Ok(json!({ "page": page }))
                })
                .await
                .unwrap();
        }

        cache
            .mutate(&mutation::BLOCK_USER, || async {
                Ok::<_, AdminError>(json!({"success": true}))
            })
            .await
            .unwrap();

        for page in 1..=3 {
            let query = UserListQuery {
                page,
                ..UserListQuery::default()
            };
            let snap = cache.snapshot(&key::admin_users(&query)).await.unwrap();
            assert!(snap.invalidated, "page {} should be stale", page);
        }
    }
}
