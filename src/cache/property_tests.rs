//! Property-Based Tests for the Query Cache
//!
//! Uses proptest to verify the store-level guarantees: invalidation stays
//! scoped to its resource family, overlapping fetches resolve to the
//! latest-started one, and the statistics track what actually happened.

use proptest::prelude::*;
use serde_json::json;

use crate::cache::eviction::RetainAll;
use crate::cache::key::{self, QueryKey};
use crate::cache::store::QueryStore;

// == Strategies ==

static RESOURCES: [&str; 5] = [
    key::ADMIN_CASES,
    key::ADMIN_GIFTS,
    key::ADMIN_PROMOCODES,
    key::REFERRAL_LINKS,
    key::ADMIN_USERS,
];

fn resource_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(&RESOURCES[..])
}

/// A key within one of the known resource families, possibly parameterized.
fn key_strategy() -> impl Strategy<Value = QueryKey> {
    (resource_strategy(), 0u32..4).prop_map(|(resource, variant)| {
        if variant == 0 {
            QueryKey::bare(resource)
        } else {
            QueryKey::with_params(resource, vec![variant.to_string()])
        }
    })
}

#[derive(Debug, Clone)]
enum StoreOp {
    Fetch { key: QueryKey, payload: u32 },
    Invalidate { resource: &'static str },
    Serve { key: QueryKey },
}

fn store_op_strategy() -> impl Strategy<Value = StoreOp> {
    prop_oneof![
        (key_strategy(), any::<u32>()).prop_map(|(key, payload)| StoreOp::Fetch { key, payload }),
        resource_strategy().prop_map(|resource| StoreOp::Invalidate { resource }),
        key_strategy().prop_map(|key| StoreOp::Serve { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Invalidation marks exactly the keys of its resource family and
    // leaves every other family's flags unchanged.
    #[test]
    fn prop_invalidation_scoped_to_family(
        keys in prop::collection::vec(key_strategy(), 1..10),
        target in resource_strategy(),
    ) {
        let mut store = QueryStore::new();
        for key in &keys {
            let ticket = store.begin_fetch(key);
            store.complete_fetch(key, ticket, Ok(json!("x")));
        }

        store.invalidate_resource(target);

        for key in &keys {
            let snap = store.snapshot(key).unwrap();
            prop_assert_eq!(
                snap.invalidated,
                key.matches(target),
                "key {} flag mismatch after invalidating {}",
                key,
                target
            );
        }
    }

    // For any pair of overlapping fetches on one key, the entry ends up
    // with the later-started fetch's value no matter which lands first.
    #[test]
    fn prop_latest_started_fetch_wins(
        first_payload in any::<u32>(),
        second_payload in any::<u32>(),
        second_lands_first in any::<bool>(),
    ) {
        let mut store = QueryStore::new();
        let k = key::admin_cases();

        let t1 = store.begin_fetch(&k);
        let t2 = store.begin_fetch(&k);

        if second_lands_first {
            prop_assert!(store.complete_fetch(&k, t2, Ok(json!(second_payload))));
            prop_assert!(!store.complete_fetch(&k, t1, Ok(json!(first_payload))));
        } else {
            prop_assert!(!store.complete_fetch(&k, t1, Ok(json!(first_payload))));
            prop_assert!(store.complete_fetch(&k, t2, Ok(json!(second_payload))));
        }

        let snap = store.snapshot(&k).unwrap();
        prop_assert_eq!(snap.value, Some(json!(second_payload)));
    }

    // Statistics reflect the operations that ran: every completed fetch is
    // counted, every serve is a hit, and entry totals match the map.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(store_op_strategy(), 1..40)) {
        let mut store = QueryStore::new();
        let mut expected_fetches: u64 = 0;
        let mut expected_hits: u64 = 0;
        let mut expected_invalidations: u64 = 0;

        for op in ops {
            match op {
                StoreOp::Fetch { key, payload } => {
                    let ticket = store.begin_fetch(&key);
                    store.complete_fetch(&key, ticket, Ok(json!(payload)));
                    expected_fetches += 1;
                }
                StoreOp::Invalidate { resource } => {
                    expected_invalidations += store.invalidate_resource(resource) as u64;
                }
                StoreOp::Serve { key } => {
                    let exists = store.snapshot(&key).is_some();
                    store.record_serve(&key);
                    if exists {
                        expected_hits += 1;
                    }
                }
            }
        }

        let stats = store.stats();
        prop_assert_eq!(stats.fetches, expected_fetches, "fetch count mismatch");
        prop_assert_eq!(stats.hits, expected_hits, "hit count mismatch");
        prop_assert_eq!(stats.invalidations, expected_invalidations, "invalidation count mismatch");
        prop_assert_eq!(stats.total_entries, store.len(), "entry total mismatch");
        prop_assert_eq!(stats.stale_discards, 0, "no fetch overlapped in this model");
    }

    // A sweep under RetainAll is always a no-op, whatever came before.
    #[test]
    fn prop_retain_all_sweep_is_noop(ops in prop::collection::vec(store_op_strategy(), 1..30)) {
        let mut store = QueryStore::new();
        for op in ops {
            match op {
                StoreOp::Fetch { key, payload } => {
                    let ticket = store.begin_fetch(&key);
                    store.complete_fetch(&key, ticket, Ok(json!(payload)));
                }
                StoreOp::Invalidate { resource } => {
                    store.invalidate_resource(resource);
                }
                StoreOp::Serve { key } => store.record_serve(&key),
            }
        }

        let before = store.len();
        prop_assert_eq!(store.sweep(&RetainAll), 0);
        prop_assert_eq!(store.len(), before);
    }
}
