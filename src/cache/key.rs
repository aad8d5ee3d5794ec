//! Cache keys
//!
//! A query key is the resource name plus the ordered query parameters of one
//! fetch. Keys with the same resource name form a family: invalidating the
//! resource name invalidates every parameterized variant at once.

use std::fmt;

use crate::models::requests::{NftSearchQuery, UserListQuery};

// == Resource Names ==
pub const ADMIN_STATS: &str = "admin-stats";
pub const CHART_DATA: &str = "chart-data";
pub const ADMIN_CASES: &str = "admin-cases";
pub const AVAILABLE_NFTS: &str = "available-nfts";
pub const COLLECTIONS_LIST: &str = "collections-list";
pub const ADMIN_USERS: &str = "admin-users";
pub const USER_HISTORY: &str = "user-history";
pub const ADMIN_PROMOCODES: &str = "admin-promocodes";
pub const REFERRAL_LINKS: &str = "referralLinks";
pub const ADMIN_GIFTS: &str = "admin-gifts";
pub const ADMIN_LOGS: &str = "logs";

// == Query Key ==
/// Identifier of one cache entry: resource name + ordered parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey {
    resource: &'static str,
    params: Vec<String>,
}

impl QueryKey {
    /// Creates a key for a resource with no parameters.
    pub fn bare(resource: &'static str) -> Self {
        Self {
            resource,
            params: Vec::new(),
        }
    }

    /// Creates a key for a parameterized resource family member.
    pub fn with_params(resource: &'static str, params: Vec<String>) -> Self {
        Self { resource, params }
    }

    pub fn resource(&self) -> &str {
        self.resource
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    /// True when this key belongs to the given resource family. Used by
    /// invalidation: a bare key matches exactly, a parameterized key matches
    /// through its resource name.
    pub fn matches(&self, resource: &str) -> bool {
        self.resource == resource
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.params.is_empty() {
            write!(f, "{}", self.resource)
        } else {
            write!(f, "{}[{}]", self.resource, self.params.join(", "))
        }
    }
}

// == Key Builders ==

pub fn admin_stats() -> QueryKey {
    QueryKey::bare(ADMIN_STATS)
}

pub fn chart_data(days: u32) -> QueryKey {
    QueryKey::with_params(CHART_DATA, vec![days.to_string()])
}

pub fn admin_cases() -> QueryKey {
    QueryKey::bare(ADMIN_CASES)
}

pub fn available_nfts(query: &NftSearchQuery) -> QueryKey {
    QueryKey::with_params(
        AVAILABLE_NFTS,
        vec![
            query.limit.to_string(),
            query.offset.to_string(),
            query.status.clone(),
            query.collections.join(","),
        ],
    )
}

pub fn collections_list() -> QueryKey {
    QueryKey::bare(COLLECTIONS_LIST)
}

pub fn admin_users(query: &UserListQuery) -> QueryKey {
    QueryKey::with_params(
        ADMIN_USERS,
        vec![
            query.page.to_string(),
            query.limit.to_string(),
            query.search.clone(),
            query.status.as_str().to_string(),
        ],
    )
}

pub fn user_history(user_id: &str) -> QueryKey {
    QueryKey::with_params(USER_HISTORY, vec![user_id.to_string()])
}

pub fn admin_promocodes() -> QueryKey {
    QueryKey::bare(ADMIN_PROMOCODES)
}

pub fn referral_links() -> QueryKey {
    QueryKey::bare(REFERRAL_LINKS)
}

pub fn admin_gifts() -> QueryKey {
    QueryKey::bare(ADMIN_GIFTS)
}

pub fn admin_logs(page: u32, limit: u32) -> QueryKey {
    QueryKey::with_params(ADMIN_LOGS, vec![page.to_string(), limit.to_string()])
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_and_parameterized_keys_differ() {
        let bare = admin_cases();
        let users_p1 = admin_users(&UserListQuery::default());
        let users_p2 = admin_users(&UserListQuery {
            page: 2,
            ..UserListQuery::default()
        });

        assert_ne!(bare, users_p1);
        assert_ne!(users_p1, users_p2);
        assert_eq!(users_p1, admin_users(&UserListQuery::default()));
    }

    #[test]
    fn test_family_matching() {
        let users_p1 = admin_users(&UserListQuery::default());
        let users_p2 = admin_users(&UserListQuery {
            page: 2,
            search: "bob".to_string(),
            ..UserListQuery::default()
        });

        assert!(users_p1.matches(ADMIN_USERS));
        assert!(users_p2.matches(ADMIN_USERS));
        assert!(!users_p1.matches(ADMIN_CASES));
        assert!(admin_cases().matches(ADMIN_CASES));
    }

    #[test]
    fn test_display() {
        assert_eq!(admin_cases().to_string(), "admin-cases");
        assert_eq!(admin_logs(3, 25).to_string(), "logs[3, 25]");
    }

    #[test]
    fn test_nft_key_tracks_filters() {
        let base = NftSearchQuery::default();
        let filtered = NftSearchQuery {
            collections: vec!["caps".to_string()],
            ..NftSearchQuery::default()
        };
        assert_ne!(available_nfts(&base), available_nfts(&filtered));
    }
}
