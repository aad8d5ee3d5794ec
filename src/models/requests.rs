//! Request records for the remote write operations
//!
//! One tagged record per mutation, with required and optional fields spelled
//! out. Optional fields are omitted from the serialized body rather than sent
//! as null, matching what the backend expects.

use serde::{Deserialize, Serialize};

use crate::models::entities::Rarity;

// == Case Creation ==
/// Request body for creating a case together with its reward lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCaseRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlock_level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlock_price: Option<f64>,
    pub nft_items: Vec<CaseRewardItem>,
}

/// One reward line inside a case-creation request, with its display fields
/// already resolved from the marketplace listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseRewardItem {
    pub nft_id: String,
    pub name: String,
    pub image_url: String,
    pub rarity: Rarity,
    pub drop_chance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_price: Option<f64>,
}

impl CreateCaseRequest {
    /// Validates the request data.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("case name cannot be empty".to_string());
        }
        if !self.price.is_finite() || self.price <= 0.0 {
            return Some("case price must be a positive number".to_string());
        }
        if self.nft_items.is_empty() {
            return Some("a case needs at least one reward item".to_string());
        }
        let total: f64 = self.nft_items.iter().map(|i| i.drop_chance).sum();
        if (total - 100.0).abs() > crate::cases::CHANCE_TOLERANCE {
            return Some(format!(
                "drop chances must sum to 100%, currently {:.2}%",
                total
            ));
        }
        None
    }
}

// == Case Update ==
/// Request body for editing a case. All fields optional; absent fields are
/// left unchanged by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCaseRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlock_level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unlock_price: Option<f64>,
}

// == Promocodes ==
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePromocodeRequest {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub bonus_amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_uses: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl CreatePromocodeRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.code.trim().is_empty() {
            return Some("promocode cannot be empty".to_string());
        }
        if !self.bonus_amount.is_finite() || self.bonus_amount < 0.0 {
            return Some("bonus amount must be a non-negative number".to_string());
        }
        None
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePromocodeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus_amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus_percent: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_uses: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<chrono::DateTime<chrono::Utc>>,
}

// == Gifts ==
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGiftRequest {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl CreateGiftRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.name.trim().is_empty() {
            return Some("gift name cannot be empty".to_string());
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Some("gift price must be a non-negative number".to_string());
        }
        None
    }
}

// == Referral Links ==
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReferralLinkRequest {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CreateReferralLinkRequest {
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if self.code.trim().is_empty() {
            return Some("referral code cannot be empty".to_string());
        }
        None
    }
}

// == Users ==
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserBalanceRequest {
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockUserRequest {
    pub blocked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Status filter of the users listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserStatusFilter {
    #[default]
    All,
    Active,
    Blocked,
}

impl UserStatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatusFilter::All => "all",
            UserStatusFilter::Active => "active",
            UserStatusFilter::Blocked => "blocked",
        }
    }
}

/// Query parameters of the users listing endpoint.
#[derive(Debug, Clone)]
pub struct UserListQuery {
    pub page: u32,
    pub limit: u32,
    pub search: String,
    pub status: UserStatusFilter,
}

impl Default for UserListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 25,
            search: String::new(),
            status: UserStatusFilter::All,
        }
    }
}

impl UserListQuery {
    /// Renders the query as URL key/value pairs. Empty search is omitted.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("page".to_string(), self.page.to_string()),
            ("limit".to_string(), self.limit.to_string()),
        ];
        if !self.search.is_empty() {
            pairs.push(("search".to_string(), self.search.clone()));
        }
        pairs.push(("status".to_string(), self.status.as_str().to_string()));
        pairs
    }
}

// == Marketplace Search ==
/// Query parameters of the partners NFT search endpoint.
#[derive(Debug, Clone)]
pub struct NftSearchQuery {
    pub limit: u32,
    pub offset: u32,
    pub status: String,
    pub collections: Vec<String>,
    pub sort_by: String,
    pub with_attributes: bool,
}

impl Default for NftSearchQuery {
    fn default() -> Self {
        Self {
            limit: 25,
            offset: 0,
            status: "listed".to_string(),
            collections: Vec::new(),
            sort_by: "price asc".to_string(),
            with_attributes: true,
        }
    }
}

impl NftSearchQuery {
    /// Renders the query as URL key/value pairs. Collection filters are
    /// joined with commas; an empty filter list is omitted entirely.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = vec![
            ("limit".to_string(), self.limit.to_string()),
            ("offset".to_string(), self.offset.to_string()),
            ("status".to_string(), self.status.clone()),
            ("sort_by".to_string(), self.sort_by.clone()),
            (
                "with_attributes".to_string(),
                self.with_attributes.to_string(),
            ),
        ];
        if !self.collections.is_empty() {
            pairs.push((
                "filter_by_collections".to_string(),
                self.collections.join(","),
            ));
        }
        pairs
    }
}
