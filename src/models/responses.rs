//! Response envelopes for the listing and mutation endpoints
//!
//! The backend wraps each listing in a small envelope keyed by the resource
//! name; paginated listings carry a `pagination` block alongside the rows.

use serde::{Deserialize, Serialize};

use crate::models::entities::{
    AdminLog, Case, ChartPoint, Gift, PartnerNft, Promocode, ReferralLink, Transaction, User,
};

// == Pagination Block ==
/// Pagination metadata returned by the paginated admin listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u32,
}

// == Listing Envelopes ==
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CasesResponse {
    pub cases: Vec<Case>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<User>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromocodesResponse {
    pub promocodes: Vec<Promocode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferralLinksResponse {
    #[serde(rename = "referralLinks")]
    pub referral_links: Vec<ReferralLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiftsResponse {
    pub gifts: Vec<Gift>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminLogsResponse {
    pub logs: Vec<AdminLog>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartResponse {
    pub data: Vec<ChartPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserHistoryResponse {
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub case_openings: Vec<serde_json::Value>,
}

// == Mutation Envelopes ==
/// Generic mutation envelope; the backend sets either `data` or `error`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiResponse<T> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Envelope of the case create/update mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaseMutationResponse {
    pub success: bool,
    pub case: Case,
}

/// Bare acknowledgement envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteEmptyCasesResponse {
    pub success: bool,
    pub deleted_count: u64,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadImageResponse {
    pub success: bool,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub image_base64: Option<String>,
    pub filename: Option<String>,
    pub size: Option<u64>,
}

// == Marketplace Envelopes ==
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchNftsResponse {
    pub results: Vec<PartnerNft>,
    #[serde(default)]
    pub total_count: Option<u64>,
}
