//! Platform entities
//!
//! Shapes of the records the admin backend and the partners marketplace
//! return. The admin wire uses camelCase field names; the partners wire uses
//! snake_case and is left with serde defaults.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// == Rarity ==
/// Ordinal classification tag attached to a reward item. Display-only in
/// this core; the backend decides what each tier means economically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
    Contraband,
}

impl Default for Rarity {
    fn default() -> Self {
        Rarity::Common
    }
}

// == User ==
/// A platform user as listed on the users screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub telegram_id: String,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub balance: f64,
    pub total_spent: f64,
    pub total_won: f64,
    pub is_blocked: bool,
    pub is_admin: bool,
    pub referral_link_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A balance movement on a user's account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub amount: f64,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    Deposit,
    Withdrawal,
    CaseOpening,
    ItemSale,
    Refund,
    AdminAdjustment,
    PromocodeBonus,
}

// == Promocode ==
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promocode {
    pub id: String,
    pub code: String,
    pub description: Option<String>,
    pub bonus_amount: f64,
    pub bonus_percent: Option<f64>,
    pub max_uses: Option<u64>,
    pub used_count: u64,
    pub is_active: bool,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// == Referral Link ==
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferralLink {
    pub id: String,
    pub code: String,
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub total_users: Option<u64>,
    pub total_deposits: Option<f64>,
    pub deposits_count: Option<u64>,
}

// == Case ==
/// A case as listed on the cases screen, with its reward lines when the
/// backend includes them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Case {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub is_locked: bool,
    pub unlock_level: Option<u32>,
    pub unlock_price: Option<f64>,
    pub total_openings: Option<u64>,
    pub revenue: Option<f64>,
    #[serde(default)]
    pub items: Option<Vec<CaseItem>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One reward line inside a case.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseItem {
    pub id: String,
    pub drop_chance: f64,
    pub item: CaseItemInfo,
}

/// Display fields of the item behind a reward line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseItemInfo {
    pub id: String,
    pub name: String,
    pub image_url: Option<String>,
    pub rarity: String,
    pub partners_nft_id: Option<String>,
    pub estimated_price: Option<f64>,
}

// == Gift ==
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gift {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: f64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// == Audit Log ==
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLog {
    pub id: String,
    pub admin_id: String,
    pub action: String,
    pub target: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

// == Statistics ==
/// Dashboard headline statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub users: UserCounts,
    pub finances: Finances,
    pub supplier_balance: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCounts {
    pub total: u64,
    pub today: u64,
    pub month: u64,
    pub paying_today: u64,
    pub paying_month: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finances {
    pub today: FinanceWindow,
    pub month: FinanceWindow,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinanceWindow {
    pub deposits: f64,
    pub withdrawals: f64,
    pub deposits_count: u64,
    pub withdrawals_count: u64,
}

/// One point of the deposits/withdrawals chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: String,
    pub deposits: f64,
    pub withdrawals: f64,
}

// == Partners Marketplace ==
/// An NFT as returned by the partners marketplace search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartnerNft {
    pub id: String,
    pub name: String,
    pub photo_url: String,
    pub collection_id: Option<String>,
    pub external_collection_number: Option<u64>,
    pub price: Option<String>,
    pub floor_price: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub attributes: Vec<NftAttribute>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NftAttribute {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
    pub rarity_per_mille: Option<f64>,
}

/// A marketplace collection with its floor price, folded out of the
/// attribute-floors listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Collection {
    pub id: String,
    pub name: String,
    pub floor_price: Option<String>,
}
