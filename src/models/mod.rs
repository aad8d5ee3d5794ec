//! Wire records for the admin backend and the partners marketplace
//!
//! This module defines the DTOs (Data Transfer Objects) exchanged with both
//! remote APIs: the platform entities, the tagged request records per
//! mutation, and the response envelopes the listing endpoints return.

pub mod entities;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use entities::{
    AdminLog, AdminStats, Case, CaseItem, ChartPoint, Collection, Gift, PartnerNft, Promocode,
    Rarity, ReferralLink, Transaction, User,
};
pub use requests::{
    BlockUserRequest, CaseRewardItem, CreateCaseRequest, CreateGiftRequest,
    CreatePromocodeRequest, CreateReferralLinkRequest, NftSearchQuery, UpdateCaseRequest,
    UpdatePromocodeRequest, UpdateUserBalanceRequest, UserListQuery, UserStatusFilter,
};
pub use responses::{
    AdminLogsResponse, ApiResponse, CaseMutationResponse, CasesResponse, ChartResponse,
    DeleteEmptyCasesResponse, GiftsResponse, Pagination, PromocodesResponse,
    ReferralLinksResponse, SearchNftsResponse, SuccessResponse, UploadImageResponse,
    UserHistoryResponse, UsersResponse,
};
