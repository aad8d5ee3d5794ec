//! Admin service facade
//!
//! Wires the query cache, the two API clients, the auth store and the toast
//! queue into the per-resource operations the screens consume. Reads go
//! through the cache with the resource's key; writes go through the cache's
//! mutation path with the matching descriptor, so the right listings are
//! refreshed afterwards. Failures surface as toasts; a rejected session
//! forces logout.

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::api::{decode, AdminApi, PartnersApi};
use crate::cache::{key, mutation, MutationDescriptor, QueryCache, QueryKey};
use crate::cases::CaseDraft;
use crate::config::Config;
use crate::error::AdminError;
use crate::models::entities::{AdminStats, Collection, Gift, PartnerNft, Promocode, ReferralLink, User};
use crate::models::requests::{
    BlockUserRequest, CreateCaseRequest, CreateGiftRequest, CreatePromocodeRequest,
    CreateReferralLinkRequest, NftSearchQuery, UpdateCaseRequest, UpdatePromocodeRequest,
    UpdateUserBalanceRequest, UserListQuery,
};
use crate::models::responses::{
    AdminLogsResponse, ApiResponse, CaseMutationResponse, CasesResponse, ChartResponse,
    DeleteEmptyCasesResponse, GiftsResponse, PromocodesResponse, ReferralLinksResponse,
    SearchNftsResponse, SuccessResponse, UserHistoryResponse, UsersResponse,
};
use crate::session::{AuthStore, ToastLevel, ToastQueue};

// == Admin Service ==
/// Process-wide service handle. Cheap to clone; all clones share the cache,
/// the auth store and the toast queue.
#[derive(Clone)]
pub struct AdminService {
    cache: QueryCache,
    admin: AdminApi,
    partners: PartnersApi,
    auth: Arc<AuthStore>,
    toasts: Arc<ToastQueue>,
}

impl AdminService {
    pub fn new(config: &Config) -> Self {
        let auth = Arc::new(AuthStore::load(&config.token_dir));
        Self {
            cache: QueryCache::new(),
            admin: AdminApi::new(config, Arc::clone(&auth)),
            partners: PartnersApi::new(config),
            auth,
            toasts: Arc::new(ToastQueue::new()),
        }
    }

    // == Shared State ==

    pub fn auth(&self) -> &Arc<AuthStore> {
        &self.auth
    }

    pub fn toasts(&self) -> &Arc<ToastQueue> {
        &self.toasts
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn login(&self, token: &str) {
        self.auth.login(token);
    }

    pub fn logout(&self) {
        self.auth.logout();
    }

    // == Plumbing ==

    /// Cached read: decode the document the cache serves. Read failures stay
    /// inline (the screen renders them where the list would be), but a
    /// rejected session still forces logout.
    async fn run_read<T, F, Fut>(&self, cache_key: QueryKey, fetcher: F) -> Result<T, AdminError>
    where
        T: DeserializeOwned,
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<Value, AdminError>> + Send + 'static,
    {
        match self.cache.read(cache_key, fetcher).await.and_then(decode) {
            Ok(typed) => Ok(typed),
            Err(err) => {
                self.note_failure(&err, false);
                Err(err)
            }
        }
    }

    /// Cached mutation: run the write, let the cache invalidate the
    /// descriptor's targets, toast the outcome.
    async fn run_mutation<T, F, Fut>(
        &self,
        descriptor: &MutationDescriptor,
        success_message: &str,
        op: F,
    ) -> Result<T, AdminError>
    where
        T: DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Value, AdminError>>,
    {
        match self.cache.mutate(descriptor, op).await.and_then(decode) {
            Ok(typed) => {
                self.toasts.push(ToastLevel::Success, success_message);
                Ok(typed)
            }
            Err(err) => {
                self.note_failure(&err, true);
                Err(err)
            }
        }
    }

    fn note_failure(&self, err: &AdminError, toast: bool) {
        if toast {
            let level = if err.is_local() {
                ToastLevel::Warning
            } else {
                ToastLevel::Error
            };
            self.toasts.push(level, err.to_string());
        }
        if err.is_unauthorized() {
            warn!("admin session rejected by the backend, logging out");
            self.auth.logout();
        }
    }

    /// Rejects a mutation input before any network call.
    fn reject_invalid(&self, message: Option<String>) -> Result<(), AdminError> {
        match message {
            Some(message) => {
                let err = AdminError::Validation(message);
                self.note_failure(&err, true);
                Err(err)
            }
            None => Ok(()),
        }
    }

    // == Statistics ==

    pub async fn stats(&self) -> Result<AdminStats, AdminError> {
        let api = self.admin.clone();
        self.run_read(key::admin_stats(), move || async move { api.stats().await })
            .await
    }

    pub async fn chart(&self, days: u32) -> Result<ChartResponse, AdminError> {
        let api = self.admin.clone();
        self.run_read(key::chart_data(days), move || async move {
            api.chart(days).await
        })
        .await
    }

    // == Cases ==

    pub async fn cases(&self) -> Result<CasesResponse, AdminError> {
        let api = self.admin.clone();
        self.run_read(key::admin_cases(), move || async move { api.cases().await })
            .await
    }

    /// Builds the request from the draft and submits it. Validation and
    /// reference failures never reach the network.
    pub async fn submit_case(
        &self,
        draft: &CaseDraft,
        source_items: &[PartnerNft],
    ) -> Result<CaseMutationResponse, AdminError> {
        let request = match draft.build_request(source_items) {
            Ok(request) => request,
            Err(err) => {
                self.note_failure(&err, true);
                return Err(err);
            }
        };
        self.create_case(&request).await
    }

    pub async fn create_case(
        &self,
        request: &CreateCaseRequest,
    ) -> Result<CaseMutationResponse, AdminError> {
        self.reject_invalid(request.validate())?;
        self.run_mutation(&mutation::CREATE_CASE, "Case created", || async {
            self.admin.create_case_with_nfts(request).await
        })
        .await
    }

    pub async fn update_case(
        &self,
        id: &str,
        request: &UpdateCaseRequest,
    ) -> Result<CaseMutationResponse, AdminError> {
        self.run_mutation(&mutation::UPDATE_CASE, "Case updated", || async {
            self.admin.update_case(id, request).await
        })
        .await
    }

    pub async fn delete_case(&self, id: &str) -> Result<SuccessResponse, AdminError> {
        self.run_mutation(&mutation::DELETE_CASE, "Case deleted", || async {
            self.admin.delete_case(id).await
        })
        .await
    }

    pub async fn delete_empty_cases(&self) -> Result<DeleteEmptyCasesResponse, AdminError> {
        let outcome = self
            .cache
            .mutate(&mutation::DELETE_EMPTY_CASES, || async {
                self.admin.delete_empty_cases().await
            })
            .await
            .and_then(decode::<DeleteEmptyCasesResponse>);
        match outcome {
            Ok(response) => {
                self.toasts.push(
                    ToastLevel::Success,
                    format!("Deleted {} empty cases", response.deleted_count),
                );
                Ok(response)
            }
            Err(err) => {
                self.note_failure(&err, true);
                Err(err)
            }
        }
    }

    // == Users ==

    pub async fn users(&self, query: &UserListQuery) -> Result<UsersResponse, AdminError> {
        let api = self.admin.clone();
        let owned = query.clone();
        self.run_read(key::admin_users(query), move || async move {
            api.users(&owned).await
        })
        .await
    }

    pub async fn update_user_balance(
        &self,
        user_id: &str,
        request: &UpdateUserBalanceRequest,
    ) -> Result<ApiResponse<User>, AdminError> {
        self.run_mutation(&mutation::UPDATE_USER_BALANCE, "Balance updated", || async {
            self.admin.update_user_balance(user_id, request).await
        })
        .await
    }

    pub async fn block_user(
        &self,
        user_id: &str,
        request: &BlockUserRequest,
    ) -> Result<ApiResponse<User>, AdminError> {
        let message = if request.blocked {
            "User blocked"
        } else {
            "User unblocked"
        };
        self.run_mutation(&mutation::BLOCK_USER, message, || async {
            self.admin.block_user(user_id, request).await
        })
        .await
    }

    pub async fn user_history(&self, user_id: &str) -> Result<UserHistoryResponse, AdminError> {
        let api = self.admin.clone();
        let owned = user_id.to_string();
        self.run_read(key::user_history(user_id), move || async move {
            api.user_history(&owned).await
        })
        .await
    }

    // == Promocodes ==

    pub async fn promocodes(&self) -> Result<PromocodesResponse, AdminError> {
        let api = self.admin.clone();
        self.run_read(key::admin_promocodes(), move || async move {
            api.promocodes().await
        })
        .await
    }

    pub async fn create_promocode(
        &self,
        request: &CreatePromocodeRequest,
    ) -> Result<ApiResponse<Promocode>, AdminError> {
        self.reject_invalid(request.validate())?;
        self.run_mutation(&mutation::CREATE_PROMOCODE, "Promocode created", || async {
            self.admin.create_promocode(request).await
        })
        .await
    }

    pub async fn update_promocode(
        &self,
        id: &str,
        request: &UpdatePromocodeRequest,
    ) -> Result<ApiResponse<Promocode>, AdminError> {
        self.run_mutation(&mutation::UPDATE_PROMOCODE, "Promocode updated", || async {
            self.admin.update_promocode(id, request).await
        })
        .await
    }

    pub async fn delete_promocode(&self, id: &str) -> Result<ApiResponse<Value>, AdminError> {
        self.run_mutation(&mutation::DELETE_PROMOCODE, "Promocode deleted", || async {
            self.admin.delete_promocode(id).await
        })
        .await
    }

    // == Referral Links ==

    pub async fn referral_links(&self) -> Result<ReferralLinksResponse, AdminError> {
        let api = self.admin.clone();
        self.run_read(key::referral_links(), move || async move {
            api.referral_links().await
        })
        .await
    }

    pub async fn create_referral_link(
        &self,
        request: &CreateReferralLinkRequest,
    ) -> Result<ApiResponse<ReferralLink>, AdminError> {
        self.reject_invalid(request.validate())?;
        self.run_mutation(
            &mutation::CREATE_REFERRAL_LINK,
            "Referral link created",
            || async { self.admin.create_referral_link(request).await },
        )
        .await
    }

    // == Gifts ==

    pub async fn gifts(&self) -> Result<GiftsResponse, AdminError> {
        let api = self.admin.clone();
        self.run_read(key::admin_gifts(), move || async move { api.gifts().await })
            .await
    }

    pub async fn create_gift(
        &self,
        request: &CreateGiftRequest,
    ) -> Result<ApiResponse<Gift>, AdminError> {
        self.reject_invalid(request.validate())?;
        self.run_mutation(&mutation::CREATE_GIFT, "Gift created", || async {
            self.admin.create_gift(request).await
        })
        .await
    }

    // == Audit Logs ==

    pub async fn logs(&self, page: u32, limit: u32) -> Result<AdminLogsResponse, AdminError> {
        let api = self.admin.clone();
        self.run_read(key::admin_logs(page, limit), move || async move {
            api.logs(page, limit).await
        })
        .await
    }

    // == Marketplace ==

    pub async fn available_nfts(
        &self,
        query: &NftSearchQuery,
    ) -> Result<SearchNftsResponse, AdminError> {
        let api = self.partners.clone();
        let owned = query.clone();
        self.run_read(key::available_nfts(query), move || async move {
            api.search_nfts(&owned).await
        })
        .await
    }

    /// Cached collection list. Upstream failures already degrade to an empty
    /// list inside the client, so this read cannot fail.
    pub async fn collections(&self) -> Vec<Collection> {
        let api = self.partners.clone();
        let outcome: Result<Vec<Collection>, AdminError> = self
            .run_read(key::collections_list(), move || async move {
                let collections = api.collections_list().await;
                serde_json::to_value(collections)
                    .map_err(|err| AdminError::Network(format!("invalid response body: {}", err)))
            })
            .await;
        outcome.unwrap_or_default()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ToastLevel;

    fn service() -> AdminService {
        let config = Config {
            // Nothing listens here; these tests must never reach the network.
            admin_api_url: "http://127.0.0.1:1".to_string(),
            token_dir: std::env::temp_dir(),
            ..Config::default()
        };
        AdminService::new(&config)
    }

    #[tokio::test]
    async fn test_invalid_case_request_is_rejected_before_network() {
        let svc = service();
        let request = CreateCaseRequest {
            name: "Case".to_string(),
            description: None,
            price: 2.0,
            image_url: None,
            is_active: Some(true),
            is_locked: None,
            unlock_level: None,
            unlock_price: None,
            nft_items: Vec::new(),
        };

        let err = svc.create_case(&request).await.unwrap_err();
        assert!(
            matches!(err, AdminError::Validation(_)),
            "a network attempt would produce AdminError::Network, got {:?}",
            err
        );

        let toasts = svc.toasts().drain();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].level, ToastLevel::Warning);
    }

    #[tokio::test]
    async fn test_vanished_reference_is_rejected_before_network() {
        let svc = service();
        let mut draft = CaseDraft::new();
        draft.name = "Case".to_string();
        draft.price = "2".to_string();
        draft.selection.toggle("ghost");
        draft.selection.set_chance("ghost", 100.0);

        let err = svc.submit_case(&draft, &[]).await.unwrap_err();
        assert_eq!(err, AdminError::Reference("ghost".to_string()));
        assert_eq!(svc.toasts().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_promocode_is_rejected_before_network() {
        let svc = service();
        let request = CreatePromocodeRequest {
            code: "  ".to_string(),
            description: None,
            bonus_amount: 5.0,
            bonus_percent: None,
            max_uses: None,
            expires_at: None,
        };

        let err = svc.create_promocode(&request).await.unwrap_err();
        assert!(matches!(err, AdminError::Validation(_)));
    }

    #[test]
    fn test_login_logout_roundtrip() {
        let svc = service();
        svc.login("token-123");
        assert!(svc.auth().is_authenticated());
        svc.logout();
        assert!(!svc.auth().is_authenticated());
    }
}
