//! Admin backend client
//!
//! One method per endpoint of the admin backend. The bearer token is read
//! from the auth store on every request; requests without a token simply go
//! out unauthenticated and fail through the normal error path. Methods
//! return raw JSON documents for the query cache.

use std::sync::Arc;

use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::api::into_json;
use crate::config::Config;
use crate::error::AdminError;
use crate::models::requests::{
    BlockUserRequest, CreateCaseRequest, CreateGiftRequest, CreatePromocodeRequest,
    CreateReferralLinkRequest, UpdateCaseRequest, UpdatePromocodeRequest,
    UpdateUserBalanceRequest, UserListQuery,
};
use crate::session::AuthStore;

// == Admin Api ==
#[derive(Clone)]
pub struct AdminApi {
    client: reqwest::Client,
    base_url: String,
    auth: Arc<AuthStore>,
}

impl AdminApi {
    pub fn new(config: &Config, auth: Arc<AuthStore>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.admin_api_url.trim_end_matches('/').to_string(),
            auth,
        }
    }

    // == Request Plumbing ==

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.auth.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get(&self, path: &str) -> Result<Value, AdminError> {
        debug!(path, "admin GET");
        let response = self.authorized(self.client.get(self.url(path))).send().await?;
        into_json(response).await
    }

    async fn get_with_query(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Value, AdminError> {
        debug!(path, "admin GET");
        let response = self
            .authorized(self.client.get(self.url(path)).query(query))
            .send()
            .await?;
        into_json(response).await
    }

    async fn post<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, AdminError> {
        debug!(path, "admin POST");
        let response = self
            .authorized(self.client.post(self.url(path)).json(body))
            .send()
            .await?;
        into_json(response).await
    }

    async fn put<B: Serialize>(&self, path: &str, body: &B) -> Result<Value, AdminError> {
        debug!(path, "admin PUT");
        let response = self
            .authorized(self.client.put(self.url(path)).json(body))
            .send()
            .await?;
        into_json(response).await
    }

    async fn delete(&self, path: &str) -> Result<Value, AdminError> {
        debug!(path, "admin DELETE");
        let response = self
            .authorized(self.client.delete(self.url(path)))
            .send()
            .await?;
        into_json(response).await
    }

    // == Statistics ==

    pub async fn stats(&self) -> Result<Value, AdminError> {
        self.get("/admin/stats").await
    }

    pub async fn chart(&self, days: u32) -> Result<Value, AdminError> {
        self.get_with_query(
            "/admin/stats/chart",
            &[("days".to_string(), days.to_string())],
        )
        .await
    }

    // == Cases ==

    pub async fn cases(&self) -> Result<Value, AdminError> {
        self.get("/cases").await
    }

    pub async fn create_case_with_nfts(
        &self,
        request: &CreateCaseRequest,
    ) -> Result<Value, AdminError> {
        self.post("/public-admin/cases/with-nfts", request).await
    }

    pub async fn update_case(
        &self,
        id: &str,
        request: &UpdateCaseRequest,
    ) -> Result<Value, AdminError> {
        self.put(&format!("/admin/cases/{}", id), request).await
    }

    /// Deletes a case, trying the public-admin route first and falling back
    /// to the admin route when it refuses.
    pub async fn delete_case(&self, id: &str) -> Result<Value, AdminError> {
        match self.delete(&format!("/public-admin/cases/{}", id)).await {
            Ok(value) => Ok(value),
            Err(_) => self.delete(&format!("/admin/cases/{}", id)).await,
        }
    }

    pub async fn delete_empty_cases(&self) -> Result<Value, AdminError> {
        self.delete("/public-admin/cases/empty").await
    }

    // == Users ==

    pub async fn users(&self, query: &UserListQuery) -> Result<Value, AdminError> {
        self.get_with_query("/admin/users", &query.to_query_pairs())
            .await
    }

    pub async fn update_user_balance(
        &self,
        user_id: &str,
        request: &UpdateUserBalanceRequest,
    ) -> Result<Value, AdminError> {
        self.post(&format!("/admin/users/{}/balance", user_id), request)
            .await
    }

    pub async fn block_user(
        &self,
        user_id: &str,
        request: &BlockUserRequest,
    ) -> Result<Value, AdminError> {
        self.post(&format!("/admin/users/{}/block", user_id), request)
            .await
    }

    pub async fn user_history(&self, user_id: &str) -> Result<Value, AdminError> {
        self.get(&format!("/admin/users/{}/history", user_id)).await
    }

    // == Promocodes ==

    pub async fn promocodes(&self) -> Result<Value, AdminError> {
        self.get("/admin/promocodes").await
    }

    pub async fn create_promocode(
        &self,
        request: &CreatePromocodeRequest,
    ) -> Result<Value, AdminError> {
        self.post("/admin/promocodes", request).await
    }

    pub async fn update_promocode(
        &self,
        id: &str,
        request: &UpdatePromocodeRequest,
    ) -> Result<Value, AdminError> {
        self.put(&format!("/admin/promocodes/{}", id), request).await
    }

    pub async fn delete_promocode(&self, id: &str) -> Result<Value, AdminError> {
        self.delete(&format!("/admin/promocodes/{}", id)).await
    }

    // == Referral Links ==

    pub async fn referral_links(&self) -> Result<Value, AdminError> {
        self.get("/admin/referral-links").await
    }

    pub async fn create_referral_link(
        &self,
        request: &CreateReferralLinkRequest,
    ) -> Result<Value, AdminError> {
        self.post("/admin/referral-links", request).await
    }

    // == Gifts ==

    pub async fn gifts(&self) -> Result<Value, AdminError> {
        self.get("/admin/gifts").await
    }

    pub async fn create_gift(&self, request: &CreateGiftRequest) -> Result<Value, AdminError> {
        self.post("/admin/gifts", request).await
    }

    // == Audit Logs ==

    pub async fn logs(&self, page: u32, limit: u32) -> Result<Value, AdminError> {
        self.get_with_query(
            "/admin/logs",
            &[
                ("page".to_string(), page.to_string()),
                ("limit".to_string(), limit.to_string()),
            ],
        )
        .await
    }

    // == Image Upload ==
    /// Uploads an image for the given asset kind (`"case"`, `"gift"`, ...).
    /// The upload route takes the multipart form as-is, without the bearer
    /// header, matching the backend's public upload endpoint.
    pub async fn upload_image(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        kind: &str,
    ) -> Result<Value, AdminError> {
        debug!(filename, kind, "admin image upload");
        let form = Form::new()
            .part("image", Part::bytes(bytes).file_name(filename.to_string()))
            .text("type", kind.to_string());
        let response = self
            .client
            .post(self.url("/public-admin/upload-image"))
            .multipart(form)
            .send()
            .await?;
        into_json(response).await
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    fn api_for(base: &str) -> AdminApi {
        let config = Config {
            admin_api_url: base.to_string(),
            ..Config::default()
        };
        let auth = Arc::new(AuthStore::load(std::env::temp_dir()));
        AdminApi::new(&config, auth)
    }

    #[test]
    fn test_trailing_slash_is_normalized() {
        let api = api_for("http://localhost:8080/");
        assert_eq!(api.url("/admin/stats"), "http://localhost:8080/admin/stats");
    }

    #[test]
    fn test_url_joins_paths() {
        let api = api_for("http://backend:9000");
        assert_eq!(
            api.url("/public-admin/cases/with-nfts"),
            "http://backend:9000/public-admin/cases/with-nfts"
        );
    }
}
