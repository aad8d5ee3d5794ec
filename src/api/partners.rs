//! Partners marketplace client
//!
//! Read-only client for the third-party NFT marketplace the cases are
//! stocked from. Uses its own base URL and the `Authorization: partners
//! <token>` scheme rather than the admin bearer token.

use serde_json::Value;
use tracing::{debug, warn};

use crate::api::into_json;
use crate::config::Config;
use crate::error::AdminError;
use crate::models::entities::Collection;
use crate::models::requests::NftSearchQuery;

// == Partners Api ==
#[derive(Clone)]
pub struct PartnersApi {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl PartnersApi {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.partners_api_url.trim_end_matches('/').to_string(),
            token: config.partners_token.clone(),
        }
    }

    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, AdminError> {
        debug!(path, "partners GET");
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .header("Authorization", format!("partners {}", self.token))
            .query(query)
            .send()
            .await?;
        into_json(response).await
    }

    // == NFT Search ==
    /// Lists marketplace NFTs for the case composer, offset-paginated.
    pub async fn search_nfts(&self, query: &NftSearchQuery) -> Result<Value, AdminError> {
        self.get("/partners/nfts/search", &query.to_query_pairs())
            .await
    }

    // == Collections ==
    /// Fetches the attribute-floors listing and folds it into a deduplicated
    /// collection list. Failures degrade to an empty list: the collection
    /// filter is optional chrome, not a reason to block the cases screen.
    pub async fn collections_list(&self) -> Vec<Collection> {
        match self.get("/partners/collections/attribute-floors", &[]).await {
            Ok(floors) => fold_collections(&floors),
            Err(err) => {
                warn!(error = %err, "failed to fetch collections, serving none");
                Vec::new()
            }
        }
    }
}

// == Collection Folding ==
/// Collapses the per-model floor rows into one entry per collection name,
/// keeping the floor price of the last row seen for that name.
pub(crate) fn fold_collections(floors: &Value) -> Vec<Collection> {
    let models = match floors.get("models").and_then(Value::as_array) {
        Some(models) => models,
        None => return Vec::new(),
    };

    let mut seen: Vec<Collection> = Vec::new();
    for model in models {
        let name = match model.get("collection_name").and_then(Value::as_str) {
            Some(name) => name,
            None => continue,
        };
        let floor_price = model
            .get("floor_price")
            .and_then(Value::as_str)
            .map(str::to_string);

        match seen.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.floor_price = floor_price,
            None => seen.push(Collection {
                id: name.to_string(),
                name: name.to_string(),
                floor_price,
            }),
        }
    }
    seen
}
