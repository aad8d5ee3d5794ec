//! Remote API clients
//!
//! Thin typed clients over the two HTTP boundaries: the admin backend
//! (bearer-token authenticated) and the partners marketplace (its own
//! `partners` authorization scheme). Both return raw JSON documents so the
//! query cache can hold them uniformly; callers decode with [`decode`].

pub mod admin;
pub mod partners;

pub use admin::AdminApi;
pub use partners::PartnersApi;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{http_error, AdminError};

// == Response Plumbing ==
/// Turns a response into its JSON body, normalizing non-2xx statuses into
/// [`AdminError::Http`] through the shared error-body rules.
pub(crate) async fn into_json(response: reqwest::Response) -> Result<Value, AdminError> {
    if !response.status().is_success() {
        return Err(http_error(response).await);
    }
    response
        .json::<Value>()
        .await
        .map_err(|err| AdminError::Network(format!("invalid response body: {}", err)))
}

// == Decode Helper ==
/// Decodes a cached JSON document into its typed record.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, AdminError> {
    serde_json::from_value(value)
        .map_err(|err| AdminError::Network(format!("invalid response body: {}", err)))
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_success() {
        #[derive(serde::Deserialize)]
        struct Envelope {
            cases: Vec<String>,
        }

        let envelope: Envelope = decode(json!({"cases": ["a", "b"]})).unwrap();
        assert_eq!(envelope.cases, vec!["a", "b"]);
    }

    #[test]
    fn test_decode_shape_mismatch_is_network_error() {
        let result: Result<Vec<u32>, _> = decode(json!({"not": "a list"}));
        match result.unwrap_err() {
            AdminError::Network(msg) => assert!(msg.contains("invalid response body")),
            other => panic!("expected network error, got {:?}", other),
        }
    }
}
