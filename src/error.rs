//! Error types for the admin service core
//!
//! Provides unified error handling using thiserror, plus the normalization
//! of remote-call failures into single human-readable messages.

use thiserror::Error;

// == Admin Error Enum ==
/// Unified error type for the admin service core.
///
/// Every remote-call failure is normalized into one of these variants with a
/// single human-readable message. `Clone` is derived so the last error can be
/// retained inside a cache entry and re-surfaced to later readers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdminError {
    /// The request never produced a usable response (DNS, connect, decode)
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-2xx status
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Client-side validation rejected the input before any network call
    #[error("validation failed: {0}")]
    Validation(String),

    /// A submission references an item that is no longer in the known list
    #[error("unknown reward item: {0}")]
    Reference(String),
}

impl AdminError {
    // == Session Expiry ==
    /// True for responses that indicate the admin session is no longer valid.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, AdminError::Http { status: 401 | 403, .. })
    }

    // == Local Check ==
    /// True for errors raised before any network call was made.
    pub fn is_local(&self) -> bool {
        matches!(self, AdminError::Validation(_) | AdminError::Reference(_))
    }
}

impl From<reqwest::Error> for AdminError {
    fn from(err: reqwest::Error) -> Self {
        AdminError::Network(err.to_string())
    }
}

// == Response Normalization ==
/// Converts a non-2xx HTTP response into an [`AdminError::Http`].
///
/// The JSON body field `error` is preferred when present; otherwise the
/// message falls back to `"<status> - <canonical reason>"`.
pub async fn http_error(response: reqwest::Response) -> AdminError {
    let status = response.status();
    let reason = status.canonical_reason().unwrap_or("Unknown Error");
    let fallback = format!("{} - {}", status.as_u16(), reason);

    let message = match response.json::<serde_json::Value>().await {
        Ok(body) => body
            .get("error")
            .and_then(|e| e.as_str())
            .map(str::to_string)
            .unwrap_or(fallback),
        Err(_) => fallback,
    };

    AdminError::Http {
        status: status.as_u16(),
        message,
    }
}

// == Result Type Alias ==
/// Convenience Result type for the admin service core.
pub type Result<T> = std::result::Result<T, AdminError>;
