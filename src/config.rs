//! Configuration Module
//!
//! Handles loading and managing service configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Service configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the admin backend
    pub admin_api_url: String,
    /// Base URL of the partners marketplace API
    pub partners_api_url: String,
    /// Bearer token for the partners marketplace API
    pub partners_token: String,
    /// Directory holding the persisted admin session token
    pub token_dir: PathBuf,
    /// Background cache sweep interval in seconds
    pub sweep_interval: u64,
    /// Idle window in seconds after which unused cache entries may be evicted
    pub gc_window: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `ADMIN_API_URL` - Admin backend base URL (default: http://localhost:8080)
    /// - `PARTNERS_API_URL` - Partners marketplace base URL (default: https://portals-market.com)
    /// - `PARTNERS_TOKEN` - Partners marketplace token (default: empty)
    /// - `TOKEN_DIR` - Directory for the persisted session token (default: ".")
    /// - `SWEEP_INTERVAL` - Cache sweep frequency in seconds (default: 60)
    /// - `GC_WINDOW` - Idle eviction window in seconds (default: 300)
    pub fn from_env() -> Self {
        Self {
            admin_api_url: env::var("ADMIN_API_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            partners_api_url: env::var("PARTNERS_API_URL")
                .unwrap_or_else(|_| "https://portals-market.com".to_string()),
            partners_token: env::var("PARTNERS_TOKEN").unwrap_or_default(),
            token_dir: env::var("TOKEN_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            sweep_interval: env::var("SWEEP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(60),
            gc_window: env::var("GC_WINDOW")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(300),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            admin_api_url: "http://localhost:8080".to_string(),
            partners_api_url: "https://portals-market.com".to_string(),
            partners_token: String::new(),
            token_dir: PathBuf::from("."),
            sweep_interval: 60,
            gc_window: 300,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.admin_api_url, "http://localhost:8080");
        assert_eq!(config.partners_api_url, "https://portals-market.com");
        assert_eq!(config.partners_token, "");
        assert_eq!(config.token_dir, PathBuf::from("."));
        assert_eq!(config.sweep_interval, 60);
        assert_eq!(config.gc_window, 300);
    }

    #[test]
    fn test_config_from_env_defaults() {
        // Clear any existing env vars to test defaults
        env::remove_var("ADMIN_API_URL");
        env::remove_var("PARTNERS_API_URL");
        env::remove_var("PARTNERS_TOKEN");
        env::remove_var("TOKEN_DIR");
        env::remove_var("SWEEP_INTERVAL");
        env::remove_var("GC_WINDOW");

        let config = Config::from_env();
        assert_eq!(config.admin_api_url, "http://localhost:8080");
        assert_eq!(config.sweep_interval, 60);
        assert_eq!(config.gc_window, 300);
    }
}
