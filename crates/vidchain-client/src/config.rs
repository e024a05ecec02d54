//! Client configuration loaded from environment variables.
//!
//! Everything except the canister id has a default, so pointing the client
//! at mainnet only needs `VIDCHAIN_CANISTER_ID`.

use std::time::Duration;

use vidchain_shared::constants::{DEFAULT_GATEWAY_URL, DEFAULT_REQUEST_TIMEOUT_SECS};

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the canister gateway.
    /// Env: `VIDCHAIN_GATEWAY_URL`
    /// Default: `https://ic0.app`
    pub gateway_url: String,

    /// Textual principal of the backend canister.
    /// Env: `VIDCHAIN_CANISTER_ID`
    /// Default: none.
    pub canister_id: Option<String>,

    /// Bearer token issued by the identity provider for the signed-in user.
    /// Env: `VIDCHAIN_IDENTITY_TOKEN`
    /// Default: none (anonymous calls).
    pub identity_token: Option<String>,

    /// Per-request timeout enforced by the HTTP binding.
    /// Env: `VIDCHAIN_REQUEST_TIMEOUT_SECS` (`0` disables it)
    /// Default: 120 seconds.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            canister_id: None,
            identity_token: None,
            request_timeout: Some(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS)),
        }
    }
}

impl ClientConfig {
    /// Load configuration from the process environment, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(url) = lookup("VIDCHAIN_GATEWAY_URL") {
            match gateway_url(&url) {
                Some(url) => config.gateway_url = url,
                None => {
                    tracing::warn!(value = %url, "Invalid VIDCHAIN_GATEWAY_URL, using default");
                }
            }
        }

        if let Some(id) = lookup("VIDCHAIN_CANISTER_ID") {
            if !id.trim().is_empty() {
                config.canister_id = Some(id.trim().to_string());
            }
        }

        if let Some(token) = lookup("VIDCHAIN_IDENTITY_TOKEN") {
            if !token.is_empty() {
                config.identity_token = Some(token);
            }
        }

        if let Some(val) = lookup("VIDCHAIN_REQUEST_TIMEOUT_SECS") {
            match val.trim().parse::<u64>() {
                Ok(0) => config.request_timeout = None,
                Ok(secs) => config.request_timeout = Some(Duration::from_secs(secs)),
                Err(_) => {
                    tracing::warn!(value = %val, "Invalid VIDCHAIN_REQUEST_TIMEOUT_SECS, using default");
                }
            }
        }

        config
    }
}

/// Normalize a gateway base URL, or `None` if it is not http(s).
pub fn gateway_url(raw: &str) -> Option<String> {
    let url = raw.trim().trim_end_matches('/');
    (url.starts_with("http://") || url.starts_with("https://")).then(|| url.to_string())
}
