//! Identity provider configuration.

use serde::{Deserialize, Serialize};

/// Entra ID application registration and token cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Directory (tenant) ID of the organization.
    #[serde(default)]
    pub tenant_id: String,
    /// Application (client) ID of the app registration.
    #[serde(default)]
    pub client_id: String,
    /// Authority base URL.
    #[serde(default = "default_authority")]
    pub authority: String,
    /// Path of the on-disk token cache file.
    #[serde(default = "default_token_cache_path")]
    pub token_cache_path: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            tenant_id: String::new(),
            client_id: String::new(),
            authority: default_authority(),
            token_cache_path: default_token_cache_path(),
        }
    }
}

fn default_authority() -> String {
    "https://login.microsoftonline.com".to_string()
}

fn default_token_cache_path() -> String {
    "data/tokens.json".to_string()
}
