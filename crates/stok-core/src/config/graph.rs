//! Microsoft Graph endpoint configuration.

use serde::{Deserialize, Serialize};

/// Graph API base URL and the SharePoint list holding the peripheral
/// inventory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    /// Graph API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// SharePoint site identifier of the inventory site.
    #[serde(default)]
    pub site_id: String,
    /// List identifier of the peripheral inventory list.
    #[serde(default)]
    pub list_id: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            site_id: String::new(),
            list_id: String::new(),
        }
    }
}

fn default_base_url() -> String {
    "https://graph.microsoft.com/v1.0".to_string()
}
