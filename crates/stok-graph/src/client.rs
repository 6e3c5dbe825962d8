//! The resource client trait and its reqwest-backed implementation.

use async_trait::async_trait;
use tracing::debug;

use stok_auth::AccessToken;
use stok_core::config::graph::GraphConfig;

use crate::error::{HttpError, ensure_no_content};
use crate::models::{
    CreateItemRequest, ListResponse, RawLicense, RawListItem, UpdateItemFields,
};

/// The five remote operations the console performs.
///
/// Implemented by:
/// - [`GraphClient`] — real HTTP client for production
/// - [`crate::fake::FakeClient`] — in-memory client for testing
///
/// Each call takes the bearer token for the screen's scope set and makes
/// a single attempt.
#[async_trait]
pub trait ResourceClient: Send + Sync {
    /// Fetch the tenant's subscribed SKUs.
    async fn list_licenses(&self, token: &AccessToken) -> Result<Vec<RawLicense>, HttpError>;

    /// Fetch all peripheral list items with fields expanded.
    async fn list_peripherals(&self, token: &AccessToken) -> Result<Vec<RawListItem>, HttpError>;

    /// Create a peripheral list item; returns the stored item.
    async fn create_peripheral(
        &self,
        token: &AccessToken,
        payload: &CreateItemRequest,
    ) -> Result<RawListItem, HttpError>;

    /// Update an item's mutable fields in place.
    async fn update_peripheral(
        &self,
        token: &AccessToken,
        id: &str,
        payload: &UpdateItemFields,
    ) -> Result<(), HttpError>;

    /// Delete an item. Succeeds only on an exact 204 No Content.
    async fn delete_peripheral(&self, token: &AccessToken, id: &str) -> Result<(), HttpError>;
}

/// Microsoft Graph client over reqwest.
#[derive(Debug, Clone)]
pub struct GraphClient {
    http: reqwest::Client,
    base_url: String,
    site_id: String,
    list_id: String,
}

impl GraphClient {
    /// Create a client from the Graph endpoint configuration.
    pub fn new(config: &GraphConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            site_id: config.site_id.clone(),
            list_id: config.list_id.clone(),
        }
    }

    fn licenses_url(&self) -> String {
        format!("{}/subscribedSkus", self.base_url)
    }

    fn items_url(&self) -> String {
        format!(
            "{}/sites/{}/lists/{}/items",
            self.base_url, self.site_id, self.list_id
        )
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{}", self.items_url(), id)
    }

    fn item_fields_url(&self, id: &str) -> String {
        format!("{}/fields", self.item_url(id))
    }

    async fn expect_success(response: reqwest::Response) -> Result<reqwest::Response, HttpError> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(HttpError::Status {
                status: status.as_u16(),
                body,
            })
        }
    }
}

#[async_trait]
impl ResourceClient for GraphClient {
    async fn list_licenses(&self, token: &AccessToken) -> Result<Vec<RawLicense>, HttpError> {
        debug!("GET {}", self.licenses_url());
        let response = self
            .http
            .get(self.licenses_url())
            .bearer_auth(token.as_str())
            .send()
            .await?;
        let parsed: ListResponse<RawLicense> =
            Self::expect_success(response).await?.json().await?;
        Ok(parsed.value)
    }

    async fn list_peripherals(&self, token: &AccessToken) -> Result<Vec<RawListItem>, HttpError> {
        let url = format!("{}?expand=fields", self.items_url());
        debug!("GET {url}");
        let response = self
            .http
            .get(url)
            .bearer_auth(token.as_str())
            .send()
            .await?;
        let parsed: ListResponse<RawListItem> =
            Self::expect_success(response).await?.json().await?;
        Ok(parsed.value)
    }

    async fn create_peripheral(
        &self,
        token: &AccessToken,
        payload: &CreateItemRequest,
    ) -> Result<RawListItem, HttpError> {
        debug!("POST {}", self.items_url());
        let response = self
            .http
            .post(self.items_url())
            .bearer_auth(token.as_str())
            .json(payload)
            .send()
            .await?;
        Ok(Self::expect_success(response).await?.json().await?)
    }

    async fn update_peripheral(
        &self,
        token: &AccessToken,
        id: &str,
        payload: &UpdateItemFields,
    ) -> Result<(), HttpError> {
        let url = self.item_fields_url(id);
        debug!("PATCH {url}");
        let response = self
            .http
            .patch(url)
            .bearer_auth(token.as_str())
            .json(payload)
            .send()
            .await?;
        Self::expect_success(response).await?;
        Ok(())
    }

    async fn delete_peripheral(&self, token: &AccessToken, id: &str) -> Result<(), HttpError> {
        let url = self.item_url(id);
        debug!("DELETE {url}");
        let response = self
            .http
            .delete(url)
            .bearer_auth(token.as_str())
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        ensure_no_content(status, body)
    }
}
