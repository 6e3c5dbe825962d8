//! In-memory resource client for testing.
//!
//! Stores licenses and list items locally instead of calling Graph, so
//! the reconciliation cycle can run the same code path as production
//! with only the HTTP layer swapped. Failures are injectable per call,
//! and the delete response status can be overridden to exercise the
//! 204-only contract.

use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::RwLock;

use stok_auth::AccessToken;

use crate::client::ResourceClient;
use crate::error::{HttpError, ensure_no_content};
use crate::models::{
    CreateItemRequest, ItemFields, RawLicense, RawListItem, UpdateItemFields,
};

/// Fake Graph client holding its collections in memory.
#[derive(Debug, Default)]
pub struct FakeClient {
    licenses: RwLock<Vec<RawLicense>>,
    items: RwLock<Vec<RawListItem>>,
    /// Status + body returned by the next call instead of succeeding.
    fail_next: Mutex<Option<(u16, String)>>,
    /// Status + body every delete responds with, when set.
    delete_response: Mutex<Option<(u16, String)>>,
}

impl FakeClient {
    /// Create an empty fake client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the license collection.
    pub async fn set_licenses(&self, licenses: Vec<RawLicense>) {
        *self.licenses.write().await = licenses;
    }

    /// Replace the peripheral collection.
    pub async fn set_items(&self, items: Vec<RawListItem>) {
        *self.items.write().await = items;
    }

    /// All currently stored peripheral items.
    pub async fn items(&self) -> Vec<RawListItem> {
        self.items.read().await.clone()
    }

    /// Make the next operation fail with the given status and body.
    pub fn fail_next_with(&self, status: u16, body: impl Into<String>) {
        *self.fail_next.lock().expect("fail_next lock") = Some((status, body.into()));
    }

    /// Make every delete respond with the given status and body, letting
    /// tests exercise 200-with-body and 404 outcomes.
    pub fn delete_responds_with(&self, status: u16, body: impl Into<String>) {
        *self.delete_response.lock().expect("delete_response lock") =
            Some((status, body.into()));
    }

    fn take_failure(&self) -> Result<(), HttpError> {
        if let Some((status, body)) = self.fail_next.lock().expect("fail_next lock").take() {
            return Err(HttpError::Status { status, body });
        }
        Ok(())
    }
}

#[async_trait]
impl ResourceClient for FakeClient {
    async fn list_licenses(&self, _token: &AccessToken) -> Result<Vec<RawLicense>, HttpError> {
        self.take_failure()?;
        Ok(self.licenses.read().await.clone())
    }

    async fn list_peripherals(&self, _token: &AccessToken) -> Result<Vec<RawListItem>, HttpError> {
        self.take_failure()?;
        Ok(self.items.read().await.clone())
    }

    async fn create_peripheral(
        &self,
        _token: &AccessToken,
        payload: &CreateItemRequest,
    ) -> Result<RawListItem, HttpError> {
        self.take_failure()?;
        let item = RawListItem {
            id: uuid::Uuid::new_v4().to_string(),
            fields: ItemFields {
                nomor: Some(serde_json::json!(payload.fields.nomor)),
                title: Some(payload.fields.title.clone()),
                quantity: Some(payload.fields.quantity),
                tipe: Some(payload.fields.tipe.clone()),
            },
        };
        self.items.write().await.push(item.clone());
        Ok(item)
    }

    async fn update_peripheral(
        &self,
        _token: &AccessToken,
        id: &str,
        payload: &UpdateItemFields,
    ) -> Result<(), HttpError> {
        self.take_failure()?;
        let mut items = self.items.write().await;
        let item = items.iter_mut().find(|i| i.id == id).ok_or_else(|| {
            HttpError::Status {
                status: 404,
                body: format!("item {id} not found"),
            }
        })?;
        item.fields.title = Some(payload.title.clone());
        item.fields.quantity = Some(payload.quantity);
        item.fields.tipe = Some(payload.tipe.clone());
        Ok(())
    }

    async fn delete_peripheral(&self, _token: &AccessToken, id: &str) -> Result<(), HttpError> {
        self.take_failure()?;
        if let Some((status, body)) = self
            .delete_response
            .lock()
            .expect("delete_response lock")
            .clone()
        {
            // Only an exact 204 removes the item, matching the contract
            // that any other status leaves the store untouched.
            ensure_no_content(status, body)?;
        }
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|i| i.id != id);
        if items.len() == before {
            return Err(HttpError::Status {
                status: 404,
                body: format!("item {id} not found"),
            });
        }
        Ok(())
    }
}
