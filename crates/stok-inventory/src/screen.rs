//! The two data screens and their reconciliation cycles.
//!
//! A screen owns its view state and the token-acquisition path for its
//! scope set. Fetch: acquire token → call client → normalize → replace
//! rows wholesale. Mutations are one-shot calls that trigger a full
//! refetch on success and leave the snapshot untouched on failure so the
//! user can retry.

use std::sync::Arc;

use tracing::info;

use stok_auth::{ScopeSet, TokenProvider};
use stok_core::result::AppResult;
use stok_graph::client::ResourceClient;
use stok_graph::models::{CreateItemRequest, NewItemFields, UpdateItemFields};
use stok_graph::scopes;

use crate::licenses::{self, LicenseRecord};
use crate::peripherals::{self, PeripheralForm, PeripheralRecord};
use crate::state::{ViewAction, ViewState, reduce};

/// The read-only license screen.
pub struct LicenseScreen {
    tokens: Arc<dyn TokenProvider>,
    client: Arc<dyn ResourceClient>,
    scopes: ScopeSet,
    state: ViewState<LicenseRecord>,
}

impl LicenseScreen {
    /// Create the screen with its credential and client seams.
    pub fn new(tokens: Arc<dyn TokenProvider>, client: Arc<dyn ResourceClient>) -> Self {
        Self {
            tokens,
            client,
            scopes: ScopeSet::new([scopes::DIRECTORY_READ_ALL]),
            state: ViewState::default(),
        }
    }

    /// The current view snapshot.
    pub fn state(&self) -> &ViewState<LicenseRecord> {
        &self.state
    }

    /// Run one fetch cycle. On failure the previous rows stay in place
    /// and the prefixed error message is recorded on the state.
    pub async fn refresh(&mut self) -> AppResult<()> {
        reduce(&mut self.state, ViewAction::FetchStarted);
        match self.load().await {
            Ok(rows) => {
                reduce(&mut self.state, ViewAction::FetchSucceeded(rows));
                Ok(())
            }
            Err(e) => {
                reduce(
                    &mut self.state,
                    ViewAction::FetchFailed(format!("Failed to load licenses: {e}")),
                );
                Err(e)
            }
        }
    }

    async fn load(&self) -> AppResult<Vec<LicenseRecord>> {
        let token = self.tokens.acquire(&self.scopes).await?;
        let raw = self.client.list_licenses(&token).await?;
        Ok(licenses::normalize(raw))
    }
}

/// The mutable peripheral screen.
pub struct PeripheralScreen {
    tokens: Arc<dyn TokenProvider>,
    client: Arc<dyn ResourceClient>,
    scopes: ScopeSet,
    state: ViewState<PeripheralRecord>,
}

impl PeripheralScreen {
    /// Create the screen with its credential and client seams.
    pub fn new(tokens: Arc<dyn TokenProvider>, client: Arc<dyn ResourceClient>) -> Self {
        Self {
            tokens,
            client,
            scopes: ScopeSet::new([scopes::SITES_READWRITE_ALL]),
            state: ViewState::default(),
        }
    }

    /// The current view snapshot.
    pub fn state(&self) -> &ViewState<PeripheralRecord> {
        &self.state
    }

    /// Run one fetch cycle. On failure the previous rows stay in place
    /// and the prefixed error message is recorded on the state.
    pub async fn refresh(&mut self) -> AppResult<()> {
        reduce(&mut self.state, ViewAction::FetchStarted);
        match self.load().await {
            Ok(rows) => {
                reduce(&mut self.state, ViewAction::FetchSucceeded(rows));
                Ok(())
            }
            Err(e) => {
                reduce(
                    &mut self.state,
                    ViewAction::FetchFailed(format!("Failed to load peripherals: {e}")),
                );
                Err(e)
            }
        }
    }

    async fn load(&self) -> AppResult<Vec<PeripheralRecord>> {
        let token = self.tokens.acquire(&self.scopes).await?;
        let raw = self.client.list_peripherals(&token).await?;
        Ok(peripherals::normalize(raw))
    }

    /// Create an item, allocating the next sequence number from the
    /// loaded snapshot, then refetch. Returns the assigned number.
    ///
    /// On failure nothing local changes; the caller may resubmit the
    /// same form.
    pub async fn create(&mut self, form: &PeripheralForm) -> AppResult<i64> {
        form.check()?;
        let sequence_number = peripherals::next_sequence_number(&self.state.rows);
        let payload = CreateItemRequest {
            fields: NewItemFields {
                nomor: sequence_number,
                title: form.title.clone(),
                quantity: form.quantity,
                tipe: form.category.clone(),
            },
        };
        let token = self.tokens.acquire(&self.scopes).await?;
        self.client.create_peripheral(&token, &payload).await?;
        info!("Created peripheral #{sequence_number} \"{}\"", form.title);
        self.refresh().await?;
        Ok(sequence_number)
    }

    /// Update an item's title, quantity, and category in place, then
    /// refetch. The sequence number is never touched.
    pub async fn update(&mut self, id: &str, form: &PeripheralForm) -> AppResult<()> {
        form.check()?;
        let payload = UpdateItemFields {
            title: form.title.clone(),
            quantity: form.quantity,
            tipe: form.category.clone(),
        };
        let token = self.tokens.acquire(&self.scopes).await?;
        self.client.update_peripheral(&token, id, &payload).await?;
        info!("Updated peripheral {id}");
        self.refresh().await?;
        Ok(())
    }

    /// Delete an item, then refetch. Only an exact 204 from the store
    /// counts as success; any other status surfaces an error and the
    /// item stays in view.
    pub async fn delete(&mut self, id: &str) -> AppResult<()> {
        let token = self.tokens.acquire(&self.scopes).await?;
        self.client.delete_peripheral(&token, id).await?;
        info!("Deleted peripheral {id}");
        self.refresh().await?;
        Ok(())
    }
}
