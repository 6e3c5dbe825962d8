//! Shared test helpers for integration tests.

use std::sync::Arc;

use stok_auth::StaticTokenProvider;
use stok_graph::FakeClient;
use stok_graph::models::{ItemFields, PrepaidUnits, RawLicense, RawListItem};
use stok_inventory::{LicenseScreen, PeripheralScreen};

/// Test wiring: a fake remote store behind a fixed-token credential
/// provider, with screen constructors sharing both.
pub struct TestContext {
    /// The in-memory remote store.
    pub client: Arc<FakeClient>,
    tokens: Arc<StaticTokenProvider>,
}

impl TestContext {
    /// Create an empty context.
    pub fn new() -> Self {
        Self {
            client: Arc::new(FakeClient::new()),
            tokens: Arc::new(StaticTokenProvider::new("test-token")),
        }
    }

    /// A license screen wired to this context.
    pub fn license_screen(&self) -> LicenseScreen {
        LicenseScreen::new(self.tokens.clone(), self.client.clone())
    }

    /// A peripheral screen wired to this context.
    pub fn peripheral_screen(&self) -> PeripheralScreen {
        PeripheralScreen::new(self.tokens.clone(), self.client.clone())
    }
}

/// Build a raw subscribed SKU.
pub fn raw_license(sku: &str, enabled: i64, warning: i64, consumed: i64) -> RawLicense {
    RawLicense {
        sku_part_number: sku.to_string(),
        prepaid_units: PrepaidUnits { enabled, warning },
        consumed_units: consumed,
        applies_to: "User".to_string(),
        capability_status: "Enabled".to_string(),
    }
}

/// Build a raw list item.
pub fn raw_item(id: &str, nomor: i64, title: &str, quantity: i64, tipe: &str) -> RawListItem {
    RawListItem {
        id: id.to_string(),
        fields: ItemFields {
            nomor: Some(serde_json::json!(nomor)),
            title: Some(title.to_string()),
            quantity: Some(quantity),
            tipe: Some(tipe.to_string()),
        },
    }
}
