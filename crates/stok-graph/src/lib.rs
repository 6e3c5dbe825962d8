//! # stok-graph
//!
//! Thin typed client for the two Microsoft Graph collections the console
//! reads and writes: the tenant's `subscribedSkus` directory collection
//! (read-only) and a SharePoint list holding the peripheral inventory
//! (full CRUD).
//!
//! Every operation takes a bearer token, makes exactly one attempt, and
//! surfaces failures as [`error::HttpError`] carrying the status code and
//! raw response body. No retry, no backoff, no client-imposed timeout.

pub mod client;
pub mod error;
pub mod fake;
pub mod models;

pub use client::{GraphClient, ResourceClient};
pub use error::HttpError;
pub use fake::FakeClient;

/// Permission scopes gating the two collections.
pub mod scopes {
    /// Scope required to read the license inventory.
    pub const DIRECTORY_READ_ALL: &str = "Directory.Read.All";
    /// Scope required to read and mutate the peripheral list.
    pub const SITES_READWRITE_ALL: &str = "Sites.ReadWrite.All";
}
