//! The token provider seam.

use async_trait::async_trait;

use stok_core::result::AppResult;

use crate::scopes::ScopeSet;
use crate::token::AccessToken;

/// Produces bearer tokens for requested permission scope sets.
///
/// Implemented by:
/// - [`crate::entra::DeviceCodeProvider`] — real Entra ID flow for production
/// - [`StaticTokenProvider`] — fixed token for tests
///
/// `acquire` must be silent: it reuses an existing session or fails with
/// an authentication error. It never prompts.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Acquire a bearer token authorizing the given scope set.
    async fn acquire(&self, scopes: &ScopeSet) -> AppResult<AccessToken>;
}

/// Token provider returning one fixed token for every scope set.
///
/// Test double; lets the reconciliation cycle run against an in-memory
/// client without any identity provider.
#[derive(Debug, Clone)]
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    /// Create a provider that always hands out `token`.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn acquire(&self, _scopes: &ScopeSet) -> AppResult<AccessToken> {
        Ok(AccessToken::new(self.token.clone()))
    }
}
