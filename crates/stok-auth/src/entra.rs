//! Entra ID device-code flow provider.
//!
//! Speaks the OAuth 2.0 device authorization grant against the v2.0
//! endpoints: `POST …/oauth2/v2.0/devicecode` to start an interactive
//! challenge, then `POST …/oauth2/v2.0/token` to poll for completion,
//! to redeem refresh tokens, and (implicitly, via the cache) to reuse
//! still-valid access tokens.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::Deserialize;
use tracing::{debug, info};

use stok_core::config::auth::AuthConfig;
use stok_core::error::AppError;
use stok_core::result::AppResult;

use crate::provider::TokenProvider;
use crate::scopes::ScopeSet;
use crate::token::{AccessToken, CachedToken, TokenCache};

/// Extra scopes requested on every interactive sign-in so the provider
/// issues refresh tokens and a usable identity.
const BASE_SCOPES: &str = "openid profile offline_access";

/// An interactive device-code challenge awaiting user completion.
///
/// The caller renders `message` (or `verification_uri` + `user_code`)
/// and then polls with [`DeviceCodeProvider::finish_sign_in`].
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceCodeChallenge {
    /// Opaque code used when polling the token endpoint.
    pub device_code: String,
    /// Short code the user types at the verification page.
    pub user_code: String,
    /// URL the user opens to complete sign-in.
    pub verification_uri: String,
    /// Seconds until the challenge expires.
    pub expires_in: u64,
    /// Minimum polling interval in seconds.
    #[serde(default = "default_interval")]
    pub interval: u64,
    /// Ready-made instruction text from the provider.
    #[serde(default)]
    pub message: String,
}

fn default_interval() -> u64 {
    5
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    id_token: Option<String>,
    expires_in: i64,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    #[serde(default)]
    error: String,
    #[serde(default)]
    error_description: String,
}

/// Credential provider backed by the Entra ID device-code flow.
///
/// Silent acquisition order: fresh cached token for the exact scope set,
/// then a refresh-token grant, then failure. Interactive sign-in is a
/// separate, explicit operation; data screens never trigger it.
pub struct DeviceCodeProvider {
    http: reqwest::Client,
    config: AuthConfig,
    cache: TokenCache,
}

impl std::fmt::Debug for DeviceCodeProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeviceCodeProvider")
            .field("tenant_id", &self.config.tenant_id)
            .field("client_id", &self.config.client_id)
            .finish()
    }
}

impl DeviceCodeProvider {
    /// Create a provider from configuration, loading the on-disk token
    /// cache.
    pub fn new(config: AuthConfig) -> Self {
        let cache = TokenCache::load(&config.token_cache_path);
        Self {
            http: reqwest::Client::new(),
            config,
            cache,
        }
    }

    /// Create a provider with an in-memory cache only.
    pub fn ephemeral(config: AuthConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            cache: TokenCache::in_memory(),
        }
    }

    fn ensure_configured(&self) -> AppResult<()> {
        if self.config.tenant_id.is_empty() || self.config.client_id.is_empty() {
            return Err(AppError::authentication(
                "identity provider is not configured: set auth.tenant_id and auth.client_id",
            ));
        }
        Ok(())
    }

    fn token_endpoint(&self) -> String {
        format!(
            "{}/{}/oauth2/v2.0/token",
            self.config.authority.trim_end_matches('/'),
            self.config.tenant_id
        )
    }

    fn device_code_endpoint(&self) -> String {
        format!(
            "{}/{}/oauth2/v2.0/devicecode",
            self.config.authority.trim_end_matches('/'),
            self.config.tenant_id
        )
    }

    fn full_scope_value(scopes: &ScopeSet) -> String {
        format!("{} {BASE_SCOPES}", scopes.request_value())
    }

    fn store(&self, scopes: &ScopeSet, response: TokenResponse) -> AccessToken {
        let token = AccessToken::new(response.access_token.clone());
        self.cache.insert(
            scopes.cache_key(),
            CachedToken {
                access_token: response.access_token,
                refresh_token: response.refresh_token,
                account: response.id_token.as_deref().and_then(account_name),
                expires_at: Utc::now() + chrono::Duration::seconds(response.expires_in),
            },
        );
        token
    }

    /// Display name of the signed-in account, if a session exists.
    pub fn account(&self) -> Option<String> {
        self.cache.any_account()
    }

    /// Begin an interactive device-code sign-in for the scope set.
    pub async fn begin_sign_in(&self, scopes: &ScopeSet) -> AppResult<DeviceCodeChallenge> {
        self.ensure_configured()?;
        let response = self
            .http
            .post(self.device_code_endpoint())
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("scope", Self::full_scope_value(scopes).as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    stok_core::error::ErrorKind::Authentication,
                    format!("Device code request failed: {e}"),
                    e,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::authentication(format!(
                "Device code request rejected (HTTP {}): {body}",
                status.as_u16()
            )));
        }
        response.json::<DeviceCodeChallenge>().await.map_err(|e| {
            AppError::with_source(
                stok_core::error::ErrorKind::Authentication,
                format!("Malformed device code response: {e}"),
                e,
            )
        })
    }

    /// Poll the token endpoint until the challenge completes, then cache
    /// and return the resulting token.
    pub async fn finish_sign_in(
        &self,
        scopes: &ScopeSet,
        challenge: &DeviceCodeChallenge,
    ) -> AppResult<AccessToken> {
        let mut interval = challenge.interval.max(1);
        loop {
            tokio::time::sleep(Duration::from_secs(interval)).await;
            match self
                .request_token(&[
                    ("client_id", self.config.client_id.as_str()),
                    ("grant_type", "urn:ietf:params:oauth:grant-type:device_code"),
                    ("device_code", challenge.device_code.as_str()),
                ])
                .await?
            {
                PollOutcome::Token(response) => {
                    info!("Interactive sign-in completed for scopes [{scopes}]");
                    return Ok(self.store(scopes, response));
                }
                PollOutcome::Pending => {
                    debug!("Sign-in pending, polling again in {interval}s");
                }
                PollOutcome::SlowDown => {
                    interval += 5;
                    debug!("Provider asked to slow down, new interval {interval}s");
                }
                PollOutcome::Denied(reason) => {
                    return Err(AppError::authentication(format!(
                        "Sign-in was not completed: {reason}"
                    )));
                }
            }
        }
    }

    async fn refresh(&self, scopes: &ScopeSet, refresh_token: &str) -> AppResult<AccessToken> {
        match self
            .request_token(&[
                ("client_id", self.config.client_id.as_str()),
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
                ("scope", Self::full_scope_value(scopes).as_str()),
            ])
            .await?
        {
            PollOutcome::Token(response) => {
                debug!("Refreshed token for scopes [{scopes}]");
                Ok(self.store(scopes, response))
            }
            PollOutcome::Pending | PollOutcome::SlowDown => Err(AppError::authentication(
                "Unexpected pending response to a refresh-token grant",
            )),
            PollOutcome::Denied(reason) => {
                // The stored session is no longer redeemable.
                self.cache.remove(&scopes.cache_key());
                Err(AppError::authentication(format!(
                    "Silent acquisition was rejected by the provider: {reason}"
                )))
            }
        }
    }

    async fn request_token(&self, form: &[(&str, &str)]) -> AppResult<PollOutcome> {
        let response = self
            .http
            .post(self.token_endpoint())
            .form(form)
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    stok_core::error::ErrorKind::Authentication,
                    format!("Token request failed: {e}"),
                    e,
                )
            })?;

        if response.status().is_success() {
            let parsed = response.json::<TokenResponse>().await.map_err(|e| {
                AppError::with_source(
                    stok_core::error::ErrorKind::Authentication,
                    format!("Malformed token response: {e}"),
                    e,
                )
            })?;
            return Ok(PollOutcome::Token(parsed));
        }

        let body = response.text().await.unwrap_or_default();
        let parsed: TokenErrorResponse = serde_json::from_str(&body).unwrap_or_else(|_| {
            TokenErrorResponse {
                error: "invalid_response".to_string(),
                error_description: body.clone(),
            }
        });
        Ok(match parsed.error.as_str() {
            "authorization_pending" => PollOutcome::Pending,
            "slow_down" => PollOutcome::SlowDown,
            _ => PollOutcome::Denied(if parsed.error_description.is_empty() {
                parsed.error
            } else {
                parsed.error_description
            }),
        })
    }
}

enum PollOutcome {
    Token(TokenResponse),
    Pending,
    SlowDown,
    Denied(String),
}

/// Read the account's display name out of an identity token.
///
/// The token signature is not verified: the value came straight from the
/// token endpoint over TLS and is used for display only, never for
/// authorization.
fn account_name(id_token: &str) -> Option<String> {
    use base64::Engine;

    let payload = id_token.split('.').nth(1)?;
    let raw = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(payload)
        .ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&raw).ok()?;
    ["name", "preferred_username"]
        .iter()
        .find_map(|claim| claims.get(claim).and_then(|v| v.as_str()))
        .map(str::to_string)
}


#[async_trait]
impl TokenProvider for DeviceCodeProvider {
    async fn acquire(&self, scopes: &ScopeSet) -> AppResult<AccessToken> {
        self.ensure_configured()?;
        let key = scopes.cache_key();

        if let Some(token) = self.cache.fresh(&key) {
            debug!("Reusing cached token for scopes [{scopes}]");
            return Ok(token);
        }

        if let Some(refresh_token) = self
            .cache
            .refresh_token(&key)
            .or_else(|| self.cache.any_refresh_token())
        {
            return self.refresh(scopes, &refresh_token).await;
        }

        Err(AppError::authentication(format!(
            "No signed-in session for scopes [{scopes}]; run `stok login` first"
        )))
    }
}
