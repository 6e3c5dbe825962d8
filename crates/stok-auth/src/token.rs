//! Access tokens and the per-scope-set token cache.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A bearer token authorizing calls for one scope set.
#[derive(Debug, Clone)]
pub struct AccessToken {
    secret: String,
}

impl AccessToken {
    /// Wrap a raw bearer token string.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// The raw token value, for the `Authorization: Bearer` header.
    pub fn as_str(&self) -> &str {
        &self.secret
    }
}

/// A cached token entry for one scope set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CachedToken {
    /// The bearer token itself.
    pub access_token: String,
    /// Refresh token for silent re-acquisition, when the provider issued one.
    pub refresh_token: Option<String>,
    /// Display name of the signed-in account, taken from the identity
    /// token's claims.
    #[serde(default)]
    pub account: Option<String>,
    /// Absolute expiry instant of the access token.
    pub expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// Whether the access token is still usable, with a safety skew so a
    /// token about to expire mid-request is not handed out.
    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(EXPIRY_SKEW_SECONDS) > now
    }
}

const EXPIRY_SKEW_SECONDS: i64 = 60;

/// In-process token cache keyed by scope set, with a JSON file snapshot.
///
/// The file is the console analogue of the identity provider's own
/// session cache in the browser; nothing else is persisted. Read and
/// write failures are non-fatal: a missing or unreadable file just means
/// an empty cache, and a failed write is logged and ignored.
#[derive(Debug)]
pub struct TokenCache {
    entries: DashMap<String, CachedToken>,
    path: Option<PathBuf>,
}

impl TokenCache {
    /// Create an in-memory-only cache.
    pub fn in_memory() -> Self {
        Self {
            entries: DashMap::new(),
            path: None,
        }
    }

    /// Load the cache from a JSON file, starting empty if the file is
    /// missing or malformed.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = DashMap::new();
        match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, CachedToken>>(&raw) {
                Ok(stored) => {
                    for (key, entry) in stored {
                        entries.insert(key, entry);
                    }
                }
                Err(e) => warn!("Token cache at {} is malformed, ignoring: {e}", path.display()),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No token cache at {}", path.display());
            }
            Err(e) => warn!("Failed to read token cache {}: {e}", path.display()),
        }
        Self {
            entries,
            path: Some(path),
        }
    }

    /// Return a still-fresh access token for the scope-set key, if any.
    pub fn fresh(&self, key: &str) -> Option<AccessToken> {
        let entry = self.entries.get(key)?;
        if entry.is_fresh(Utc::now()) {
            Some(AccessToken::new(entry.access_token.clone()))
        } else {
            None
        }
    }

    /// Return the refresh token stored for the scope-set key, fresh or not.
    pub fn refresh_token(&self, key: &str) -> Option<String> {
        self.entries.get(key)?.refresh_token.clone()
    }

    /// Return any stored refresh token, regardless of scope set.
    ///
    /// A refresh token issued to this client can be redeemed for a new
    /// access token under a different scope set, so one interactive
    /// sign-in can seed every screen. Access tokens themselves are never
    /// shared across scope sets.
    pub fn any_refresh_token(&self) -> Option<String> {
        self.entries
            .iter()
            .find_map(|e| e.value().refresh_token.clone())
    }

    /// Display name of whichever account is signed in, if any entry
    /// recorded one.
    pub fn any_account(&self) -> Option<String> {
        self.entries.iter().find_map(|e| e.value().account.clone())
    }

    /// Store an entry for the scope-set key and snapshot the cache to disk.
    pub fn insert(&self, key: impl Into<String>, entry: CachedToken) {
        self.entries.insert(key.into(), entry);
        self.persist();
    }

    /// Drop the entry for the scope-set key, if present.
    pub fn remove(&self, key: &str) {
        self.entries.remove(key);
        self.persist();
    }

    fn persist(&self) {
        let Some(path) = &self.path else {
            return;
        };
        let snapshot: HashMap<String, CachedToken> = self
            .entries
            .iter()
            .map(|e| (e.key().clone(), e.value().clone()))
            .collect();
        let write = || -> std::io::Result<()> {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let raw = serde_json::to_string_pretty(&snapshot)
                .map_err(|e| std::io::Error::other(e.to_string()))?;
            std::fs::write(path, raw)
        };
        if let Err(e) = write() {
            warn!("Failed to write token cache {}: {e}", path.display());
        }
    }
}
