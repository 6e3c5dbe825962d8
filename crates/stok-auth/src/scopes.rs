//! Permission scope sets.

use std::collections::BTreeSet;
use std::fmt;

/// An ordered set of permission scopes requested from the identity
/// provider.
///
/// Scope sets are the cache key for token acquisition: each distinct set
/// gets its own cached token, and a token acquired for one set is never
/// handed out for a different one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScopeSet(BTreeSet<String>);

impl ScopeSet {
    /// Create a scope set from any iterable of scope strings.
    pub fn new<I, S>(scopes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(scopes.into_iter().map(Into::into).collect())
    }

    /// Stable cache key: scopes sorted and joined with a single space.
    pub fn cache_key(&self) -> String {
        self.0.iter().cloned().collect::<Vec<_>>().join(" ")
    }

    /// The `scope` parameter value sent on token requests.
    pub fn request_value(&self) -> String {
        self.cache_key()
    }

    /// Whether the set contains no scopes.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ScopeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.cache_key())
    }
}
