//! # stok-auth
//!
//! Credential provider for the Stok tenant console.
//!
//! Wraps the Entra ID OAuth 2.0 device-code flow behind a
//! [`TokenProvider`] trait. Acquisition is silent first: an unexpired
//! cached token for the exact scope set is reused, then a refresh-token
//! grant is attempted, and only an explicit interactive sign-in
//! (`stok login`) establishes a new session. Tokens are cached per
//! scope set; a token for one scope set is never reused for another.

pub mod entra;
pub mod provider;
pub mod scopes;
pub mod token;

pub use entra::DeviceCodeProvider;
pub use provider::{StaticTokenProvider, TokenProvider};
pub use scopes::ScopeSet;
pub use token::AccessToken;
