//! Interactive sign-in command.

use clap::Args;

use crate::commands::token_provider;
use crate::output;
use stok_auth::ScopeSet;
use stok_core::config::AppConfig;
use stok_core::error::AppError;

/// Scopes requested on interactive sign-in. Data screens acquire their
/// own tokens per scope set silently afterwards.
const LOGIN_SCOPES: [&str; 3] = ["User.Read", "Sites.Read.All", "Sites.ReadWrite.All"];

/// Arguments for the login command
#[derive(Debug, Args)]
pub struct LoginArgs {}

/// Execute the login command
pub async fn execute(_args: &LoginArgs, config: &AppConfig) -> Result<(), AppError> {
    let provider = token_provider(config);
    let scopes = ScopeSet::new(LOGIN_SCOPES);

    let challenge = provider.begin_sign_in(&scopes).await?;
    if challenge.message.is_empty() {
        println!(
            "To sign in, open {} and enter the code {}",
            challenge.verification_uri, challenge.user_code
        );
    } else {
        println!("{}", challenge.message);
    }

    provider.finish_sign_in(&scopes, &challenge).await?;
    match provider.account() {
        Some(account) => output::print_success(&format!("Signed in as {account}")),
        None => output::print_success("Signed in successfully"),
    }
    output::print_kv("Scopes", &scopes.cache_key());
    Ok(())
}
