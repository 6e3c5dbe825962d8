//! Configuration CLI commands.

use clap::{Args, Subcommand};

use crate::output;
use stok_core::config::AppConfig;
use stok_core::error::AppError;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the merged effective configuration
    Show,
}

/// Execute config commands
pub fn execute(args: &ConfigArgs, config: &AppConfig) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            println!("{}", serde_json::to_string_pretty(config)?);
            if config.auth.tenant_id.is_empty() || config.auth.client_id.is_empty() {
                output::print_error(
                    "auth.tenant_id and auth.client_id are not set; sign-in will fail",
                );
            }
            Ok(())
        }
    }
}
