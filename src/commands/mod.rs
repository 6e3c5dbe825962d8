//! CLI command definitions and dispatch.

pub mod config;
pub mod licenses;
pub mod login;
pub mod peripherals;

use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use stok_auth::DeviceCodeProvider;
use stok_core::config::AppConfig;
use stok_core::error::AppError;
use stok_graph::GraphClient;

/// Stok — Microsoft 365 tenant inventory console
#[derive(Debug, Parser)]
#[command(name = "stok", version, about, long_about = None)]
pub struct Cli {
    /// Path to an explicit configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in interactively with a Microsoft account
    Login(login::LoginArgs),
    /// License inventory (read-only)
    Licenses(licenses::LicensesArgs),
    /// Peripheral inventory management
    Peripherals(peripherals::PeripheralsArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Load configuration: an explicit `--config` file, or the merged
    /// `config/default.toml` + `config/$STOK_ENV.toml` + environment
    /// variables.
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        match &self.config {
            Some(path) => AppConfig::load_file(path),
            None => {
                let env =
                    std::env::var("STOK_ENV").unwrap_or_else(|_| "development".to_string());
                AppConfig::load(&env)
            }
        }
    }

    /// Execute the CLI command
    pub async fn execute(&self, config: &AppConfig) -> Result<(), AppError> {
        match &self.command {
            Commands::Login(args) => login::execute(args, config).await,
            Commands::Licenses(args) => licenses::execute(args, config, self.format).await,
            Commands::Peripherals(args) => peripherals::execute(args, config, self.format).await,
            Commands::Config(args) => config::execute(args, config),
        }
    }
}

/// Helper: the shared credential provider.
pub fn token_provider(config: &AppConfig) -> Arc<DeviceCodeProvider> {
    Arc::new(DeviceCodeProvider::new(config.auth.clone()))
}

/// Print the signed-in account above data tables, when a session exists.
pub fn print_account(tokens: &DeviceCodeProvider, format: OutputFormat) {
    if format == OutputFormat::Table {
        if let Some(account) = tokens.account() {
            println!("Signed in as {account}");
        }
    }
}

/// Helper: the Graph client for license reads.
pub fn graph_client(config: &AppConfig) -> Arc<GraphClient> {
    Arc::new(GraphClient::new(&config.graph))
}

/// Helper: the Graph client for peripheral list access, requiring the
/// site and list identifiers to be configured.
pub fn list_client(config: &AppConfig) -> Result<Arc<GraphClient>, AppError> {
    if config.graph.site_id.is_empty() || config.graph.list_id.is_empty() {
        return Err(AppError::configuration(
            "graph.site_id and graph.list_id must be configured for peripheral commands",
        ));
    }
    Ok(Arc::new(GraphClient::new(&config.graph)))
}
