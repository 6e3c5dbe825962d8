//! License inventory CLI commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use crate::commands::{graph_client, print_account, token_provider};
use crate::output::{self, OutputFormat};
use stok_core::config::AppConfig;
use stok_core::error::AppError;
use stok_inventory::LicenseScreen;
use stok_inventory::licenses::{self, LicenseRecord};

/// Arguments for license commands
#[derive(Debug, Args)]
pub struct LicensesArgs {
    /// License subcommand
    #[command(subcommand)]
    pub command: LicensesCommand,
}

/// License subcommands
#[derive(Debug, Subcommand)]
pub enum LicensesCommand {
    /// List subscribed SKUs with unit counts
    List {
        /// Case-insensitive substring filter over all columns
        #[arg(short = 'F', long)]
        filter: Option<String>,
    },
}

/// One rendered table row.
#[derive(Debug, Serialize, Tabled)]
struct LicenseRow {
    #[tabled(rename = "License Name")]
    name: String,
    #[tabled(rename = "Total")]
    total: i64,
    #[tabled(rename = "Assigned")]
    assigned: i64,
    #[tabled(rename = "Available")]
    available: i64,
    #[tabled(rename = "Warning")]
    warning: i64,
    #[tabled(rename = "Type")]
    scope_type: String,
    #[tabled(rename = "Status")]
    status: String,
}

impl From<&LicenseRecord> for LicenseRow {
    fn from(r: &LicenseRecord) -> Self {
        Self {
            name: r.display_name.clone(),
            total: r.total_units,
            assigned: r.consumed_units,
            available: r.available_units,
            warning: r.warning_units,
            scope_type: r.scope_type.clone(),
            status: r.status.clone(),
        }
    }
}

/// Execute license commands
pub async fn execute(
    args: &LicensesArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        LicensesCommand::List { filter } => {
            let tokens = token_provider(config);
            print_account(&tokens, format);
            let mut screen = LicenseScreen::new(tokens, graph_client(config));
            if let Err(e) = screen.refresh().await {
                if let Some(msg) = &screen.state().error {
                    output::print_error(msg);
                }
                return Err(e);
            }

            let records = &screen.state().rows;
            let query = filter.as_deref().unwrap_or("");
            let visible = licenses::filter(records, query);
            let rows: Vec<LicenseRow> = visible.iter().map(|r| LicenseRow::from(*r)).collect();
            output::print_rows(&rows, "No license data yet.", format);

            if format == OutputFormat::Table {
                // Aggregates always cover the full loaded set, not the
                // filtered subset.
                let sums = licenses::totals(records);
                output::print_kv("Total licenses", &sums.total.to_string());
                output::print_kv("Assigned", &sums.consumed.to_string());
                output::print_kv("Available", &sums.available.to_string());
                println!("Showing {} of {} licenses", visible.len(), records.len());
            }
            Ok(())
        }
    }
}
