//! Peripheral inventory CLI commands.

use clap::{Args, Subcommand};
use dialoguer::Confirm;
use serde::Serialize;
use tabled::Tabled;

use crate::commands::{list_client, print_account, token_provider};
use crate::output::{self, OutputFormat};
use stok_core::config::AppConfig;
use stok_core::error::AppError;
use stok_inventory::PeripheralScreen;
use stok_inventory::peripherals::{self, CATEGORIES, PeripheralForm, PeripheralRecord};

/// Arguments for peripheral commands
#[derive(Debug, Args)]
pub struct PeripheralsArgs {
    /// Peripheral subcommand
    #[command(subcommand)]
    pub command: PeripheralsCommand,
}

/// Peripheral subcommands
#[derive(Debug, Subcommand)]
pub enum PeripheralsCommand {
    /// List inventory items
    List {
        /// Case-insensitive substring filter over title, category, and number
        #[arg(short = 'F', long)]
        filter: Option<String>,
    },
    /// Add a new item; the item number is assigned automatically
    Add {
        /// Item name
        #[arg(long)]
        title: String,
        /// Stock quantity
        #[arg(long, default_value = "0")]
        quantity: i64,
        /// Category label
        #[arg(long, value_parser = parse_category)]
        category: String,
    },
    /// Edit an item's title, quantity, or category
    Edit {
        /// Remote item identifier
        id: String,
        /// New item name
        #[arg(long)]
        title: Option<String>,
        /// New stock quantity
        #[arg(long)]
        quantity: Option<i64>,
        /// New category label
        #[arg(long, value_parser = parse_category)]
        category: Option<String>,
    },
    /// Delete an item after confirmation
    Delete {
        /// Remote item identifier
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        force: bool,
    },
}

/// The fixed category set, enforced at input like the original form's
/// select control. Values already stored outside the set still display.
fn parse_category(value: &str) -> Result<String, String> {
    if CATEGORIES.contains(&value) {
        Ok(value.to_string())
    } else {
        Err(format!("unknown category; expected one of: {}", CATEGORIES.join(", ")))
    }
}

/// One rendered table row.
#[derive(Debug, Serialize, Tabled)]
struct PeripheralRow {
    #[tabled(rename = "No")]
    number: i64,
    #[tabled(rename = "Item Name")]
    title: String,
    #[tabled(rename = "Stock")]
    stock: i64,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Id")]
    id: String,
}

impl PeripheralRow {
    fn new(r: &PeripheralRecord, styled: bool) -> Self {
        let category = if r.category.is_empty() {
            "Uncategorized".to_string()
        } else if styled {
            category_style(&r.category).apply_to(&r.category).to_string()
        } else {
            r.category.clone()
        };
        Self {
            number: r.sequence_number,
            title: r.title.clone(),
            stock: r.quantity,
            category,
            id: r.id.clone(),
        }
    }
}

/// Map a category's display-style hint to a terminal style.
fn category_style(category: &str) -> console::Style {
    let style = console::Style::new();
    match peripherals::category_color(category) {
        "blue" => style.blue(),
        "green" => style.green(),
        "magenta" => style.magenta(),
        "yellow" => style.yellow(),
        "red" => style.red(),
        "cyan" => style.cyan(),
        "bright magenta" => style.magenta().bright(),
        _ => style.white(),
    }
}

fn print_view(screen: &PeripheralScreen, query: &str, format: OutputFormat) {
    let records = &screen.state().rows;
    let visible = peripherals::filter(records, query);
    // Style hints are table-only; JSON output stays plain.
    let styled = format == OutputFormat::Table;
    let rows: Vec<PeripheralRow> = visible
        .iter()
        .map(|r| PeripheralRow::new(r, styled))
        .collect();
    output::print_rows(&rows, "No data found. Try adding some items.", format);

    if format == OutputFormat::Table {
        let stats = peripherals::stats(records);
        output::print_kv("Total items", &stats.total.to_string());
        output::print_kv("In stock", &stats.in_stock.to_string());
        output::print_kv("Out of stock", &stats.out_of_stock.to_string());
        output::print_kv("Categories", &stats.categories.to_string());
    }
}

async fn refresh_or_surface(screen: &mut PeripheralScreen) -> Result<(), AppError> {
    if let Err(e) = screen.refresh().await {
        if let Some(msg) = &screen.state().error {
            output::print_error(msg);
        }
        return Err(e);
    }
    Ok(())
}

/// Execute peripheral commands
pub async fn execute(
    args: &PeripheralsArgs,
    config: &AppConfig,
    format: OutputFormat,
) -> Result<(), AppError> {
    let tokens = token_provider(config);
    print_account(&tokens, format);
    let mut screen = PeripheralScreen::new(tokens, list_client(config)?);

    match &args.command {
        PeripheralsCommand::List { filter } => {
            refresh_or_surface(&mut screen).await?;
            print_view(&screen, filter.as_deref().unwrap_or(""), format);
            Ok(())
        }
        PeripheralsCommand::Add {
            title,
            quantity,
            category,
        } => {
            // Load the snapshot first: the next item number is allocated
            // from the last successful fetch.
            refresh_or_surface(&mut screen).await?;
            let form = PeripheralForm {
                title: title.clone(),
                quantity: *quantity,
                category: category.clone(),
            };
            match screen.create(&form).await {
                Ok(number) => {
                    output::print_success(&format!("Item added with number {number}"));
                    print_view(&screen, "", format);
                    Ok(())
                }
                Err(e) => {
                    output::print_error(&format!("Failed to add item: {e}"));
                    Err(e)
                }
            }
        }
        PeripheralsCommand::Edit {
            id,
            title,
            quantity,
            category,
        } => {
            refresh_or_surface(&mut screen).await?;
            let current = screen
                .state()
                .rows
                .iter()
                .find(|r| &r.id == id)
                .cloned()
                .ok_or_else(|| AppError::validation(format!("no loaded item with id {id}")))?;
            let form = PeripheralForm {
                title: title.clone().unwrap_or(current.title),
                quantity: quantity.unwrap_or(current.quantity),
                category: category.clone().unwrap_or(current.category),
            };
            match screen.update(id, &form).await {
                Ok(()) => {
                    output::print_success("Item updated");
                    print_view(&screen, "", format);
                    Ok(())
                }
                Err(e) => {
                    output::print_error(&format!("Failed to update item: {e}"));
                    Err(e)
                }
            }
        }
        PeripheralsCommand::Delete { id, force } => {
            refresh_or_surface(&mut screen).await?;
            let title = screen
                .state()
                .rows
                .iter()
                .find(|r| &r.id == id)
                .map(|r| r.title.clone())
                .unwrap_or_else(|| id.clone());

            if !*force {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Delete item \"{title}\"?"))
                    .default(false)
                    .interact()
                    .map_err(|e| AppError::internal(format!("Prompt failed: {e}")))?;
                if !confirmed {
                    println!("Cancelled.");
                    return Ok(());
                }
            }

            match screen.delete(id).await {
                Ok(()) => {
                    output::print_success("Item deleted");
                    print_view(&screen, "", format);
                    Ok(())
                }
                Err(e) => {
                    output::print_error(&format!("Failed to delete item: {e}"));
                    Err(e)
                }
            }
        }
    }
}
