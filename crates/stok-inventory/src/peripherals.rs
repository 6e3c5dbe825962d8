//! Peripheral inventory normalization, allocation, and derived views.

use serde::Serialize;
use validator::Validate;

use stok_core::error::AppError;
use stok_core::result::AppResult;
use stok_graph::models::RawListItem;

/// The fixed category label set. Unrecognized labels are still stored
/// and displayed, but render with the default style.
pub const CATEGORIES: [&str; 8] = [
    "Input Device",
    "Kabel",
    "Media Penyimpanan",
    "Audio",
    "Jaringan",
    "Operating System",
    "Hub/Expander",
    "Item",
];

/// Terminal color hint for a category label, with a default for
/// unrecognized values.
pub fn category_color(category: &str) -> &'static str {
    match category {
        "Input Device" => "blue",
        "Kabel" => "green",
        "Media Penyimpanan" => "magenta",
        "Audio" => "yellow",
        "Jaringan" => "red",
        "Operating System" => "cyan",
        "Hub/Expander" => "bright magenta",
        _ => "white",
    }
}

/// One row of the peripheral screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeripheralRecord {
    /// Opaque identifier assigned by the remote store.
    pub id: String,
    /// Human-facing ordinal, assigned on creation and immutable after.
    pub sequence_number: i64,
    /// Item name.
    pub title: String,
    /// Stock quantity.
    pub quantity: i64,
    /// Category label.
    pub category: String,
}

/// Normalize raw list items into display records, sorted ascending by
/// sequence number.
pub fn normalize(raw: Vec<RawListItem>) -> Vec<PeripheralRecord> {
    let mut records: Vec<PeripheralRecord> = raw
        .into_iter()
        .map(|item| PeripheralRecord {
            sequence_number: item.fields.sequence_number(),
            title: item.fields.title.unwrap_or_default(),
            quantity: item.fields.quantity.unwrap_or(0),
            category: item.fields.tipe.unwrap_or_default(),
            id: item.id,
        })
        .collect();
    records.sort_by_key(|r| r.sequence_number);
    records
}

/// Allocate the next sequence number from the loaded snapshot: the
/// maximum seen plus one, with missing/non-numeric values already read
/// as 0 during normalization. An empty snapshot yields 1.
///
/// The scan runs against the last successful fetch, not the remote
/// store, so two writers racing the same snapshot can allocate the same
/// number. Known, accepted weakness of the allocation scheme.
pub fn next_sequence_number(records: &[PeripheralRecord]) -> i64 {
    let last = records
        .iter()
        .fold(0, |max, r| if r.sequence_number > max { r.sequence_number } else { max });
    last + 1
}

/// User input for creating or updating a peripheral.
#[derive(Debug, Clone, Validate)]
pub struct PeripheralForm {
    /// Item name; required non-empty.
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: String,
    /// Stock quantity; must not be negative.
    #[validate(range(min = 0, message = "quantity must not be negative"))]
    pub quantity: i64,
    /// Category label.
    pub category: String,
}

impl PeripheralForm {
    /// Run the client-side form constraints, mapping failures into the
    /// validation error kind.
    pub fn check(&self) -> AppResult<()> {
        self.validate()
            .map_err(|e| AppError::validation(e.to_string()))
    }
}

/// Stock and category counts over the full loaded set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PeripheralStats {
    /// Number of items.
    pub total: usize,
    /// Items with quantity above zero.
    pub in_stock: usize,
    /// Items with zero quantity.
    pub out_of_stock: usize,
    /// Distinct category labels present.
    pub categories: usize,
}

/// Compute stock/category counts from the current rows.
pub fn stats(records: &[PeripheralRecord]) -> PeripheralStats {
    let distinct: std::collections::BTreeSet<&str> =
        records.iter().map(|r| r.category.as_str()).collect();
    PeripheralStats {
        total: records.len(),
        in_stock: records.iter().filter(|r| r.quantity > 0).count(),
        out_of_stock: records.iter().filter(|r| r.quantity == 0).count(),
        categories: distinct.len(),
    }
}

/// Case-insensitive substring filter over the displayed columns: title,
/// category, and sequence number.
pub fn filter<'a>(records: &'a [PeripheralRecord], query: &str) -> Vec<&'a PeripheralRecord> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|r| {
            r.title.to_lowercase().contains(&needle)
                || r.category.to_lowercase().contains(&needle)
                || r.sequence_number.to_string().contains(&needle)
        })
        .collect()
}
