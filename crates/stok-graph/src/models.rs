//! Raw wire shapes for the two Graph collections.
//!
//! These mirror the service's JSON exactly; normalization into display
//! records happens in `stok-inventory`.

use serde::{Deserialize, Serialize};

/// Graph collection envelope: `{ "value": [ … ] }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse<T> {
    /// The collection items.
    #[serde(default = "Vec::new")]
    pub value: Vec<T>,
}

/// One entry of the `subscribedSkus` collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLicense {
    /// Stable SKU identifier, e.g. `ENTERPRISEPACK`.
    #[serde(default)]
    pub sku_part_number: String,
    /// Purchased unit counts.
    #[serde(default)]
    pub prepaid_units: PrepaidUnits,
    /// Units currently assigned to users.
    #[serde(default)]
    pub consumed_units: i64,
    /// What the SKU applies to (`User`, `Company`, …).
    #[serde(default)]
    pub applies_to: String,
    /// Source-defined capability status (`Enabled`, `Suspended`, …).
    #[serde(default)]
    pub capability_status: String,
}

/// The `prepaidUnits` sub-object of a subscribed SKU.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PrepaidUnits {
    /// Units available for assignment.
    #[serde(default)]
    pub enabled: i64,
    /// Units in the warning state.
    #[serde(default)]
    pub warning: i64,
}

/// One SharePoint list item, with its `fields` sub-object expanded.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawListItem {
    /// Opaque item identifier assigned by the remote store.
    #[serde(default)]
    pub id: String,
    /// The list columns.
    #[serde(default)]
    pub fields: ItemFields,
}

/// Columns of the peripheral inventory list.
///
/// `Nomor` is kept as a raw JSON value: the column should hold a number,
/// but the store does not enforce it, and the allocation scan treats
/// anything non-numeric as 0.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ItemFields {
    /// Application-assigned sequence number.
    #[serde(default)]
    pub nomor: Option<serde_json::Value>,
    /// Item name.
    #[serde(default)]
    pub title: Option<String>,
    /// Stock quantity.
    #[serde(default)]
    pub quantity: Option<i64>,
    /// Category label.
    #[serde(default)]
    pub tipe: Option<String>,
}

impl ItemFields {
    /// The sequence number, with missing or non-numeric values read as 0.
    pub fn sequence_number(&self) -> i64 {
        match &self.nomor {
            Some(serde_json::Value::Number(n)) => {
                n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)).unwrap_or(0)
            }
            Some(serde_json::Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }
}

/// Fields sent when creating a list item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NewItemFields {
    /// Sequence number allocated from the loaded snapshot.
    pub nomor: i64,
    /// Item name.
    pub title: String,
    /// Stock quantity.
    pub quantity: i64,
    /// Category label.
    pub tipe: String,
}

/// Create payload: `{ "fields": { … } }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItemRequest {
    /// The new item's columns.
    pub fields: NewItemFields,
}

/// Fields sent when updating an item in place.
///
/// The sequence number is immutable after creation and is never part of
/// an update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateItemFields {
    /// Item name.
    pub title: String,
    /// Stock quantity.
    pub quantity: i64,
    /// Category label.
    pub tipe: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_license_deserializes_from_graph_shape() {
        let raw: RawLicense = serde_json::from_str(
            r#"{
                "skuPartNumber": "ENTERPRISEPACK",
                "prepaidUnits": { "enabled": 120, "warning": 3, "suspended": 0 },
                "consumedUnits": 110,
                "appliesTo": "User",
                "capabilityStatus": "Enabled"
            }"#,
        )
        .expect("deserialize");
        assert_eq!(raw.sku_part_number, "ENTERPRISEPACK");
        assert_eq!(raw.prepaid_units.enabled, 120);
        assert_eq!(raw.prepaid_units.warning, 3);
        assert_eq!(raw.consumed_units, 110);
    }

    #[test]
    fn test_list_item_deserializes_with_expanded_fields() {
        let raw: RawListItem = serde_json::from_str(
            r#"{
                "id": "42",
                "fields": { "Nomor": 7, "Title": "Mouse", "Quantity": 3, "Tipe": "Input Device" }
            }"#,
        )
        .expect("deserialize");
        assert_eq!(raw.id, "42");
        assert_eq!(raw.fields.sequence_number(), 7);
        assert_eq!(raw.fields.title.as_deref(), Some("Mouse"));
    }

    #[test]
    fn test_sequence_number_handles_missing_and_non_numeric() {
        let missing = ItemFields::default();
        assert_eq!(missing.sequence_number(), 0);

        let textual = ItemFields {
            nomor: Some(serde_json::Value::String("12".to_string())),
            ..Default::default()
        };
        assert_eq!(textual.sequence_number(), 12);

        let garbage = ItemFields {
            nomor: Some(serde_json::Value::String("abc".to_string())),
            ..Default::default()
        };
        assert_eq!(garbage.sequence_number(), 0);

        let fractional = ItemFields {
            nomor: Some(serde_json::json!(4.0)),
            ..Default::default()
        };
        assert_eq!(fractional.sequence_number(), 4);
    }

    #[test]
    fn test_create_payload_uses_sharepoint_column_names() {
        let payload = CreateItemRequest {
            fields: NewItemFields {
                nomor: 6,
                title: "HDMI Cable".to_string(),
                quantity: 4,
                tipe: "Kabel".to_string(),
            },
        };
        let json = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(json["fields"]["Nomor"], 6);
        assert_eq!(json["fields"]["Title"], "HDMI Cable");
        assert_eq!(json["fields"]["Quantity"], 4);
        assert_eq!(json["fields"]["Tipe"], "Kabel");
    }
}
