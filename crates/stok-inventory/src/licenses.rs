//! License inventory normalization and derived views.

use serde::Serialize;

use stok_graph::models::RawLicense;

/// SKU excluded from the derived view entirely.
const EXCLUDED_SKU: &str = "WINDOWS_STORE";

/// One row of the license screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LicenseRecord {
    /// Stable SKU identifier from the directory service.
    pub sku_identifier: String,
    /// Resolved product name.
    pub display_name: String,
    /// Purchased units.
    pub total_units: i64,
    /// Units assigned to users.
    pub consumed_units: i64,
    /// Units in the warning state.
    pub warning_units: i64,
    /// Derived: total minus consumed. May be negative when the source
    /// over-reports consumption; never clamped, never stored.
    pub available_units: i64,
    /// What the SKU applies to.
    pub scope_type: String,
    /// Source-defined status.
    pub status: String,
}

/// Static product-name lookup for known SKUs.
fn product_name(sku: &str) -> Option<&'static str> {
    Some(match sku {
        "POWER_BI_PRO" => "Power BI Pro",
        "WINDOWS_STORE" => "Windows Store",
        "ENTERPRISEPACK" => "Office 365 E3",
        "FLOW_FREE" => "Power Automate Free",
        "CCIBOTS_PRIVPREV_VIRAL" => "Copilot Studio Viral Trial",
        "POWER_BI_STANDARD" => "Power BI Standard",
        "Power_Pages_vTrial_for_Makers" => "Power Pages vTrial for Makers",
        "STANDARDPACK" => "Office 365 E1",
        "EMSPREMIUM" => "Microsoft 365 E5",
        "O365_BUSINESS_PREMIUM" => "Microsoft 365 Business Premium",
        "PROJECTPROFESSIONAL" => "Project Professional",
        "VISIOCLIENT" => "Visio Professional",
        _ => return None,
    })
}

/// Resolve a display name: lookup table first, otherwise the identifier
/// humanized by replacing underscores with spaces.
pub fn display_name(sku: &str) -> String {
    product_name(sku)
        .map(str::to_string)
        .unwrap_or_else(|| sku.replace('_', " "))
}

/// Normalize raw subscribed SKUs into display records.
///
/// Excludes the `WINDOWS_STORE` SKU and entries with an empty identifier;
/// recomputes `available_units` from the two source fields.
pub fn normalize(raw: Vec<RawLicense>) -> Vec<LicenseRecord> {
    raw.into_iter()
        .filter(|d| !d.sku_part_number.is_empty() && d.sku_part_number != EXCLUDED_SKU)
        .map(|d| LicenseRecord {
            display_name: display_name(&d.sku_part_number),
            total_units: d.prepaid_units.enabled,
            consumed_units: d.consumed_units,
            warning_units: d.prepaid_units.warning,
            available_units: d.prepaid_units.enabled - d.consumed_units,
            scope_type: d.applies_to,
            status: d.capability_status,
            sku_identifier: d.sku_part_number,
        })
        .collect()
}

/// Aggregate sums over the full loaded set (never the filtered subset).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LicenseTotals {
    /// Sum of purchased units.
    pub total: i64,
    /// Sum of consumed units.
    pub consumed: i64,
    /// Sum of available units.
    pub available: i64,
}

/// Compute aggregate sums from the current rows.
pub fn totals(records: &[LicenseRecord]) -> LicenseTotals {
    LicenseTotals {
        total: records.iter().map(|r| r.total_units).sum(),
        consumed: records.iter().map(|r| r.consumed_units).sum(),
        available: records.iter().map(|r| r.available_units).sum(),
    }
}

/// Case-insensitive substring filter over all displayed columns.
pub fn filter<'a>(records: &'a [LicenseRecord], query: &str) -> Vec<&'a LicenseRecord> {
    let needle = query.to_lowercase();
    records
        .iter()
        .filter(|r| {
            [
                r.display_name.clone(),
                r.total_units.to_string(),
                r.consumed_units.to_string(),
                r.available_units.to_string(),
                r.warning_units.to_string(),
                r.scope_type.clone(),
                r.status.clone(),
            ]
            .iter()
            .any(|col| col.to_lowercase().contains(&needle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stok_graph::models::PrepaidUnits;

    fn raw(sku: &str, enabled: i64, consumed: i64) -> RawLicense {
        RawLicense {
            sku_part_number: sku.to_string(),
            prepaid_units: PrepaidUnits {
                enabled,
                warning: 0,
            },
            consumed_units: consumed,
            applies_to: "User".to_string(),
            capability_status: "Enabled".to_string(),
        }
    }

    #[test]
    fn test_windows_store_and_empty_skus_are_excluded() {
        let records = normalize(vec![
            raw("WINDOWS_STORE", 10, 0),
            raw("", 5, 0),
            raw("ENTERPRISEPACK", 100, 80),
        ]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sku_identifier, "ENTERPRISEPACK");
    }

    #[test]
    fn test_available_is_recomputed_and_may_go_negative() {
        let records = normalize(vec![raw("ENTERPRISEPACK", 100, 110)]);
        assert_eq!(records[0].available_units, -10);
    }

    #[test]
    fn test_known_sku_resolves_product_name() {
        assert_eq!(display_name("EMSPREMIUM"), "Microsoft 365 E5");
    }

    #[test]
    fn test_unknown_sku_humanizes_underscores() {
        assert_eq!(display_name("SOME_NEW_SKU"), "SOME NEW SKU");
    }

    #[test]
    fn test_totals_sum_the_full_set() {
        let records = normalize(vec![
            raw("ENTERPRISEPACK", 100, 80),
            raw("STANDARDPACK", 50, 60),
        ]);
        let sums = totals(&records);
        assert_eq!(sums.total, 150);
        assert_eq!(sums.consumed, 140);
        assert_eq!(sums.available, 10);
    }

    #[test]
    fn test_filter_matches_any_column_case_insensitively() {
        let records = normalize(vec![
            raw("ENTERPRISEPACK", 100, 80),
            raw("POWER_BI_PRO", 20, 5),
        ]);
        let hits = filter(&records, "office");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].sku_identifier, "ENTERPRISEPACK");

        // Matches the numeric columns too.
        let hits = filter(&records, "20");
        assert_eq!(hits.len(), 2);

        let hits = filter(&records, "");
        assert_eq!(hits.len(), 2);
    }
}
