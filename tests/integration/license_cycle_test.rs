//! End-to-end license screen cycles.

use stok_core::error::ErrorKind;
use stok_inventory::Phase;
use stok_inventory::licenses;

use crate::helpers::{TestContext, raw_license};

#[tokio::test]
async fn fetch_normalizes_and_excludes_hidden_skus() {
    let ctx = TestContext::new();
    ctx.client
        .set_licenses(vec![
            raw_license("ENTERPRISEPACK", 120, 3, 110),
            raw_license("WINDOWS_STORE", 10, 0, 0),
            raw_license("", 5, 0, 0),
            raw_license("SOME_NEW_SKU", 7, 0, 9),
        ])
        .await;

    let mut screen = ctx.license_screen();
    screen.refresh().await.expect("refresh");

    let state = screen.state();
    assert_eq!(state.phase, Phase::Ready);
    assert_eq!(state.rows.len(), 2);

    let e3 = &state.rows[0];
    assert_eq!(e3.display_name, "Office 365 E3");
    assert_eq!(e3.available_units, 10);
    assert_eq!(e3.warning_units, 3);

    // Unknown SKU humanizes and may go negative on over-consumption.
    let unknown = &state.rows[1];
    assert_eq!(unknown.display_name, "SOME NEW SKU");
    assert_eq!(unknown.available_units, -2);
}

#[tokio::test]
async fn failed_fetch_keeps_previous_rows_visible() {
    let ctx = TestContext::new();
    ctx.client
        .set_licenses(vec![raw_license("ENTERPRISEPACK", 120, 0, 110)])
        .await;

    let mut screen = ctx.license_screen();
    screen.refresh().await.expect("initial refresh");
    assert_eq!(screen.state().rows.len(), 1);

    ctx.client.fail_next_with(500, "internal error");
    let err = screen.refresh().await.expect_err("refresh should fail");
    assert_eq!(err.kind, ErrorKind::Http);

    let state = screen.state();
    assert_eq!(state.phase, Phase::Failed);
    assert_eq!(state.rows.len(), 1, "stale rows stay displayed");
    let message = state.error.as_deref().expect("error recorded");
    assert!(message.starts_with("Failed to load licenses: "));
    assert!(message.contains("500"));
    assert!(message.contains("internal error"));
}

#[tokio::test]
async fn aggregates_cover_the_full_loaded_set() {
    let ctx = TestContext::new();
    ctx.client
        .set_licenses(vec![
            raw_license("ENTERPRISEPACK", 100, 0, 80),
            raw_license("STANDARDPACK", 50, 0, 60),
        ])
        .await;

    let mut screen = ctx.license_screen();
    screen.refresh().await.expect("refresh");

    let records = &screen.state().rows;
    let filtered = licenses::filter(records, "e3");
    assert_eq!(filtered.len(), 1);

    // Totals ignore the filter.
    let sums = licenses::totals(records);
    assert_eq!(sums.total, 150);
    assert_eq!(sums.consumed, 140);
    assert_eq!(sums.available, 10);
}
