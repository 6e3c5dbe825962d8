//! End-to-end peripheral screen cycles: create, update, delete, and the
//! refetch behavior around each.

use stok_core::error::ErrorKind;
use stok_inventory::peripherals::{self, PeripheralForm};
use stok_inventory::{Phase, ViewAction, ViewState, reduce};

use crate::helpers::{TestContext, raw_item};

fn form(title: &str, quantity: i64, category: &str) -> PeripheralForm {
    PeripheralForm {
        title: title.to_string(),
        quantity,
        category: category.to_string(),
    }
}

#[tokio::test]
async fn create_allocates_max_plus_one_from_the_snapshot() {
    let ctx = TestContext::new();
    ctx.client
        .set_items(vec![
            raw_item("a", 1, "Mouse", 2, "Input Device"),
            raw_item("b", 3, "Cable", 5, "Kabel"),
            raw_item("c", 5, "Headset", 1, "Audio"),
        ])
        .await;

    let mut screen = ctx.peripheral_screen();
    screen.refresh().await.expect("initial refresh");

    let assigned = screen
        .create(&form("USB Hub", 4, "Hub/Expander"))
        .await
        .expect("create");
    assert_eq!(assigned, 6);

    // The refetch after creation picks up the new row in sequence order.
    let rows = &screen.state().rows;
    assert_eq!(rows.len(), 4);
    let created = rows.last().expect("new row");
    assert_eq!(created.sequence_number, 6);
    assert_eq!(created.title, "USB Hub");
    assert_eq!(created.quantity, 4);
    assert_eq!(created.category, "Hub/Expander");
}

#[tokio::test]
async fn create_on_empty_snapshot_starts_at_one() {
    let ctx = TestContext::new();
    let mut screen = ctx.peripheral_screen();
    screen.refresh().await.expect("initial refresh");

    let assigned = screen
        .create(&form("Mouse", 1, "Input Device"))
        .await
        .expect("create");
    assert_eq!(assigned, 1);
}

#[tokio::test]
async fn invalid_form_never_reaches_the_store() {
    let ctx = TestContext::new();
    let mut screen = ctx.peripheral_screen();
    screen.refresh().await.expect("initial refresh");

    let err = screen
        .create(&form("", 2, "Item"))
        .await
        .expect_err("empty title must be rejected");
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = screen
        .create(&form("Mouse", -1, "Item"))
        .await
        .expect_err("negative quantity must be rejected");
    assert_eq!(err.kind, ErrorKind::Validation);

    // Nothing was sent and the view is untouched.
    assert!(ctx.client.items().await.is_empty());
    assert!(screen.state().rows.is_empty());
    assert_eq!(screen.state().phase, Phase::Ready);
}

#[tokio::test]
async fn update_changes_fields_but_not_the_sequence_number() {
    let ctx = TestContext::new();
    ctx.client
        .set_items(vec![
            raw_item("a", 1, "Mouse", 2, "Input Device"),
            raw_item("b", 2, "Cable", 5, "Kabel"),
        ])
        .await;

    let mut screen = ctx.peripheral_screen();
    screen.refresh().await.expect("initial refresh");

    screen
        .update("a", &form("Wireless Mouse", 7, "Input Device"))
        .await
        .expect("update");

    let rows = &screen.state().rows;
    let updated = rows.iter().find(|r| r.id == "a").expect("row a");
    assert_eq!(updated.sequence_number, 1);
    assert_eq!(updated.title, "Wireless Mouse");
    assert_eq!(updated.quantity, 7);
}

#[tokio::test]
async fn delete_succeeds_only_on_exact_no_content() {
    let ctx = TestContext::new();
    ctx.client
        .set_items(vec![raw_item("a", 1, "Mouse", 2, "Input Device")])
        .await;

    let mut screen = ctx.peripheral_screen();
    screen.refresh().await.expect("initial refresh");

    // A nominal 200 with a body does not count as deleted.
    ctx.client.delete_responds_with(200, "{\"status\":\"queued\"}");
    let err = screen.delete("a").await.expect_err("200 must fail");
    assert_eq!(err.kind, ErrorKind::Http);
    assert_eq!(ctx.client.items().await.len(), 1);
    assert_eq!(screen.state().rows.len(), 1, "item stays in view");

    // An exact 204 removes the item and the refetch drops the row.
    ctx.client.delete_responds_with(204, "");
    screen.delete("a").await.expect("204 delete");
    assert!(ctx.client.items().await.is_empty());
    assert!(screen.state().rows.is_empty());
}

#[tokio::test]
async fn delete_of_missing_item_surfaces_not_found() {
    let ctx = TestContext::new();
    ctx.client
        .set_items(vec![raw_item("a", 1, "Mouse", 2, "Input Device")])
        .await;

    let mut screen = ctx.peripheral_screen();
    screen.refresh().await.expect("initial refresh");

    let err = screen.delete("missing").await.expect_err("404 expected");
    assert_eq!(err.kind, ErrorKind::Http);
    assert!(err.message.contains("404"));
    assert_eq!(screen.state().rows.len(), 1);
}

#[tokio::test]
async fn failed_mutation_leaves_the_previous_view_intact() {
    let ctx = TestContext::new();
    ctx.client
        .set_items(vec![raw_item("a", 1, "Mouse", 2, "Input Device")])
        .await;

    let mut screen = ctx.peripheral_screen();
    screen.refresh().await.expect("initial refresh");

    ctx.client.fail_next_with(503, "service unavailable");
    let err = screen
        .create(&form("Cable", 3, "Kabel"))
        .await
        .expect_err("create should fail");
    assert_eq!(err.kind, ErrorKind::Http);

    // No refetch ran after the failure: the snapshot is the pre-mutation
    // view and the store holds only the original item.
    assert_eq!(screen.state().rows.len(), 1);
    assert_eq!(screen.state().rows[0].title, "Mouse");
    assert_eq!(ctx.client.items().await.len(), 1);
}

#[tokio::test]
async fn failed_refetch_keeps_stale_peripheral_rows() {
    let ctx = TestContext::new();
    ctx.client
        .set_items(vec![raw_item("a", 1, "Mouse", 2, "Input Device")])
        .await;

    let mut screen = ctx.peripheral_screen();
    screen.refresh().await.expect("initial refresh");

    ctx.client.fail_next_with(500, "boom");
    screen.refresh().await.expect_err("refresh should fail");

    let state = screen.state();
    assert_eq!(state.phase, Phase::Failed);
    assert_eq!(state.rows.len(), 1, "stale rows stay displayed");
    assert!(
        state
            .error
            .as_deref()
            .expect("error recorded")
            .starts_with("Failed to load peripherals: ")
    );
}

#[tokio::test]
async fn out_of_order_fetch_results_apply_last_writer_wins() {
    // Two fetches of the same list race; the response of the first
    // request arrives last and is what the view ends up showing. There
    // is deliberately no request-generation guard filtering it out.
    let first = peripherals::normalize(vec![raw_item("a", 1, "Mouse", 2, "Input Device")]);
    let second = peripherals::normalize(vec![
        raw_item("a", 1, "Mouse", 2, "Input Device"),
        raw_item("b", 2, "Cable", 5, "Kabel"),
    ]);

    let mut state = ViewState::default();
    reduce(&mut state, ViewAction::FetchStarted); // request A
    reduce(&mut state, ViewAction::FetchStarted); // request B
    reduce(&mut state, ViewAction::FetchSucceeded(second)); // B resolves first
    reduce(&mut state, ViewAction::FetchSucceeded(first)); // A resolves last

    assert_eq!(state.phase, Phase::Ready);
    assert_eq!(state.rows.len(), 1, "A's older snapshot wins");
    assert_eq!(state.rows[0].title, "Mouse");
}
