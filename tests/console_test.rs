//! Full end-to-end flow over the in-memory gateway: the console wired
//! exactly as the binary wires it, no mocks.

use std::sync::Arc;
use std::time::Duration;

use catalog_console::form_controller::FormMode;
use catalog_console::gateway::InMemoryGateway;
use catalog_console::lifecycle::CatalogConsole;
use catalog_console::list_controller::{ListHandle, ListState};
use catalog_console::model::{ProductDraft, ProductFields};
use catalog_console::notify::NotificationKind;

fn fields(title: &str, price: f64) -> ProductFields {
    ProductFields {
        title: title.to_string(),
        price,
        description: None,
        category: None,
        image_url: None,
    }
}

async fn settled(list: &ListHandle, predicate: impl Fn(&ListState) -> bool) -> ListState {
    for _ in 0..500 {
        let state = list.snapshot().await.expect("list controller gone");
        if !state.loading && predicate(&state) {
            return state;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("list never settled into the expected state");
}

#[tokio::test(start_paused = true)]
async fn list_form_and_search_work_end_to_end() {
    let gateway = Arc::new(InMemoryGateway::seeded(
        (1..=12).map(|i| fields(&format!("Item {:02}", i), i as f64)),
    ));
    let mut console = CatalogConsole::new(gateway).await.unwrap();

    // Initial load: page 1 of 12 items at the default size of 10.
    let state = settled(&console.list, |s| !s.items.is_empty()).await;
    assert_eq!(state.items.len(), 10);
    assert_eq!(state.total, 12);
    assert_eq!(state.page, 1);

    // Pagination.
    console.list.page_change(2, 10).await.unwrap();
    let state = settled(&console.list, |s| s.page == 2).await;
    assert_eq!(state.items.len(), 2);
    assert_eq!(state.items[0].title, "Item 11");

    // Debounced search commits once and lands back on page 1.
    console.list.search("Item 0");
    console.list.search("Item 01");
    tokio::time::advance(Duration::from_millis(301)).await;
    let state = settled(&console.list, |s| s.search_term == "Item 01").await;
    assert_eq!(state.page, 1);
    assert_eq!(state.total, 1);
    assert_eq!(state.items[0].title, "Item 01");

    // Create through the form; success closes it and refreshes the list
    // with the applied filter still in place.
    console.form.open_create().await.unwrap();
    console
        .form
        .submit(ProductDraft {
            title: Some("Item 013 Special".to_string()),
            price: Some(99.0),
            ..ProductDraft::default()
        })
        .await
        .unwrap();

    let state = settled(&console.list, |s| s.total == 2).await;
    assert_eq!(state.search_term, "Item 01");
    let form_state = console.form.snapshot().await.unwrap();
    assert_eq!(form_state.mode, FormMode::Closed);

    let notification = console.notifications.recv().await.unwrap();
    assert_eq!(notification.kind, NotificationKind::Success);

    // Edit the new row and watch the refreshed page pick the change up.
    let target = state
        .items
        .iter()
        .find(|p| p.title == "Item 013 Special")
        .cloned()
        .unwrap();
    console.form.open_edit(target.clone()).await.unwrap();
    let mut draft = ProductDraft::from_product(&target);
    draft.price = Some(89.0);
    console.form.submit(draft).await.unwrap();

    let state = settled(&console.list, |s| {
        s.items.iter().any(|p| p.id == target.id && p.price == 89.0)
    })
    .await;
    assert_eq!(state.total, 2);

    console.shutdown().await.unwrap();
}

#[tokio::test]
async fn validation_failure_leaves_the_backend_untouched() {
    let gateway = Arc::new(InMemoryGateway::seeded(vec![fields("Only Item", 1.0)]));
    let console = CatalogConsole::new(gateway).await.unwrap();

    settled(&console.list, |s| s.total == 1).await;

    console.form.open_create().await.unwrap();
    console
        .form
        .submit(ProductDraft {
            title: Some("   ".to_string()),
            price: None,
            ..ProductDraft::default()
        })
        .await
        .unwrap();

    // Field errors for both violations; form still open, no refresh and no
    // new row on the backend.
    let mut form_state = console.form.snapshot().await.unwrap();
    for _ in 0..500 {
        if !form_state.field_errors.is_empty() {
            break;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
        form_state = console.form.snapshot().await.unwrap();
    }
    assert_eq!(form_state.mode, FormMode::Create);
    assert_eq!(form_state.field_errors.len(), 2);

    console.list.refresh().await.unwrap();
    let state = settled(&console.list, |s| !s.loading).await;
    assert_eq!(state.total, 1);

    console.shutdown().await.unwrap();
}

#[tokio::test]
async fn shutdown_is_clean_even_with_a_pending_search() {
    let gateway = Arc::new(InMemoryGateway::new());
    let console = CatalogConsole::new(gateway).await.unwrap();
    settled(&console.list, |s| !s.loading).await;

    // A keystroke still inside the debounce window at teardown.
    console.list.search("abandoned");
    console.shutdown().await.unwrap();
}
