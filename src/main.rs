//! Demo view binder for the catalog console.
//!
//! A deliberately thin CLI stand-in for the real table/form/modal UI: it
//! routes scripted user intents into the controllers, renders list
//! snapshots as a text table, and prints the notifications the controllers
//! emit. Configure `CATALOG_API_URL` (e.g. in `.env`) to run against a real
//! product API; without it, a seeded in-memory backend is used.

use anyhow::{anyhow, Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Instrument};

use catalog_console::gateway::{HttpGateway, InMemoryGateway, SharedGateway};
use catalog_console::lifecycle::{setup_tracing, CatalogConsole};
use catalog_console::list_controller::{ListHandle, ListState};
use catalog_console::model::{truncate_for_display, ProductDraft, ProductFields};
use catalog_console::notify::{Notification, NotificationKind};
use tokio::sync::mpsc::UnboundedReceiver;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    setup_tracing();

    let gateway = gateway_from_env()?;
    let page_size: u64 = match std::env::var("CATALOG_PAGE_SIZE") {
        Ok(v) => v.parse().context("CATALOG_PAGE_SIZE must be a number")?,
        Err(_) => 10,
    };

    info!(page_size, "Starting catalog console");
    let mut console = CatalogConsole::with_page_size(gateway, page_size)
        .await
        .map_err(|e| anyhow!("console failed to start: {e}"))?;

    // Initial load.
    let state = settled(&console.list).await?;
    render(&state);

    // Debounced search: only the settled value hits the backend.
    let span = tracing::info_span!("search");
    async {
        info!("Typing a search query");
        for keystroke in ["j", "ja", "jacket"] {
            console.list.search(keystroke);
        }
        anyhow::Ok(())
    }
    .instrument(span)
    .await?;
    tokio::time::sleep(Duration::from_millis(350)).await;
    let state = settled(&console.list).await?;
    render(&state);

    // Create a product through the form controller.
    let span = tracing::info_span!("create");
    async {
        console.form.open_create().await?;
        console
            .form
            .submit(ProductDraft {
                title: Some("Demo Jacket".to_string()),
                price: Some(149.0),
                category: Some("outerwear".to_string()),
                ..ProductDraft::default()
            })
            .await?;
        anyhow::Ok(())
    }
    .instrument(span)
    .await
    .map_err(|e| anyhow!("create flow failed: {e}"))?;

    // The successful submit triggers exactly one list refresh.
    tokio::time::sleep(Duration::from_millis(100)).await;
    let state = settled(&console.list).await?;
    render(&state);

    // Edit round-trip on the first visible row, if any.
    if let Some(product) = state.items.first().cloned() {
        let span = tracing::info_span!("edit", id = %product.id);
        async {
            console.form.open_edit(product.clone()).await?;
            let mut draft = ProductDraft::from_product(&product);
            draft.price = draft.price.map(|p| p + 1.0);
            console.form.submit(draft).await?;
            anyhow::Ok(())
        }
        .instrument(span)
        .await
        .map_err(|e| anyhow!("edit flow failed: {e}"))?;

        tokio::time::sleep(Duration::from_millis(100)).await;
        let state = settled(&console.list).await?;
        render(&state);
    }

    drain_notifications(&mut console.notifications);

    console
        .shutdown()
        .await
        .map_err(|e| anyhow!("shutdown failed: {e}"))?;
    info!("Demo finished");
    Ok(())
}

fn gateway_from_env() -> Result<SharedGateway> {
    match std::env::var("CATALOG_API_URL") {
        Ok(url) => {
            info!(%url, "Using HTTP gateway");
            let gateway =
                HttpGateway::new(url).map_err(|e| anyhow!("failed to build HTTP gateway: {e}"))?;
            Ok(Arc::new(gateway))
        }
        Err(_) => {
            info!("CATALOG_API_URL not set; using seeded in-memory gateway");
            Ok(Arc::new(InMemoryGateway::seeded(seed_products())))
        }
    }
}

fn seed_products() -> Vec<ProductFields> {
    let item = |title: &str, price: f64, category: &str, description: &str| ProductFields {
        title: title.to_string(),
        price,
        description: Some(description.to_string()),
        category: Some(category.to_string()),
        image_url: None,
    };
    vec![
        item("Deck Jacket", 180.0, "outerwear", "N-1 style deck jacket in navy cotton with an alpaca-lined collar and slash pockets"),
        item("Rain Jacket", 95.0, "outerwear", "Packable waterproof shell"),
        item("Wool Scarf", 30.0, "accessories", "Lambswool, made in Scotland"),
        item("Canvas Tote", 25.0, "accessories", "Heavyweight 18oz canvas"),
        item("Chore Coat", 120.0, "outerwear", "Classic French workwear cut"),
    ]
}

/// Polls the list state until the in-flight load settles.
async fn settled(list: &ListHandle) -> Result<ListState> {
    for _ in 0..200 {
        let state = list
            .snapshot()
            .await
            .map_err(|e| anyhow!("list controller gone: {e}"))?;
        if !state.loading {
            return Ok(state);
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    Err(anyhow!("list never finished loading"))
}

fn render(state: &ListState) {
    println!(
        "\n  Products (page {} of {}, {} total, filter: {:?})",
        state.page,
        (state.total.max(1) + state.page_size - 1) / state.page_size,
        state.total,
        state.search_term,
    );
    println!("  {:<12} {:<20} {:>8}  {:<12} DESCRIPTION", "ID", "TITLE", "PRICE", "CATEGORY");
    for product in &state.items {
        println!(
            "  {:<12} {:<20} {:>8.2}  {:<12} {}",
            product.id,
            truncate_for_display(&product.title, 20),
            product.price,
            product.category.as_deref().unwrap_or("-"),
            truncate_for_display(product.description.as_deref().unwrap_or(""), 50),
        );
    }
}

fn drain_notifications(notifications: &mut UnboundedReceiver<Notification>) {
    while let Ok(notification) = notifications.try_recv() {
        let tag = match notification.kind {
            NotificationKind::Success => "ok",
            NotificationKind::Error => "error",
        };
        println!("  [{}] {}: {}", tag, notification.message, notification.description);
    }
}
