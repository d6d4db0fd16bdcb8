//! # Catalog Console
//!
//! > **Controllers for a product-catalog management surface.**
//!
//! This crate implements the client-side data-table controller behind a
//! product catalog: a searchable, paginated listing plus a create/edit
//! form, coordinating with a remote product backend through an abstract
//! fetch/mutate boundary.
//!
//! ## Design Philosophy
//!
//! ### One task per controller
//!
//! Each controller runs in its own Tokio task, owns its state exclusively,
//! and processes commands sequentially from a channel. No locks are needed:
//! the task is the lock. Cloneable handle types are the only public
//! surface, and state reads go over one-shot response channels.
//!
//! ### Races are settled by sequence, not by luck
//!
//! Multiple fetches can be in flight at once - a pagination click chased by
//! a debounce-triggered search is the everyday case. Every issued fetch is
//! stamped with a monotonically increasing sequence number, and a result is
//! applied only if it belongs to the most recently issued request. Stale
//! results are dropped silently; they are an expected concurrency outcome,
//! not an error. Application order therefore follows *issue* order, never
//! completion order.
//!
//! ### Every failure path lands on a stable state
//!
//! A failed load keeps the last-known-good list and clears the loading
//! flag. A failed mutation keeps the form open with the draft intact so the
//! user can simply resubmit. A draft that fails validation never reaches
//! the gateway at all. Each failure is surfaced through the notification
//! channel - except stale-response discards, which are not failures.
//!
//! ## Module Tour
//!
//! - [`model`] - the [`Product`](model::Product) entity, form drafts, and
//!   the paginated response shape
//! - [`gateway`] - the [`ProductGateway`](gateway::ProductGateway) boundary
//!   with HTTP, in-memory, and mock implementations
//! - [`debounce`] - the [`Debouncer`](debounce::Debouncer) that turns raw
//!   search keystrokes into settled query emissions
//! - [`list_controller`] - pagination, filtering, and stale-response
//!   reconciliation
//! - [`form_controller`] - the create/edit modal state machine with local
//!   validation
//! - [`notify`] - the user-visible notification channel
//! - [`lifecycle`] - [`CatalogConsole`](lifecycle::CatalogConsole) wiring
//!   and tracing setup
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use catalog_console::gateway::InMemoryGateway;
//! use catalog_console::lifecycle::CatalogConsole;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let gateway = Arc::new(InMemoryGateway::new());
//!     let console = CatalogConsole::new(gateway).await?;
//!
//!     console.list.search("jacket");      // debounced; commits after 300 ms
//!     console.form.open_create().await?;  // then submit a draft...
//!
//!     console.shutdown().await.map_err(|e| e.into())
//! }
//! ```
//!
//! ## Running the Demo
//!
//! ```bash
//! # Against the bundled in-memory backend
//! RUST_LOG=info cargo run
//!
//! # Against a real product API
//! CATALOG_API_URL=http://localhost:8001/api/web/v1 RUST_LOG=info cargo run
//! ```

pub mod debounce;
pub mod error;
pub mod form_controller;
pub mod gateway;
pub mod lifecycle;
pub mod list_controller;
pub mod model;
pub mod notify;
