//! Runtime orchestration and observability setup.
//!
//! # Main Components
//!
//! - [`CatalogConsole`] - wires the gateway, controllers, and notification
//!   channel together and manages their lifecycle
//! - [`setup_tracing`] - initializes the tracing/logging infrastructure

pub mod console;
pub mod tracing;

pub use console::*;
pub use tracing::*;
