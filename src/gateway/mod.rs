//! # Remote Product Gateway
//!
//! The boundary between the controllers and the external product backend.
//!
//! ## Overview
//!
//! The controllers never talk to a transport directly. They hold an
//! `Arc<dyn ProductGateway>` and only distinguish success from failure;
//! transport detail stays behind this trait. Three implementations live
//! here:
//!
//! - [`http::HttpGateway`] - thin relay to the real product API
//! - [`memory::InMemoryGateway`] - self-contained backend for the demo
//!   binary and integration tests
//! - [`mock::MockGateway`] - expectation-driven test double
//!
//! ## Error Mapping
//!
//! [`GatewayError`] is deliberately coarse. `Transport` carries a fixed
//! message rather than the underlying transport error so that no backend
//! detail leaks past the boundary; controllers surface it as a generic
//! user-visible notification and keep their last-known-good state.

use async_trait::async_trait;
use std::sync::Arc;

use crate::model::{Product, ProductFields, ProductPage};

pub mod http;
pub mod memory;
pub mod mock;

pub use http::HttpGateway;
pub use memory::InMemoryGateway;
pub use mock::MockGateway;

/// A shared, type-erased gateway handle as the controllers consume it.
pub type SharedGateway = Arc<dyn ProductGateway>;

/// Parameters of a paginated, filtered list request.
///
/// An empty `search` means no filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u64,
    pub limit: u64,
    pub search: String,
}

impl ListQuery {
    pub fn new(page: u64, limit: u64, search: impl Into<String>) -> Self {
        Self {
            page,
            limit,
            search: search.into(),
        }
    }
}

/// Errors crossing the gateway boundary.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum GatewayError {
    /// The requested product does not exist.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The backend rejected the payload.
    #[error("Rejected by backend: {0}")]
    Rejected(String),

    /// Transport-level failure. The message is fixed and generic; the
    /// underlying cause is logged at the boundary, never forwarded.
    #[error("{0}")]
    Transport(String),
}

impl GatewayError {
    /// The one transport failure message callers ever see.
    pub fn transport() -> Self {
        GatewayError::Transport("Failed to reach product service".to_string())
    }
}

/// Request/response contract of the external product backend.
///
/// Implementations must be cheap to clone behind an `Arc` and safe to call
/// concurrently; the controllers spawn one task per in-flight request.
#[async_trait]
pub trait ProductGateway: Send + Sync {
    /// Fetches one page of products, optionally filtered by `query.search`.
    async fn list(&self, query: ListQuery) -> Result<ProductPage, GatewayError>;

    /// Fetches a single product by id.
    async fn get(&self, id: &str) -> Result<Product, GatewayError>;

    /// Creates a product; the backend assigns the id.
    async fn create(&self, fields: ProductFields) -> Result<Product, GatewayError>;

    /// Updates the product with `id`, replacing its fields.
    async fn update(&self, id: &str, fields: ProductFields) -> Result<Product, GatewayError>;
}
