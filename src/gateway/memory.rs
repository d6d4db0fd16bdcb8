//! Self-contained gateway backed by process memory.
//!
//! Useful in two places: the demo binary when no backend URL is configured,
//! and integration tests that want a real end-to-end flow without network.
//! Behaves like the external backend: assigns ids, validates payloads,
//! filters by title substring, and paginates with offset/limit.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use tracing::debug;

use super::{GatewayError, ListQuery, ProductGateway};
use crate::model::{PageInfo, Product, ProductFields, ProductPage};

pub struct InMemoryGateway {
    // Insertion-ordered store; list order is the order the backend returns.
    store: Mutex<Vec<Product>>,
    next_id: AtomicU64,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self {
            store: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Seeds the store, assigning ids in order. For demos and tests.
    pub fn seeded(products: impl IntoIterator<Item = ProductFields>) -> Self {
        let gateway = Self::new();
        {
            let mut store = gateway.store.lock().unwrap();
            for fields in products {
                let id = gateway.next_id.fetch_add(1, Ordering::SeqCst);
                store.push(materialize(format!("product_{}", id), fields));
            }
        }
        gateway
    }

    fn validate(fields: &ProductFields) -> Result<(), GatewayError> {
        if fields.title.trim().is_empty() {
            return Err(GatewayError::Rejected("title must not be empty".to_string()));
        }
        if !(fields.price >= 0.0) {
            return Err(GatewayError::Rejected(
                "price must be a non-negative number".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

fn materialize(id: String, fields: ProductFields) -> Product {
    Product {
        id,
        title: fields.title,
        price: fields.price,
        description: fields.description,
        category: fields.category,
        image_url: fields.image_url,
    }
}

#[async_trait]
impl ProductGateway for InMemoryGateway {
    async fn list(&self, query: ListQuery) -> Result<ProductPage, GatewayError> {
        let page = query.page.max(1);
        let limit = query.limit.max(1);
        let needle = query.search.trim().to_lowercase();

        let store = self.store.lock().unwrap();
        let matching: Vec<&Product> = store
            .iter()
            .filter(|p| needle.is_empty() || p.title.to_lowercase().contains(&needle))
            .collect();
        let total = matching.len() as u64;

        let offset = ((page - 1) * limit) as usize;
        let data: Vec<Product> = matching
            .into_iter()
            .skip(offset)
            .take(limit as usize)
            .cloned()
            .collect();

        debug!(page, limit, total, returned = data.len(), "List served from memory");
        Ok(ProductPage {
            data,
            pagination: PageInfo { page, limit, total },
        })
    }

    async fn get(&self, id: &str) -> Result<Product, GatewayError> {
        let store = self.store.lock().unwrap();
        store
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))
    }

    async fn create(&self, fields: ProductFields) -> Result<Product, GatewayError> {
        Self::validate(&fields)?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let product = materialize(format!("product_{}", id), fields);
        let mut store = self.store.lock().unwrap();
        store.push(product.clone());
        debug!(id = %product.id, size = store.len(), "Created");
        Ok(product)
    }

    async fn update(&self, id: &str, fields: ProductFields) -> Result<Product, GatewayError> {
        Self::validate(&fields)?;
        let mut store = self.store.lock().unwrap();
        let slot = store
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| GatewayError::NotFound(id.to_string()))?;
        *slot = materialize(id.to_string(), fields);
        debug!(%id, "Updated");
        Ok(slot.clone())
    }
}
