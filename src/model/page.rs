//! The paginated list-response shape returned by the gateway.

use serde::{Deserialize, Serialize};

use super::Product;

/// One page of products plus the pagination cursor that produced it.
///
/// Mirrors the gateway's list response:
/// `{ "data": [...], "pagination": { "page", "limit", "total" } }`.
/// Item order is the gateway-returned order and is preserved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub data: Vec<Product>,
    pub pagination: PageInfo,
}

/// Pagination cursor and bound: `page >= 1`, `limit > 0`, `total >= 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
}

impl ProductPage {
    /// An empty page, used when the backend has nothing matching the query.
    pub fn empty(page: u64, limit: u64) -> Self {
        Self {
            data: Vec::new(),
            pagination: PageInfo { page, limit, total: 0 },
        }
    }
}
