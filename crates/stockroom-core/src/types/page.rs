//! Pagination shapes.
//!
//! Resources paginate differently and each keeps its own contract:
//! `skip`/`limit` for inventory, transactions and balances, `page`/`page_size`
//! for finance entries, `page`/`limit` for stock orders.

use serde::{Deserialize, Serialize};

/// A page of results with the total count across all pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub page_size: Option<u32>,
}

/// Offset pagination (`skip`/`limit`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SkipLimit {
    pub skip: u32,
    pub limit: u32,
}

impl SkipLimit {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self { skip, limit }
    }
}

impl Default for SkipLimit {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 100,
        }
    }
}
