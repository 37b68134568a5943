//! Stock items, movements, statistics and the movement history.

use reqwest::Method;
use serde::Serialize;
use tracing::instrument;

use stockroom_core::Result;
use stockroom_core::types::SkipLimit;
use stockroom_core::types::inventory::{
    InventoryDraft, InventoryItem, InventoryStats, InventoryTransaction, PerformanceStats,
    StockMovement, TransactionFilter,
};

use crate::ApiClient;
use crate::endpoints;

/// Date range for sales performance; open ends are omitted.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PerformanceRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

impl ApiClient {
    #[instrument(skip(self))]
    pub async fn list_inventory(&self, page: SkipLimit) -> Result<Vec<InventoryItem>> {
        self.call(self.request(Method::GET, endpoints::INVENTORY)?.query(&page))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_inventory(&self, barcode: &str) -> Result<InventoryItem> {
        self.call(self.request_at(Method::GET, endpoints::INVENTORY, &[barcode])?)
            .await
    }

    #[instrument(skip(self))]
    pub async fn create_inventory(&self, draft: &InventoryDraft) -> Result<InventoryItem> {
        self.call(self.request(Method::POST, endpoints::INVENTORY)?.json(draft))
            .await
    }

    #[instrument(skip(self))]
    pub async fn update_inventory(
        &self,
        barcode: &str,
        draft: &InventoryDraft,
    ) -> Result<InventoryItem> {
        self.call(
            self.request_at(Method::PUT, endpoints::INVENTORY, &[barcode])?
                .json(draft),
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_inventory(&self, barcode: &str) -> Result<()> {
        self.call_unit(self.request_at(Method::DELETE, endpoints::INVENTORY, &[barcode])?)
            .await
    }

    /// Receive stock; returns the updated item.
    #[instrument(skip(self), fields(barcode = %movement.barcode))]
    pub async fn stock_in(&self, movement: &StockMovement) -> Result<InventoryItem> {
        self.call(self.request(Method::POST, endpoints::STOCK_IN)?.json(movement))
            .await
    }

    /// Sell or issue stock; returns the updated item.
    #[instrument(skip(self), fields(barcode = %movement.barcode))]
    pub async fn stock_out(&self, movement: &StockMovement) -> Result<InventoryItem> {
        self.call(self.request(Method::POST, endpoints::STOCK_OUT)?.json(movement))
            .await
    }

    #[instrument(skip(self))]
    pub async fn inventory_stats(&self) -> Result<InventoryStats> {
        self.call(self.request(Method::GET, endpoints::INVENTORY_STATS)?)
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_transactions(
        &self,
        filter: &TransactionFilter,
        page: SkipLimit,
    ) -> Result<Vec<InventoryTransaction>> {
        self.call(
            self.request(Method::GET, endpoints::TRANSACTIONS)?
                .query(filter)
                .query(&page),
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn performance(&self, range: &PerformanceRange) -> Result<PerformanceStats> {
        self.call(self.request(Method::GET, endpoints::PERFORMANCE)?.query(range))
            .await
    }
}
