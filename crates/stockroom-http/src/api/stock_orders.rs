//! Stock-in/stock-out orders.

use reqwest::Method;
use tracing::instrument;

use stockroom_core::Result;
use stockroom_core::types::Page;
use stockroom_core::types::stock_order::{NewStockOrder, StockOrder, StockOrderQuery};

use crate::ApiClient;
use crate::endpoints;

impl ApiClient {
    #[instrument(skip(self))]
    pub async fn list_stock_orders(&self, query: &StockOrderQuery) -> Result<Page<StockOrder>> {
        self.call(self.request(Method::GET, endpoints::STOCK_ORDERS)?.query(query))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get_stock_order(&self, id: i64) -> Result<StockOrder> {
        let id = id.to_string();
        self.call(self.request_at(Method::GET, endpoints::STOCK_ORDERS, &[&id])?)
            .await
    }

    #[instrument(skip(self, order), fields(company_id = order.company_id, items = order.items.len()))]
    pub async fn create_stock_order(&self, order: &NewStockOrder) -> Result<StockOrder> {
        self.call(self.request(Method::POST, endpoints::STOCK_ORDERS)?.json(order))
            .await
    }

    /// Confirm a draft order, applying its stock movements.
    #[instrument(skip(self))]
    pub async fn confirm_stock_order(&self, id: i64) -> Result<StockOrder> {
        let id = id.to_string();
        self.call(self.request_at(Method::POST, endpoints::STOCK_ORDERS, &[&id, "confirm"])?)
            .await
    }

    #[instrument(skip(self))]
    pub async fn cancel_stock_order(&self, id: i64) -> Result<StockOrder> {
        let id = id.to_string();
        self.call(self.request_at(Method::POST, endpoints::STOCK_ORDERS, &[&id, "cancel"])?)
            .await
    }
}
