//! Stock-in/stock-out orders.

use serde::{Deserialize, Serialize};

use super::inventory::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Draft,
    Confirmed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Draft => "draft",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockOrderItem {
    pub id: i64,
    pub inventory_id: i64,
    pub barcode: String,
    pub quantity: i64,
    pub price: f64,
    pub total: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockOrder {
    pub id: i64,
    pub order_no: String,
    #[serde(rename = "type")]
    pub direction: Direction,
    pub company_id: i64,
    #[serde(default)]
    pub company_name: Option<String>,
    pub total_amount: f64,
    pub operator_id: i64,
    #[serde(default)]
    pub operator_name: Option<String>,
    #[serde(default)]
    pub store_id: Option<i64>,
    pub status: OrderStatus,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub items: Vec<StockOrderItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewStockOrderItem {
    pub inventory_id: i64,
    pub barcode: String,
    pub quantity: i64,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewStockOrder {
    #[serde(rename = "type")]
    pub direction: Direction,
    pub company_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub items: Vec<NewStockOrderItem>,
}

/// Listing query for stock orders (`page`/`limit` pagination).
///
/// The service expects every key to be present, with empty strings for
/// unused filters.
#[derive(Debug, Clone, Serialize)]
pub struct StockOrderQuery {
    pub page: u32,
    pub limit: u32,
    pub search: String,
    #[serde(rename = "type")]
    pub direction: String,
    pub status: String,
}

impl Default for StockOrderQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            search: String::new(),
            direction: String::new(),
            status: String::new(),
        }
    }
}
