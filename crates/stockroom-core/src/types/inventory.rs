//! Stock item, movement and statistics records.

use serde::{Deserialize, Serialize};

/// A stock item, keyed by barcode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: i64,
    pub barcode: String,
    pub name: String,
    pub unit: String,
    #[serde(default)]
    pub avg_purchase_price: f64,
    #[serde(default)]
    pub selling_price: f64,
    #[serde(default)]
    pub avg_selling_price: f64,
    pub stock: i64,
    #[serde(default)]
    pub warning_stock: i64,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl InventoryItem {
    /// Returns true when stock has fallen to or below the warning level.
    pub fn is_low(&self) -> bool {
        self.stock <= self.warning_stock
    }
}

/// Fields accepted when creating or updating a stock item.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InventoryDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selling_price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning_stock: Option<i64>,
}

/// A stock-in or stock-out request.
#[derive(Debug, Clone, Serialize)]
pub struct StockMovement {
    pub barcode: String,
    pub quantity: i64,
    pub price: f64,
}

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    In,
    Out,
}

impl Direction {
    /// The wire tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::In => "in",
            Direction::Out => "out",
        }
    }
}

/// A recorded stock movement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryTransaction {
    pub id: i64,
    pub barcode: String,
    #[serde(rename = "type")]
    pub direction: Direction,
    pub quantity: i64,
    pub price: f64,
    pub total: f64,
    pub timestamp: String,
}

/// Filters for the inventory transaction listing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransactionFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LowStockItem {
    pub barcode: String,
    pub name: String,
    pub stock: i64,
    pub warning_stock: i64,
    pub unit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotProduct {
    pub barcode: String,
    pub name: String,
    pub quantity: i64,
    pub revenue: f64,
}

/// Dashboard figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryStats {
    pub total_value: f64,
    pub today_sales: f64,
    pub week_sales: f64,
    #[serde(default)]
    pub low_stock_items: Vec<LowStockItem>,
    #[serde(default)]
    pub hot_products: Vec<HotProduct>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitRanking {
    pub barcode: String,
    pub name: String,
    pub total_cost: f64,
    pub total_revenue: f64,
    pub profit: f64,
    pub profit_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRanking {
    pub barcode: String,
    pub name: String,
    pub quantity: i64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub total_purchase: f64,
    pub total_sales: f64,
    pub total_profit: f64,
    pub profit_rate: f64,
}

/// Sales performance over a date range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceStats {
    #[serde(default)]
    pub profit_rankings: Vec<ProfitRanking>,
    #[serde(default)]
    pub sales_rankings: Vec<SalesRanking>,
    pub summary: SalesSummary,
}
