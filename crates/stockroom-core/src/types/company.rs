//! Supplier/customer records, balances and payments.

use serde::{Deserialize, Serialize};

/// Whether a company supplies stock or buys it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CompanyKind {
    Supplier,
    Customer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: CompanyKind,
    #[serde(default)]
    pub contact: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    pub created_at: String,
}

/// Fields accepted when creating or updating a company.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CompanyDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<CompanyKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Receivable/payable position of one company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyBalance {
    pub company: Company,
    pub receivable: f64,
    pub payable: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalBalance {
    pub total_receivable: f64,
    pub total_payable: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentDirection {
    Receive,
    Pay,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: i64,
    pub company_id: i64,
    pub amount: f64,
    #[serde(rename = "type")]
    pub direction: PaymentDirection,
    #[serde(default)]
    pub notes: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub company: Option<Company>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewPayment {
    pub company_id: i64,
    pub amount: f64,
    #[serde(rename = "type")]
    pub direction: PaymentDirection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Kind of entry in a company's ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerKind {
    StockIn,
    StockOut,
    Receive,
    Pay,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyTransaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: LedgerKind,
    pub amount: f64,
    pub timestamp: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub operator_name: Option<String>,
}
