//! Miscellaneous income and expense records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Income,
    Expense,
}

/// An income or expense entry outside stock trading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OtherTransaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub amount: f64,
    pub transaction_date: NaiveDate,
    #[serde(default)]
    pub notes: Option<String>,
    pub operator_id: i64,
    #[serde(default)]
    pub operator_name: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewOtherTransaction {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub amount: f64,
    pub transaction_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Listing query for finance entries (`page`/`page_size` pagination).
#[derive(Debug, Clone, Serialize)]
pub struct FinanceQuery {
    pub page: u32,
    pub page_size: u32,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<EntryKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl Default for FinanceQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 20,
            kind: None,
            start_date: None,
            end_date: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn dates_use_iso_calendar_format() {
        let entry = NewOtherTransaction {
            kind: EntryKind::Expense,
            amount: 120.5,
            transaction_date: NaiveDate::from_ymd_opt(2024, 5, 3).unwrap(),
            notes: None,
        };
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"type": "expense", "amount": 120.5, "transaction_date": "2024-05-03"})
        );
    }
}
