//! Suppliers, customers, balances and payments.

use reqwest::Method;
use serde::Serialize;
use tracing::instrument;

use stockroom_core::Result;
use stockroom_core::types::company::{
    Company, CompanyBalance, CompanyDraft, CompanyKind, CompanyTransaction, NewPayment, Payment,
    TotalBalance,
};
use stockroom_core::types::{Page, SkipLimit};

use crate::ApiClient;
use crate::client::PATIENT_RETRY;
use crate::endpoints;

/// Optional company-kind filter.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CompanyFilter {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<CompanyKind>,
}

impl CompanyFilter {
    pub fn kind(kind: CompanyKind) -> Self {
        Self { kind: Some(kind) }
    }
}

/// Query for the balance listing (`skip`/`limit` plus filters).
#[derive(Debug, Clone, Serialize)]
pub struct BalanceQuery {
    pub skip: u32,
    pub limit: u32,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<CompanyKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

impl Default for BalanceQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: 10,
            kind: None,
            search: None,
        }
    }
}

#[derive(Serialize)]
struct PaymentFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    company_id: Option<i64>,
}

impl ApiClient {
    /// List companies. Retried more patiently than other reads.
    #[instrument(skip(self))]
    pub async fn list_companies(&self, filter: CompanyFilter) -> Result<Page<Company>> {
        let builder = self.request(Method::GET, endpoints::COMPANIES)?.query(&filter);
        self.call_with_retry(builder, &PATIENT_RETRY).await
    }

    #[instrument(skip(self))]
    pub async fn create_company(&self, draft: &CompanyDraft) -> Result<Company> {
        self.call(self.request(Method::POST, endpoints::COMPANIES)?.json(draft))
            .await
    }

    #[instrument(skip(self))]
    pub async fn update_company(&self, id: i64, draft: &CompanyDraft) -> Result<Company> {
        let id = id.to_string();
        self.call(
            self.request_at(Method::PUT, endpoints::COMPANIES, &[&id])?
                .json(draft),
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn company_balances(&self, query: &BalanceQuery) -> Result<Page<CompanyBalance>> {
        self.call(
            self.request(Method::GET, endpoints::COMPANY_BALANCES)?
                .query(query),
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn total_balance(&self, filter: CompanyFilter) -> Result<TotalBalance> {
        self.call(
            self.request(Method::GET, endpoints::COMPANY_TOTAL_BALANCE)?
                .query(&filter),
        )
        .await
    }

    /// Ledger of one company, newest first.
    #[instrument(skip(self))]
    pub async fn company_transactions(
        &self,
        id: i64,
        page: SkipLimit,
    ) -> Result<Vec<CompanyTransaction>> {
        let id = id.to_string();
        self.call(
            self.request_at(Method::GET, endpoints::COMPANIES, &[&id, "transactions"])?
                .query(&page),
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn list_payments(&self, company_id: Option<i64>) -> Result<Vec<Payment>> {
        self.call(
            self.request(Method::GET, endpoints::PAYMENTS)?
                .query(&PaymentFilter { company_id }),
        )
        .await
    }

    #[instrument(skip(self), fields(company_id = payment.company_id))]
    pub async fn create_payment(&self, payment: &NewPayment) -> Result<Payment> {
        self.call(self.request(Method::POST, endpoints::PAYMENTS)?.json(payment))
            .await
    }
}
