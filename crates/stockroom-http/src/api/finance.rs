//! Income and expense entries outside stock trading.

use reqwest::Method;
use tracing::instrument;

use stockroom_core::Result;
use stockroom_core::types::Page;
use stockroom_core::types::finance::{FinanceQuery, NewOtherTransaction, OtherTransaction};

use crate::ApiClient;
use crate::endpoints;

impl ApiClient {
    #[instrument(skip(self))]
    pub async fn list_finance(&self, query: &FinanceQuery) -> Result<Page<OtherTransaction>> {
        self.call(
            self.request(Method::GET, endpoints::FINANCE_TRANSACTIONS)?
                .query(query),
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn create_finance(&self, entry: &NewOtherTransaction) -> Result<OtherTransaction> {
        self.call(
            self.request(Method::POST, endpoints::FINANCE_TRANSACTIONS)?
                .json(entry),
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_finance(&self, id: i64) -> Result<()> {
        let id = id.to_string();
        self.call_unit(self.request_at(Method::DELETE, endpoints::FINANCE_TRANSACTIONS, &[&id])?)
            .await
    }
}
