//! Operation log (owner only).

use reqwest::Method;
use tracing::instrument;

use stockroom_core::Result;
use stockroom_core::types::log::{LogQuery, OperationLog};

use crate::ApiClient;
use crate::endpoints;

impl ApiClient {
    #[instrument(skip(self))]
    pub async fn operation_logs(&self, query: &LogQuery) -> Result<Vec<OperationLog>> {
        self.call(self.request(Method::GET, endpoints::LOGS)?.query(query))
            .await
    }
}
