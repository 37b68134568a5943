//! Request pipeline: request layers, retrying send, response layers and
//! status mapping.

mod layers;
mod retry;

use std::fmt;
use std::sync::Arc;

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, trace};

use stockroom_core::Result;
use stockroom_core::error::{AuthError, ProtocolError};

use crate::error::{decode_body, error_detail, transport_error};

pub use layers::{AuthRedirect, BearerAuth};
pub use retry::RetryPolicy;

/// Mutates an outgoing request before it is sent.
pub trait RequestLayer: Send + Sync {
    /// Short name used in logs and for inspecting the chain.
    fn name(&self) -> &'static str;

    fn on_request(&self, request: &mut reqwest::Request) -> Result<()>;
}

/// Observes the status of every response before it is mapped.
pub trait ResponseLayer: Send + Sync {
    fn name(&self) -> &'static str;

    fn on_status(&self, status: StatusCode);
}

/// An ordered middleware chain around one `reqwest::Client`.
#[derive(Clone)]
pub struct Pipeline {
    http: reqwest::Client,
    request_layers: Vec<Arc<dyn RequestLayer>>,
    response_layers: Vec<Arc<dyn ResponseLayer>>,
    retry: RetryPolicy,
}

impl Pipeline {
    /// A pipeline with no layers.
    pub fn new(http: reqwest::Client, retry: RetryPolicy) -> Self {
        Self {
            http,
            request_layers: Vec::new(),
            response_layers: Vec::new(),
            retry,
        }
    }

    pub fn with_request_layer(mut self, layer: impl RequestLayer + 'static) -> Self {
        self.request_layers.push(Arc::new(layer));
        self
    }

    pub fn with_response_layer(mut self, layer: impl ResponseLayer + 'static) -> Self {
        self.response_layers.push(Arc::new(layer));
        self
    }

    /// Names of the request layers, in application order.
    pub fn request_layers(&self) -> Vec<&'static str> {
        self.request_layers.iter().map(|l| l.name()).collect()
    }

    /// Names of the response layers, in application order.
    pub fn response_layers(&self) -> Vec<&'static str> {
        self.response_layers.iter().map(|l| l.name()).collect()
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Run `request` through the chain and decode a successful body.
    ///
    /// An empty body decodes as JSON `null`, so `R = ()` accepts it.
    pub async fn execute<R>(
        &self,
        request: reqwest::Request,
        retry: Option<&RetryPolicy>,
    ) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let response = self.send(request, retry).await?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(transport_error)?;
        decode_body(status, &bytes)
    }

    /// Run `request` through the chain and discard a successful body.
    pub async fn execute_unit(
        &self,
        request: reqwest::Request,
        retry: Option<&RetryPolicy>,
    ) -> Result<()> {
        self.send(request, retry).await.map(|_| ())
    }

    /// Run `request` through the chain, returning the raw successful
    /// response.
    pub async fn send(
        &self,
        mut request: reqwest::Request,
        retry: Option<&RetryPolicy>,
    ) -> Result<reqwest::Response> {
        for layer in &self.request_layers {
            trace!(layer = layer.name(), "Applying request layer");
            layer.on_request(&mut request)?;
        }

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "Sending request");

        let policy = retry.unwrap_or(&self.retry);
        let response = policy
            .send(&self.http, request)
            .await
            .map_err(transport_error)?;

        let status = response.status();
        trace!(%status, %url, "Response received");

        for layer in &self.response_layers {
            layer.on_status(status);
        }

        if status.is_success() {
            return Ok(response);
        }

        let bytes = response.bytes().await.unwrap_or_default();
        let detail = error_detail(&bytes);
        debug!(%status, %url, detail = detail.as_deref(), "Request failed");

        Err(match status {
            StatusCode::UNAUTHORIZED => AuthError::Unauthorized { detail }.into(),
            StatusCode::FORBIDDEN => AuthError::Forbidden { detail }.into(),
            _ => ProtocolError::new(status.as_u16(), detail).into(),
        })
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("request_layers", &self.request_layers())
            .field("response_layers", &self.response_layers())
            .field("retry", &self.retry)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::{Navigator, RouteTable, SessionContext};

    #[test]
    fn layers_are_inspectable_in_order() {
        let session = SessionContext::in_memory();
        let navigator = Navigator::new(RouteTable::standard(), session.clone());
        let pipeline = Pipeline::new(reqwest::Client::new(), RetryPolicy::default())
            .with_request_layer(BearerAuth::new(session))
            .with_response_layer(AuthRedirect::new(navigator));

        assert_eq!(pipeline.request_layers(), vec!["bearer-auth"]);
        assert_eq!(pipeline.response_layers(), vec!["auth-redirect"]);
        assert_eq!(pipeline.retry_policy().max_retries, 2);
    }
}
