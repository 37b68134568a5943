//! The stockroom API client.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

use stockroom_core::error::{InvalidInputError, TransportError};
use stockroom_core::types::LoginResponse;
use stockroom_core::{
    AccessToken, Credentials, IdentityProvider, Navigator, Result, ServerUrl, SessionContext,
    User,
};

use crate::config::ClientConfig;
use crate::endpoints;
use crate::pipeline::{AuthRedirect, BearerAuth, Pipeline, RetryPolicy};

/// Retries used for login and the company list.
pub(crate) const PATIENT_RETRY: RetryPolicy = RetryPolicy {
    max_retries: 3,
    delay: std::time::Duration::from_secs(1),
};

/// HTTP client for the stockroom service.
///
/// Every request goes through one [`Pipeline`] wired to the shared session
/// and navigator: the bearer token is stamped from the session, a 401 ends
/// the session and redirects to the login page, a 403 redirects to the
/// default page.
#[derive(Debug, Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    config: ClientConfig,
    pipeline: Pipeline,
    navigator: Navigator,
}

impl ApiClient {
    /// Create a client bound to `navigator` and its session.
    pub fn new(config: ClientConfig, navigator: Navigator) -> Result<Self> {
        let http = config.build_http()?;
        let pipeline = Pipeline::new(http, config.retry)
            .with_request_layer(BearerAuth::new(navigator.session().clone()))
            .with_response_layer(AuthRedirect::new(navigator.clone()));

        Ok(Self {
            inner: Arc::new(ClientInner {
                config,
                pipeline,
                navigator,
            }),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    pub fn server(&self) -> &ServerUrl {
        &self.inner.config.server
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.inner.pipeline
    }

    pub fn navigator(&self) -> &Navigator {
        &self.inner.navigator
    }

    pub fn session(&self) -> &SessionContext {
        self.inner.navigator.session()
    }

    /// Absolute URL of `path` with `segments` appended, each percent-encoded.
    pub(crate) fn url(&self, path: &str, segments: &[&str]) -> Result<Url> {
        let raw = self.server().api_url(path);
        let mut url = Url::parse(&raw).map_err(|e| InvalidInputError::Other {
            message: format!("bad request URL {}: {}", raw, e),
        })?;

        if !segments.is_empty() {
            let mut parts = url.path_segments_mut().map_err(|_| InvalidInputError::Other {
                message: format!("cannot extend URL {}", raw),
            })?;
            parts.extend(segments);
        }

        Ok(url)
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        self.request_at(method, path, &[])
    }

    pub(crate) fn request_at(
        &self,
        method: Method,
        path: &str,
        segments: &[&str],
    ) -> Result<RequestBuilder> {
        let url = self.url(path, segments)?;
        Ok(self.inner.pipeline.http().request(method, url))
    }

    fn build(builder: RequestBuilder) -> Result<reqwest::Request> {
        builder.build().map_err(|e| {
            TransportError::Http {
                message: format!("failed to build request: {}", e),
            }
            .into()
        })
    }

    pub(crate) async fn call<R: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<R> {
        self.inner.pipeline.execute(Self::build(builder)?, None).await
    }

    pub(crate) async fn call_with_retry<R: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        retry: &RetryPolicy,
    ) -> Result<R> {
        self.inner
            .pipeline
            .execute(Self::build(builder)?, Some(retry))
            .await
    }

    pub(crate) async fn call_unit(&self, builder: RequestBuilder) -> Result<()> {
        self.inner
            .pipeline
            .execute_unit(Self::build(builder)?, None)
            .await
    }

    /// Log in with a username and password.
    ///
    /// On success the token and profile are stored in the session.
    #[instrument(skip(self, credentials), fields(server = %self.server(), username = credentials.username()))]
    pub async fn login(&self, credentials: &Credentials) -> Result<User> {
        let form = [
            ("username", credentials.username()),
            ("password", credentials.password()),
        ];
        let builder = self.request(Method::POST, endpoints::LOGIN)?.form(&form);
        let response: LoginResponse = self.call_with_retry(builder, &PATIENT_RETRY).await?;

        debug!(token_type = %response.token_type, "Login accepted");
        self.session()
            .establish(AccessToken::new(response.access_token), response.user.clone());
        info!(user = %response.user.username, "Logged in");

        Ok(response.user)
    }

    /// End the session and send the navigator to the login page.
    pub fn logout(&self) {
        self.session().logout();
        let navigator = self.navigator();
        navigator.redirect(navigator.guard().login_path());
    }

    /// Fetch the profile of the current session's user.
    #[instrument(skip(self), fields(server = %self.server()))]
    pub async fn me(&self) -> Result<User> {
        self.call(self.request(Method::GET, endpoints::CURRENT_USER)?)
            .await
    }

    /// Restore the session profile from the identity endpoint if needed.
    pub async fn restore(&self) -> Result<User> {
        self.session().restore_user(self).await
    }
}

#[async_trait]
impl IdentityProvider for ApiClient {
    #[instrument(skip(self, token), fields(server = %self.server()))]
    async fn current_user(&self, token: &AccessToken) -> Result<User> {
        let mut value =
            HeaderValue::from_str(&token.bearer()).map_err(|_| InvalidInputError::Header {
                name: AUTHORIZATION.to_string(),
            })?;
        value.set_sensitive(true);

        let builder = self
            .request(Method::GET, endpoints::CURRENT_USER)?
            .header(AUTHORIZATION, value);
        self.call(builder).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::RouteTable;

    fn client(server: &str) -> ApiClient {
        let session = SessionContext::in_memory();
        let navigator = Navigator::new(RouteTable::standard(), session);
        let config = ClientConfig::new(ServerUrl::new(server).unwrap());
        ApiClient::new(config, navigator).unwrap()
    }

    #[test]
    fn client_creation() {
        let client = client("https://shop.example.com");
        assert_eq!(client.server().as_str(), "https://shop.example.com/");
        assert_eq!(client.pipeline().request_layers(), vec!["bearer-auth"]);
    }

    #[test]
    fn path_segments_are_encoded() {
        let client = client("https://shop.example.com");
        let url = client.url(endpoints::INVENTORY, &["69 01/2"]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://shop.example.com/api/v1/inventory/69%2001%2F2"
        );
    }

    #[test]
    fn logout_redirects_to_login() {
        let client = client("https://shop.example.com");
        client.session().set_token(AccessToken::new("abc"));

        client.logout();

        assert!(client.session().token().is_none());
        assert_eq!(client.navigator().current().as_deref(), Some("/login"));
    }
}
