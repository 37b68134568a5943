//! Stock request and response layers.

use reqwest::StatusCode;
use reqwest::header::{AUTHORIZATION, HeaderValue};
use tracing::{debug, warn};

use stockroom_core::error::InvalidInputError;
use stockroom_core::{Navigator, Result, SessionContext};

use super::{RequestLayer, ResponseLayer};

/// Stamps `Authorization: Bearer <token>` when the session holds a token.
///
/// Requests that already carry an `Authorization` header are left alone.
#[derive(Debug, Clone)]
pub struct BearerAuth {
    session: SessionContext,
}

impl BearerAuth {
    pub fn new(session: SessionContext) -> Self {
        Self { session }
    }
}

impl RequestLayer for BearerAuth {
    fn name(&self) -> &'static str {
        "bearer-auth"
    }

    fn on_request(&self, request: &mut reqwest::Request) -> Result<()> {
        if request.headers().contains_key(AUTHORIZATION) {
            return Ok(());
        }

        let Some(token) = self.session.token() else {
            return Ok(());
        };

        let mut value =
            HeaderValue::from_str(&token.bearer()).map_err(|_| InvalidInputError::Header {
                name: AUTHORIZATION.to_string(),
            })?;
        value.set_sensitive(true);
        request.headers_mut().insert(AUTHORIZATION, value);
        Ok(())
    }
}

/// Reacts to authentication and authorization failures.
///
/// 401 logs the session out and sends the navigator to the login page; 403
/// sends it to the default page and keeps the session.
#[derive(Debug, Clone)]
pub struct AuthRedirect {
    navigator: Navigator,
}

impl AuthRedirect {
    pub fn new(navigator: Navigator) -> Self {
        Self { navigator }
    }
}

impl ResponseLayer for AuthRedirect {
    fn name(&self) -> &'static str {
        "auth-redirect"
    }

    fn on_status(&self, status: StatusCode) {
        match status {
            StatusCode::UNAUTHORIZED => {
                warn!("Request unauthorized, ending session");
                self.navigator.session().logout();
                self.navigator.redirect(self.navigator.guard().login_path());
            }
            StatusCode::FORBIDDEN => {
                debug!("Request forbidden");
                self.navigator
                    .redirect(self.navigator.guard().default_path());
            }
            _ => {}
        }
    }
}
