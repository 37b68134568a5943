//! Identity endpoint trait.

use async_trait::async_trait;

use crate::types::User;
use crate::{AccessToken, Result};

/// Resolves a bearer token to the profile it was issued for.
///
/// Implemented by the HTTP client against `GET /api/v1/auth/users/me`; the
/// session core only depends on this trait.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Fetch the profile for `token`.
    async fn current_user(&self, token: &AccessToken) -> Result<User>;
}
