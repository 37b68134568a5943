//! Pre-navigation access checks.

use tracing::{debug, warn};

use crate::session::SessionContext;
use crate::traits::IdentityProvider;

use super::route::{DEFAULT_PATH, LOGIN_PATH, Route};

/// What the guard decided for one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

impl GuardDecision {
    fn redirect(path: &str) -> Self {
        GuardDecision::Redirect(path.to_string())
    }
}

/// Decides whether a navigation may commit, restoring the session profile
/// when only a token is held.
#[derive(Debug, Clone)]
pub struct NavigationGuard {
    session: SessionContext,
    login_path: String,
    default_path: String,
}

impl NavigationGuard {
    pub fn new(session: SessionContext) -> Self {
        Self {
            session,
            login_path: LOGIN_PATH.to_string(),
            default_path: DEFAULT_PATH.to_string(),
        }
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn default_path(&self) -> &str {
        &self.default_path
    }

    /// Evaluate the access rules for `route`, in order:
    ///
    /// 1. public routes pass, except the login page for a logged-in user;
    /// 2. a token without a profile triggers restoration, and failure sends
    ///    the visitor to the login page;
    /// 3. auth routes need a session;
    /// 4. owner routes need an owner;
    /// 5. permission routes need the permission.
    pub async fn check<I>(&self, route: &Route, identity: &I) -> GuardDecision
    where
        I: IdentityProvider + ?Sized,
    {
        let meta = &route.meta;

        if !meta.requires_auth {
            if route.path == self.login_path && self.session.is_logged_in() {
                debug!(path = %route.path, "Already logged in");
                return GuardDecision::redirect(&self.default_path);
            }
            return GuardDecision::Allow;
        }

        if self.session.snapshot().needs_restore() {
            if let Err(e) = self.session.restore_user(identity).await {
                warn!(path = %route.path, error = %e, "Session restoration failed");
                return GuardDecision::redirect(&self.login_path);
            }
        }

        // One snapshot for every remaining check.
        let credential = self.session.snapshot();

        if !credential.is_logged_in() {
            return GuardDecision::redirect(&self.login_path);
        }

        if meta.requires_owner && !credential.is_owner() {
            debug!(path = %route.path, "Owner-only route");
            return GuardDecision::redirect(&self.default_path);
        }

        if let Some(permission) = meta.permission.as_deref() {
            if !credential.has_permission(permission) {
                debug!(path = %route.path, permission, "Missing permission");
                return GuardDecision::redirect(&self.default_path);
            }
        }

        GuardDecision::Allow
    }
}
