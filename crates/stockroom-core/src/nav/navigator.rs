//! Guarded navigation with last-navigation-wins semantics.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{debug, info, instrument};

use crate::error::NavError;
use crate::session::SessionContext;
use crate::traits::IdentityProvider;
use crate::Result;

use super::guard::{GuardDecision, NavigationGuard};
use super::route::{Route, RouteTable, normalize};

/// Upper bound on redirects followed for one navigation.
const MAX_REDIRECTS: usize = 8;

/// How a navigation attempt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The requested route was committed.
    Arrived { path: String },
    /// The attempt was redirected and the final target committed.
    Redirected { from: String, to: String },
    /// A newer navigation started first; nothing was committed.
    Superseded,
}

impl NavigationOutcome {
    /// The committed location, if any.
    pub fn location(&self) -> Option<&str> {
        match self {
            NavigationOutcome::Arrived { path } => Some(path),
            NavigationOutcome::Redirected { to, .. } => Some(to),
            NavigationOutcome::Superseded => None,
        }
    }
}

/// Applies the guard to navigation attempts and tracks the current location.
///
/// Every attempt is stamped with a generation number. An attempt only
/// commits if no newer attempt (or forced [`redirect`](Self::redirect)) has
/// started since, so a slow guard can never overwrite a newer location.
#[derive(Clone)]
pub struct Navigator {
    inner: Arc<NavigatorInner>,
}

struct NavigatorInner {
    routes: RouteTable,
    guard: NavigationGuard,
    generation: AtomicU64,
    location: watch::Sender<Option<String>>,
}

impl Navigator {
    pub fn new(routes: RouteTable, session: SessionContext) -> Self {
        Self {
            inner: Arc::new(NavigatorInner {
                routes,
                guard: NavigationGuard::new(session),
                generation: AtomicU64::new(0),
                location: watch::Sender::new(None),
            }),
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.inner.routes
    }

    pub fn guard(&self) -> &NavigationGuard {
        &self.inner.guard
    }

    pub fn session(&self) -> &SessionContext {
        self.inner.guard.session()
    }

    /// The committed location, or `None` before the first navigation.
    pub fn current(&self) -> Option<String> {
        self.inner.location.borrow().clone()
    }

    /// Watch committed locations.
    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.inner.location.subscribe()
    }

    fn begin(&self) -> u64 {
        self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_latest(&self, generation: u64) -> bool {
        self.inner.generation.load(Ordering::SeqCst) == generation
    }

    /// Follow static aliases from `path`.
    fn resolve(&self, path: &str) -> Result<&Route> {
        let mut route = self.lookup(path)?;
        for _ in 0..MAX_REDIRECTS {
            match route.redirect.as_deref() {
                Some(target) => route = self.lookup(target)?,
                None => return Ok(route),
            }
        }
        Err(NavError::RedirectLoop {
            path: path.to_string(),
        }
        .into())
    }

    fn lookup(&self, path: &str) -> Result<&Route> {
        self.inner.routes.lookup(path).ok_or_else(|| {
            NavError::UnknownRoute {
                path: path.to_string(),
            }
            .into()
        })
    }

    /// Commit `path` if `generation` is still the latest attempt.
    fn commit(&self, generation: u64, path: &str) -> bool {
        self.inner.location.send_if_modified(|location| {
            if !self.is_latest(generation) {
                return false;
            }
            *location = Some(path.to_string());
            true
        })
    }

    /// Navigate to `path`, running the guard before committing.
    ///
    /// Guard side effects (a forced logout after failed restoration) apply
    /// even when the attempt ends up superseded.
    #[instrument(skip(self, identity))]
    pub async fn navigate<I>(&self, path: &str, identity: &I) -> Result<NavigationOutcome>
    where
        I: IdentityProvider + ?Sized,
    {
        let generation = self.begin();
        let requested = normalize(path);
        let mut target = requested.clone();

        for _ in 0..MAX_REDIRECTS {
            let route = self.resolve(&target)?;

            let decision = self.inner.guard.check(route, identity).await;

            if !self.is_latest(generation) {
                debug!(generation, "Navigation superseded");
                return Ok(NavigationOutcome::Superseded);
            }

            match decision {
                GuardDecision::Allow => {
                    let landed = route.path.clone();
                    if !self.commit(generation, &landed) {
                        debug!(generation, "Navigation superseded at commit");
                        return Ok(NavigationOutcome::Superseded);
                    }
                    debug!(path = %landed, "Navigation committed");
                    return Ok(if landed == requested {
                        NavigationOutcome::Arrived { path: landed }
                    } else {
                        NavigationOutcome::Redirected {
                            from: requested,
                            to: landed,
                        }
                    });
                }
                GuardDecision::Redirect(next) => {
                    debug!(from = %route.path, to = %next, "Guard redirect");
                    target = next;
                }
            }
        }

        Err(NavError::RedirectLoop { path: requested }.into())
    }

    /// Move to `path` immediately, without running the guard.
    ///
    /// Used when the request pipeline detects an authentication or
    /// authorization failure. Invalidates any navigation still in its guard.
    pub fn redirect(&self, path: &str) {
        self.begin();
        let landed = self
            .resolve(path)
            .map(|r| r.path.clone())
            .unwrap_or_else(|_| normalize(path));
        info!(path = %landed, "Forced redirect");
        self.inner.location.send_replace(Some(landed));
    }
}

impl std::fmt::Debug for Navigator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("current", &self.current())
            .field("generation", &self.inner.generation.load(Ordering::SeqCst))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;
    use crate::credential::tests::user;
    use crate::error::AuthError;
    use crate::store::{CredentialStore, MemoryStore};
    use crate::types::User;
    use crate::{AccessToken, Credential};

    /// Identity endpoint stand-in.
    struct FakeIdentity {
        user: Option<User>,
        calls: AtomicUsize,
        gate: Option<Notify>,
        delay: Duration,
    }

    impl FakeIdentity {
        fn returning(user: User) -> Self {
            Self {
                user: Some(user),
                calls: AtomicUsize::new(0),
                gate: None,
                delay: Duration::ZERO,
            }
        }

        fn rejecting() -> Self {
            Self {
                user: None,
                calls: AtomicUsize::new(0),
                gate: None,
                delay: Duration::ZERO,
            }
        }

        fn gated(user: User) -> Self {
            Self {
                gate: Some(Notify::new()),
                ..Self::returning(user)
            }
        }

        fn slow(user: User, delay: Duration) -> Self {
            Self {
                delay,
                ..Self::returning(user)
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl IdentityProvider for FakeIdentity {
        async fn current_user(&self, _token: &AccessToken) -> Result<User> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            tokio::time::sleep(self.delay).await;
            self.user
                .clone()
                .ok_or_else(|| AuthError::Unauthorized { detail: None }.into())
        }
    }

    fn navigator_with_token(medium: &MemoryStore) -> Navigator {
        let session = SessionContext::open(medium.clone()).unwrap();
        session.set_token(AccessToken::new("abc"));
        Navigator::new(RouteTable::standard(), session)
    }

    #[tokio::test]
    async fn anonymous_visitor_is_sent_to_login() {
        let navigator = Navigator::new(RouteTable::standard(), SessionContext::in_memory());
        let identity = FakeIdentity::rejecting();

        let outcome = navigator.navigate("/dashboard", &identity).await.unwrap();
        assert_eq!(
            outcome,
            NavigationOutcome::Redirected {
                from: "/dashboard".to_string(),
                to: "/login".to_string()
            }
        );

        let outcome = navigator.navigate("/login", &identity).await.unwrap();
        assert_eq!(
            outcome,
            NavigationOutcome::Arrived {
                path: "/login".to_string()
            }
        );
        assert_eq!(identity.calls(), 0);
    }

    #[tokio::test]
    async fn restored_profile_gates_by_permission() {
        let navigator = navigator_with_token(&MemoryStore::new());
        let identity = FakeIdentity::returning(user(false, &["inventory"]));

        let outcome = navigator.navigate("/stock-in", &identity).await.unwrap();
        assert_eq!(outcome.location(), Some("/dashboard"));
        assert!(matches!(outcome, NavigationOutcome::Redirected { .. }));

        let outcome = navigator.navigate("/inventory", &identity).await.unwrap();
        assert_eq!(
            outcome,
            NavigationOutcome::Arrived {
                path: "/inventory".to_string()
            }
        );
        assert_eq!(identity.calls(), 1);
    }

    #[tokio::test]
    async fn owner_routes_need_an_owner() {
        let navigator = navigator_with_token(&MemoryStore::new());

        let clerk = FakeIdentity::returning(user(false, &["inventory", "finance"]));
        let outcome = navigator.navigate("/users", &clerk).await.unwrap();
        assert_eq!(outcome.location(), Some("/dashboard"));

        navigator.session().logout();
        navigator.session().set_token(AccessToken::new("owner-token"));
        let owner = FakeIdentity::returning(user(true, &[]));
        for path in ["/users", "/logs", "/stock-in", "/finance"] {
            let outcome = navigator.navigate(path, &owner).await.unwrap();
            assert_eq!(outcome.location(), Some(path));
        }
    }

    #[tokio::test]
    async fn logged_in_user_skips_login_page() {
        let navigator = navigator_with_token(&MemoryStore::new());
        navigator.session().set_user(user(false, &[]));
        let identity = FakeIdentity::rejecting();

        let outcome = navigator.navigate("/login", &identity).await.unwrap();
        assert_eq!(outcome.location(), Some("/dashboard"));
    }

    #[tokio::test]
    async fn failed_restoration_logs_out_and_redirects() {
        let medium = MemoryStore::new();
        let navigator = navigator_with_token(&medium);
        let identity = FakeIdentity::rejecting();

        let outcome = navigator.navigate("/inventory", &identity).await.unwrap();
        assert_eq!(outcome.location(), Some("/login"));
        assert!(navigator.session().token().is_none());
        assert_eq!(
            CredentialStore::new(medium).load().unwrap(),
            Credential::empty()
        );
    }

    #[tokio::test(start_paused = true)]
    async fn restoration_timeout_redirects_to_login() {
        let medium = MemoryStore::new();
        let navigator = navigator_with_token(&medium);
        let identity = FakeIdentity::slow(user(true, &[]), Duration::from_secs(30));

        let outcome = navigator.navigate("/dashboard", &identity).await.unwrap();
        assert_eq!(outcome.location(), Some("/login"));
        assert!(!navigator.session().is_logged_in());
        assert!(medium.is_empty());
    }

    #[tokio::test]
    async fn unknown_paths_land_on_dashboard() {
        let navigator = navigator_with_token(&MemoryStore::new());
        let identity = FakeIdentity::returning(user(false, &[]));

        let outcome = navigator.navigate("/nowhere", &identity).await.unwrap();
        assert_eq!(outcome.location(), Some("/dashboard"));
    }

    #[tokio::test]
    async fn slow_guard_does_not_override_newer_navigation() {
        let navigator = navigator_with_token(&MemoryStore::new());
        let identity = FakeIdentity::gated(user(false, &["inventory"]));

        let slow = navigator.navigate("/inventory", &identity);
        let fast = async {
            tokio::task::yield_now().await;
            let outcome = navigator.navigate("/login", &identity).await;
            if let Some(gate) = &identity.gate {
                gate.notify_one();
            }
            outcome
        };

        let (slow, fast) = tokio::join!(slow, fast);

        assert_eq!(slow.unwrap(), NavigationOutcome::Superseded);
        assert_eq!(fast.unwrap().location(), Some("/login"));
        assert_eq!(navigator.current().as_deref(), Some("/login"));
        // The restoration itself still took effect.
        assert!(navigator.session().is_logged_in());
    }

    #[tokio::test]
    async fn forced_redirect_resolves_aliases() {
        let navigator = Navigator::new(RouteTable::standard(), SessionContext::in_memory());
        let mut locations = navigator.subscribe();

        navigator.redirect("/");
        assert_eq!(navigator.current().as_deref(), Some("/dashboard"));
        assert!(locations.has_changed().unwrap());
        assert_eq!(locations.borrow_and_update().as_deref(), Some("/dashboard"));
    }
}
