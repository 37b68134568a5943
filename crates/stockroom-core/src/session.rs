//! Session state shared by the request pipeline and the navigation guard.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::credential::Credential;
use crate::error::AuthError;
use crate::store::{CredentialStore, KeyValueStore, MemoryStore};
use crate::tokens::AccessToken;
use crate::traits::IdentityProvider;
use crate::types::User;
use crate::{Error, Result};

/// Default bound on one identity fetch during restoration.
pub const DEFAULT_RESTORE_TIMEOUT: Duration = Duration::from_secs(5);

/// The in-memory view of the credential, written through to durable storage.
///
/// One context is constructed by the application root and handed to the
/// request pipeline and the navigator. Clones share state.
///
/// # Example
///
/// ```
/// use stockroom_core::{AccessToken, SessionContext};
///
/// let session = SessionContext::in_memory();
/// session.set_token(AccessToken::new("abc"));
/// assert!(!session.is_logged_in()); // no profile yet
/// session.logout();
/// assert!(session.token().is_none());
/// ```
#[derive(Clone)]
pub struct SessionContext {
    inner: Arc<SessionInner>,
    restore_timeout: Duration,
}

struct SessionInner {
    credential: RwLock<Credential>,
    store: CredentialStore<Arc<dyn KeyValueStore>>,
    restore_lock: tokio::sync::Mutex<()>,
}

impl SessionContext {
    /// Load the credential from `medium` and build a session over it.
    pub fn open(medium: impl KeyValueStore + 'static) -> Result<Self> {
        let medium: Arc<dyn KeyValueStore> = Arc::new(medium);
        let store = CredentialStore::new(medium);
        let credential = store.load()?;

        debug!(
            has_token = credential.token().is_some(),
            has_user = credential.user().is_some(),
            "Loaded persisted credential"
        );

        Ok(Self::from_parts(store, credential))
    }

    /// A session that persists nothing beyond the process.
    pub fn in_memory() -> Self {
        let medium: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        Self::from_parts(CredentialStore::new(medium), Credential::empty())
    }

    fn from_parts(store: CredentialStore<Arc<dyn KeyValueStore>>, credential: Credential) -> Self {
        Self {
            inner: Arc::new(SessionInner {
                credential: RwLock::new(credential),
                store,
                restore_lock: tokio::sync::Mutex::new(()),
            }),
            restore_timeout: DEFAULT_RESTORE_TIMEOUT,
        }
    }

    /// Bound each identity fetch made by [`restore_user`](Self::restore_user).
    pub fn with_restore_timeout(mut self, timeout: Duration) -> Self {
        self.restore_timeout = timeout;
        self
    }

    pub fn restore_timeout(&self) -> Duration {
        self.restore_timeout
    }

    fn read(&self) -> RwLockReadGuard<'_, Credential> {
        self.inner
            .credential
            .read()
            .unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Credential> {
        self.inner
            .credential
            .write()
            .unwrap_or_else(|e| e.into_inner())
    }

    /// A consistent copy of the current credential.
    pub fn snapshot(&self) -> Credential {
        self.read().clone()
    }

    pub fn token(&self) -> Option<AccessToken> {
        self.read().token().cloned()
    }

    pub fn user(&self) -> Option<User> {
        self.read().user().cloned()
    }

    pub fn is_logged_in(&self) -> bool {
        self.read().is_logged_in()
    }

    pub fn is_owner(&self) -> bool {
        self.read().is_owner()
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.read().has_permission(permission)
    }

    /// Store a new token.
    ///
    /// Setting the current token again is a no-op. A different token drops
    /// the cached profile, which belonged to the previous token.
    #[instrument(skip_all)]
    pub fn set_token(&self, token: AccessToken) {
        let mut credential = self.write();
        if credential.token() == Some(&token) {
            return;
        }

        if credential.user().is_some() {
            credential.clear_user();
            if let Err(e) = self.inner.store.forget_user() {
                warn!(error = %e, "Failed to drop persisted user");
            }
        }

        if let Err(e) = self.inner.store.save_token(&token) {
            warn!(error = %e, "Failed to persist token");
        }
        credential.set_token(token);
        debug!("Token updated");
    }

    /// Cache the profile for the current token.
    ///
    /// Ignored when no token is held.
    #[instrument(skip_all, fields(username = %user.username))]
    pub fn set_user(&self, user: User) {
        let mut credential = self.write();
        if credential.token().is_none() {
            warn!("Ignoring user profile without a token");
            return;
        }

        if let Err(e) = self.inner.store.save_user(&user) {
            warn!(error = %e, "Failed to persist user");
        }
        credential.set_user(user);
    }

    /// Store a freshly issued token together with its profile.
    pub fn establish(&self, token: AccessToken, user: User) {
        self.set_token(token);
        self.set_user(user);
    }

    /// Forget the credential in memory and in storage. Idempotent.
    #[instrument(skip_all)]
    pub fn logout(&self) {
        let mut credential = self.write();
        let was_active = credential.token().is_some();
        credential.clear();

        if let Err(e) = self.inner.store.clear() {
            warn!(error = %e, "Failed to clear persisted credential");
        }

        if was_active {
            info!("Logged out");
        }
    }

    /// Make sure the profile for the current token is cached.
    ///
    /// Returns the cached profile without a network call when one is held.
    /// Otherwise fetches it once through `identity`, bounded by the restore
    /// timeout. Concurrent calls are serialised, so callers racing on the
    /// same token share a single fetch. Any failure logs the session out.
    #[instrument(skip_all)]
    pub async fn restore_user<I>(&self, identity: &I) -> Result<User>
    where
        I: IdentityProvider + ?Sized,
    {
        if let Some(user) = self.read().user() {
            return Ok(user.clone());
        }

        let _in_flight = self.inner.restore_lock.lock().await;

        let token = {
            let credential = self.read();
            if let Some(user) = credential.user() {
                debug!("Profile restored by a concurrent caller");
                return Ok(user.clone());
            }
            credential
                .token()
                .cloned()
                .ok_or(AuthError::NotAuthenticated)?
        };

        info!("Restoring user profile");

        let fetched = match tokio::time::timeout(self.restore_timeout, identity.current_user(&token))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(Error::from(AuthError::RestoreTimedOut {
                timeout_ms: self.restore_timeout.as_millis() as u64,
            })),
        };

        match fetched {
            Ok(user) => {
                let mut credential = self.write();
                if credential.token() != Some(&token) {
                    debug!("Discarding profile fetched for a replaced token");
                    return Err(AuthError::SessionChanged.into());
                }
                if let Err(e) = self.inner.store.save_user(&user) {
                    warn!(error = %e, "Failed to persist user");
                }
                credential.set_user(user.clone());
                info!(username = %user.username, "User profile restored");
                Ok(user)
            }
            Err(e) => {
                match self.read().token() {
                    Some(current) if current != &token => {
                        return Err(AuthError::SessionChanged.into());
                    }
                    // Already logged out, typically by the 401 handler.
                    None => return Err(e),
                    Some(_) => {}
                }
                warn!(error = %e, "Restoration failed, logging out");
                self.logout();
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let credential = self.read();
        f.debug_struct("SessionContext")
            .field("token", &credential.token().map(|_| "[REDACTED]"))
            .field("user", &credential.user().map(|u| u.username.as_str()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;
    use crate::credential::tests::user;
    use crate::error::ProtocolError;

    struct CountingIdentity {
        calls: AtomicUsize,
        delay: Duration,
        result: fn() -> Result<User>,
    }

    impl CountingIdentity {
        fn new(delay: Duration, result: fn() -> Result<User>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                delay,
                result,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl IdentityProvider for CountingIdentity {
        async fn current_user(&self, _token: &AccessToken) -> Result<User> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            (self.result)()
        }
    }

    fn clerk() -> Result<User> {
        Ok(user(false, &["inventory"]))
    }

    fn unauthorized() -> Result<User> {
        Err(AuthError::Unauthorized { detail: None }.into())
    }

    fn session_with_token(medium: &MemoryStore) -> SessionContext {
        let session = SessionContext::open(medium.clone()).unwrap();
        session.set_token(AccessToken::new("abc"));
        session
    }

    #[test]
    fn logout_clears_store() {
        let medium = MemoryStore::new();
        let session = session_with_token(&medium);
        session.set_user(user(false, &[]));
        assert!(session.is_logged_in());

        session.logout();
        session.logout();

        let reloaded = CredentialStore::new(medium).load().unwrap();
        assert_eq!(reloaded, Credential::empty());
        assert!(!session.is_logged_in());
    }

    #[test]
    fn state_survives_reload() {
        let medium = MemoryStore::new();
        let session = session_with_token(&medium);
        session.set_user(user(true, &[]));

        let reopened = SessionContext::open(medium).unwrap();
        assert!(reopened.is_logged_in());
        assert!(reopened.is_owner());
    }

    #[test]
    fn new_token_drops_cached_user() {
        let medium = MemoryStore::new();
        let session = session_with_token(&medium);
        session.set_user(user(false, &[]));

        session.set_token(AccessToken::new("abc"));
        assert!(session.user().is_some(), "same token keeps the profile");

        session.set_token(AccessToken::new("xyz"));
        assert!(session.user().is_none());
        assert!(CredentialStore::new(medium).load().unwrap().user().is_none());
    }

    #[test]
    fn user_without_token_is_ignored() {
        let session = SessionContext::in_memory();
        session.set_user(user(true, &[]));
        assert!(session.user().is_none());
        assert!(!session.has_permission("inventory"));
    }

    #[tokio::test]
    async fn restore_fetches_and_caches_profile() {
        let session = session_with_token(&MemoryStore::new());
        let identity = CountingIdentity::new(Duration::ZERO, clerk);

        let restored = session.restore_user(&identity).await.unwrap();
        assert_eq!(restored.username, "clerk");
        assert!(session.is_logged_in());

        session.restore_user(&identity).await.unwrap();
        assert_eq!(identity.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_restores_share_one_fetch() {
        let session = session_with_token(&MemoryStore::new());
        let identity = CountingIdentity::new(Duration::from_millis(200), clerk);

        let (a, b) = tokio::join!(
            session.restore_user(&identity),
            session.restore_user(&identity)
        );

        assert!(a.is_ok());
        assert!(b.is_ok());
        assert_eq!(identity.calls(), 1);
    }

    #[tokio::test]
    async fn restore_without_token_skips_network() {
        let session = SessionContext::in_memory();
        let identity = CountingIdentity::new(Duration::ZERO, clerk);

        let err = session.restore_user(&identity).await.unwrap_err();
        assert!(matches!(err, Error::Auth(AuthError::NotAuthenticated)));
        assert_eq!(identity.calls(), 0);
    }

    #[tokio::test]
    async fn rejected_restore_logs_out() {
        let medium = MemoryStore::new();
        let session = session_with_token(&medium);
        let identity = CountingIdentity::new(Duration::ZERO, unauthorized);

        let err = session.restore_user(&identity).await.unwrap_err();
        assert!(matches!(err, Error::Auth(AuthError::Unauthorized { .. })));
        assert!(session.token().is_none());
        assert!(medium.is_empty());
    }

    struct RevokingIdentity {
        session: SessionContext,
    }

    #[async_trait]
    impl IdentityProvider for RevokingIdentity {
        async fn current_user(&self, _token: &AccessToken) -> Result<User> {
            self.session.logout();
            Err(AuthError::Unauthorized {
                detail: Some("Token expired".to_string()),
            }
            .into())
        }
    }

    #[tokio::test]
    async fn rejection_after_forced_logout_keeps_original_error() {
        let session = session_with_token(&MemoryStore::new());
        let identity = RevokingIdentity {
            session: session.clone(),
        };

        let err = session.restore_user(&identity).await.unwrap_err();
        match err {
            Error::Auth(AuthError::Unauthorized { detail }) => {
                assert_eq!(detail.as_deref(), Some("Token expired"));
            }
            other => panic!("expected Unauthorized, got {other:?}"),
        }
        assert!(session.token().is_none());
    }

    #[tokio::test]
    async fn malformed_identity_response_logs_out() {
        let session = session_with_token(&MemoryStore::new());
        let identity = CountingIdentity::new(Duration::ZERO, || {
            Err(ProtocolError::new(200, Some("missing field `id`".to_string())).into())
        });

        assert!(session.restore_user(&identity).await.is_err());
        assert!(session.token().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn timed_out_restore_logs_out() {
        let medium = MemoryStore::new();
        let session = session_with_token(&medium).with_restore_timeout(Duration::from_secs(5));
        let identity = CountingIdentity::new(Duration::from_secs(60), clerk);

        let err = session.restore_user(&identity).await.unwrap_err();
        assert!(matches!(
            err,
            Error::Auth(AuthError::RestoreTimedOut { timeout_ms: 5000 })
        ));
        assert!(!session.is_logged_in());
        assert!(medium.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn profile_for_replaced_token_is_discarded() {
        let session = session_with_token(&MemoryStore::new());
        let identity = CountingIdentity::new(Duration::from_millis(100), clerk);

        let swap = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            session.set_token(AccessToken::new("newer"));
        };
        let (restored, ()) = tokio::join!(session.restore_user(&identity), swap);

        assert!(matches!(
            restored,
            Err(Error::Auth(AuthError::SessionChanged))
        ));
        assert_eq!(session.token(), Some(AccessToken::new("newer")));
        assert!(session.user().is_none());
    }
}
