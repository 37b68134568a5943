//! Persistent credential storage.
//!
//! A [`KeyValueStore`] is the durable medium (the browser-local-storage
//! equivalent); [`CredentialStore`] maps the credential onto two keys of it.

mod memory;

use tracing::{debug, warn};

use crate::Result;
use crate::credential::Credential;
use crate::error::StorageError;
use crate::tokens::AccessToken;
use crate::types::User;

pub use memory::MemoryStore;

/// Key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";

/// Key holding the JSON-serialized user profile.
pub const USER_KEY: &str = "user";

/// A durable string key/value medium.
pub trait KeyValueStore: Send + Sync {
    /// Read a key.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a key; durable when this returns.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove several keys in one durable step.
    ///
    /// A reader must never observe a state where only some of `keys` are
    /// gone.
    fn remove_all(&self, keys: &[&str]) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove_all(&self, keys: &[&str]) -> Result<()> {
        (**self).remove_all(keys)
    }
}

/// Maps a [`Credential`] onto the `token` and `user` keys of a medium.
#[derive(Debug, Clone)]
pub struct CredentialStore<S> {
    medium: S,
}

impl<S: KeyValueStore> CredentialStore<S> {
    pub fn new(medium: S) -> Self {
        Self { medium }
    }

    /// Returns the underlying medium.
    pub fn medium(&self) -> &S {
        &self.medium
    }

    /// Reconstruct the credential from the medium.
    ///
    /// A missing, unreadable or corrupt user yields an absent user.
    pub fn load(&self) -> Result<Credential> {
        let token = self.medium.get(TOKEN_KEY)?.map(AccessToken::new);

        let user = match self.medium.get(USER_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    warn!(error = %e, "Discarding corrupt persisted user");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Failed to read persisted user");
                None
            }
        };

        if token.is_none() && user.is_some() {
            debug!("Dropping persisted user without a token");
        }

        Ok(Credential::new(token, user))
    }

    pub fn save_token(&self, token: &AccessToken) -> Result<()> {
        self.medium.set(TOKEN_KEY, token.as_str())
    }

    pub fn save_user(&self, user: &User) -> Result<()> {
        let json = serde_json::to_string(user).map_err(|e| StorageError::Encoding {
            message: e.to_string(),
        })?;
        self.medium.set(USER_KEY, &json)
    }

    /// Drop a persisted user while keeping the token.
    pub fn forget_user(&self) -> Result<()> {
        self.medium.remove_all(&[USER_KEY])
    }

    /// Remove both keys in one step.
    pub fn clear(&self) -> Result<()> {
        self.medium.remove_all(&[TOKEN_KEY, USER_KEY])
    }
}
