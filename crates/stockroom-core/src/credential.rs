//! The credential pair held by a session.

use crate::tokens::AccessToken;
use crate::types::User;

/// A bearer token together with the profile it was issued for.
///
/// A profile is only meaningful alongside a token, so constructing a
/// credential with a user but no token drops the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credential {
    token: Option<AccessToken>,
    user: Option<User>,
}

impl Credential {
    pub fn new(token: Option<AccessToken>, user: Option<User>) -> Self {
        let user = if token.is_some() { user } else { None };
        Self { token, user }
    }

    /// A credential holding neither token nor user.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn token(&self) -> Option<&AccessToken> {
        self.token.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Token present and user present.
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some() && self.user.is_some()
    }

    pub fn is_owner(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_owner)
    }

    /// Owners hold every permission; others hold what their profile lists.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.is_owner()
            || self
                .user
                .as_ref()
                .is_some_and(|u| u.lists_permission(permission))
    }

    /// A token is held but its profile has not been fetched yet.
    pub fn needs_restore(&self) -> bool {
        self.token.is_some() && self.user.is_none()
    }

    pub(crate) fn set_token(&mut self, token: AccessToken) {
        self.token = Some(token);
    }

    pub(crate) fn set_user(&mut self, user: User) {
        if self.token.is_some() {
            self.user = Some(user);
        }
    }

    pub(crate) fn clear_user(&mut self) {
        self.user = None;
    }

    pub(crate) fn clear(&mut self) {
        self.token = None;
        self.user = None;
    }
}
