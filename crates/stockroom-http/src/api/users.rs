//! User administration (owner only).

use reqwest::Method;
use tracing::instrument;

use stockroom_core::Result;
use stockroom_core::types::{NewUser, User, UserUpdate};

use crate::ApiClient;
use crate::endpoints;

impl ApiClient {
    #[instrument(skip(self))]
    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.call(self.request(Method::GET, endpoints::USERS)?).await
    }

    #[instrument(skip(self, user), fields(username = %user.username))]
    pub async fn create_user(&self, user: &NewUser) -> Result<User> {
        self.call(self.request(Method::POST, endpoints::USERS)?.json(user))
            .await
    }

    #[instrument(skip(self, update))]
    pub async fn update_user(&self, id: i64, update: &UserUpdate) -> Result<User> {
        let id = id.to_string();
        self.call(
            self.request_at(Method::PUT, endpoints::USERS, &[&id])?
                .json(update),
        )
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_user(&self, id: i64) -> Result<()> {
        let id = id.to_string();
        self.call_unit(self.request_at(Method::DELETE, endpoints::USERS, &[&id])?)
            .await
    }
}
