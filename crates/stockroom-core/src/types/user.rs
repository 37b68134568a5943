//! User profile and permission types.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

/// Permission tags known to the stock route table.
///
/// The service owns the catalog; the client treats tags as opaque strings and
/// accepts any tag it receives.
pub mod permission {
    pub const INVENTORY: &str = "inventory";
    pub const STOCK_IN: &str = "stock_in";
    pub const STOCK_OUT: &str = "stock_out";
    pub const TRANSACTIONS: &str = "transactions";
    pub const PERFORMANCE: &str = "performance";
    pub const COMPANIES: &str = "companies";
    pub const FINANCE: &str = "finance";
    pub const STOCK_ORDERS: &str = "stock_orders";
}

/// A user profile as returned by the identity endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(rename = "name", default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub is_owner: bool,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "deserialize_permissions")]
    pub permissions: BTreeSet<String>,
    pub created_at: String,
    #[serde(default)]
    pub last_login: Option<String>,
}

fn default_active() -> bool {
    true
}

impl User {
    /// Returns true if the profile lists the permission tag.
    ///
    /// Ownership is not considered here; see
    /// [`Credential::has_permission`](crate::Credential::has_permission).
    pub fn lists_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }

    /// Name to show for this user, falling back to the username.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.username)
    }
}

/// The service stores permissions comma-joined and some endpoints leak that
/// form, so both a list and a string are accepted.
fn deserialize_permissions<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        List(Vec<String>),
        Joined(String),
        Missing(()),
    }

    let set = match Raw::deserialize(deserializer)? {
        Raw::List(list) => list.into_iter().filter(|p| !p.is_empty()).collect(),
        Raw::Joined(joined) => joined
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(String::from)
            .collect(),
        Raw::Missing(()) => BTreeSet::new(),
    };
    Ok(set)
}

/// Body for creating a user.
#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub username: String,
    pub name: String,
    pub password: String,
    pub permissions: Vec<String>,
}

/// Body for updating a user; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Response of the login endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: User,
}

fn default_token_type() -> String {
    "bearer".to_string()
}
