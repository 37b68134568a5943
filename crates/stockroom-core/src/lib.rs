//! stockroom-core - session state, credential storage and navigation guard
//! for the stockroom inventory and finance client.
//!
//! The network layer lives in `stockroom-http`; this crate reaches the
//! identity endpoint only through [`IdentityProvider`].
//!
//! # Example
//!
//! ```
//! use stockroom_core::{AccessToken, Navigator, RouteTable, SessionContext};
//!
//! let session = SessionContext::in_memory();
//! let navigator = Navigator::new(RouteTable::standard(), session.clone());
//!
//! session.set_token(AccessToken::new("abc"));
//! assert!(navigator.current().is_none());
//! ```

pub mod credential;
pub mod credentials;
pub mod error;
pub mod nav;
pub mod session;
pub mod store;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credential::Credential;
pub use credentials::Credentials;
pub use error::Error;
pub use nav::{GuardDecision, NavigationGuard, NavigationOutcome, Navigator, RouteTable};
pub use session::SessionContext;
pub use store::{CredentialStore, KeyValueStore, MemoryStore};
pub use tokens::AccessToken;
pub use traits::IdentityProvider;
pub use types::{ServerUrl, User};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
