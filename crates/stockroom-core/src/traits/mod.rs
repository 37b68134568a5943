//! Seams between the session core and the network layer.

mod identity;

pub use identity::IdentityProvider;
