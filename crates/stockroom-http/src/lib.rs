//! stockroom-http - HTTP client for the stockroom service.
//!
//! Requests run through an explicit [`Pipeline`]: request layers (bearer
//! token), a retrying send, response layers (auth redirects), then status
//! mapping into [`stockroom_core::Error`].
//!
//! # Example
//!
//! ```no_run
//! use stockroom_core::{Credentials, Navigator, RouteTable, ServerUrl, SessionContext};
//! use stockroom_http::{ApiClient, ClientConfig};
//!
//! # async fn example() -> stockroom_core::Result<()> {
//! let session = SessionContext::in_memory();
//! let navigator = Navigator::new(RouteTable::standard(), session);
//! let server = ServerUrl::new("https://shop.example.com")?;
//! let client = ApiClient::new(ClientConfig::new(server), navigator.clone())?;
//!
//! client.login(&Credentials::new("owner", "secret")).await?;
//! navigator.navigate("/inventory", &client).await?;
//! # Ok(())
//! # }
//! ```

pub mod api;
mod client;
mod config;
pub mod endpoints;
mod error;
pub mod pipeline;

pub use client::ApiClient;
pub use config::{ClientConfig, DEFAULT_TIMEOUT};
pub use pipeline::{AuthRedirect, BearerAuth, Pipeline, RequestLayer, ResponseLayer, RetryPolicy};
