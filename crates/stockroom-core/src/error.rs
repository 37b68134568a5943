//! Error types for the stockroom client.
//!
//! This module provides a unified error type with explicit variants for
//! transport, authentication, protocol, storage, navigation and input
//! validation errors.

use std::fmt;
use thiserror::Error;

/// The unified error type for stockroom operations.
///
/// Callers can match on the variant to tell a transient network failure
/// from an authentication failure or a validation error reported by the
/// service.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (no response was received).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication and authorization errors.
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Error statuses and malformed responses from the service.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Input validation errors (bad server URL, bad header value).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Durable credential storage errors.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// Navigation errors.
    #[error("navigation error: {0}")]
    Nav(#[from] NavError),
}

impl Error {
    /// Returns true if the failure happened before any response arrived.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Transport(_))
    }

    /// Returns the service-supplied detail message, if the error carries one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Error::Protocol(err) => err.detail.as_deref(),
            Error::Auth(AuthError::Unauthorized { detail })
            | Error::Auth(AuthError::Forbidden { detail }) => detail.as_deref(),
            _ => None,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Any other client-side HTTP failure.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The service rejected the bearer token or the login (HTTP 401).
    #[error("unauthorized{}", detail_suffix(.detail))]
    Unauthorized { detail: Option<String> },

    /// The caller lacks access to the resource (HTTP 403).
    #[error("forbidden{}", detail_suffix(.detail))]
    Forbidden { detail: Option<String> },

    /// No token is held by the session.
    #[error("not logged in")]
    NotAuthenticated,

    /// The session token changed while a restoration was in flight.
    #[error("session changed during restoration")]
    SessionChanged,

    /// The identity endpoint did not answer within the restore timeout.
    #[error("identity restoration timed out after {timeout_ms}ms")]
    RestoreTimedOut { timeout_ms: u64 },
}

fn detail_suffix(detail: &Option<String>) -> String {
    detail
        .as_deref()
        .map(|d| format!(": {}", d))
        .unwrap_or_default()
}

/// An error status (or undecodable body) returned by the service.
#[derive(Debug)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Human-readable detail supplied by the service.
    pub detail: Option<String>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref detail) = self.detail {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error.
    pub fn new(status: u16, detail: Option<String>) -> Self {
        Self { status, detail }
    }

    /// Returns true for 4xx statuses.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid server URL.
    #[error("invalid server URL '{value}': {reason}")]
    ServerUrl { value: String, reason: String },

    /// A value cannot be carried in an HTTP header.
    #[error("invalid header value for {name}")]
    Header { name: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

/// Errors from the durable key/value medium.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The medium could not be read or written.
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// A value could not be encoded for storage.
    #[error("encoding error: {message}")]
    Encoding { message: String },
}

/// Navigation errors.
#[derive(Debug, Error)]
pub enum NavError {
    /// No route matches and the table has no usable fallback.
    #[error("no route for {path}")]
    UnknownRoute { path: String },

    /// Guard redirects did not settle.
    #[error("redirect loop while navigating to {path}")]
    RedirectLoop { path: String },
}
