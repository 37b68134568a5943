//! Service base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// Path prefix shared by every API resource.
pub const API_PREFIX: &str = "/api/v1";

/// The service's development address.
pub const DEFAULT_SERVER: &str = "http://localhost:8000";

/// A validated base URL of the stockroom service.
///
/// Must use HTTPS, or HTTP when the host is the local machine (the service's
/// development default is `http://localhost:8000`).
///
/// # Example
///
/// ```
/// use stockroom_core::ServerUrl;
///
/// let server = ServerUrl::new("http://localhost:8000/").unwrap();
/// assert_eq!(server.api_url("/auth/users/me"),
///            "http://localhost:8000/api/v1/auth/users/me");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ServerUrl(Url);

impl ServerUrl {
    /// Create a new server URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::ServerUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        Ok(Self(url))
    }

    /// Returns the absolute URL of an API resource path such as `/inventory`.
    pub fn api_url(&self, path: &str) -> String {
        // The URL crate always adds a trailing slash to root paths
        let base = self.0.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}{}/{}", base, API_PREFIX, path)
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        let invalid = |reason: &str| -> Error {
            InvalidInputError::ServerUrl {
                value: original.to_string(),
                reason: reason.to_string(),
            }
            .into()
        };

        if url.cannot_be_a_base() {
            return Err(invalid("must be an absolute URL"));
        }

        let host = url.host_str().ok_or_else(|| invalid("must have a host"))?;
        let is_localhost = matches!(host, "localhost" | "127.0.0.1" | "[::1]" | "::1");

        match url.scheme() {
            "https" => Ok(()),
            "http" if is_localhost => Ok(()),
            _ => Err(invalid("must use HTTPS (HTTP allowed only for localhost)")),
        }
    }
}

impl Default for ServerUrl {
    fn default() -> Self {
        Self(Url::parse(DEFAULT_SERVER).expect("default server URL is valid"))
    }
}

impl fmt::Display for ServerUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ServerUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ServerUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ServerUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ServerUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ServerUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let server = ServerUrl::new("https://shop.example.com").unwrap();
        assert_eq!(server.host(), Some("shop.example.com"));
    }

    #[test]
    fn valid_localhost_http() {
        let server = ServerUrl::new("http://127.0.0.1:8000").unwrap();
        assert_eq!(server.host(), Some("127.0.0.1"));
    }

    #[test]
    fn default_is_local_dev_server() {
        let server = ServerUrl::default();
        assert_eq!(
            server.api_url("auth/login"),
            "http://localhost:8000/api/v1/auth/login"
        );
    }

    #[test]
    fn normalizes_slashes_in_api_url() {
        let server = ServerUrl::new("https://shop.example.com/").unwrap();
        assert_eq!(
            server.api_url("/inventory/stock-in"),
            "https://shop.example.com/api/v1/inventory/stock-in"
        );
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(ServerUrl::new("http://shop.example.com").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(ServerUrl::new("/api/v1").is_err());
    }

    #[test]
    fn rejects_file_urls() {
        assert!(ServerUrl::new("file:///tmp/stock").is_err());
    }
}
