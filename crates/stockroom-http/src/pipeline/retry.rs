//! Retry policy for requests that never received a response.

use std::time::Duration;

use tracing::{debug, warn};

/// Retries a request when no response arrived at all.
///
/// Any HTTP response, error statuses included, is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts after the first one.
    pub max_retries: u32,
    /// Pause before each retry.
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    /// Never retry.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            delay: Duration::ZERO,
        }
    }

    /// Whether `err` is a failure where no response was received.
    pub fn is_retryable(err: &reqwest::Error) -> bool {
        err.status().is_none() && !err.is_builder() && !err.is_decode()
    }

    /// Send `request`, retrying transient failures.
    ///
    /// Requests whose body cannot be cloned are sent exactly once.
    pub async fn send(
        &self,
        http: &reqwest::Client,
        request: reqwest::Request,
    ) -> Result<reqwest::Response, reqwest::Error> {
        let mut attempt: u32 = 0;
        loop {
            let Some(this_attempt) = request.try_clone() else {
                debug!("Request body is not replayable, sending once");
                return http.execute(request).await;
            };

            match http.execute(this_attempt).await {
                Ok(response) => return Ok(response),
                Err(err) if attempt < self.max_retries && Self::is_retryable(&err) => {
                    attempt += 1;
                    warn!(
                        attempt,
                        max_retries = self.max_retries,
                        url = %request.url(),
                        error = %err,
                        "Transient request failure, retrying"
                    );
                    tokio::time::sleep(self.delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
