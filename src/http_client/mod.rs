//! Retryable HTTP clients for the provider and the chat transport.
//!
//! Both outbound surfaces share the same shape: a base `reqwest` client
//! wrapped in retry middleware that smooths transient errors (network blips,
//! rate limiting) underneath the application-level delivery policy.

use std::time::Duration;

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{Jitter, RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::config::{HttpRetryConfig, JitterSetting};

/// Builds the base client both surfaces start from.
///
/// The provider client needs `cookie_store` enabled so the CSRF token it
/// extracts stays paired with the session cookie; the transport client does
/// not carry sessions.
pub fn default_base_client(cookie_store: bool) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .cookie_store(cookie_store)
        .connect_timeout(Duration::from_secs(10))
        .build()
}

/// Wraps a base HTTP client with retry middleware.
///
/// # Parameters:
/// - `config`: Configuration for the retry policy
/// - `base_client`: The base HTTP client to wrap
///
/// # Returns
/// A `ClientWithMiddleware` that includes retry capabilities
pub fn create_retryable_http_client(
    config: &HttpRetryConfig,
    base_client: reqwest::Client,
) -> ClientWithMiddleware {
    let policy_builder = match config.jitter {
        JitterSetting::None => ExponentialBackoff::builder().jitter(Jitter::None),
        JitterSetting::Full => ExponentialBackoff::builder().jitter(Jitter::Full),
    };

    let retry_policy = policy_builder
        .base(config.base_for_backoff)
        .retry_bounds(config.initial_backoff_ms, config.max_backoff_secs)
        .build_with_max_retries(config.max_retries);

    ClientBuilder::new(base_client)
        .with(RetryTransientMiddleware::new_with_policy(retry_policy))
        .build()
}
