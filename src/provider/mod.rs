//! This module defines the interface for fetching scheduled power-outage
//! status from the utility provider.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

mod dtek;

pub use dtek::DtekShutdownsSource;

use crate::models::StatusPayload;

/// Custom error type for provider operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// An error from the underlying `reqwest` or `reqwest_middleware`
    /// libraries.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest_middleware::Error),

    /// The provider responded with a non-success HTTP status.
    #[error("Provider responded with status: {0}")]
    ErrorStatus(reqwest::StatusCode),

    /// The shutdowns page did not carry a CSRF token, so the status call
    /// cannot be authenticated.
    #[error("Shutdowns page is missing the CSRF token")]
    CsrfTokenMissing,

    /// The provider response body could not be read or deserialized.
    #[error("Malformed provider response: {0}")]
    DeserializationError(#[from] reqwest::Error),
}

/// A source of raw outage status for the configured street.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetches the raw shutdown schedule payload.
    async fn fetch_outage_status(&self) -> Result<StatusPayload, ProviderError>;
}
