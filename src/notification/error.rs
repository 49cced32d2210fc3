//! Error types for the notification service.

use thiserror::Error;

use crate::ledger::LedgerError;

/// Defines the possible errors that can occur while delivering notifications.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// An error related to invalid or missing configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// An error from the underlying `reqwest` or `reqwest_middleware`
    /// libraries while talking to the transport.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest_middleware::Error),

    /// The transport response could not be read or deserialized.
    #[error("Malformed transport response: {0}")]
    ResponseError(#[from] reqwest::Error),

    /// The transport rejected the delivery.
    #[error("Notification failed: {0}")]
    NotifyFailed(String),

    /// An error while reading or writing the notification ledger.
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),
}
