//! Data models for the live notification message.

use serde::{Deserialize, Serialize};

/// The persisted pointer to the currently-live chat message.
///
/// This is the exact shape the transport returns for a sent or edited
/// message, and the exact shape stored in the ledger file. `date` is the
/// message timestamp in Unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationRecord {
    /// Transport-assigned identifier of the live message.
    pub message_id: i64,

    /// Unix timestamp (seconds) of when the message was posted or edited.
    pub date: i64,
}

/// Formatting mode requested from the chat transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    /// Telegram HTML formatting.
    #[serde(rename = "HTML")]
    Html,
}

/// A fully rendered notification body plus its formatting mode.
///
/// Pure function of the outage state and the render instant; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage {
    /// The message body, already formatted for the transport.
    pub text: String,

    /// Rich-text mode the transport should apply to `text`.
    pub parse_mode: ParseMode,
}
