//! Telegram chat transport.
//!
//! The transport exposes exactly the two RPCs the delivery coordinator
//! needs: post a new message and edit an existing one by id. Both return the
//! message identity the ledger persists.

use std::sync::Arc;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use reqwest_middleware::ClientWithMiddleware;
use serde::{Deserialize, Serialize};
use url::Url;

use super::error::NotificationError;
use crate::models::{NotificationRecord, ParseMode, RenderedMessage};

/// The chat transport seam.
///
/// Selecting between the two RPCs is the caller's concern; the dispatch key
/// is solely whether a prior message id is known.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MessageTransport: Send + Sync {
    /// Posts a new message and returns its identity.
    async fn send_message(
        &self,
        message: &RenderedMessage,
    ) -> Result<NotificationRecord, NotificationError>;

    /// Edits an existing message in place and returns its identity.
    async fn edit_message_text(
        &self,
        message_id: i64,
        message: &RenderedMessage,
    ) -> Result<NotificationRecord, NotificationError>;
}

/// Request body for both `sendMessage` and `editMessageText`.
#[derive(Debug, Serialize)]
struct MessagePayload<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: ParseMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    message_id: Option<i64>,
}

/// The Bot API response envelope. `result` carries the posted message on
/// success; unknown message fields are ignored.
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    result: Option<NotificationRecord>,
    #[serde(default)]
    description: Option<String>,
}

/// `MessageTransport` implementation backed by the Telegram Bot API.
#[derive(Debug)]
pub struct TelegramNotifier {
    api_base: Url,
    token: String,
    chat_id: String,
    client: Arc<ClientWithMiddleware>,
}

impl TelegramNotifier {
    /// Creates a new notifier.
    ///
    /// Fails with a configuration error on an empty bot token or chat id, so
    /// a misconfigured deployment is rejected before any network I/O.
    pub fn new(
        api_base: Url,
        token: &str,
        chat_id: &str,
        client: Arc<ClientWithMiddleware>,
    ) -> Result<Self, NotificationError> {
        if token.is_empty() {
            return Err(NotificationError::ConfigError(
                "Missing Telegram bot token".to_string(),
            ));
        }
        if chat_id.is_empty() {
            return Err(NotificationError::ConfigError(
                "Missing Telegram chat id".to_string(),
            ));
        }
        Ok(Self {
            api_base,
            token: token.to_string(),
            chat_id: chat_id.to_string(),
            client,
        })
    }

    async fn call(
        &self,
        method: &str,
        payload: &MessagePayload<'_>,
    ) -> Result<NotificationRecord, NotificationError> {
        // `Url`'s display form always carries a trailing slash for a bare
        // host, so plain concatenation is safe here.
        let url = format!("{}bot{}/{}", self.api_base, self.token, method);

        let response = self.client.post(&url).json(payload).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotificationError::NotifyFailed(format!(
                "Telegram request failed with status: {status}"
            )));
        }

        let body: ApiResponse = response.json().await?;
        if !body.ok {
            return Err(NotificationError::NotifyFailed(
                body.description
                    .unwrap_or_else(|| "Telegram API reported a failure".to_string()),
            ));
        }

        body.result.ok_or_else(|| {
            NotificationError::NotifyFailed(
                "Telegram API response is missing the message result".to_string(),
            )
        })
    }
}

#[async_trait]
impl MessageTransport for TelegramNotifier {
    async fn send_message(
        &self,
        message: &RenderedMessage,
    ) -> Result<NotificationRecord, NotificationError> {
        let payload = MessagePayload {
            chat_id: &self.chat_id,
            text: &message.text,
            parse_mode: message.parse_mode,
            message_id: None,
        };
        self.call("sendMessage", &payload).await
    }

    async fn edit_message_text(
        &self,
        message_id: i64,
        message: &RenderedMessage,
    ) -> Result<NotificationRecord, NotificationError> {
        let payload = MessagePayload {
            chat_id: &self.chat_id,
            text: &message.text,
            parse_mode: message.parse_mode,
            message_id: Some(message_id),
        };
        self.call("editMessageText", &payload).await
    }
}
