//! # Notification Service
//!
//! The delivery coordinator for the live outage message. Each poll cycle
//! hands it a freshly derived [`OutageState`]; the service reads the ledger
//! snapshot, lets the pure [`decision::decide`] function pick an action, and
//! executes it against the chat transport:
//!
//! - no outage → nothing is sent, the ledger is not touched, and any
//!   existing message is left frozen as is;
//! - outage with no live message → a new message is posted;
//! - outage with a live message → that message is edited in place.
//!
//! On transport success the returned message identity is written back to the
//! ledger, so the next cycle edits the same message. On transport failure the
//! possibly-invalid record is purged and the delivery is retried exactly once
//! with a freshly re-derived action — the record is gone by then, so the
//! retry is necessarily a create. A failing retry propagates and aborts the
//! cycle.

use chrono::Utc;
use chrono_tz::Tz;

pub mod decision;
pub mod error;
mod render;
mod telegram;

pub use decision::{Action, decide};
use error::NotificationError;
pub use render::render;
pub use telegram::{MessageTransport, TelegramNotifier};
#[cfg(test)]
pub use telegram::MockMessageTransport;

use crate::{
    ledger::NotificationLedger,
    models::{NotificationRecord, OutageState},
};

/// What a delivery attempt did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// No outage was active; nothing was sent.
    Skipped,
    /// A new live message was posted.
    Created(NotificationRecord),
    /// The existing live message was edited in place.
    Updated(NotificationRecord),
}

/// Executes notification decisions against the chat transport and keeps the
/// ledger in sync with what is actually live in the channel.
pub struct NotificationService<T: MessageTransport> {
    transport: T,
    ledger: NotificationLedger,
    timezone: Tz,
}

impl<T: MessageTransport> NotificationService<T> {
    /// Creates a new service.
    ///
    /// `timezone` is the zone the render-time wall clock is stamped in.
    pub fn new(transport: T, ledger: NotificationLedger, timezone: Tz) -> Self {
        Self { transport, ledger, timezone }
    }

    /// Runs one delivery pass for the given outage state.
    pub async fn notify(
        &self,
        state: &OutageState,
    ) -> Result<DeliveryOutcome, NotificationError> {
        if !state.active {
            tracing::debug!("no active outage, leaving any existing message untouched");
            return Ok(DeliveryOutcome::Skipped);
        }

        let record = self.ledger.load()?;
        let action = decide(state, record.as_ref(), Utc::now().with_timezone(&self.timezone));

        match self.execute(&action).await {
            Ok(outcome) => Ok(outcome),
            // Ledger failures are not transport failures; purging and
            // resending would double-post.
            Err(err @ NotificationError::Ledger(_)) => Err(err),
            Err(err) => {
                tracing::warn!(error = %err, "delivery failed, purging record and retrying once");
                self.ledger.delete()?;
                // Re-derive instead of reusing the failed action: the record
                // was just purged, so an update is no longer possible.
                let retry = decide(state, None, Utc::now().with_timezone(&self.timezone));
                self.execute(&retry).await
            }
        }
    }

    async fn execute(&self, action: &Action) -> Result<DeliveryOutcome, NotificationError> {
        match action {
            Action::None => Ok(DeliveryOutcome::Skipped),
            Action::Create(message) => {
                let saved = self.transport.send_message(message).await?;
                self.ledger.save(&saved)?;
                tracing::info!(message_id = saved.message_id, "notification message created");
                Ok(DeliveryOutcome::Created(saved))
            }
            Action::Update { message_id, message } => {
                let saved = self.transport.edit_message_text(*message_id, message).await?;
                self.ledger.save(&saved)?;
                tracing::info!(message_id = saved.message_id, "notification message updated");
                Ok(DeliveryOutcome::Updated(saved))
            }
        }
    }
}
