//! The notification decision function.
//!
//! Pure: given the freshly observed outage state and a snapshot of the
//! ledger record, decide what the delivery coordinator should do. Nothing
//! here touches the ledger or the transport.

use chrono::DateTime;
use chrono_tz::Tz;

use super::render::render;
use crate::models::{NotificationRecord, OutageState, RenderedMessage};

/// The action the delivery coordinator should execute for this cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Nothing to do. An existing message, if any, is deliberately left as
    /// is: when an outage clears, the last message stays frozen rather than
    /// being edited or deleted.
    None,

    /// Post a new live message.
    Create(RenderedMessage),

    /// Edit the existing live message in place.
    Update {
        /// Identifier of the message to edit.
        message_id: i64,
        /// The new message body.
        message: RenderedMessage,
    },
}

/// Decides the delivery action for an outage state and a ledger snapshot.
///
/// `now` is the render instant stamped into the message body; for the same
/// `(state, record, now)` the returned action and its rendered text are
/// identical.
pub fn decide(
    state: &OutageState,
    record: Option<&NotificationRecord>,
    now: DateTime<Tz>,
) -> Action {
    if !state.active {
        return Action::None;
    }

    match record {
        None => Action::Create(render(state, now)),
        Some(record) => Action::Update {
            message_id: record.message_id,
            message: render(state, now),
        },
    }
}
