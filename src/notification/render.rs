//! Renders the outage notification body.
//!
//! Rendering is a pure function of the outage state and the render instant.
//! The template always carries two timestamps: when the provider last
//! refreshed its schedule, and when this message body was rendered.

use chrono::DateTime;
use chrono_tz::Tz;

use crate::models::{OutageState, ParseMode, RenderedMessage};

/// Placeholder for a missing reason («причина» is feminine).
const UNKNOWN_REASON: &str = "Невідома";

/// Placeholder for a missing time value.
const UNKNOWN_TIME: &str = "Невідомий";

/// Renders the notification body for an outage state.
///
/// `rendered_at` is the wall-clock instant stamped into the message as the
/// "notification rendered at" line; passing it in keeps the function
/// deterministic.
pub fn render(state: &OutageState, rendered_at: DateTime<Tz>) -> RenderedMessage {
    let reason = state.reason.as_deref().unwrap_or(UNKNOWN_REASON);
    let start = state.start_time.as_deref().unwrap_or(UNKNOWN_TIME);
    let end = state.end_time.as_deref().unwrap_or(UNKNOWN_TIME);
    let observed = state.observed_at.as_deref().unwrap_or(UNKNOWN_TIME);
    let rendered = rendered_at.format("%H:%M %d.%m.%Y");

    let text = [
        "🪫 <b>Електроенергія відсутня!</b>".to_string(),
        String::new(),
        "ℹ️ <b>Причина:</b>".to_string(),
        format!("{reason}."),
        String::new(),
        "🔴 <b>Час початку:</b>".to_string(),
        start.to_string(),
        String::new(),
        "🟢 <b>Час відновлення:</b>".to_string(),
        end.to_string(),
        String::new(),
        "⏰ <b>Час оновлення інформації:</b>".to_string(),
        observed.to_string(),
        "⏰ <b>Час оновлення повідомлення:</b>".to_string(),
        rendered.to_string(),
    ]
    .join("\n");

    RenderedMessage { text, parse_mode: ParseMode::Html }
}
