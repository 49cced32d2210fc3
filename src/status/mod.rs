//! Converts a raw provider payload into the typed outage state for one
//! address.
//!
//! The distinction this module is careful about: a payload without a `data`
//! map at all is a malformed provider response and an error, while a `data`
//! map that simply lacks the configured house means the house has no active
//! outage entry.

use thiserror::Error;

use crate::models::{OutageState, StatusPayload};

/// The provider response carried no shutdown data map at all.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("provider response is missing the shutdown data map")]
pub struct MissingDataError;

/// Derives the outage state for `house` from a raw provider payload.
///
/// `active` is true iff at least one of the house's four slot fields is
/// non-empty. Empty fields become `None` so the renderer can substitute
/// placeholders. No side effects.
pub fn normalize(payload: &StatusPayload, house: &str) -> Result<OutageState, MissingDataError> {
    let data = payload.data.as_ref().ok_or(MissingDataError)?;

    let observed_at = payload.update_timestamp.clone();

    let slot = match data.get(house) {
        Some(slot) => slot,
        None => return Ok(OutageState::inactive(observed_at)),
    };

    if !slot.has_outage() {
        return Ok(OutageState::inactive(observed_at));
    }

    let non_empty = |s: &str| {
        if s.is_empty() {
            None
        } else {
            Some(s.to_string())
        }
    };

    Ok(OutageState {
        active: true,
        reason: non_empty(&slot.sub_type),
        start_time: non_empty(&slot.start_date),
        end_time: non_empty(&slot.end_date),
        observed_at,
    })
}
