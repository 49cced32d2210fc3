//! Raw provider payload shapes and the derived per-cycle outage state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single house entry in the provider's shutdown schedule.
///
/// The provider reports every field as a string and uses the empty string to
/// mean "no value for this slot". A house with all four fields empty has no
/// scheduled or ongoing outage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct OutageSlot {
    /// Human-readable outage reason (e.g. planned maintenance).
    #[serde(default)]
    pub sub_type: String,

    /// Time the outage window starts.
    #[serde(default)]
    pub start_date: String,

    /// Time the outage window is expected to end.
    #[serde(default)]
    pub end_date: String,

    /// Provider-internal outage type code.
    #[serde(default, rename = "type")]
    pub type_code: String,
}

impl OutageSlot {
    /// Returns true if any of the four slot fields carries a value.
    pub fn has_outage(&self) -> bool {
        !self.sub_type.is_empty()
            || !self.start_date.is_empty()
            || !self.end_date.is_empty()
            || !self.type_code.is_empty()
    }
}

/// The raw response of the provider's `getHomeNum` call.
///
/// `data` maps house numbers to their shutdown slots. A response without a
/// `data` map at all is malformed; a present map that lacks the configured
/// house simply means that house has no outage entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusPayload {
    /// Shutdown slots keyed by house number.
    #[serde(default)]
    pub data: Option<HashMap<String, OutageSlot>>,

    /// Provider-side timestamp of when the schedule was last refreshed.
    #[serde(default, rename = "updateTimestamp")]
    pub update_timestamp: Option<String>,
}

/// The outage state derived for the configured address in one poll cycle.
///
/// Recomputed on every cycle and never persisted. Empty provider fields are
/// mapped to `None` so downstream rendering can substitute placeholders.
/// Serializable for the `check` subcommand's report output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutageState {
    /// Whether an outage is currently reported for the address.
    pub active: bool,

    /// Reported outage reason, if any.
    pub reason: Option<String>,

    /// Reported start of the outage window.
    pub start_time: Option<String>,

    /// Reported end of the outage window.
    pub end_time: Option<String>,

    /// Provider-side refresh timestamp carried over from the payload.
    pub observed_at: Option<String>,
}

impl OutageState {
    /// Returns an inactive state with no outage details.
    pub fn inactive(observed_at: Option<String>) -> Self {
        Self {
            active: false,
            reason: None,
            start_time: None,
            end_time: None,
            observed_at,
        }
    }
}
