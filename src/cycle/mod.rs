//! One full poll cycle: fetch → normalize → decide → deliver.
//!
//! Cycles are single-flight by construction: the runner owns its services
//! and `run_once` drives one cycle to completion before the caller may start
//! another, so the ledger needs no locking. Scheduling — how often a cycle
//! runs — is the caller's concern.

use thiserror::Error;

use crate::{
    models::OutageState,
    notification::{DeliveryOutcome, MessageTransport, NotificationService, error::NotificationError},
    provider::{ProviderError, StatusSource},
    status::{MissingDataError, normalize},
};

/// Represents the set of errors that can abort a poll cycle.
#[derive(Debug, Error)]
pub enum CycleError {
    /// The provider could not be reached or answered unusably.
    #[error("Fetching outage status failed: {0}")]
    Fetch(#[from] ProviderError),

    /// The provider answered, but without the shutdown data map.
    #[error("Provider payload is unusable: {0}")]
    MissingData(#[from] MissingDataError),

    /// Delivering the notification failed beyond recovery.
    #[error("Notification delivery failed: {0}")]
    Delivery(#[from] NotificationError),
}

/// What one completed cycle observed and did.
#[derive(Debug)]
pub struct CycleReport {
    /// The outage state derived this cycle.
    pub state: OutageState,
    /// What the delivery pass did with it.
    pub outcome: DeliveryOutcome,
}

/// Owns the wired services and drives poll cycles through them.
pub struct CycleRunner<S: StatusSource, T: MessageTransport> {
    source: S,
    notifier: NotificationService<T>,
    house: String,
}

impl<S: StatusSource, T: MessageTransport> CycleRunner<S, T> {
    /// Creates a runner for one configured house.
    pub fn new(source: S, notifier: NotificationService<T>, house: &str) -> Self {
        Self { source, notifier, house: house.to_string() }
    }

    /// Fetches and normalizes the current outage state without delivering
    /// anything.
    pub async fn probe(&self) -> Result<OutageState, CycleError> {
        let payload = self.source.fetch_outage_status().await?;
        Ok(normalize(&payload, &self.house)?)
    }

    /// Runs one full cycle to completion.
    pub async fn run_once(&self) -> Result<CycleReport, CycleError> {
        tracing::info!(house = %self.house, "fetching outage status");
        let state = self.probe().await?;

        if state.active {
            tracing::info!(
                reason = state.reason.as_deref().unwrap_or("unknown"),
                "power outage detected"
            );
        } else {
            tracing::info!("no power outage");
        }

        let outcome = self.notifier.notify(&state).await?;
        Ok(CycleReport { state, outcome })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono_tz::Europe::Kyiv;

    use super::*;
    use crate::{
        ledger::NotificationLedger,
        models::{NotificationRecord, OutageSlot, StatusPayload},
        notification::MockMessageTransport,
        provider::MockStatusSource,
    };

    fn payload_for(house: &str, slot: OutageSlot) -> StatusPayload {
        StatusPayload {
            data: Some(HashMap::from([(house.to_string(), slot)])),
            update_timestamp: Some("06.08.2026 09:55".to_string()),
        }
    }

    fn runner_in(
        temp: &tempfile::TempDir,
        source: MockStatusSource,
        transport: MockMessageTransport,
    ) -> CycleRunner<MockStatusSource, MockMessageTransport> {
        let ledger = NotificationLedger::new(temp.path().join("artifacts"));
        CycleRunner::new(source, NotificationService::new(transport, ledger, Kyiv), "12")
    }

    #[tokio::test]
    async fn cycle_with_empty_slot_skips_delivery_and_leaves_ledger_untouched() {
        let temp = tempfile::tempdir().unwrap();
        let mut source = MockStatusSource::new();
        source
            .expect_fetch_outage_status()
            .times(1)
            .returning(|| Ok(payload_for("12", OutageSlot::default())));
        let runner = runner_in(&temp, source, MockMessageTransport::new());

        let report = runner.run_once().await.unwrap();

        assert!(!report.state.active);
        assert_eq!(report.outcome, DeliveryOutcome::Skipped);
        assert!(!temp.path().join("artifacts").exists());
    }

    #[tokio::test]
    async fn cycle_with_an_outage_creates_the_live_message() {
        let temp = tempfile::tempdir().unwrap();
        let mut source = MockStatusSource::new();
        source.expect_fetch_outage_status().times(1).returning(|| {
            Ok(payload_for(
                "12",
                OutageSlot { sub_type: "Планове".into(), ..Default::default() },
            ))
        });
        let mut transport = MockMessageTransport::new();
        transport.expect_send_message().times(1).returning(|_| {
            Ok(NotificationRecord {
                message_id: 42,
                date: chrono::Local::now().timestamp(),
            })
        });
        let runner = runner_in(&temp, source, transport);

        let report = runner.run_once().await.unwrap();

        assert!(report.state.active);
        assert!(matches!(report.outcome, DeliveryOutcome::Created(ref r) if r.message_id == 42));
    }

    #[tokio::test]
    async fn payload_without_data_map_aborts_the_cycle() {
        let temp = tempfile::tempdir().unwrap();
        let mut source = MockStatusSource::new();
        source
            .expect_fetch_outage_status()
            .times(1)
            .returning(|| Ok(StatusPayload { data: None, update_timestamp: None }));
        let runner = runner_in(&temp, source, MockMessageTransport::new());

        let result = runner.run_once().await;
        assert!(matches!(result, Err(CycleError::MissingData(_))));
    }
}
