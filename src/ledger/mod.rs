//! File-backed ledger for the live notification pointer.
//!
//! The storage unit is "at most one record, directory-scoped": a single JSON
//! file inside an artifacts directory that is created on save and removed
//! wholesale on purge. A record is only valid on the calendar day it was
//! posted; the provider's outage window is a same-day concept, so a stale
//! record must never be edited.

use std::{
    fs, io,
    path::PathBuf,
};

use chrono::{DateTime, Local};
use thiserror::Error;

use crate::models::NotificationRecord;

/// File name of the persisted record inside the artifacts directory.
const RECORD_FILE: &str = "last-message.json";

/// Errors that can occur in the ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// An I/O error while reading or writing the record file.
    #[error("ledger I/O failed: {0}")]
    Io(#[from] io::Error),

    /// The record file exists but does not hold a valid record.
    #[error("failed to serialize or deserialize the ledger record: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The stored record carries a timestamp outside the representable range.
    #[error("stored record carries an invalid timestamp: {0}")]
    InvalidTimestamp(i64),
}

/// Result of a purge. Both variants are success: deleting an absent record
/// is a no-op, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// A record existed and its directory was removed.
    Deleted,
    /// Nothing was stored; nothing was done.
    AlreadyAbsent,
}

/// Persists and retrieves the identity of the currently-live notification
/// message.
#[derive(Debug, Clone)]
pub struct NotificationLedger {
    dir: PathBuf,
}

impl NotificationLedger {
    /// Creates a ledger rooted at the given artifacts directory.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn record_path(&self) -> PathBuf {
        self.dir.join(RECORD_FILE)
    }

    /// Loads the stored record, if any.
    ///
    /// A record whose `date` falls on a calendar day (local process timezone)
    /// strictly before today is purged first and `None` is returned, so a new
    /// outage on a new day always starts a fresh message instead of silently
    /// editing yesterday's.
    pub fn load(&self) -> Result<Option<NotificationRecord>, LedgerError> {
        let raw = match fs::read_to_string(self.record_path()) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let record: NotificationRecord = serde_json::from_str(raw.trim())?;

        let posted = DateTime::from_timestamp(record.date, 0)
            .ok_or(LedgerError::InvalidTimestamp(record.date))?;
        let posted_day = posted.with_timezone(&Local).date_naive();
        let today = Local::now().date_naive();

        if posted_day < today {
            tracing::debug!(%posted_day, %today, "purging stale notification record");
            self.delete()?;
            return Ok(None);
        }

        Ok(Some(record))
    }

    /// Stores the record, overwriting any previous one. Creates the artifacts
    /// directory if it does not exist yet.
    pub fn save(&self, record: &NotificationRecord) -> Result<(), LedgerError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.record_path(), serde_json::to_string(record)?)?;
        Ok(())
    }

    /// Removes the record and its directory. Safe to call when nothing is
    /// stored.
    pub fn delete(&self) -> Result<DeleteOutcome, LedgerError> {
        match fs::remove_dir_all(&self.dir) {
            Ok(()) => Ok(DeleteOutcome::Deleted),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(DeleteOutcome::AlreadyAbsent),
            Err(e) => Err(e.into()),
        }
    }
}
