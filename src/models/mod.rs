//! This module contains the data models for the Varta application.

pub mod notification;
pub mod outage;

pub use notification::{NotificationRecord, ParseMode, RenderedMessage};
pub use outage::{OutageSlot, OutageState, StatusPayload};
