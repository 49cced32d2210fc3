#![warn(missing_docs)]
//! Varta polls a utility provider for scheduled power-outage status at one
//! configured address and maintains a single live Telegram message: created
//! when an outage starts, edited in place while it lasts.

pub mod config;
pub mod cycle;
pub mod http_client;
pub mod ledger;
pub mod models;
pub mod notification;
pub mod provider;
pub mod status;
