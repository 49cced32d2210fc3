//! Configuration module for Varta.

mod app_config;
mod http_retry;

pub use app_config::AppConfig;
pub use http_retry::{HttpRetryConfig, JitterSetting};
