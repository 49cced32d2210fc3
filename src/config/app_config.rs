use std::path::PathBuf;

use chrono_tz::Tz;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use url::Url;

use super::HttpRetryConfig;

/// Provides the default provider endpoint (DTEK Kyiv region).
fn default_provider_base_url() -> Url {
    Url::parse("https://www.dtek-krem.com.ua/").unwrap()
}

/// Provides the default artifacts directory holding the notification ledger.
fn default_artifacts_dir() -> PathBuf {
    PathBuf::from("artifacts")
}

/// Provides the default render timezone.
fn default_timezone() -> Tz {
    chrono_tz::Europe::Kyiv
}

/// Application configuration for Varta.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Telegram bot credential used for message delivery.
    pub telegram_bot_token: String,

    /// Telegram chat the live message is posted to.
    pub telegram_chat_id: String,

    /// Base URL of the provider's shutdowns site.
    #[serde(default = "default_provider_base_url")]
    pub provider_base_url: Url,

    /// City the monitored address is in, exactly as the provider spells it.
    pub city: String,

    /// Street of the monitored address, exactly as the provider spells it.
    pub street: String,

    /// House number key in the provider's response data map.
    pub house: String,

    /// Directory the notification ledger lives in.
    #[serde(default = "default_artifacts_dir")]
    pub artifacts_dir: PathBuf,

    /// Timezone stamped into rendered messages.
    #[serde(default = "default_timezone")]
    pub timezone: Tz,

    /// Configuration for HTTP client retry policies.
    #[serde(default)]
    pub http_retry_config: HttpRetryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            telegram_bot_token: String::new(),
            telegram_chat_id: String::new(),
            provider_base_url: default_provider_base_url(),
            city: String::new(),
            street: String::new(),
            house: String::new(),
            artifacts_dir: default_artifacts_dir(),
            timezone: default_timezone(),
            http_retry_config: HttpRetryConfig::default(),
        }
    }
}

impl AppConfig {
    /// Creates a new `AppConfig` by reading from the configuration directory.
    ///
    /// The `app.yaml` file is optional so that a pure-environment deployment
    /// (e.g. a scheduled CI job) works without any file on disk; environment
    /// variables prefixed `VARTA__` override file values either way.
    pub fn new(config_dir: Option<&str>) -> Result<Self, ConfigError> {
        let config_dir_str = config_dir.unwrap_or("configs");
        let s = Config::builder()
            .add_source(File::with_name(&format!("{}/app.yaml", config_dir_str)).required(false))
            .add_source(Environment::with_prefix("VARTA").separator("__"))
            .build()?;
        s.try_deserialize()
    }

    /// Creates a new `AppConfigBuilder` for testing purposes.
    #[cfg(test)]
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

/// A builder for creating `AppConfig` instances for testing.
#[cfg(test)]
#[derive(Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

#[cfg(test)]
impl AppConfigBuilder {
    pub fn telegram_bot_token(mut self, token: &str) -> Self {
        self.config.telegram_bot_token = token.to_string();
        self
    }

    pub fn telegram_chat_id(mut self, chat_id: &str) -> Self {
        self.config.telegram_chat_id = chat_id.to_string();
        self
    }

    pub fn address(mut self, city: &str, street: &str, house: &str) -> Self {
        self.config.city = city.to_string();
        self.config.street = street.to_string();
        self.config.house = house.to_string();
        self
    }

    pub fn artifacts_dir(mut self, dir: &str) -> Self {
        self.config.artifacts_dir = dir.into();
        self
    }

    pub fn build(self) -> AppConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_builder() {
        let config = AppConfig::builder()
            .telegram_bot_token("token")
            .telegram_chat_id("100500")
            .address("Київ", "вул. Хрещатик", "12")
            .artifacts_dir("state")
            .build();

        assert_eq!(config.telegram_bot_token, "token");
        assert_eq!(config.telegram_chat_id, "100500");
        assert_eq!(config.house, "12");
        assert_eq!(config.artifacts_dir, PathBuf::from("state"));
        assert_eq!(config.timezone, chrono_tz::Europe::Kyiv);
    }

    #[test]
    fn test_app_config_from_file() {
        let config_content = r#"
        telegram_bot_token: "token"
        telegram_chat_id: "100500"
        city: "Київ"
        street: "вул. Хрещатик"
        house: "12"
        "#;
        let temp_dir = tempfile::tempdir().unwrap();
        let app_yaml_path = temp_dir.path().join("app.yaml");
        std::fs::write(&app_yaml_path, config_content).unwrap();

        let config = AppConfig::new(Some(temp_dir.path().to_str().unwrap())).unwrap();

        assert_eq!(config.telegram_chat_id, "100500");
        assert_eq!(config.house, "12");
        assert_eq!(
            config.provider_base_url.to_string(),
            "https://www.dtek-krem.com.ua/"
        );
        assert_eq!(config.artifacts_dir, PathBuf::from("artifacts"));
        assert_eq!(config.timezone, chrono_tz::Europe::Kyiv);
        assert_eq!(config.http_retry_config, HttpRetryConfig::default());
    }

    #[test]
    fn test_app_config_from_file_with_overrides() {
        let config_content = r#"
        telegram_bot_token: "token"
        telegram_chat_id: "100500"
        city: "Київ"
        street: "вул. Хрещатик"
        house: "12"
        timezone: "Europe/Warsaw"
        http_retry_config:
          max_retries: 5
        "#;
        let temp_dir = tempfile::tempdir().unwrap();
        let app_yaml_path = temp_dir.path().join("app.yaml");
        std::fs::write(&app_yaml_path, config_content).unwrap();

        let config = AppConfig::new(Some(temp_dir.path().to_str().unwrap())).unwrap();

        assert_eq!(config.timezone, chrono_tz::Europe::Warsaw);
        assert_eq!(config.http_retry_config.max_retries, 5);
    }

    #[test]
    fn test_app_config_from_file_with_env_var_override() {
        let config_content = r#"
        telegram_bot_token: "token"
        telegram_chat_id: "100500"
        city: "Київ"
        street: "вул. Хрещатик"
        house: "12"
        "#;
        let temp_dir = tempfile::tempdir().unwrap();
        let app_yaml_path = temp_dir.path().join("app.yaml");
        std::fs::write(&app_yaml_path, config_content).unwrap();

        // `street` is asserted nowhere else, so this cannot race the other
        // tests sharing the process environment.
        unsafe {
            std::env::set_var("VARTA__STREET", "вул. Інша");
        }

        let config = AppConfig::new(Some(temp_dir.path().to_str().unwrap())).unwrap();
        assert_eq!(config.street, "вул. Інша");

        unsafe {
            std::env::remove_var("VARTA__STREET");
        }
    }

    #[test]
    fn test_app_config_missing_required_fields_fails() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join("app.yaml"), "city: \"Київ\"\n").unwrap();

        let result = AppConfig::new(Some(temp_dir.path().to_str().unwrap()));
        assert!(result.is_err());
    }
}
