//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the tracker
//! configuration from a YAML file, applying environment overrides and
//! validating the result.

use std::fs;
use std::path::Path;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;

use crate::error::{TrackerError, TrackerResult};
use crate::models::YearMonth;
use crate::store::parse_base_url;

use super::types::{PayConfig, ServerConfig, StoreConfig, TrackerConfig};

/// Environment variable overriding the store URL.
pub const STORE_URL_ENV: &str = "WORK_TRACKER_STORE_URL";
/// Environment variable overriding the store API key.
pub const STORE_KEY_ENV: &str = "WORK_TRACKER_STORE_KEY";
/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "WORK_TRACKER_CONFIG";
/// Configuration file used when [`CONFIG_PATH_ENV`] is unset.
pub const DEFAULT_CONFIG_PATH: &str = "./config/tracker.yaml";

/// Loads and provides access to the tracker configuration.
///
/// # Example
///
/// ```no_run
/// use work_tracker::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/tracker.yaml")?.with_env_overrides()?;
/// println!("Daily rate: {}", loader.pay().daily_rate()?);
/// # Ok::<(), work_tracker::error::TrackerError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: TrackerConfig,
}

impl ConfigLoader {
    /// Loads configuration from a YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - The file is missing (`ConfigNotFound`)
    /// - The file is not valid YAML or lacks required fields (`ConfigParseError`)
    /// - A value fails validation (`InvalidConfig` or `InvalidMonth`)
    pub fn load<P: AsRef<Path>>(path: P) -> TrackerResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| TrackerError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let loader = Self::from_yaml_str(&content, &path_str)?;
        info!(path = %path_str, "Configuration loaded");
        Ok(loader)
    }

    /// Parses and validates configuration held in memory.
    ///
    /// `origin` is only used in error messages.
    pub fn from_yaml_str(content: &str, origin: &str) -> TrackerResult<Self> {
        let config: TrackerConfig =
            serde_yaml::from_str(content).map_err(|e| TrackerError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;
        let loader = Self { config };
        loader.validate()?;
        Ok(loader)
    }

    /// Applies overrides from the process environment.
    pub fn with_env_overrides(self) -> TrackerResult<Self> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from `lookup`, then re-validates.
    ///
    /// Empty values are ignored.
    pub fn apply_overrides<F>(mut self, lookup: F) -> TrackerResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = non_empty(STORE_URL_ENV) {
            info!(variable = STORE_URL_ENV, "Store URL overridden from environment");
            self.config.store.url = url;
        }
        if let Some(key) = non_empty(STORE_KEY_ENV) {
            info!(variable = STORE_KEY_ENV, "Store key overridden from environment");
            self.config.store.api_key = key;
        }

        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> TrackerResult<()> {
        let pay = &self.config.pay;
        if pay.monthly_base < Decimal::ZERO {
            return Err(TrackerError::InvalidConfig {
                field: "pay.monthly_base".to_string(),
                message: format!("must not be negative, got {}", pay.monthly_base),
            });
        }
        pay.daily_rate()?;

        parse_base_url(&self.config.store.url)?;
        if self.config.store.timeout_secs == 0 {
            return Err(TrackerError::InvalidConfig {
                field: "store.timeout_secs".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        if let Some(calendar) = self.config.calendar {
            YearMonth::new(calendar.initial_year, calendar.initial_month)?;
        }
        Ok(())
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    /// Returns the store settings.
    pub fn store(&self) -> &StoreConfig {
        &self.config.store
    }

    /// Returns the pay parameters.
    pub fn pay(&self) -> &PayConfig {
        &self.config.pay
    }

    /// Returns the listener settings.
    pub fn server(&self) -> &ServerConfig {
        &self.config.server
    }

    /// The month to select at startup: the configured one, or the current
    /// UTC month when none is configured.
    pub fn initial_month(&self) -> TrackerResult<YearMonth> {
        match self.config.calendar {
            Some(calendar) => YearMonth::new(calendar.initial_year, calendar.initial_month),
            None => Ok(YearMonth::containing(Utc::now().date_naive())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::str::FromStr;

    fn config_path() -> &'static str {
        "./config/tracker.yaml"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    const MINIMAL: &str = r#"
store:
  url: "https://tracker.example.com"
  api_key: "anon"
"#;

    #[test]
    fn test_load_shipped_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.pay().monthly_base, dec("8500"));
        assert_eq!(loader.pay().working_days_divisor, dec("26"));
        assert_eq!(loader.pay().currency, "RMB");
        assert_eq!(loader.initial_month().unwrap(), YearMonth::new(2026, 1).unwrap());
    }

    #[test]
    fn test_missing_file_returns_config_not_found() {
        let result = ConfigLoader::load("/nonexistent/tracker.yaml");
        match result {
            Err(TrackerError::ConfigNotFound { path }) => {
                assert_eq!(path, "/nonexistent/tracker.yaml");
            }
            other => panic!("Expected ConfigNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_minimal_file_uses_defaults() {
        let loader = ConfigLoader::from_yaml_str(MINIMAL, "inline").unwrap();
        assert_eq!(loader.pay(), &PayConfig::default());
        assert_eq!(loader.server().bind_address(), "127.0.0.1:3000");
        assert_eq!(loader.store().timeout_secs, 10);
        assert!(loader.config().calendar.is_none());
    }

    #[test]
    fn test_missing_store_section_is_parse_error() {
        let result = ConfigLoader::from_yaml_str("pay:\n  monthly_base: 100\n", "inline");
        assert!(matches!(result, Err(TrackerError::ConfigParseError { .. })));
    }

    #[test]
    fn test_invalid_yaml_is_parse_error() {
        let result = ConfigLoader::from_yaml_str("store: [unclosed", "bad.yaml");
        match result {
            Err(TrackerError::ConfigParseError { path, .. }) => assert_eq!(path, "bad.yaml"),
            other => panic!("Expected ConfigParseError, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_divisor_is_rejected() {
        let yaml = format!("{}pay:\n  monthly_base: 8500\n  working_days_divisor: 0\n", MINIMAL);
        let result = ConfigLoader::from_yaml_str(&yaml, "inline");
        match result {
            Err(TrackerError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "pay.working_days_divisor");
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_negative_monthly_base_is_rejected() {
        let yaml = format!("{}pay:\n  monthly_base: -1\n  working_days_divisor: 26\n", MINIMAL);
        let result = ConfigLoader::from_yaml_str(&yaml, "inline");
        assert!(matches!(result, Err(TrackerError::InvalidConfig { .. })));
    }

    #[test]
    fn test_invalid_initial_month_is_rejected() {
        let yaml = format!("{}calendar:\n  initial_year: 2026\n  initial_month: 13\n", MINIMAL);
        let result = ConfigLoader::from_yaml_str(&yaml, "inline");
        assert!(matches!(
            result,
            Err(TrackerError::InvalidMonth { year: 2026, month: 13 })
        ));
    }

    #[test]
    fn test_unparseable_store_url_is_rejected() {
        let yaml = "store:\n  url: \"not a url\"\n  api_key: \"anon\"\n";
        let result = ConfigLoader::from_yaml_str(yaml, "inline");
        assert!(matches!(result, Err(TrackerError::InvalidConfig { .. })));
    }

    #[test]
    fn test_zero_store_timeout_is_rejected() {
        let yaml = "store:\n  url: \"http://127.0.0.1:54321\"\n  api_key: \"anon\"\n  timeout_secs: 0\n";
        match ConfigLoader::from_yaml_str(yaml, "inline") {
            Err(TrackerError::InvalidConfig { field, .. }) => {
                assert_eq!(field, "store.timeout_secs");
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_overrides_replace_store_settings() {
        let env: HashMap<&str, &str> = HashMap::from([
            (STORE_URL_ENV, "https://override.example.com"),
            (STORE_KEY_ENV, "secret"),
        ]);
        let loader = ConfigLoader::from_yaml_str(MINIMAL, "inline")
            .unwrap()
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(loader.store().url, "https://override.example.com");
        assert_eq!(loader.store().api_key, "secret");
    }

    #[test]
    fn test_empty_override_is_ignored() {
        let loader = ConfigLoader::from_yaml_str(MINIMAL, "inline")
            .unwrap()
            .apply_overrides(|key| (key == STORE_URL_ENV).then(|| "  ".to_string()))
            .unwrap();
        assert_eq!(loader.store().url, "https://tracker.example.com");
    }

    #[test]
    fn test_invalid_override_fails_validation() {
        let result = ConfigLoader::from_yaml_str(MINIMAL, "inline")
            .unwrap()
            .apply_overrides(|key| (key == STORE_URL_ENV).then(|| "ftp://nope".to_string()));
        assert!(matches!(result, Err(TrackerError::InvalidConfig { .. })));
    }
}
