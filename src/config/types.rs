//! Configuration types for the Work Tracker.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::daily_rate;
use crate::error::TrackerResult;

/// Connection settings for the remote shift store.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the store, e.g. `https://project.example.co`.
    pub url: String,
    /// The anonymous API key sent as `apikey` and bearer token.
    pub api_key: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

/// Pay parameters used to derive the daily rate.
///
/// # Example
///
/// ```
/// use work_tracker::config::PayConfig;
/// use rust_decimal::Decimal;
///
/// let pay = PayConfig {
///     monthly_base: Decimal::new(8500, 0),
///     working_days_divisor: Decimal::new(26, 0),
///     currency: "RMB".to_string(),
/// };
/// assert_eq!(pay.daily_rate().unwrap().round_dp(2), Decimal::new(32692, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PayConfig {
    /// The nominal monthly pay.
    pub monthly_base: Decimal,
    /// Fixed number of working days the monthly pay is spread over.
    pub working_days_divisor: Decimal,
    /// Currency label for display.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "RMB".to_string()
}

impl PayConfig {
    /// `monthly_base / working_days_divisor`.
    pub fn daily_rate(&self) -> TrackerResult<Decimal> {
        daily_rate(self.monthly_base, self.working_days_divisor)
    }
}

impl Default for PayConfig {
    fn default() -> Self {
        Self {
            monthly_base: Decimal::new(8500, 0),
            working_days_divisor: Decimal::new(26, 0),
            currency: default_currency(),
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `host:port`, ready for a listener bind.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// The month shown at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CalendarConfig {
    /// Initial year.
    pub initial_year: i32,
    /// Initial month, 1 = January.
    pub initial_month: u32,
}

/// The complete tracker configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerConfig {
    /// Remote store settings.
    pub store: StoreConfig,
    /// Pay parameters.
    #[serde(default)]
    pub pay: PayConfig,
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Initial month; the current month when absent.
    #[serde(default)]
    pub calendar: Option<CalendarConfig>,
}
