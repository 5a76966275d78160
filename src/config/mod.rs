//! Configuration loading and management for the Work Tracker.
//!
//! This module loads the tracker configuration from a YAML file: the store
//! connection, pay parameters, listener address and the initial month.
//! Store settings can be overridden from the environment.
//!
//! # Example
//!
//! ```no_run
//! use work_tracker::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/tracker.yaml").unwrap();
//! println!("Listening on {}", config.server().bind_address());
//! ```

mod loader;
mod types;

pub use loader::{
    CONFIG_PATH_ENV, ConfigLoader, DEFAULT_CONFIG_PATH, STORE_KEY_ENV, STORE_URL_ENV,
};
pub use types::{CalendarConfig, PayConfig, ServerConfig, StoreConfig, TrackerConfig};
