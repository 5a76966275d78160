//! Error types for the Work Tracker.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading, toggling and
//! aggregating shifts.

use chrono::NaiveDate;
use thiserror::Error;

use crate::models::{Period, YearMonth};

/// The main error type for the Work Tracker.
///
/// # Example
///
/// ```
/// use work_tracker::error::TrackerError;
///
/// let error = TrackerError::ConfigNotFound {
///     path: "/missing/tracker.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/tracker.yaml");
/// ```
#[derive(Debug, Error)]
pub enum TrackerError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A configuration value was present but not usable.
    #[error("Invalid configuration field '{field}': {message}")]
    InvalidConfig {
        /// The offending field.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// A year/month pair did not name a calendar month.
    #[error("Invalid month: {year}-{month}")]
    InvalidMonth {
        /// The requested year.
        year: i32,
        /// The requested month (expected 1..=12).
        month: u32,
    },

    /// The remote store was unreachable or answered with an error.
    #[error("Data unavailable for {resource}: {message}")]
    DataUnavailable {
        /// The collection that could not be loaded (e.g. "work_records").
        resource: String,
        /// A description of the failure.
        message: String,
    },

    /// Persisting a toggle failed; no local state was changed.
    #[error("Write rejected for {date} {period}: {message}")]
    WriteRejected {
        /// The date of the cell being toggled.
        date: NaiveDate,
        /// The period of the cell being toggled.
        period: Period,
        /// A description of the failure.
        message: String,
    },

    /// A toggle targeted a date outside the currently selected month.
    #[error("Date {date} is outside the selected month {year_month}")]
    DateOutsideWindow {
        /// The requested date.
        date: NaiveDate,
        /// The month currently selected.
        year_month: YearMonth,
    },

    /// A toggle arrived while the selected month was still loading.
    #[error("Month {year_month} is still loading")]
    MonthLoading {
        /// The month being loaded.
        year_month: YearMonth,
    },
}

/// A type alias for Results that return TrackerError.
pub type TrackerResult<T> = Result<T, TrackerError>;
