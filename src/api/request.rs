//! Request types for the Work Tracker API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::TrackerResult;
use crate::models::{Period, YearMonth};

/// Request body for `POST /shifts/toggle`.
///
/// # Example
///
/// ```
/// use work_tracker::api::ToggleRequest;
/// use work_tracker::models::Period;
///
/// let request: ToggleRequest =
///     serde_json::from_str(r#"{"date":"2026-01-05","period":"AM"}"#).unwrap();
/// assert_eq!(request.period, Period::Morning);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToggleRequest {
    /// The date of the half-day to toggle.
    pub date: NaiveDate,
    /// `"AM"` or `"PM"`.
    pub period: Period,
}

/// Request body for `PUT /selection`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectMonthRequest {
    /// The calendar year.
    pub year: i32,
    /// The month, 1 = January.
    pub month: u32,
}

impl SelectMonthRequest {
    /// Validates the pair into a [`YearMonth`].
    pub fn year_month(&self) -> TrackerResult<YearMonth> {
        YearMonth::new(self.year, self.month)
    }
}
