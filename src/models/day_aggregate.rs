//! Per-day aggregate model.
//!
//! A [`DayAggregate`] is built for every date that has at least one worked
//! half-day. It is never persisted.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Holiday, Period};

/// The worked periods and holiday for a single date.
///
/// # Example
///
/// ```
/// use work_tracker::models::DayAggregate;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let day = DayAggregate {
///     date: NaiveDate::from_ymd_opt(2026, 1, 6).unwrap(),
///     worked_morning: true,
///     worked_afternoon: false,
///     holiday: None,
/// };
/// assert_eq!(day.base_credit(), Decimal::new(5, 1));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAggregate {
    /// The date being aggregated.
    pub date: NaiveDate,
    /// Whether the morning shift was worked.
    pub worked_morning: bool,
    /// Whether the afternoon shift was worked.
    pub worked_afternoon: bool,
    /// The holiday falling on this date, if any.
    pub holiday: Option<Holiday>,
}

impl DayAggregate {
    /// Creates an aggregate with no periods worked yet.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            worked_morning: false,
            worked_afternoon: false,
            holiday: None,
        }
    }

    /// Marks `period` as worked.
    pub fn mark_worked(&mut self, period: Period) {
        match period {
            Period::Morning => self.worked_morning = true,
            Period::Afternoon => self.worked_afternoon = true,
        }
    }

    /// Returns true when at least one period was worked.
    pub fn is_working(&self) -> bool {
        self.worked_morning || self.worked_afternoon
    }

    /// Returns true when both periods were worked.
    pub fn is_full_day(&self) -> bool {
        self.worked_morning && self.worked_afternoon
    }

    /// The unadjusted credit: 1 for a full day, 0.5 for a half day, 0 otherwise.
    pub fn base_credit(&self) -> Decimal {
        match (self.worked_morning, self.worked_afternoon) {
            (true, true) => Decimal::ONE,
            (true, false) | (false, true) => Decimal::new(5, 1),
            (false, false) => Decimal::ZERO,
        }
    }
}
