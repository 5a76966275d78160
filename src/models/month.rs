//! Calendar month and date window models.
//!
//! This module contains the [`YearMonth`] selection type and the inclusive
//! [`DateWindow`] used to scope store queries and aggregation.

use std::fmt;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};

/// A validated calendar month.
///
/// # Example
///
/// ```
/// use work_tracker::models::YearMonth;
/// use chrono::NaiveDate;
///
/// let january = YearMonth::new(2026, 1).unwrap();
/// assert_eq!(january.first_day(), NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
/// assert_eq!(january.last_day(), NaiveDate::from_ymd_opt(2026, 1, 31).unwrap());
/// assert_eq!(january.previous(), YearMonth::new(2025, 12).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "RawYearMonth", try_from = "RawYearMonth")]
pub struct YearMonth {
    first_day: NaiveDate,
}

#[derive(Serialize, Deserialize)]
struct RawYearMonth {
    year: i32,
    month: u32,
}

impl From<YearMonth> for RawYearMonth {
    fn from(value: YearMonth) -> Self {
        Self {
            year: value.year(),
            month: value.month(),
        }
    }
}

impl TryFrom<RawYearMonth> for YearMonth {
    type Error = TrackerError;

    fn try_from(value: RawYearMonth) -> TrackerResult<Self> {
        YearMonth::new(value.year, value.month)
    }
}

impl YearMonth {
    /// Creates a month, rejecting months outside 1..=12 and unrepresentable years.
    pub fn new(year: i32, month: u32) -> TrackerResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(TrackerError::InvalidMonth { year, month });
        }
        NaiveDate::from_ymd_opt(year, month, 1)
            .map(|first_day| Self { first_day })
            .ok_or(TrackerError::InvalidMonth { year, month })
    }

    /// The month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            first_day: date.with_day(1).unwrap_or(date),
        }
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    /// The month number, 1 = January.
    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        self.first_day
    }

    /// The last day of the month.
    pub fn last_day(&self) -> NaiveDate {
        self.first_day
            .checked_add_months(Months::new(1))
            .and_then(|next| next.pred_opt())
            .unwrap_or(self.first_day)
    }

    /// Number of days in the month, accounting for leap years.
    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    /// Weekday index of the first day, counting from Sunday = 0.
    pub fn leading_weekday(&self) -> u32 {
        self.first_day.weekday().num_days_from_sunday()
    }

    /// The previous month, wrapping January back to December of the prior year.
    pub fn previous(&self) -> Self {
        let (year, month) = match self.month() {
            1 => (self.year() - 1, 12),
            m => (self.year(), m - 1),
        };
        Self::new(year, month).unwrap_or(*self)
    }

    /// The next month, wrapping December forward to January of the next year.
    pub fn next(&self) -> Self {
        let (year, month) = match self.month() {
            12 => (self.year() + 1, 1),
            m => (self.year(), m + 1),
        };
        Self::new(year, month).unwrap_or(*self)
    }

    /// The inclusive window [first day, last day].
    pub fn window(&self) -> DateWindow {
        DateWindow {
            start: self.first_day(),
            end: self.last_day(),
        }
    }

    /// Display title such as "January 2026".
    pub fn title(&self) -> String {
        self.first_day.format("%B %Y").to_string()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year(), self.month())
    }
}

/// An inclusive range of calendar dates.
///
/// # Example
///
/// ```
/// use work_tracker::models::DateWindow;
/// use chrono::NaiveDate;
///
/// let window = DateWindow {
///     start: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     end: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
/// };
/// assert!(window.contains(NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()));
/// assert!(!window.contains(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()));
/// assert_eq!(window.days().count(), 31);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    /// First date in the window (inclusive).
    pub start: NaiveDate,
    /// Last date in the window (inclusive).
    pub end: NaiveDate,
}

impl DateWindow {
    /// The window covering a whole calendar year.
    pub fn for_year(year: i32) -> TrackerResult<Self> {
        let january = YearMonth::new(year, 1)?;
        let december = YearMonth::new(year, 12)?;
        Ok(Self {
            start: january.first_day(),
            end: december.last_day(),
        })
    }

    /// Checks whether `date` falls inside the window, inclusive of both ends.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Iterates every date in the window in ascending order.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}
