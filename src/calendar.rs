//! Month grid view model.
//!
//! A [`CalendarMonth`] is what a client needs to draw one month: a title,
//! the weekday header row, the number of blank cells before day 1 and the
//! AM/PM state of every day.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::ledger::{HolidayIndex, ShiftLedger};
use crate::models::{Period, YearMonth};

/// Weekday header labels, starting on Sunday.
pub const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// One day cell of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    /// Day of the month, starting at 1.
    pub day: u32,
    /// The full date.
    pub date: NaiveDate,
    /// Whether the AM half-day is marked as worked.
    pub morning_working: bool,
    /// Whether the PM half-day is marked as worked.
    pub afternoon_working: bool,
    /// Name of the holiday on this date, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holiday_name: Option<String>,
}

impl CalendarDay {
    /// The state of one period of this day.
    pub fn is_working(&self, period: Period) -> bool {
        match period {
            Period::Morning => self.morning_working,
            Period::Afternoon => self.afternoon_working,
        }
    }
}

/// A month laid out as a Sunday-first grid.
///
/// # Example
///
/// ```
/// use work_tracker::calendar::build_calendar;
/// use work_tracker::ledger::{HolidayIndex, ShiftLedger};
/// use work_tracker::models::YearMonth;
///
/// let month = YearMonth::new(2026, 1).unwrap();
/// let calendar = build_calendar(
///     month,
///     &ShiftLedger::empty(month.window()),
///     &HolidayIndex::empty(2026),
/// );
/// assert_eq!(calendar.title, "January 2026");
/// assert_eq!(calendar.leading_blanks, 4);
/// assert_eq!(calendar.days.len(), 31);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarMonth {
    /// The month shown.
    pub year_month: YearMonth,
    /// Title such as "January 2026".
    pub title: String,
    /// Column headers, Sunday first.
    pub weekday_headers: Vec<String>,
    /// Empty cells before day 1 (Sunday = 0).
    pub leading_blanks: u32,
    /// One entry per day of the month.
    pub days: Vec<CalendarDay>,
}

/// Lays out `year_month` using the current ledger and holidays.
///
/// Cells with no record show as not worked. Ledger records for other
/// months are not shown.
pub fn build_calendar(
    year_month: YearMonth,
    ledger: &ShiftLedger,
    holidays: &HolidayIndex,
) -> CalendarMonth {
    let days = year_month
        .window()
        .days()
        .map(|date| CalendarDay {
            day: date.day(),
            date,
            morning_working: ledger.is_working(date, Period::Morning),
            afternoon_working: ledger.is_working(date, Period::Afternoon),
            holiday_name: holidays.get(date).map(|h| h.name.clone()),
        })
        .collect();

    CalendarMonth {
        year_month,
        title: year_month.title(),
        weekday_headers: WEEKDAY_HEADERS.iter().map(|s| s.to_string()).collect(),
        leading_blanks: year_month.leading_weekday(),
        days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Holiday, WorkShiftRecord};
    use chrono::Utc;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn record(date: &str, period: Period, is_working: bool) -> WorkShiftRecord {
        WorkShiftRecord {
            id: Uuid::new_v4(),
            date: make_date(date),
            period,
            is_working,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_january_2026_layout() {
        let month = YearMonth::new(2026, 1).unwrap();
        let calendar = build_calendar(
            month,
            &ShiftLedger::empty(month.window()),
            &HolidayIndex::empty(2026),
        );
        assert_eq!(calendar.leading_blanks, 4);
        assert_eq!(calendar.days.len(), 31);
        assert_eq!(calendar.days[0].day, 1);
        assert_eq!(calendar.days[30].date, make_date("2026-01-31"));
        assert_eq!(calendar.weekday_headers[0], "Sun");
        assert_eq!(calendar.weekday_headers[6], "Sat");
    }

    #[test]
    fn test_leap_february_has_29_days() {
        let month = YearMonth::new(2028, 2).unwrap();
        let calendar = build_calendar(
            month,
            &ShiftLedger::empty(month.window()),
            &HolidayIndex::empty(2028),
        );
        assert_eq!(calendar.days.len(), 29);
        assert_eq!(calendar.title, "February 2028");
        // 2028-02-01 is a Tuesday
        assert_eq!(calendar.leading_blanks, 2);
    }

    #[test]
    fn test_month_starting_on_sunday_has_no_blanks() {
        // 2026-02-01 is a Sunday
        let month = YearMonth::new(2026, 2).unwrap();
        let calendar = build_calendar(
            month,
            &ShiftLedger::empty(month.window()),
            &HolidayIndex::empty(2026),
        );
        assert_eq!(calendar.leading_blanks, 0);
    }

    #[test]
    fn test_cells_reflect_ledger_and_holidays() {
        let month = YearMonth::new(2026, 1).unwrap();
        let ledger = ShiftLedger::from_records(
            month.window(),
            vec![
                record("2026-01-05", Period::Morning, true),
                record("2026-01-05", Period::Afternoon, false),
                record("2026-01-06", Period::Afternoon, true),
            ],
        );
        let holidays = HolidayIndex::from_holidays(
            2026,
            vec![Holiday {
                date: make_date("2026-01-01"),
                name: "New Year's Day".to_string(),
                on_shift_multiplier: Decimal::new(3, 0),
                off_shift_multiplier: Decimal::ONE,
            }],
        );
        let calendar = build_calendar(month, &ledger, &holidays);

        let fifth = &calendar.days[4];
        assert!(fifth.morning_working);
        assert!(!fifth.afternoon_working);
        assert!(calendar.days[5].is_working(Period::Afternoon));
        assert_eq!(calendar.days[0].holiday_name.as_deref(), Some("New Year's Day"));
        assert_eq!(calendar.days[1].holiday_name, None);
    }
}
