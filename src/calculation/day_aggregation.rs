//! Day aggregation.
//!
//! Collapses the AM/PM records of a ledger into one [`DayAggregate`] per
//! worked date and attaches the holiday for that date.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::ledger::{HolidayIndex, ShiftLedger};
use crate::models::{DateWindow, DayAggregate};

/// Builds the aggregates for every date in `window` with at least one
/// worked period.
///
/// Dates with no worked record are not materialized, and records outside
/// `window` are ignored. The result is sorted by date.
///
/// # Example
///
/// ```
/// use work_tracker::calculation::build_day_aggregates;
/// use work_tracker::ledger::{HolidayIndex, ShiftLedger};
/// use work_tracker::models::YearMonth;
///
/// let window = YearMonth::new(2026, 1).unwrap().window();
/// let days = build_day_aggregates(
///     &ShiftLedger::empty(window),
///     &HolidayIndex::empty(2026),
///     window,
/// );
/// assert!(days.is_empty());
/// ```
pub fn build_day_aggregates(
    ledger: &ShiftLedger,
    holidays: &HolidayIndex,
    window: DateWindow,
) -> Vec<DayAggregate> {
    let mut days: BTreeMap<NaiveDate, DayAggregate> = BTreeMap::new();

    for record in ledger
        .records()
        .filter(|r| r.is_working && window.contains(r.date))
    {
        days.entry(record.date)
            .or_insert_with(|| DayAggregate::new(record.date))
            .mark_worked(record.period);
    }

    for day in days.values_mut() {
        day.holiday = holidays.get(day.date).cloned();
    }

    days.into_values().collect()
}
