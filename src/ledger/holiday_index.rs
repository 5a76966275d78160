//! Holiday lookup for a calendar year.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use tracing::{info, warn};

use crate::models::{DateWindow, Holiday};
use crate::store::ShiftStore;

/// Holidays of one year keyed by date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayIndex {
    year: i32,
    holidays: HashMap<NaiveDate, Holiday>,
    available: bool,
}

impl HolidayIndex {
    /// A loaded index with no holidays.
    pub fn empty(year: i32) -> Self {
        Self {
            year,
            holidays: HashMap::new(),
            available: true,
        }
    }

    /// An empty index standing in for a failed load.
    pub fn unavailable(year: i32) -> Self {
        Self {
            available: false,
            ..Self::empty(year)
        }
    }

    /// Builds an index from store rows, ignoring holidays of other years.
    pub fn from_holidays(year: i32, holidays: impl IntoIterator<Item = Holiday>) -> Self {
        let holidays = holidays
            .into_iter()
            .filter(|h| h.date.year() == year)
            .map(|h| (h.date, h))
            .collect();
        Self {
            year,
            holidays,
            available: true,
        }
    }

    /// Loads every holiday of `year`, degrading to an empty index on failure.
    pub async fn load(store: &dyn ShiftStore, year: i32) -> Self {
        let window = match DateWindow::for_year(year) {
            Ok(window) => window,
            Err(err) => {
                warn!(year, error = %err, "Cannot build holiday window");
                return Self::unavailable(year);
            }
        };

        match store.load_holidays(window).await {
            Ok(rows) => {
                let index = Self::from_holidays(year, rows);
                info!(year, holidays = index.len(), "Holiday index loaded");
                index
            }
            Err(err) => {
                warn!(year, error = %err, "Holidays unavailable, using empty index");
                Self::unavailable(year)
            }
        }
    }

    /// The year this index covers.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// False when the load that produced this index failed.
    pub fn is_available(&self) -> bool {
        self.available
    }

    /// The holiday on `date`, if any.
    pub fn get(&self, date: NaiveDate) -> Option<&Holiday> {
        self.holidays.get(&date)
    }

    /// Returns true if `date` is a holiday.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains_key(&date)
    }

    /// Number of holidays in the index.
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    /// Returns true when the index holds no holidays.
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }
}
