//! Holiday model.
//!
//! Holidays are managed outside this system and only ever read.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A holiday with its pay multipliers.
///
/// `off_shift_multiplier` is carried for completeness but is never applied
/// by the aggregation; only `on_shift_multiplier` scales a day's credit.
///
/// # Example
///
/// ```
/// use work_tracker::models::Holiday;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let holiday = Holiday {
///     date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
///     name: "New Year's Day".to_string(),
///     on_shift_multiplier: Decimal::new(3, 0),
///     off_shift_multiplier: Decimal::ONE,
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// The date of the holiday.
    pub date: NaiveDate,
    /// Display label.
    #[serde(default)]
    pub name: String,
    /// Multiplier for a day worked on the holiday.
    pub on_shift_multiplier: Decimal,
    /// Multiplier for a day off on the holiday.
    pub off_shift_multiplier: Decimal,
}
