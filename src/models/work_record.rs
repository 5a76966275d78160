//! Work-shift record model and related types.
//!
//! This module defines the [`Period`] enum and the [`WorkShiftRecord`] struct
//! for representing half-day shifts as stored in the remote record store.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Half of a working day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Period {
    /// The morning half-day shift.
    #[serde(rename = "AM")]
    Morning,
    /// The afternoon half-day shift.
    #[serde(rename = "PM")]
    Afternoon,
}

impl Period {
    /// Both periods in display order.
    pub const ALL: [Period; 2] = [Period::Morning, Period::Afternoon];
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Period::Morning => write!(f, "AM"),
            Period::Afternoon => write!(f, "PM"),
        }
    }
}

/// A persisted half-day shift.
///
/// One record exists per toggled (date, period) cell. Records are created on
/// the first toggle and mutated in place afterwards; they are never deleted.
///
/// # Example
///
/// ```
/// use work_tracker::models::{Period, WorkShiftRecord};
/// use chrono::{NaiveDate, Utc};
/// use uuid::Uuid;
///
/// let record = WorkShiftRecord {
///     id: Uuid::new_v4(),
///     date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
///     period: Period::Morning,
///     is_working: true,
///     created_at: Utc::now(),
///     updated_at: Utc::now(),
/// };
/// assert_eq!(record.key(), (record.date, Period::Morning));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkShiftRecord {
    /// Store-assigned identifier.
    pub id: Uuid,
    /// The calendar date of the shift.
    pub date: NaiveDate,
    /// Which half of the day this record covers.
    pub period: Period,
    /// Whether the cell is marked as worked.
    pub is_working: bool,
    /// When the record was first created.
    pub created_at: DateTime<Utc>,
    /// When the record was last modified.
    pub updated_at: DateTime<Utc>,
}

impl WorkShiftRecord {
    /// The (date, period) cell this record belongs to.
    pub fn key(&self) -> (NaiveDate, Period) {
        (self.date, self.period)
    }

    /// Returns true if `self` should replace `other` for the same cell.
    ///
    /// The most recently updated record wins; ties fall back to creation time.
    pub fn supersedes(&self, other: &WorkShiftRecord) -> bool {
        (self.updated_at, self.created_at) >= (other.updated_at, other.created_at)
    }
}
