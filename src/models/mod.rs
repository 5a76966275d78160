//! Core data models for the Work Tracker.
//!
//! This module contains all the domain models used throughout the tracker.

mod day_aggregate;
mod holiday;
mod month;
mod summary;
mod work_record;

pub use day_aggregate::DayAggregate;
pub use holiday::Holiday;
pub use month::{DateWindow, YearMonth};
pub use summary::{
    AuditStep, AuditTrace, AuditWarning, DataStatus, DayCredit, MonthlySummary, MonthlyTotal,
};
pub use work_record::{Period, WorkShiftRecord};
