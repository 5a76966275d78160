//! Calculation logic for the Work Tracker.
//!
//! This module turns a month of AM/PM shift records and the year's holidays
//! into a weighted working-day total and a salary: day aggregation, per-day
//! crediting with holiday multipliers, the monthly total and the salary.
//! Every step is recorded in an audit trace.

mod day_aggregation;
mod day_credit;
mod monthly_summary;
mod salary;
mod working_days;

pub use day_aggregation::build_day_aggregates;
pub use day_credit::{DayCreditResult, calculate_day_credit, day_credit};
pub use monthly_summary::{monthly_total, summarize_month};
pub use salary::{SalaryResult, calculate_salary, daily_rate};
pub use working_days::{WorkingDaysResult, calculate_working_days};
