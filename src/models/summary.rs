//! Monthly summary models for the Work Tracker.
//!
//! This module contains the [`MonthlySummary`] type and its associated
//! structures that capture the output of a monthly aggregation: per-day
//! credits, totals, data availability and the audit trace.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::YearMonth;

/// The credit contributed by one worked date.
///
/// # Example
///
/// ```
/// use work_tracker::models::DayCredit;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let credit = DayCredit {
///     date: NaiveDate::from_ymd_opt(2026, 1, 7).unwrap(),
///     base_credit: Decimal::ONE,
///     multiplier: Some(Decimal::new(2, 0)),
///     credit: Decimal::new(2, 0),
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayCredit {
    /// The date credited.
    pub date: NaiveDate,
    /// 1 for a full day, 0.5 for a half day.
    pub base_credit: Decimal,
    /// The holiday multiplier applied, if the date is a holiday.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multiplier: Option<Decimal>,
    /// The credit after the holiday adjustment.
    pub credit: Decimal,
}

/// Weighted working-day total and the salary derived from it.
///
/// Values are unrounded; use the `display_*` helpers for presentation.
///
/// # Example
///
/// ```
/// use work_tracker::models::MonthlyTotal;
/// use rust_decimal::Decimal;
///
/// let total = MonthlyTotal {
///     total_working_days: Decimal::new(35, 1),
///     daily_rate: Decimal::new(8500, 0) / Decimal::new(26, 0),
///     salary: Decimal::new(35, 1) * (Decimal::new(8500, 0) / Decimal::new(26, 0)),
/// };
/// assert_eq!(total.display_working_days(), "3.5");
/// assert_eq!(total.display_salary(), "1144.23");
/// assert_eq!(total.display_daily_rate(), "326.92");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyTotal {
    /// Sum of all adjusted day credits.
    pub total_working_days: Decimal,
    /// Pay per credited day.
    pub daily_rate: Decimal,
    /// `total_working_days * daily_rate`.
    pub salary: Decimal,
}

impl MonthlyTotal {
    /// A zero total at the given rate.
    pub fn zero(daily_rate: Decimal) -> Self {
        Self {
            total_working_days: Decimal::ZERO,
            daily_rate,
            salary: Decimal::ZERO,
        }
    }

    /// Working days rounded to one decimal place.
    pub fn display_working_days(&self) -> String {
        fixed(self.total_working_days, 1)
    }

    /// Salary rounded to two decimal places.
    pub fn display_salary(&self) -> String {
        fixed(self.salary, 2)
    }

    /// Daily rate rounded to two decimal places.
    pub fn display_daily_rate(&self) -> String {
        fixed(self.daily_rate, 2)
    }
}

fn fixed(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", dp as usize, rounded)
}

/// Which inputs of a summary were actually loaded.
///
/// A failed load degrades to an empty index, so a zero total with
/// `shifts_available == false` means "unknown", not "no work".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataStatus {
    /// Whether the shift records were loaded.
    pub shifts_available: bool,
    /// Whether the holidays were loaded.
    pub holidays_available: bool,
}

impl DataStatus {
    /// Both inputs loaded.
    pub const COMPLETE: DataStatus = DataStatus {
        shifts_available: true,
        holidays_available: true,
    };

    /// Returns true when both inputs were loaded.
    pub fn is_complete(&self) -> bool {
        self.shifts_available && self.holidays_available
    }
}

impl Default for DataStatus {
    fn default() -> Self {
        Self::COMPLETE
    }
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated while producing a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The complete audit trace for a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
    /// The total calculation duration in microseconds.
    pub duration_us: u64,
}

/// The complete result of a monthly aggregation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Unique identifier for this summary.
    pub summary_id: Uuid,
    /// When the summary was computed.
    pub computed_at: DateTime<Utc>,
    /// The version of the engine that computed the summary.
    pub engine_version: String,
    /// The month summarised.
    pub year_month: YearMonth,
    /// Totals for the month.
    pub totals: MonthlyTotal,
    /// Per-day credits in date order.
    pub days: Vec<DayCredit>,
    /// Which inputs were available.
    pub status: DataStatus,
    /// Complete audit trace of calculation decisions.
    pub audit_trace: AuditTrace,
}
