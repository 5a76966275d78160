//! Salary calculation functionality.
//!
//! The daily rate is a fixed monthly base divided by a fixed number of
//! working days, independent of how many days the month actually has.

use rust_decimal::Decimal;

use crate::error::{TrackerError, TrackerResult};
use crate::models::{AuditStep, MonthlyTotal};

/// The result of the salary calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct SalaryResult {
    /// Working days, rate and salary.
    pub total: MonthlyTotal,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
    /// Whether the salary overflowed and was clamped to `Decimal::MAX`.
    pub saturated: bool,
}

/// Derives the daily rate from a monthly base and a working-day divisor.
///
/// # Errors
///
/// Returns [`TrackerError::InvalidConfig`] when the divisor is not positive.
///
/// # Example
///
/// ```
/// use work_tracker::calculation::daily_rate;
/// use rust_decimal::Decimal;
///
/// let rate = daily_rate(Decimal::new(8500, 0), Decimal::new(26, 0)).unwrap();
/// assert_eq!(rate.round_dp(2), Decimal::new(32692, 2));
/// ```
pub fn daily_rate(monthly_base: Decimal, working_days_divisor: Decimal) -> TrackerResult<Decimal> {
    if working_days_divisor <= Decimal::ZERO {
        return Err(TrackerError::InvalidConfig {
            field: "pay.working_days_divisor".to_string(),
            message: format!("must be positive, got {}", working_days_divisor),
        });
    }
    monthly_base
        .checked_div(working_days_divisor)
        .ok_or_else(|| TrackerError::InvalidConfig {
            field: "pay.monthly_base".to_string(),
            message: format!(
                "{} / {} overflows",
                monthly_base, working_days_divisor
            ),
        })
}

/// Multiplies the working-day total by the daily rate.
///
/// The salary is kept unrounded; rounding happens only for display. A
/// product too large for `Decimal` is clamped to `Decimal::MAX`.
///
/// # Example
///
/// ```
/// use work_tracker::calculation::calculate_salary;
/// use rust_decimal::Decimal;
///
/// let rate = Decimal::new(8500, 0) / Decimal::new(26, 0);
/// let result = calculate_salary(Decimal::new(35, 1), rate, 1);
/// assert_eq!(result.total.display_salary(), "1144.23");
/// ```
pub fn calculate_salary(
    total_working_days: Decimal,
    daily_rate: Decimal,
    step_number: u32,
) -> SalaryResult {
    let (salary, saturated) = match total_working_days.checked_mul(daily_rate) {
        Some(salary) => (salary, false),
        None => (Decimal::MAX, true),
    };
    let total = MonthlyTotal {
        total_working_days,
        daily_rate,
        salary,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "salary".to_string(),
        rule_name: "Monthly Salary".to_string(),
        input: serde_json::json!({
            "total_working_days": total_working_days.normalize().to_string(),
            "daily_rate": daily_rate.normalize().to_string(),
        }),
        output: serde_json::json!({
            "salary": salary.normalize().to_string(),
            "display_salary": total.display_salary(),
            "saturated": saturated,
        }),
        reasoning: format!(
            "{} days x {} = {}",
            total_working_days.normalize(),
            total.display_daily_rate(),
            total.display_salary()
        ),
    };

    SalaryResult {
        total,
        audit_step,
        saturated,
    }
}
