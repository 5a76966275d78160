//! Working day total calculation.
//!
//! Sums the credits of every worked day in a month.

use rust_decimal::Decimal;

use crate::models::{AuditStep, DayAggregate, DayCredit};

use super::day_credit::calculate_day_credit;

/// The credited days and their total, with one audit step per day plus a
/// closing total step.
#[derive(Debug, Clone)]
pub struct WorkingDaysResult {
    /// Credit per worked day, in the order given.
    pub day_credits: Vec<DayCredit>,
    /// Sum of all credits.
    pub total_working_days: Decimal,
    /// Audit steps in sequence.
    pub audit_steps: Vec<AuditStep>,
    /// Whether a credit or the total overflowed and was clamped.
    pub saturated: bool,
}

/// Credits each worked day and sums the result.
///
/// Days with neither period worked contribute nothing and are skipped.
/// Audit steps are numbered from `start_step`.
///
/// # Example
///
/// ```
/// use work_tracker::calculation::calculate_working_days;
/// use work_tracker::models::DayAggregate;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let days = vec![
///     DayAggregate {
///         date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
///         worked_morning: true,
///         worked_afternoon: true,
///         holiday: None,
///     },
///     DayAggregate {
///         date: NaiveDate::from_ymd_opt(2026, 1, 6).unwrap(),
///         worked_morning: true,
///         worked_afternoon: false,
///         holiday: None,
///     },
/// ];
///
/// let result = calculate_working_days(&days, 1);
/// assert_eq!(result.total_working_days, Decimal::new(15, 1));
/// assert_eq!(result.audit_steps.len(), 3);
/// ```
pub fn calculate_working_days(days: &[DayAggregate], start_step: u32) -> WorkingDaysResult {
    let mut step_number = start_step;
    let mut day_credits = Vec::with_capacity(days.len());
    let mut audit_steps = Vec::with_capacity(days.len() + 1);
    let mut total_working_days = Decimal::ZERO;
    let mut saturated = false;

    for day in days.iter().filter(|d| d.is_working()) {
        let result = calculate_day_credit(day, step_number);
        step_number += 1;
        saturated |= result.saturated;
        total_working_days = total_working_days
            .checked_add(result.day_credit.credit)
            .unwrap_or_else(|| {
                saturated = true;
                Decimal::MAX
            });
        day_credits.push(result.day_credit);
        audit_steps.push(result.audit_step);
    }

    let full_days = days.iter().filter(|d| d.is_full_day()).count();
    let half_days = days
        .iter()
        .filter(|d| d.is_working() && !d.is_full_day())
        .count();
    let holiday_days = day_credits.iter().filter(|c| c.multiplier.is_some()).count();

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "working_days_total".to_string(),
        rule_name: "Working Days Total".to_string(),
        input: serde_json::json!({
            "worked_days": day_credits.len(),
            "full_days": full_days,
            "half_days": half_days,
            "holiday_days": holiday_days,
        }),
        output: serde_json::json!({
            "total_working_days": total_working_days.normalize().to_string(),
        }),
        reasoning: format!(
            "{} worked day(s) ({} full, {} half, {} on holidays) = {} working days",
            day_credits.len(),
            full_days,
            half_days,
            holiday_days,
            total_working_days.normalize()
        ),
    });

    WorkingDaysResult {
        day_credits,
        total_working_days,
        audit_steps,
        saturated,
    }
}
