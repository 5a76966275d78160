//! Day credit calculation functionality.
//!
//! This module converts a [`DayAggregate`] into the weighted credit it
//! contributes to the monthly working-day total.

use rust_decimal::Decimal;

use crate::models::{AuditStep, DayAggregate, DayCredit};

/// The result of crediting a single day, including the audit step.
#[derive(Debug, Clone)]
pub struct DayCreditResult {
    /// The credit for the day.
    pub day_credit: DayCredit,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
    /// Whether the credit overflowed and was clamped to `Decimal::MAX`.
    pub saturated: bool,
}

/// Calculates the credit for one worked day.
///
/// A full day (AM and PM) is worth 1, a half day 0.5. On a holiday the base
/// credit is multiplied by the holiday's `on_shift_multiplier`, for half and
/// full days alike. `off_shift_multiplier` never affects the credit.
/// A product too large for `Decimal` is clamped to `Decimal::MAX` and
/// flagged in `saturated`.
///
/// # Arguments
///
/// * `day` - The aggregated day
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use work_tracker::calculation::calculate_day_credit;
/// use work_tracker::models::{DayAggregate, Holiday};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2026, 1, 7).unwrap();
/// let day = DayAggregate {
///     date,
///     worked_morning: true,
///     worked_afternoon: false,
///     holiday: Some(Holiday {
///         date,
///         name: "Company Day".to_string(),
///         on_shift_multiplier: Decimal::new(3, 0),
///         off_shift_multiplier: Decimal::new(2, 0),
///     }),
/// };
///
/// let result = calculate_day_credit(&day, 1);
/// assert_eq!(result.day_credit.credit, Decimal::new(15, 1));
/// ```
pub fn calculate_day_credit(day: &DayAggregate, step_number: u32) -> DayCreditResult {
    let base_credit = day.base_credit();
    let shape = match (day.worked_morning, day.worked_afternoon) {
        (true, true) => "Full day (AM + PM)",
        (true, false) => "Half day (AM)",
        (false, true) => "Half day (PM)",
        (false, false) => "No shift worked",
    };

    let mut saturated = false;
    let (multiplier, credit, reasoning) = match &day.holiday {
        Some(holiday) => {
            let multiplier = holiday.on_shift_multiplier;
            let credit = base_credit.checked_mul(multiplier).unwrap_or_else(|| {
                saturated = true;
                Decimal::MAX
            });
            let reasoning = format!(
                "{} = {} x {} on-shift multiplier for '{}' = {}",
                shape,
                base_credit.normalize(),
                multiplier.normalize(),
                holiday.name,
                credit.normalize()
            );
            (Some(multiplier), credit, reasoning)
        }
        None => (
            None,
            base_credit,
            format!("{} = {}", shape, base_credit.normalize()),
        ),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "day_credit".to_string(),
        rule_name: "Day Credit".to_string(),
        input: serde_json::json!({
            "date": day.date.to_string(),
            "worked_morning": day.worked_morning,
            "worked_afternoon": day.worked_afternoon,
            "holiday": day.holiday.as_ref().map(|h| serde_json::json!({
                "name": h.name,
                "on_shift_multiplier": h.on_shift_multiplier.normalize().to_string(),
                "off_shift_multiplier": h.off_shift_multiplier.normalize().to_string(),
            })),
        }),
        output: serde_json::json!({
            "base_credit": base_credit.normalize().to_string(),
            "multiplier": multiplier.map(|m| m.normalize().to_string()),
            "credit": credit.normalize().to_string(),
            "saturated": saturated,
        }),
        reasoning,
    };

    DayCreditResult {
        day_credit: DayCredit {
            date: day.date,
            base_credit,
            multiplier,
            credit,
        },
        audit_step,
        saturated,
    }
}

/// Returns the credit a day contributes without recording an audit step.
///
/// Overflow clamps to `Decimal::MAX`.
pub fn day_credit(day: &DayAggregate) -> Decimal {
    match &day.holiday {
        Some(holiday) => day.base_credit().saturating_mul(holiday.on_shift_multiplier),
        None => day.base_credit(),
    }
}
