//! Monthly summary orchestration.
//!
//! Combines day aggregation, day crediting and the salary calculation into a
//! [`MonthlySummary`] with a full audit trace.

use std::time::Instant;

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::ledger::{HolidayIndex, ShiftLedger};
use crate::models::{AuditTrace, AuditWarning, DataStatus, MonthlySummary, MonthlyTotal, YearMonth};

use super::day_aggregation::build_day_aggregates;
use super::day_credit::day_credit;
use super::salary::calculate_salary;
use super::working_days::calculate_working_days;

/// Computes the totals for `year_month` without building an audit trace.
///
/// Overflowing credits and products clamp to `Decimal::MAX`.
///
/// # Example
///
/// ```
/// use work_tracker::calculation::monthly_total;
/// use work_tracker::ledger::{HolidayIndex, ShiftLedger};
/// use work_tracker::models::YearMonth;
/// use rust_decimal::Decimal;
///
/// let month = YearMonth::new(2026, 1).unwrap();
/// let total = monthly_total(
///     month,
///     &ShiftLedger::empty(month.window()),
///     &HolidayIndex::empty(2026),
///     Decimal::new(300, 0),
/// );
/// assert_eq!(total.total_working_days, Decimal::ZERO);
/// assert_eq!(total.display_salary(), "0.00");
/// ```
pub fn monthly_total(
    year_month: YearMonth,
    ledger: &ShiftLedger,
    holidays: &HolidayIndex,
    daily_rate: Decimal,
) -> MonthlyTotal {
    let total_working_days = build_day_aggregates(ledger, holidays, year_month.window())
        .iter()
        .map(day_credit)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    MonthlyTotal {
        total_working_days,
        daily_rate,
        salary: total_working_days.saturating_mul(daily_rate),
    }
}

/// Summarises one month of shifts.
///
/// Only records inside the month are counted. When the ledger or the
/// holiday index stands in for a failed load, the totals are computed from
/// what is available (zero for a missing ledger) and a warning is attached
/// to the audit trace.
pub fn summarize_month(
    year_month: YearMonth,
    ledger: &ShiftLedger,
    holidays: &HolidayIndex,
    daily_rate: Decimal,
) -> MonthlySummary {
    let start_time = Instant::now();
    let mut warnings = Vec::new();

    if !ledger.is_available() {
        warnings.push(AuditWarning {
            code: "SHIFTS_UNAVAILABLE".to_string(),
            message: format!(
                "Shift records for {} could not be loaded; totals are reported as zero",
                year_month
            ),
            severity: "high".to_string(),
        });
    }
    if !holidays.is_available() {
        warnings.push(AuditWarning {
            code: "HOLIDAYS_UNAVAILABLE".to_string(),
            message: format!(
                "Holidays for {} could not be loaded; no multipliers were applied",
                holidays.year()
            ),
            severity: "medium".to_string(),
        });
    } else if holidays.year() != year_month.year() {
        warnings.push(AuditWarning {
            code: "HOLIDAY_YEAR_MISMATCH".to_string(),
            message: format!(
                "Holiday index covers {} but the month is {}",
                holidays.year(),
                year_month
            ),
            severity: "medium".to_string(),
        });
    }

    let days = build_day_aggregates(ledger, holidays, year_month.window());
    let working_days = calculate_working_days(&days, 1);
    let next_step = working_days.audit_steps.len() as u32 + 1;
    let salary = calculate_salary(working_days.total_working_days, daily_rate, next_step);

    if working_days.saturated || salary.saturated {
        warnings.push(AuditWarning {
            code: "ARITHMETIC_OVERFLOW".to_string(),
            message: format!(
                "Totals for {} exceed the representable range and were clamped",
                year_month
            ),
            severity: "high".to_string(),
        });
    }

    let mut steps = working_days.audit_steps;
    steps.push(salary.audit_step);

    let duration_us = start_time.elapsed().as_micros() as u64;

    MonthlySummary {
        summary_id: Uuid::new_v4(),
        computed_at: Utc::now(),
        engine_version: env!("CARGO_PKG_VERSION").to_string(),
        year_month,
        totals: salary.total,
        days: working_days.day_credits,
        status: DataStatus {
            shifts_available: ledger.is_available(),
            holidays_available: holidays.is_available(),
        },
        audit_trace: AuditTrace {
            steps,
            warnings,
            duration_us,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::daily_rate;
    use crate::models::{Holiday, Period, WorkShiftRecord};
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn january() -> YearMonth {
        YearMonth::new(2026, 1).unwrap()
    }

    fn worked(date: &str, period: Period) -> WorkShiftRecord {
        WorkShiftRecord {
            id: Uuid::new_v4(),
            date: make_date(date),
            period,
            is_working: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn default_rate() -> Decimal {
        daily_rate(dec("8500"), dec("26")).unwrap()
    }

    fn holiday(date: &str, on: &str, off: &str) -> Holiday {
        Holiday {
            date: make_date(date),
            name: "Company Day".to_string(),
            on_shift_multiplier: dec(on),
            off_shift_multiplier: dec(off),
        }
    }

    #[test]
    fn test_full_half_and_holiday_days() {
        let ledger = ShiftLedger::from_records(
            january().window(),
            vec![
                worked("2026-01-05", Period::Morning),
                worked("2026-01-05", Period::Afternoon),
                worked("2026-01-06", Period::Morning),
                worked("2026-01-07", Period::Morning),
                worked("2026-01-07", Period::Afternoon),
            ],
        );
        let holidays =
            HolidayIndex::from_holidays(2026, vec![holiday("2026-01-07", "2.0", "1.0")]);

        let summary = summarize_month(january(), &ledger, &holidays, default_rate());

        assert_eq!(summary.totals.total_working_days, dec("3.5"));
        assert_eq!(summary.totals.display_working_days(), "3.5");
        assert_eq!(summary.totals.display_salary(), "1144.23");
        assert_eq!(summary.days.len(), 3);
        assert!(summary.status.is_complete());
        assert!(summary.audit_trace.warnings.is_empty());
        // 3 day credits, the total and the salary
        assert_eq!(summary.audit_trace.steps.len(), 5);
        assert_eq!(summary.audit_trace.steps[4].rule_id, "salary");
        assert_eq!(summary.audit_trace.steps[4].step_number, 5);
    }

    #[test]
    fn test_empty_month_is_zero() {
        let summary = summarize_month(
            january(),
            &ShiftLedger::empty(january().window()),
            &HolidayIndex::empty(2026),
            default_rate(),
        );
        assert_eq!(summary.totals.display_working_days(), "0.0");
        assert_eq!(summary.totals.display_salary(), "0.00");
        assert!(summary.days.is_empty());
    }

    #[test]
    fn test_half_day_on_holiday_is_multiplied() {
        let ledger = ShiftLedger::from_records(
            january().window(),
            vec![worked("2026-01-01", Period::Afternoon)],
        );
        let holidays = HolidayIndex::from_holidays(2026, vec![holiday("2026-01-01", "3", "2")]);
        let summary = summarize_month(january(), &ledger, &holidays, dec("100"));
        assert_eq!(summary.totals.total_working_days, dec("1.5"));
        assert_eq!(summary.totals.salary, dec("150"));
    }

    #[test]
    fn test_unworked_holiday_contributes_nothing() {
        let holidays = HolidayIndex::from_holidays(2026, vec![holiday("2026-01-01", "3", "2")]);
        let summary = summarize_month(
            january(),
            &ShiftLedger::empty(january().window()),
            &holidays,
            dec("100"),
        );
        assert_eq!(summary.totals.total_working_days, Decimal::ZERO);
    }

    #[test]
    fn test_unavailable_shifts_reports_zero_with_warning() {
        let summary = summarize_month(
            january(),
            &ShiftLedger::unavailable(january().window()),
            &HolidayIndex::empty(2026),
            default_rate(),
        );
        assert_eq!(summary.totals.total_working_days, Decimal::ZERO);
        assert!(!summary.status.shifts_available);
        assert!(summary.status.holidays_available);
        assert_eq!(summary.audit_trace.warnings.len(), 1);
        assert_eq!(summary.audit_trace.warnings[0].code, "SHIFTS_UNAVAILABLE");
    }

    #[test]
    fn test_unavailable_holidays_counts_without_multipliers() {
        let ledger = ShiftLedger::from_records(
            january().window(),
            vec![
                worked("2026-01-01", Period::Morning),
                worked("2026-01-01", Period::Afternoon),
            ],
        );
        let summary = summarize_month(
            january(),
            &ledger,
            &HolidayIndex::unavailable(2026),
            dec("100"),
        );
        assert_eq!(summary.totals.total_working_days, dec("1"));
        assert!(!summary.status.holidays_available);
        assert_eq!(summary.audit_trace.warnings[0].code, "HOLIDAYS_UNAVAILABLE");
    }

    #[test]
    fn test_holiday_year_mismatch_is_warned() {
        let summary = summarize_month(
            january(),
            &ShiftLedger::empty(january().window()),
            &HolidayIndex::empty(2025),
            dec("100"),
        );
        assert_eq!(summary.audit_trace.warnings[0].code, "HOLIDAY_YEAR_MISMATCH");
    }

    #[test]
    fn test_records_of_neighbouring_months_are_ignored() {
        let wide = crate::models::DateWindow {
            start: make_date("2025-12-01"),
            end: make_date("2026-02-28"),
        };
        let ledger = ShiftLedger::from_records(
            wide,
            vec![
                worked("2025-12-31", Period::Morning),
                worked("2026-01-15", Period::Morning),
                worked("2026-02-01", Period::Morning),
            ],
        );
        let total = monthly_total(january(), &ledger, &HolidayIndex::empty(2026), dec("100"));
        assert_eq!(total.total_working_days, dec("0.5"));
    }

    #[test]
    fn test_huge_holiday_multiplier_is_clamped_with_warning() {
        let ledger = ShiftLedger::from_records(
            january().window(),
            vec![
                worked("2026-01-01", Period::Morning),
                worked("2026-01-02", Period::Morning),
                worked("2026-01-03", Period::Morning),
            ],
        );
        let max = Decimal::MAX.to_string();
        let holidays = HolidayIndex::from_holidays(
            2026,
            vec![
                holiday("2026-01-01", &max, "1"),
                holiday("2026-01-02", &max, "1"),
                holiday("2026-01-03", &max, "1"),
            ],
        );

        let summary = summarize_month(january(), &ledger, &holidays, default_rate());
        assert_eq!(summary.totals.total_working_days, Decimal::MAX);
        assert_eq!(summary.totals.salary, Decimal::MAX);
        let codes: Vec<&str> = summary
            .audit_trace
            .warnings
            .iter()
            .map(|w| w.code.as_str())
            .collect();
        assert_eq!(codes, vec!["ARITHMETIC_OVERFLOW"]);

        let total = monthly_total(january(), &ledger, &holidays, default_rate());
        assert_eq!(total.total_working_days, Decimal::MAX);
        assert_eq!(total.salary, Decimal::MAX);
    }

    #[test]
    fn test_summary_metadata() {
        let summary = summarize_month(
            january(),
            &ShiftLedger::empty(january().window()),
            &HolidayIndex::empty(2026),
            dec("100"),
        );
        assert_eq!(summary.engine_version, env!("CARGO_PKG_VERSION"));
        assert_eq!(summary.year_month, january());
        assert!(!summary.summary_id.is_nil());
    }

    proptest! {
        #[test]
        fn prop_summary_and_total_agree(
            cells in proptest::collection::vec((1u32..=31, any::<bool>()), 0..40),
            holiday_day in 1u32..=31,
            on in 0u32..400,
        ) {
            let records: Vec<WorkShiftRecord> = cells
                .iter()
                .map(|(day, morning)| WorkShiftRecord {
                    id: Uuid::new_v4(),
                    date: NaiveDate::from_ymd_opt(2026, 1, *day).unwrap(),
                    period: if *morning { Period::Morning } else { Period::Afternoon },
                    is_working: true,
                    created_at: Utc::now(),
                    updated_at: Utc::now(),
                })
                .collect();
            let ledger = ShiftLedger::from_records(january().window(), records);
            let holidays = HolidayIndex::from_holidays(2026, vec![Holiday {
                date: NaiveDate::from_ymd_opt(2026, 1, holiday_day).unwrap(),
                name: "Any".to_string(),
                on_shift_multiplier: Decimal::new(on as i64, 2),
                off_shift_multiplier: Decimal::ONE,
            }]);

            let summary = summarize_month(january(), &ledger, &holidays, dec("100"));
            let total = monthly_total(january(), &ledger, &holidays, dec("100"));
            prop_assert_eq!(&summary.totals, &total);
            prop_assert!(summary.totals.total_working_days >= Decimal::ZERO);
            prop_assert_eq!(
                summary.totals.salary,
                summary.totals.total_working_days * dec("100")
            );
        }
    }
}
