//! Attendance aggregation.
//!
//! This module reduces a period's daily attendance records into the
//! [`AttendanceSummary`] tuple the salary calculator consumes. It is the
//! boundary to the attendance/leave collaborator: raw day records come in,
//! a fixed input tuple goes out.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::PayrollRules;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{AttendanceDay, AttendanceSummary, DayStatus, PayPeriod};

use super::working_days::count_working_days;

/// Whether a calculation may be persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculationMode {
    /// A final calculation; the period must have fully elapsed.
    Final,
    /// A what-if calculation for a period still in progress; never persisted.
    Preview,
}

/// Reduces one employee's daily attendance records to period totals.
///
/// Days outside the period are ignored. Presence and full-day leave count
/// as a full paid day; half-day leave counts as half a paid day; absence
/// accrues to `absent_days`. Late hours and overtime minutes are summed
/// across all supplied days.
///
/// # Errors
///
/// - `AttendanceIncomplete` when `mode` is [`CalculationMode::Final`] and
///   the period has not fully elapsed as of `as_of`.
/// - `NegativeInput` when any day carries negative late hours.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{CalculationMode, summarize_attendance};
/// use payroll_engine::config::PayrollRules;
/// use payroll_engine::models::{AttendanceDay, DayStatus, PayPeriod};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let period = PayPeriod::new(1, 2026).unwrap();
/// let days = vec![AttendanceDay {
///     date: NaiveDate::from_ymd_opt(2026, 1, 5).unwrap(),
///     status: DayStatus::Present,
///     late_hours: Decimal::ZERO,
///     overtime_minutes: 30,
/// }];
/// let as_of = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
///
/// let summary = summarize_attendance(
///     &days,
///     period,
///     &PayrollRules::default(),
///     CalculationMode::Final,
///     as_of,
/// )
/// .unwrap();
/// assert_eq!(summary.working_days, 26);
/// assert_eq!(summary.present_days, Decimal::ONE);
/// assert_eq!(summary.overtime_minutes, 30);
/// ```
pub fn summarize_attendance(
    days: &[AttendanceDay],
    period: PayPeriod,
    rules: &PayrollRules,
    mode: CalculationMode,
    as_of: NaiveDate,
) -> PayrollResult<AttendanceSummary> {
    if mode == CalculationMode::Final && !period.has_elapsed(as_of) {
        return Err(PayrollError::AttendanceIncomplete {
            month: period.month(),
            year: period.year(),
            as_of,
        });
    }

    let working_days = count_working_days(period, rules.excluded_weekday);

    let mut present_days = Decimal::ZERO;
    let mut absent_days = Decimal::ZERO;
    let mut late_hours = Decimal::ZERO;
    let mut overtime_minutes: u64 = 0;

    let half_day = Decimal::new(5, 1);

    for day in days {
        if !period.contains(day.date) {
            continue;
        }
        if day.late_hours < Decimal::ZERO {
            return Err(PayrollError::NegativeInput {
                field: "late_hours".to_string(),
                value: day.late_hours,
            });
        }

        match day.status {
            DayStatus::Present | DayStatus::FullDayLeave => present_days += Decimal::ONE,
            DayStatus::HalfDayLeave => present_days += half_day,
            DayStatus::Absent => absent_days += Decimal::ONE,
        }

        late_hours += day.late_hours;
        overtime_minutes += u64::from(day.overtime_minutes);
    }

    Ok(AttendanceSummary {
        working_days,
        present_days,
        absent_days,
        late_hours,
        overtime_minutes,
    })
}
