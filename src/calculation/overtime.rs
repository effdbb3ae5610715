//! Overtime pay calculation.
//!
//! Overtime is recorded by the attendance collaborator in minutes and paid
//! at a multiple of the employee's derived hourly rate. The multiplier is
//! a business rule in [`PayrollRules`](crate::config::PayrollRules).

use rust_decimal::Decimal;

use crate::config::PayrollRules;
use crate::error::{PayrollError, PayrollResult};

use super::rounding::round_money;

/// Calculates overtime pay from accumulated overtime minutes.
///
/// The hourly rate is derived from the monthly basic salary: per-day rate
/// (basic / working days) divided by the standard work hours per day. The
/// result is rounded once.
///
/// # Errors
///
/// Returns `Calculation` if `working_days` or the configured work hours
/// per day are zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_overtime_pay;
/// use payroll_engine::config::PayrollRules;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// // 26000 basic over 26 days is 1000/day, 125/hour; two hours of
/// // overtime at the default 2x multiplier pays 500.
/// let pay = calculate_overtime_pay(
///     Decimal::from(26000),
///     26,
///     120,
///     &PayrollRules::default(),
/// )
/// .unwrap();
/// assert_eq!(pay, Decimal::from_str("500.00").unwrap());
/// ```
pub fn calculate_overtime_pay(
    basic_salary: Decimal,
    working_days: u32,
    overtime_minutes: u64,
    rules: &PayrollRules,
) -> PayrollResult<Decimal> {
    if working_days == 0 {
        return Err(PayrollError::Calculation {
            message: "cannot derive a per-day rate from zero working days".to_string(),
        });
    }
    if rules.work_hours_per_day <= Decimal::ZERO {
        return Err(PayrollError::Calculation {
            message: "work_hours_per_day must be positive".to_string(),
        });
    }

    if overtime_minutes == 0 {
        return Ok(Decimal::ZERO);
    }

    let per_day_rate = basic_salary / Decimal::from(working_days);
    let hourly_rate = per_day_rate / rules.work_hours_per_day;
    let overtime_hours = Decimal::from(overtime_minutes) / Decimal::from(60);

    Ok(round_money(
        hourly_rate * overtime_hours * rules.overtime_rate_multiplier,
    ))
}
