//! Deduction calculation.
//!
//! Late and absence deductions are derived from the employee's per-day
//! rate; the provident fund contribution is a percentage of basic salary.
//! Each derived figure is rounded exactly once, here, at the point it is
//! computed.

use rust_decimal::Decimal;

use crate::config::PayrollRules;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{AttendanceSummary, CompensationProfile, PayAdjustments};

use super::rounding::round_money;

/// The itemized deductions for one salary calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeductionBreakdown {
    /// Deduction for late arrivals.
    pub late_deduction: Decimal,
    /// Deduction for absent days.
    pub absent_deduction: Decimal,
    /// Income tax withheld, passed through from the adjustments.
    pub tax_deduction: Decimal,
    /// Provident fund contribution.
    pub provident_fund: Decimal,
    /// Other deductions, passed through from the adjustments.
    pub other_deductions: Decimal,
    /// Sum of the five deduction fields.
    pub total: Decimal,
}

/// Calculates all deductions for one employee and period.
///
/// The per-day rate is basic salary divided by working days. Late hours
/// are converted to day fractions via the configured work hours per day.
/// `late_deduction`, `absent_deduction` and `provident_fund` are rounded
/// half-up to 2 decimals exactly once; the total is a plain sum and is
/// not re-rounded.
///
/// # Errors
///
/// Returns `Calculation` if `working_days` or the configured work hours
/// per day are zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_deductions;
/// use payroll_engine::config::PayrollRules;
/// use payroll_engine::models::{AttendanceSummary, CompensationProfile, PayAdjustments};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let profile = CompensationProfile {
///     employee_id: "emp_001".to_string(),
///     basic_salary: Decimal::from(20000),
///     house_rent: Decimal::ZERO,
///     medical_allowance: Decimal::ZERO,
///     transport_allowance: Decimal::ZERO,
///     other_allowance: Decimal::ZERO,
///     provident_fund_percentage: Decimal::from(5),
/// };
/// let summary = AttendanceSummary {
///     working_days: 26,
///     present_days: Decimal::from(24),
///     absent_days: Decimal::from(2),
///     late_hours: Decimal::ZERO,
///     overtime_minutes: 0,
/// };
///
/// let breakdown = calculate_deductions(
///     &profile,
///     &summary,
///     &PayAdjustments::default(),
///     &PayrollRules::default(),
/// )
/// .unwrap();
/// assert_eq!(breakdown.provident_fund, Decimal::from_str("1000.00").unwrap());
/// assert_eq!(breakdown.absent_deduction, Decimal::from_str("1538.46").unwrap());
/// ```
pub fn calculate_deductions(
    profile: &CompensationProfile,
    summary: &AttendanceSummary,
    adjustments: &PayAdjustments,
    rules: &PayrollRules,
) -> PayrollResult<DeductionBreakdown> {
    if summary.working_days == 0 {
        return Err(PayrollError::Calculation {
            message: "cannot derive a per-day rate from zero working days".to_string(),
        });
    }
    if rules.work_hours_per_day <= Decimal::ZERO {
        return Err(PayrollError::Calculation {
            message: "work_hours_per_day must be positive".to_string(),
        });
    }

    let per_day_rate = profile.basic_salary / Decimal::from(summary.working_days);

    let late_days = summary.late_hours / rules.work_hours_per_day;
    let late_deduction = round_money(per_day_rate * late_days);
    let absent_deduction = round_money(per_day_rate * summary.absent_days);
    let provident_fund = round_money(
        profile.basic_salary * profile.provident_fund_percentage / Decimal::from(100),
    );

    let total = late_deduction
        + absent_deduction
        + adjustments.tax_deduction
        + provident_fund
        + adjustments.other_deductions;

    Ok(DeductionBreakdown {
        late_deduction,
        absent_deduction,
        tax_deduction: adjustments.tax_deduction,
        provident_fund,
        other_deductions: adjustments.other_deductions,
        total,
    })
}
