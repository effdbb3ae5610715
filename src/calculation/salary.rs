//! The salary calculator.
//!
//! This module composes the rule modules into one pure function mapping
//! (compensation profile, attendance summary, period, adjustments) to a
//! fully itemized [`SalaryBreakdown`]. It has no side effects and returns
//! identical output for identical input.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::PayrollRules;
use crate::error::{PayrollError, PayrollResult};
use crate::models::{
    AttendanceSummary, CalculationWarning, CompensationProfile, PayAdjustments, PayPeriod,
};

use super::deductions::calculate_deductions;
use super::overtime::calculate_overtime_pay;

/// Warning code: deductions exceeded gross pay and net was clamped to zero.
pub const WARN_DEDUCTIONS_EXCEED_GROSS: &str = "DEDUCTIONS_EXCEED_GROSS";

/// Warning code: present plus absent days exceed the period's working days.
pub const WARN_ATTENDANCE_EXCEEDS_WORKING_DAYS: &str = "ATTENDANCE_EXCEEDS_WORKING_DAYS";

/// The fully itemized output of one salary calculation.
///
/// Field semantics match [`SalaryRecord`](crate::models::SalaryRecord);
/// the batch orchestrator copies a breakdown into a record when it
/// persists one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    /// Monthly basic salary.
    pub basic_salary: Decimal,
    /// House rent allowance.
    pub house_rent: Decimal,
    /// Medical allowance.
    pub medical_allowance: Decimal,
    /// Transport allowance.
    pub transport_allowance: Decimal,
    /// Other recurring allowance.
    pub other_allowance: Decimal,
    /// Sum of the four allowance fields.
    pub total_allowance: Decimal,
    /// Sales commission for the period.
    pub commission: Decimal,
    /// Overtime pay for the period.
    pub overtime_amount: Decimal,
    /// Eid bonus.
    pub eid_bonus: Decimal,
    /// Festival bonus.
    pub festival_bonus: Decimal,
    /// Performance bonus.
    pub performance_bonus: Decimal,
    /// Other one-off bonus.
    pub other_bonus: Decimal,
    /// Sum of the four bonus fields.
    pub total_bonus: Decimal,
    /// Deduction for late arrivals.
    pub late_deduction: Decimal,
    /// Deduction for absent days.
    pub absent_deduction: Decimal,
    /// Income tax withheld.
    pub tax_deduction: Decimal,
    /// Provident fund contribution.
    pub provident_fund: Decimal,
    /// Other deductions.
    pub other_deductions: Decimal,
    /// Sum of the five deduction fields.
    pub total_deductions: Decimal,
    /// Basic + allowances + bonuses + commission + overtime.
    pub gross_salary: Decimal,
    /// Gross minus deductions, floor-clamped at zero.
    pub net_salary: Decimal,
    /// Non-fatal findings surfaced during calculation.
    pub warnings: Vec<CalculationWarning>,
}

fn ensure_non_negative(field: &str, value: Decimal) -> PayrollResult<()> {
    if value < Decimal::ZERO {
        return Err(PayrollError::NegativeInput {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

/// Calculates one employee's itemized salary for one period.
///
/// Pure and deterministic: identical inputs always produce an identical
/// breakdown. All monetary and attendance inputs are validated as
/// non-negative before anything is computed.
///
/// # Errors
///
/// - `NegativeInput` when any monetary or attendance input is negative.
/// - `Calculation` when the summary is inconsistent with the period or a
///   per-day rate cannot be derived.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::calculate_salary;
/// use payroll_engine::config::PayrollRules;
/// use payroll_engine::models::{
///     AttendanceSummary, CompensationProfile, PayAdjustments, PayPeriod,
/// };
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
/// let period = PayPeriod::new(1, 2026).unwrap();
///
/// let breakdown = calculate_salary(
///     &profile,
///     &summary,
///     period,
///     &PayAdjustments::default(),
///     &PayrollRules::default(),
/// )
/// .unwrap();
/// assert_eq!(breakdown.net_salary, Decimal::from_str("17461.54").unwrap());
/// ```
pub fn calculate_salary(
    profile: &CompensationProfile,
    summary: &AttendanceSummary,
    period: PayPeriod,
    adjustments: &PayAdjustments,
    rules: &PayrollRules,
) -> PayrollResult<SalaryBreakdown> {
    ensure_non_negative("basic_salary", profile.basic_salary)?;
    ensure_non_negative("house_rent", profile.house_rent)?;
    ensure_non_negative("medical_allowance", profile.medical_allowance)?;
    ensure_non_negative("transport_allowance", profile.transport_allowance)?;
    ensure_non_negative("other_allowance", profile.other_allowance)?;
    ensure_non_negative(
        "provident_fund_percentage",
        profile.provident_fund_percentage,
    )?;
    ensure_non_negative("commission", adjustments.commission)?;
    ensure_non_negative("eid_bonus", adjustments.eid_bonus)?;
    ensure_non_negative("festival_bonus", adjustments.festival_bonus)?;
    ensure_non_negative("performance_bonus", adjustments.performance_bonus)?;
    ensure_non_negative("other_bonus", adjustments.other_bonus)?;
    ensure_non_negative("tax_deduction", adjustments.tax_deduction)?;
    ensure_non_negative("other_deductions", adjustments.other_deductions)?;
    ensure_non_negative("present_days", summary.present_days)?;
    ensure_non_negative("absent_days", summary.absent_days)?;
    ensure_non_negative("late_hours", summary.late_hours)?;

    if summary.working_days > period.days_in_month() {
        return Err(PayrollError::Calculation {
            message: format!(
                "summary has {} working days but {} only has {} calendar days",
                summary.working_days,
                period,
                period.days_in_month()
            ),
        });
    }

    let mut warnings = Vec::new();

    if summary.present_days + summary.absent_days > Decimal::from(summary.working_days) {
        warnings.push(CalculationWarning {
            code: WARN_ATTENDANCE_EXCEEDS_WORKING_DAYS.to_string(),
            message: format!(
                "present ({}) plus absent ({}) days exceed the {} working days of {}",
                summary.present_days, summary.absent_days, summary.working_days, period
            ),
        });
    }

    let total_allowance = profile.house_rent
        + profile.medical_allowance
        + profile.transport_allowance
        + profile.other_allowance;

    let total_bonus = adjustments.eid_bonus
        + adjustments.festival_bonus
        + adjustments.performance_bonus
        + adjustments.other_bonus;

    let overtime_amount = calculate_overtime_pay(
        profile.basic_salary,
        summary.working_days,
        summary.overtime_minutes,
        rules,
    )?;

    let deductions = calculate_deductions(profile, summary, adjustments, rules)?;

    let gross_salary = profile.basic_salary
        + total_allowance
        + total_bonus
        + adjustments.commission
        + overtime_amount;

    let net_salary = if deductions.total > gross_salary {
        warnings.push(CalculationWarning {
            code: WARN_DEDUCTIONS_EXCEED_GROSS.to_string(),
            message: format!(
                "deductions {} exceed gross {} by {}; net clamped to zero",
                deductions.total,
                gross_salary,
                deductions.total - gross_salary
            ),
        });
        Decimal::ZERO
    } else {
        gross_salary - deductions.total
    };

    Ok(SalaryBreakdown {
        basic_salary: profile.basic_salary,
        house_rent: profile.house_rent,
        medical_allowance: profile.medical_allowance,
        transport_allowance: profile.transport_allowance,
        other_allowance: profile.other_allowance,
        total_allowance,
        commission: adjustments.commission,
        overtime_amount,
        eid_bonus: adjustments.eid_bonus,
        festival_bonus: adjustments.festival_bonus,
        performance_bonus: adjustments.performance_bonus,
        other_bonus: adjustments.other_bonus,
        total_bonus,
        late_deduction: deductions.late_deduction,
        absent_deduction: deductions.absent_deduction,
        tax_deduction: deductions.tax_deduction,
        provident_fund: deductions.provident_fund,
        other_deductions: deductions.other_deductions,
        total_deductions: deductions.total,
        gross_salary,
        net_salary,
        warnings,
    })
}
