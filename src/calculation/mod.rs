//! Calculation logic for the payroll engine.
//!
//! This module contains the pure calculation functions: the money rounding
//! policy, working-day counting, attendance aggregation, overtime pay,
//! deduction computation, and the salary calculator that composes them
//! into a fully itemized breakdown.

mod attendance_summary;
mod deductions;
mod overtime;
mod rounding;
mod salary;
mod working_days;

pub use attendance_summary::{CalculationMode, summarize_attendance};
pub use deductions::{DeductionBreakdown, calculate_deductions};
pub use overtime::calculate_overtime_pay;
pub use rounding::round_money;
pub use salary::{
    SalaryBreakdown, WARN_ATTENDANCE_EXCEEDS_WORKING_DAYS, WARN_DEDUCTIONS_EXCEED_GROSS,
    calculate_salary,
};
pub use working_days::count_working_days;
