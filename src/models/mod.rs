//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod attendance;
mod batch;
mod employee;
mod period;
mod salary_record;

pub use attendance::{AttendanceDay, AttendanceSummary, DayStatus};
pub use batch::{BatchOperationResult, TargetOutcome, TargetReport};
pub use employee::{CompensationProfile, PayAdjustments};
pub use period::PayPeriod;
pub use salary_record::{
    CalculationWarning, PaymentMethod, SalaryRecord, SalaryStatus,
};
