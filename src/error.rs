//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during payroll processing.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use crate::models::SalaryStatus;

/// The main error type for the payroll engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::PayrollError;
///
/// let error = PayrollError::InvalidPeriod { month: 13 };
/// assert_eq!(error.to_string(), "Invalid payroll period: month 13 is out of range");
/// ```
#[derive(Debug, Error)]
pub enum PayrollError {
    /// The payroll period month was outside 1–12.
    #[error("Invalid payroll period: month {month} is out of range")]
    InvalidPeriod {
        /// The rejected month value.
        month: u32,
    },

    /// A monetary or attendance input was negative.
    #[error("Negative input for '{field}': {value}")]
    NegativeInput {
        /// The name of the offending field.
        field: String,
        /// The rejected value.
        value: Decimal,
    },

    /// A final calculation was requested for a period that has not elapsed.
    #[error("Attendance for {year}-{month:02} is incomplete as of {as_of}")]
    AttendanceIncomplete {
        /// The month of the requested period.
        month: u32,
        /// The year of the requested period.
        year: i32,
        /// The date the calculation was attempted.
        as_of: NaiveDate,
    },

    /// A live salary record already exists for the employee and period.
    #[error("A salary record already exists for employee '{employee_id}' in {year}-{month:02}")]
    DuplicateRecord {
        /// The employee the record belongs to.
        employee_id: String,
        /// The month of the existing record.
        month: u32,
        /// The year of the existing record.
        year: i32,
    },

    /// A lifecycle transition was attempted from an invalid source state.
    #[error("Cannot {action} a salary record in '{from}' state")]
    InvalidTransition {
        /// The state the record was in.
        from: SalaryStatus,
        /// The attempted action.
        action: String,
    },

    /// The financial account could not cover the requested debit.
    #[error(
        "Insufficient balance in account '{account_id}': current {balance}, requested {requested}"
    )]
    InsufficientBalance {
        /// The account that was debited.
        account_id: String,
        /// The balance at the time of the attempt.
        balance: Decimal,
        /// The amount the debit asked for.
        requested: Decimal,
    },

    /// No salary record exists with the given id.
    #[error("Salary record not found: {record_id}")]
    RecordNotFound {
        /// The id that was looked up.
        record_id: Uuid,
    },

    /// No financial account exists with the given id.
    #[error("Financial account not found: {account_id}")]
    AccountNotFound {
        /// The id that was looked up.
        account_id: String,
    },

    /// Rules file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Rules file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParse {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    Calculation {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return PayrollError.
pub type PayrollResult<T> = Result<T, PayrollError>;
