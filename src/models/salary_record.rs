//! Salary record model and lifecycle states.
//!
//! This module contains the [`SalaryRecord`] type, the one-per-(employee,
//! period) monetary record the whole engine revolves around, together with
//! its [`SalaryStatus`] lifecycle states and payment metadata.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The lifecycle state of a salary record.
///
/// Records move `Pending → Approved → Paid`; nothing leaves `Paid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SalaryStatus {
    /// Calculated but not yet approved; may be recalculated or deleted.
    Pending,
    /// Approved for payment; may be paid or deleted.
    Approved,
    /// Disbursed. Immutable from here on.
    Paid,
}

impl std::fmt::Display for SalaryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            SalaryStatus::Pending => "pending",
            SalaryStatus::Approved => "approved",
            SalaryStatus::Paid => "paid",
        };
        write!(f, "{}", label)
    }
}

/// How a salary was disbursed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Electronic transfer from a registered financial account.
    BankTransfer,
    /// Cash payment recorded manually.
    Cash,
    /// Cheque payment recorded manually.
    Cheque,
    /// Mobile wallet transfer.
    MobileWallet,
}

/// A non-fatal finding surfaced during calculation.
///
/// Warnings ride along on the record so approvers see them; they never
/// block the calculation itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
}

/// One employee's fully itemized salary for one payroll period.
///
/// Created in `Pending` state by the batch orchestrator, mutated only by
/// lifecycle transitions, and immutable once `Paid`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRecord {
    /// Unique identifier for this record.
    pub id: Uuid,
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The month of the payroll period (1–12).
    pub month: u32,
    /// The year of the payroll period.
    pub year: i32,

    /// Working days in the period.
    pub working_days: u32,
    /// Days paid as worked; half-day leave contributes 0.5.
    pub present_days: Decimal,
    /// Days absent without approved leave.
    pub absent_days: Decimal,
    /// Total late hours in the period.
    pub late_hours: Decimal,
    /// Total overtime in the period, in minutes.
    pub overtime_minutes: u64,

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
    /// Other deductions (loans, advances, fines).
    pub other_deductions: Decimal,
    /// Sum of the five deduction fields.
    pub total_deductions: Decimal,

    /// Basic + allowances + bonuses + commission + overtime.
    pub gross_salary: Decimal,
    /// Gross minus deductions, floor-clamped at zero.
    pub net_salary: Decimal,

    /// The lifecycle state of the record.
    pub status: SalaryStatus,
    /// How the salary was disbursed, once paid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    /// External reference of the disbursement, once paid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_reference: Option<String>,
    /// The date the salary was paid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    /// The financial account debited, when paid via the ledger.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_account_id: Option<String>,
    /// Who approved the record.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_by: Option<String>,
    /// When the record was approved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,

    /// Warnings surfaced during calculation.
    #[serde(default)]
    pub warnings: Vec<CalculationWarning>,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl SalaryRecord {
    /// Returns true once the record has been disbursed.
    pub fn is_paid(&self) -> bool {
        self.status == SalaryStatus::Paid
    }

    /// The (employee, month, year) key identifying this record's period slot.
    pub fn period_key(&self) -> (String, u32, i32) {
        (self.employee_id.clone(), self.month, self.year)
    }
}
