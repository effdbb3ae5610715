//! Employee compensation inputs.
//!
//! This module defines the [`CompensationProfile`] and [`PayAdjustments`]
//! types supplied by the HR collaborators for each payroll run.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The standing compensation terms of one employee.
///
/// Profiles are owned by the employee-management collaborator; the engine
/// only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompensationProfile {
    /// Unique identifier for the employee.
    pub employee_id: String,
    /// Monthly basic salary.
    pub basic_salary: Decimal,
    /// Monthly house rent allowance.
    #[serde(default)]
    pub house_rent: Decimal,
    /// Monthly medical allowance.
    #[serde(default)]
    pub medical_allowance: Decimal,
    /// Monthly transport allowance.
    #[serde(default)]
    pub transport_allowance: Decimal,
    /// Any other recurring allowance.
    #[serde(default)]
    pub other_allowance: Decimal,
    /// Provident fund contribution as a percentage of basic salary.
    #[serde(default)]
    pub provident_fund_percentage: Decimal,
}

impl CompensationProfile {
    /// Returns true if the employee is enrolled in the provident fund.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::CompensationProfile;
    /// use rust_decimal::Decimal;
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
    /// assert!(profile.has_provident_fund());
    /// ```
    pub fn has_provident_fund(&self) -> bool {
        self.provident_fund_percentage > Decimal::ZERO
    }
}

/// Per-period pay adjustments for one employee.
///
/// Commissions, bonuses and externally computed deductions for the period
/// being calculated. All fields default to zero when absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayAdjustments {
    /// Sales commission earned in the period.
    #[serde(default)]
    pub commission: Decimal,
    /// Eid bonus for the period.
    #[serde(default)]
    pub eid_bonus: Decimal,
    /// Festival bonus for the period.
    #[serde(default)]
    pub festival_bonus: Decimal,
    /// Performance bonus for the period.
    #[serde(default)]
    pub performance_bonus: Decimal,
    /// Any other one-off bonus.
    #[serde(default)]
    pub other_bonus: Decimal,
    /// Income tax withheld, as supplied by the tax collaborator.
    #[serde(default)]
    pub tax_deduction: Decimal,
    /// Any other deductions (loans, advances, fines).
    #[serde(default)]
    pub other_deductions: Decimal,
}
