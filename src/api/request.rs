//! Request types for the payroll API.
//!
//! This module defines the JSON request structures for the payroll
//! endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::{CalculationInput, PaymentMode};
use crate::ledger::FinancialAccount;

/// Request body for `POST /payroll/calculate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateRequest {
    /// The month of the payroll period (1–12).
    pub month: u32,
    /// The year of the payroll period.
    pub year: i32,
    /// Replace existing pending records instead of failing on them.
    #[serde(default)]
    pub overwrite: bool,
    /// The date the calculation runs as of; defaults to today.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    /// One calculation input per employee.
    pub employees: Vec<CalculationInput>,
}

/// Request body for `POST /payroll/preview`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewRequest {
    /// The month of the payroll period (1–12).
    pub month: u32,
    /// The year of the payroll period.
    pub year: i32,
    /// The date the preview runs as of; defaults to today.
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
    /// The employee to preview.
    pub employee: CalculationInput,
}

/// Request body for `POST /payroll/approve`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApproveRequest {
    /// The salary records to approve.
    pub record_ids: Vec<Uuid>,
    /// Who is approving.
    pub approved_by: String,
}

/// Request body for `POST /payroll/pay`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayRequest {
    /// The salary records to pay.
    pub record_ids: Vec<Uuid>,
    /// How to disburse the money.
    #[serde(flatten)]
    pub mode: PaymentMode,
}

/// Request body for `POST /payroll/delete`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRequest {
    /// The salary records to delete.
    pub record_ids: Vec<Uuid>,
}

/// Query parameters for `GET /payroll/records`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodQuery {
    /// The month of the payroll period (1–12).
    pub month: u32,
    /// The year of the payroll period.
    pub year: i32,
}

/// Request body for `POST /accounts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterAccountRequest {
    /// Unique identifier for the account.
    pub id: String,
    /// Human-readable account name.
    pub name: String,
    /// The opening balance.
    pub current_balance: Decimal,
}

impl From<RegisterAccountRequest> for FinancialAccount {
    fn from(req: RegisterAccountRequest) -> Self {
        FinancialAccount {
            id: req.id,
            name: req.name,
            current_balance: req.current_balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PaymentMethod;
    use std::str::FromStr;

    #[test]
    fn test_deserialize_calculate_request() {
        let json = r#"{
            "month": 1,
            "year": 2026,
            "employees": [
                {
                    "profile": {
                        "employee_id": "emp_001",
                        "basic_salary": "20000",
                        "provident_fund_percentage": "5"
                    },
                    "attendance": [
                        {"date": "2026-01-05", "status": "present"},
                        {"date": "2026-01-06", "status": "absent"}
                    ],
                    "adjustments": {"festival_bonus": "2000"}
                }
            ]
        }"#;

        let request: CalculateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.month, 1);
        assert_eq!(request.year, 2026);
        assert!(!request.overwrite);
        assert!(request.as_of.is_none());
        assert_eq!(request.employees.len(), 1);
        assert_eq!(request.employees[0].profile.employee_id, "emp_001");
        assert_eq!(request.employees[0].attendance.len(), 2);
    }

    #[test]
    fn test_deserialize_calculate_request_with_overwrite_and_as_of() {
        let json = r#"{
            "month": 1,
            "year": 2026,
            "overwrite": true,
            "as_of": "2026-02-01",
            "employees": []
        }"#;

        let request: CalculateRequest = serde_json::from_str(json).unwrap();
        assert!(request.overwrite);
        assert_eq!(
            request.as_of,
            Some(NaiveDate::from_ymd_opt(2026, 2, 1).unwrap())
        );
    }

    #[test]
    fn test_deserialize_pay_request_ledger_mode() {
        let json = r#"{
            "record_ids": ["00000000-0000-0000-0000-000000000001"],
            "mode": "ledger",
            "account_id": "acct_main"
        }"#;

        let request: PayRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.record_ids.len(), 1);
        assert_eq!(
            request.mode,
            PaymentMode::Ledger {
                account_id: "acct_main".to_string()
            }
        );
    }

    #[test]
    fn test_deserialize_pay_request_manual_mode() {
        let json = r#"{
            "record_ids": [],
            "mode": "manual",
            "method": "cash",
            "reference": "VOUCHER-12"
        }"#;

        let request: PayRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            request.mode,
            PaymentMode::Manual {
                method: PaymentMethod::Cash,
                reference: Some("VOUCHER-12".to_string()),
            }
        );
    }

    #[test]
    fn test_deserialize_approve_request() {
        let json = r#"{
            "record_ids": ["00000000-0000-0000-0000-000000000001"],
            "approved_by": "hr_admin"
        }"#;

        let request: ApproveRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.approved_by, "hr_admin");
    }

    #[test]
    fn test_register_account_conversion() {
        let request = RegisterAccountRequest {
            id: "acct_main".to_string(),
            name: "Salary disbursement".to_string(),
            current_balance: Decimal::from_str("50000").unwrap(),
        };

        let account: FinancialAccount = request.into();
        assert_eq!(account.id, "acct_main");
        assert_eq!(account.current_balance, Decimal::from_str("50000").unwrap());
    }
}
