//! The batch orchestrator.
//!
//! [`PayrollEngine`] executes calculate/approve/pay/delete operations over
//! sets of employees or record ids. Every bulk operation is best-effort:
//! targets are processed independently, a failing target never rolls back
//! the ones already committed, and the caller gets a
//! [`BatchOperationResult`] enumerating what happened to each target.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::calculation::{
    CalculationMode, SalaryBreakdown, calculate_salary, summarize_attendance,
};
use crate::config::PayrollRules;
use crate::error::{PayrollError, PayrollResult};
use crate::ledger::Ledger;
use crate::lifecycle;
use crate::models::{
    AttendanceDay, AttendanceSummary, BatchOperationResult, CompensationProfile, PayAdjustments,
    PayPeriod, PaymentMethod, SalaryRecord, SalaryStatus,
};
use crate::store::SalaryStore;

/// Skip reason: the employee's record for the period is past pending.
pub const REASON_ALREADY_FINALIZED: &str = "already-finalized";

/// Skip reason: the record is already approved.
pub const REASON_ALREADY_APPROVED: &str = "already-approved";

/// Skip reason: the record is already paid.
pub const REASON_ALREADY_PAID: &str = "already-paid";

/// Everything needed to calculate one employee's salary for a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationInput {
    /// The employee's standing compensation terms.
    pub profile: CompensationProfile,
    /// The employee's daily attendance records for the period.
    #[serde(default)]
    pub attendance: Vec<AttendanceDay>,
    /// Per-period bonuses, commission and external deductions.
    #[serde(default)]
    pub adjustments: PayAdjustments,
}

/// How a bulk pay operation disburses the money.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum PaymentMode {
    /// Record a payment made outside the system; no ledger is touched.
    Manual {
        /// How the money moved.
        method: PaymentMethod,
        /// Optional external reference (voucher number, cheque number).
        #[serde(default)]
        reference: Option<String>,
    },
    /// Debit a registered financial account for each record's net salary.
    Ledger {
        /// The account to debit.
        account_id: String,
    },
}

/// The payroll engine: salary store, disbursement ledger and rules.
#[derive(Debug, Default)]
pub struct PayrollEngine {
    store: SalaryStore,
    ledger: Ledger,
    rules: PayrollRules,
}

impl PayrollEngine {
    /// Creates an engine with the given rules and empty store and ledger.
    pub fn new(rules: PayrollRules) -> Self {
        Self {
            store: SalaryStore::new(),
            ledger: Ledger::new(),
            rules,
        }
    }

    /// The salary record store.
    pub fn store(&self) -> &SalaryStore {
        &self.store
    }

    /// The disbursement ledger.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// The rules this engine computes under.
    pub fn rules(&self) -> &PayrollRules {
        &self.rules
    }

    /// Calculates salaries for a set of employees for one period.
    ///
    /// Employees whose record for the period is past pending are skipped
    /// with reason [`REASON_ALREADY_FINALIZED`]. A pending record is a
    /// per-target `DuplicateRecord` failure unless `overwrite` was
    /// requested, in which case it is replaced exactly once.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod` or `AttendanceIncomplete` before touching
    /// anything; per-target problems are reported in the result instead.
    pub fn calculate_for_period(
        &self,
        inputs: &[CalculationInput],
        month: u32,
        year: i32,
        as_of: NaiveDate,
        overwrite: bool,
    ) -> PayrollResult<BatchOperationResult> {
        let period = PayPeriod::new(month, year)?;
        if !period.has_elapsed(as_of) {
            return Err(PayrollError::AttendanceIncomplete {
                month,
                year,
                as_of,
            });
        }

        let mut result = BatchOperationResult::new();
        for input in inputs {
            let employee_id = input.profile.employee_id.as_str();

            if let Some(existing) = self.store.find_by_period(employee_id, month, year) {
                if existing.status != SalaryStatus::Pending {
                    result.record_skipped(employee_id, REASON_ALREADY_FINALIZED);
                    continue;
                }
                if !overwrite {
                    let err = PayrollError::DuplicateRecord {
                        employee_id: employee_id.to_string(),
                        month,
                        year,
                    };
                    result.record_failure(employee_id, err.to_string());
                    continue;
                }
            }

            match self.calculate_one(input, period, as_of, overwrite) {
                Ok(_) => result.record_success(employee_id),
                Err(err) => result.record_failure(employee_id, err.to_string()),
            }
        }

        info!(
            period = %period,
            succeeded = result.succeeded(),
            skipped = result.skipped(),
            failed = result.failed(),
            "Bulk calculation finished"
        );
        Ok(result)
    }

    fn calculate_one(
        &self,
        input: &CalculationInput,
        period: PayPeriod,
        as_of: NaiveDate,
        overwrite: bool,
    ) -> PayrollResult<Uuid> {
        let summary = summarize_attendance(
            &input.attendance,
            period,
            &self.rules,
            CalculationMode::Final,
            as_of,
        )?;
        let breakdown = calculate_salary(
            &input.profile,
            &summary,
            period,
            &input.adjustments,
            &self.rules,
        )?;
        let record = build_record(&input.profile.employee_id, period, &summary, breakdown);
        self.store.insert(record, overwrite)
    }

    /// Calculates a salary for a period still in progress, without
    /// persisting anything.
    ///
    /// # Errors
    ///
    /// Returns any validation or calculation error for the input.
    pub fn preview(
        &self,
        input: &CalculationInput,
        month: u32,
        year: i32,
        as_of: NaiveDate,
    ) -> PayrollResult<SalaryBreakdown> {
        let period = PayPeriod::new(month, year)?;
        let summary = summarize_attendance(
            &input.attendance,
            period,
            &self.rules,
            CalculationMode::Preview,
            as_of,
        )?;
        calculate_salary(
            &input.profile,
            &summary,
            period,
            &input.adjustments,
            &self.rules,
        )
    }

    /// Approves a set of pending records.
    ///
    /// Already-approved records are skipped with reason
    /// [`REASON_ALREADY_APPROVED`]; paid records fail.
    pub fn bulk_approve(&self, ids: &[Uuid], approved_by: &str) -> BatchOperationResult {
        let approved_at = Utc::now();
        let mut result = BatchOperationResult::new();

        for &id in ids {
            let outcome = self.store.with_record_mut(id, |record| {
                if record.status == SalaryStatus::Approved {
                    return Ok(false);
                }
                lifecycle::approve(record, approved_by, approved_at)?;
                Ok(true)
            });

            match outcome {
                Ok(true) => result.record_success(id.to_string()),
                Ok(false) => result.record_skipped(id.to_string(), REASON_ALREADY_APPROVED),
                Err(err) => result.record_failure(id.to_string(), err.to_string()),
            }
        }

        info!(
            succeeded = result.succeeded(),
            skipped = result.skipped(),
            failed = result.failed(),
            "Bulk approval finished"
        );
        result
    }

    /// Pays a set of approved records.
    ///
    /// Already-paid records are skipped with reason
    /// [`REASON_ALREADY_PAID`]. In ledger mode each record's net salary is
    /// debited atomically with the paid transition, so a record that
    /// cannot be funded stays approved and an account is never debited
    /// for a record that cannot be marked paid.
    pub fn bulk_pay(&self, ids: &[Uuid], mode: &PaymentMode) -> BatchOperationResult {
        let paid_on = Utc::now().date_naive();
        let mut result = BatchOperationResult::new();

        for &id in ids {
            let outcome = self.store.with_record_mut(id, |record| {
                if record.status == SalaryStatus::Paid {
                    return Ok(false);
                }
                // The status guard must precede the debit: once money
                // moves, marking the record paid can no longer fail.
                if record.status != SalaryStatus::Approved {
                    return Err(PayrollError::InvalidTransition {
                        from: record.status,
                        action: "pay".to_string(),
                    });
                }

                match mode {
                    PaymentMode::Manual { method, reference } => {
                        lifecycle::apply_manual_payment(
                            record,
                            *method,
                            reference.clone(),
                            paid_on,
                        )?;
                    }
                    PaymentMode::Ledger { account_id } => {
                        let confirmation = self.ledger.debit_for_payment(
                            account_id,
                            record.net_salary,
                            record.id,
                        )?;
                        lifecycle::apply_ledger_payment(
                            record,
                            &confirmation.account_id,
                            &confirmation.reference,
                            paid_on,
                        )?;
                    }
                }
                Ok(true)
            });

            match outcome {
                Ok(true) => result.record_success(id.to_string()),
                Ok(false) => result.record_skipped(id.to_string(), REASON_ALREADY_PAID),
                Err(err) => result.record_failure(id.to_string(), err.to_string()),
            }
        }

        info!(
            succeeded = result.succeeded(),
            skipped = result.skipped(),
            failed = result.failed(),
            "Bulk payment finished"
        );
        result
    }

    /// Deletes a set of records, refusing to touch paid ones.
    pub fn bulk_delete(&self, ids: &[Uuid]) -> BatchOperationResult {
        let mut result = BatchOperationResult::new();

        for &id in ids {
            match self.store.delete(id) {
                Ok(_) => result.record_success(id.to_string()),
                Err(err) => result.record_failure(id.to_string(), err.to_string()),
            }
        }

        info!(
            succeeded = result.succeeded(),
            failed = result.failed(),
            "Bulk deletion finished"
        );
        result
    }

    /// Returns one record by id.
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound` for an unknown id.
    pub fn record(&self, id: Uuid) -> PayrollResult<SalaryRecord> {
        self.store.get(id)
    }

    /// Returns all records for a period, ordered by employee id.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod` for an invalid month.
    pub fn records_for_period(&self, month: u32, year: i32) -> PayrollResult<Vec<SalaryRecord>> {
        let period = PayPeriod::new(month, year)?;
        Ok(self.store.list_for_period(period.month(), period.year()))
    }
}

fn build_record(
    employee_id: &str,
    period: PayPeriod,
    summary: &AttendanceSummary,
    breakdown: SalaryBreakdown,
) -> SalaryRecord {
    SalaryRecord {
        id: Uuid::new_v4(),
        employee_id: employee_id.to_string(),
        month: period.month(),
        year: period.year(),
        working_days: summary.working_days,
        present_days: summary.present_days,
        absent_days: summary.absent_days,
        late_hours: summary.late_hours,
        overtime_minutes: summary.overtime_minutes,
        basic_salary: breakdown.basic_salary,
        house_rent: breakdown.house_rent,
        medical_allowance: breakdown.medical_allowance,
        transport_allowance: breakdown.transport_allowance,
        other_allowance: breakdown.other_allowance,
        total_allowance: breakdown.total_allowance,
        commission: breakdown.commission,
        overtime_amount: breakdown.overtime_amount,
        eid_bonus: breakdown.eid_bonus,
        festival_bonus: breakdown.festival_bonus,
        performance_bonus: breakdown.performance_bonus,
        other_bonus: breakdown.other_bonus,
        total_bonus: breakdown.total_bonus,
        late_deduction: breakdown.late_deduction,
        absent_deduction: breakdown.absent_deduction,
        tax_deduction: breakdown.tax_deduction,
        provident_fund: breakdown.provident_fund,
        other_deductions: breakdown.other_deductions,
        total_deductions: breakdown.total_deductions,
        gross_salary: breakdown.gross_salary,
        net_salary: breakdown.net_salary,
        status: SalaryStatus::Pending,
        payment_method: None,
        transaction_reference: None,
        payment_date: None,
        payment_account_id: None,
        approved_by: None,
        approved_at: None,
        warnings: breakdown.warnings,
        created_at: Utc::now(),
    }
}
