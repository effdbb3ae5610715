//! The salary-record state machine.
//!
//! Records move `pending → approved → paid`; pending and approved records
//! may also be deleted, and only pending records may be recalculated.
//! Nothing leaves `paid`. Every function here checks its guard before
//! touching the record, so a failed transition leaves the record exactly
//! as it was.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{PayrollError, PayrollResult};
use crate::models::{PaymentMethod, SalaryRecord, SalaryStatus};

fn invalid(from: SalaryStatus, action: &str) -> PayrollError {
    PayrollError::InvalidTransition {
        from,
        action: action.to_string(),
    }
}

/// Approves a pending record.
///
/// # Errors
///
/// Returns `InvalidTransition` unless the record is `Pending`.
pub fn approve(
    record: &mut SalaryRecord,
    approved_by: &str,
    approved_at: DateTime<Utc>,
) -> PayrollResult<()> {
    if record.status != SalaryStatus::Pending {
        return Err(invalid(record.status, "approve"));
    }

    record.status = SalaryStatus::Approved;
    record.approved_by = Some(approved_by.to_string());
    record.approved_at = Some(approved_at);
    Ok(())
}

/// Marks an approved record paid without touching any ledger.
///
/// This is the manual path: the money moved outside the system and the
/// caller is recording the fact after the fact.
///
/// # Errors
///
/// Returns `InvalidTransition` unless the record is `Approved`.
pub fn apply_manual_payment(
    record: &mut SalaryRecord,
    method: PaymentMethod,
    reference: Option<String>,
    paid_on: NaiveDate,
) -> PayrollResult<()> {
    if record.status != SalaryStatus::Approved {
        return Err(invalid(record.status, "pay"));
    }

    record.status = SalaryStatus::Paid;
    record.payment_method = Some(method);
    record.transaction_reference = reference;
    record.payment_date = Some(paid_on);
    record.payment_account_id = None;
    Ok(())
}

/// Marks an approved record paid from a confirmed ledger debit.
///
/// The caller must have already debited the account; this records the
/// confirmation on the record. Must run under the same lock as the debit
/// so the two form one unit.
///
/// # Errors
///
/// Returns `InvalidTransition` unless the record is `Approved`.
pub fn apply_ledger_payment(
    record: &mut SalaryRecord,
    account_id: &str,
    reference: &str,
    paid_on: NaiveDate,
) -> PayrollResult<()> {
    if record.status != SalaryStatus::Approved {
        return Err(invalid(record.status, "pay"));
    }

    record.status = SalaryStatus::Paid;
    record.payment_method = Some(PaymentMethod::BankTransfer);
    record.transaction_reference = Some(reference.to_string());
    record.payment_date = Some(paid_on);
    record.payment_account_id = Some(account_id.to_string());
    Ok(())
}

/// Checks that a record may be deleted.
///
/// Paid records are immutable; corrections go through an explicit reversal
/// process, never deletion.
///
/// # Errors
///
/// Returns `InvalidTransition` if the record is `Paid`.
pub fn ensure_deletable(record: &SalaryRecord) -> PayrollResult<()> {
    if record.status == SalaryStatus::Paid {
        return Err(invalid(record.status, "delete"));
    }
    Ok(())
}

/// Checks that a record may be replaced by a recalculation.
///
/// # Errors
///
/// Returns `InvalidTransition` unless the record is `Pending`.
pub fn ensure_overwritable(record: &SalaryRecord) -> PayrollResult<()> {
    if record.status != SalaryStatus::Pending {
        return Err(invalid(record.status, "recalculate"));
    }
    Ok(())
}
