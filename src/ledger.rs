//! The disbursement ledger interface.
//!
//! A salary record transitions to paid by debiting a financial account.
//! The check-and-debit here is the one place in the engine where a race
//! would cause real financial harm, so it is a single atomic unit: the
//! balance is read, compared and decremented under one lock, and a failed
//! debit mutates nothing.

use std::collections::HashMap;
use std::sync::Mutex;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PayrollError, PayrollResult};

/// A financial account salaries are disbursed from.
///
/// Account creation and replenishment belong to the accounting
/// collaborator; the engine only registers accounts it is handed and
/// debits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialAccount {
    /// Unique identifier for the account.
    pub id: String,
    /// Human-readable account name.
    pub name: String,
    /// The current balance.
    pub current_balance: Decimal,
}

/// Proof that an account was debited for a salary record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentConfirmation {
    /// Unique identifier for this confirmation.
    pub confirmation_id: Uuid,
    /// The account that was debited.
    pub account_id: String,
    /// The salary record the debit paid.
    pub salary_record_id: Uuid,
    /// The amount debited.
    pub amount: Decimal,
    /// External reference recorded on the salary record.
    pub reference: String,
}

/// The registry of financial accounts and the atomic debit operation.
#[derive(Debug, Default)]
pub struct Ledger {
    accounts: Mutex<HashMap<String, FinancialAccount>>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, FinancialAccount>> {
        self.accounts.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Registers an account, replacing any previous registration.
    pub fn register_account(&self, account: FinancialAccount) {
        self.lock().insert(account.id.clone(), account);
    }

    /// Reads an account's current balance.
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` for an unknown account id.
    pub fn balance(&self, account_id: &str) -> PayrollResult<Decimal> {
        self.lock()
            .get(account_id)
            .map(|a| a.current_balance)
            .ok_or_else(|| PayrollError::AccountNotFound {
                account_id: account_id.to_string(),
            })
    }

    /// Atomically debits an account to pay a salary record.
    ///
    /// The balance check and the decrement happen under one lock: either
    /// the account covered the amount and was debited, or nothing changed.
    /// Two concurrent debits can never both pass the check against a stale
    /// balance.
    ///
    /// # Errors
    ///
    /// - `NegativeInput` for a negative amount.
    /// - `AccountNotFound` for an unknown account id.
    /// - `InsufficientBalance` when the balance cannot cover the amount;
    ///   the balance is left untouched.
    pub fn debit_for_payment(
        &self,
        account_id: &str,
        amount: Decimal,
        salary_record_id: Uuid,
    ) -> PayrollResult<PaymentConfirmation> {
        if amount < Decimal::ZERO {
            return Err(PayrollError::NegativeInput {
                field: "amount".to_string(),
                value: amount,
            });
        }

        let mut accounts = self.lock();
        let account =
            accounts
                .get_mut(account_id)
                .ok_or_else(|| PayrollError::AccountNotFound {
                    account_id: account_id.to_string(),
                })?;

        if account.current_balance < amount {
            return Err(PayrollError::InsufficientBalance {
                account_id: account_id.to_string(),
                balance: account.current_balance,
                requested: amount,
            });
        }

        account.current_balance -= amount;

        let confirmation_id = Uuid::new_v4();
        Ok(PaymentConfirmation {
            confirmation_id,
            account_id: account_id.to_string(),
            salary_record_id,
            amount,
            reference: format!("PAY-{}", confirmation_id.simple()),
        })
    }
}
