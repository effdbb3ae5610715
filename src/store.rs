//! In-memory salary record store.
//!
//! The store owns every live [`SalaryRecord`] and enforces the uniqueness
//! invariant: at most one record per (employee, month, year). The check
//! and the insert happen under one lock, so of two concurrent calculations
//! for the same slot exactly one wins and the other sees
//! `DuplicateRecord`.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use crate::error::{PayrollError, PayrollResult};
use crate::lifecycle;
use crate::models::SalaryRecord;

#[derive(Debug, Default)]
struct StoreInner {
    by_id: HashMap<Uuid, SalaryRecord>,
    by_period: HashMap<(String, u32, i32), Uuid>,
}

/// The keyed store of salary records.
#[derive(Debug, Default)]
pub struct SalaryStore {
    inner: Mutex<StoreInner>,
}

impl SalaryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Inserts a freshly calculated record, enforcing period uniqueness.
    ///
    /// With `overwrite` set, an existing *pending* record for the same
    /// (employee, period) slot is replaced in place: the replacement keeps
    /// the existing record's id and creation time, so the swap happens
    /// exactly once and downstream references stay valid.
    ///
    /// # Errors
    ///
    /// - `DuplicateRecord` when a record already occupies the slot and
    ///   `overwrite` was not requested.
    /// - `InvalidTransition` when `overwrite` was requested but the
    ///   existing record is no longer pending.
    pub fn insert(&self, record: SalaryRecord, overwrite: bool) -> PayrollResult<Uuid> {
        let mut inner = self.lock();
        let key = record.period_key();

        let existing_id = inner.by_period.get(&key).copied();
        if let Some(existing_id) = existing_id {
            if let Some(existing) = inner.by_id.get(&existing_id) {
                if !overwrite {
                    return Err(PayrollError::DuplicateRecord {
                        employee_id: record.employee_id.clone(),
                        month: record.month,
                        year: record.year,
                    });
                }
                lifecycle::ensure_overwritable(existing)?;

                let mut replacement = record;
                replacement.id = existing.id;
                replacement.created_at = existing.created_at;
                inner.by_id.insert(existing_id, replacement);
                return Ok(existing_id);
            }
            // Dangling index entry; fall through and treat the slot as free.
            inner.by_period.remove(&key);
        }

        let id = record.id;
        inner.by_period.insert(key, id);
        inner.by_id.insert(id, record);
        Ok(id)
    }

    /// Returns a copy of the record with the given id.
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound` for an unknown id.
    pub fn get(&self, id: Uuid) -> PayrollResult<SalaryRecord> {
        self.lock()
            .by_id
            .get(&id)
            .cloned()
            .ok_or(PayrollError::RecordNotFound { record_id: id })
    }

    /// Returns the record occupying an (employee, period) slot, if any.
    pub fn find_by_period(
        &self,
        employee_id: &str,
        month: u32,
        year: i32,
    ) -> Option<SalaryRecord> {
        let inner = self.lock();
        let key = (employee_id.to_string(), month, year);
        inner
            .by_period
            .get(&key)
            .and_then(|id| inner.by_id.get(id))
            .cloned()
    }

    /// Returns all records for a period, ordered by employee id.
    pub fn list_for_period(&self, month: u32, year: i32) -> Vec<SalaryRecord> {
        let inner = self.lock();
        let mut records: Vec<SalaryRecord> = inner
            .by_id
            .values()
            .filter(|r| r.month == month && r.year == year)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));
        records
    }

    /// Runs a closure against a record under the store lock.
    ///
    /// This is the mutation point for lifecycle transitions: the closure
    /// sees the record exclusively, and because transitions check their
    /// guards before mutating, a closure error leaves the record
    /// unchanged. The pay path also performs its ledger debit inside the
    /// closure so debit-and-mark-paid form one unit (lock order is always
    /// store, then ledger).
    ///
    /// # Errors
    ///
    /// Returns `RecordNotFound` for an unknown id, otherwise whatever the
    /// closure returns.
    pub fn with_record_mut<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut SalaryRecord) -> PayrollResult<T>,
    ) -> PayrollResult<T> {
        let mut inner = self.lock();
        let record = inner
            .by_id
            .get_mut(&id)
            .ok_or(PayrollError::RecordNotFound { record_id: id })?;
        f(record)
    }

    /// Deletes a record, refusing to touch paid ones.
    ///
    /// # Errors
    ///
    /// - `RecordNotFound` for an unknown id.
    /// - `InvalidTransition` if the record is paid.
    pub fn delete(&self, id: Uuid) -> PayrollResult<SalaryRecord> {
        let mut inner = self.lock();
        let record = inner
            .by_id
            .get(&id)
            .ok_or(PayrollError::RecordNotFound { record_id: id })?;
        lifecycle::ensure_deletable(record)?;

        let key = record.period_key();
        inner.by_period.remove(&key);
        inner
            .by_id
            .remove(&id)
            .ok_or(PayrollError::RecordNotFound { record_id: id })
    }

    /// The number of live records.
    pub fn len(&self) -> usize {
        self.lock().by_id.len()
    }

    /// True when the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
