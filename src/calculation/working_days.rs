//! Working-day counting.
//!
//! A payroll period's working days are its calendar days minus the weekly
//! day off. Which weekday is excluded is a business rule carried in
//! [`PayrollRules`](crate::config::PayrollRules), not a calendar fact.

use chrono::{Datelike, Weekday};

use crate::models::PayPeriod;

/// Counts the working days in a period, excluding one weekday per week.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::count_working_days;
/// use payroll_engine::models::PayPeriod;
/// use chrono::Weekday;
///
/// // January 2026 has 31 days, five of them Fridays.
/// let period = PayPeriod::new(1, 2026).unwrap();
/// assert_eq!(count_working_days(period, Weekday::Fri), 26);
/// ```
pub fn count_working_days(period: PayPeriod, excluded_weekday: Weekday) -> u32 {
    let mut count = 0;
    let mut day = period.first_day();
    while day <= period.last_day() {
        if day.weekday() != excluded_weekday {
            count += 1;
        }
        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    count
}
