//! Payroll period model.
//!
//! This module contains the [`PayPeriod`] type identifying the (month, year)
//! pair a salary record is computed for.

use chrono::NaiveDate;

use crate::error::{PayrollError, PayrollResult};

/// A payroll period: one (month, year) pair.
///
/// Construction validates the month, so an existing `PayPeriod` always
/// refers to a real calendar month.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
///
/// let period = PayPeriod::new(2, 2026).unwrap();
/// assert_eq!(period.days_in_month(), 28);
/// assert!(PayPeriod::new(13, 2026).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PayPeriod {
    month: u32,
    year: i32,
}

impl PayPeriod {
    /// Creates a new payroll period.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod` if `month` is outside 1–12, or `Calculation`
    /// if the year is outside the representable calendar range.
    pub fn new(month: u32, year: i32) -> PayrollResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(PayrollError::InvalidPeriod { month });
        }
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(PayrollError::Calculation {
                message: format!("year {} is out of calendar range", year),
            });
        }
        Ok(Self { month, year })
    }

    /// The month of this period (1–12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The year of this period.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The first calendar day of the period.
    pub fn first_day(&self) -> NaiveDate {
        // The constructor guarantees a representable month/year.
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// The last calendar day of the period.
    pub fn last_day(&self) -> NaiveDate {
        let (next_year, next_month) = if self.month == 12 {
            (self.year + 1, 1)
        } else {
            (self.year, self.month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|d| d.pred_opt())
            .unwrap_or(NaiveDate::MAX)
    }

    /// The number of calendar days in the period.
    pub fn days_in_month(&self) -> u32 {
        (self.last_day() - self.first_day()).num_days() as u32 + 1
    }

    /// Checks if a given date falls within this period.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.first_day() && date <= self.last_day()
    }

    /// Whether the period has fully elapsed as of the given date.
    ///
    /// A period counts as elapsed from its last calendar day onward, so a
    /// final payroll run on the last day of the month is permitted.
    pub fn has_elapsed(&self, as_of: NaiveDate) -> bool {
        as_of >= self.last_day()
    }
}

impl std::fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}
