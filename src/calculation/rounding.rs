//! The money rounding policy.
//!
//! Every monetary figure the engine derives is rounded exactly once, at the
//! point it is computed, through [`round_money`]. Totals are sums of
//! already-rounded parts and are never re-rounded, which keeps repeated
//! calculations reproducible to the cent.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds a monetary amount to 2 decimal places, half-up.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let amount = Decimal::from_str("1538.4615").unwrap();
/// assert_eq!(round_money(amount), Decimal::from_str("1538.46").unwrap());
///
/// let midpoint = Decimal::from_str("10.005").unwrap();
/// assert_eq!(round_money(midpoint), Decimal::from_str("10.01").unwrap());
/// ```
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
