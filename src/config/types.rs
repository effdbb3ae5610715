//! Payroll rule types.

use chrono::Weekday;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

fn default_excluded_weekday() -> Weekday {
    Weekday::Fri
}

/// Weekday as a name string ("fri", "Friday"); case-insensitive on input.
mod weekday_name {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(weekday: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(weekday)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse()
            .map_err(|_| D::Error::custom(format!("invalid weekday name: {}", name)))
    }
}

fn default_work_hours_per_day() -> Decimal {
    Decimal::from(8)
}

fn default_overtime_rate_multiplier() -> Decimal {
    Decimal::from(2)
}

/// The business rules a payroll run is computed under.
///
/// These are policy, not calendar facts: which weekday is the weekly day
/// off, how long a standard work day is, and what multiple of the hourly
/// rate overtime pays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRules {
    /// The weekly non-working day excluded from working-day counts.
    #[serde(default = "default_excluded_weekday", with = "weekday_name")]
    pub excluded_weekday: Weekday,
    /// Standard work hours per day, used to convert late hours and
    /// overtime minutes to day fractions and hourly rates.
    #[serde(default = "default_work_hours_per_day")]
    pub work_hours_per_day: Decimal,
    /// The multiple of the hourly rate overtime is paid at.
    #[serde(default = "default_overtime_rate_multiplier")]
    pub overtime_rate_multiplier: Decimal,
}

impl Default for PayrollRules {
    fn default() -> Self {
        Self {
            excluded_weekday: default_excluded_weekday(),
            work_hours_per_day: default_work_hours_per_day(),
            overtime_rate_multiplier: default_overtime_rate_multiplier(),
        }
    }
}
