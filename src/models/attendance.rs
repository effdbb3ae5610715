//! Attendance input models.
//!
//! This module defines the per-day attendance records supplied by the
//! attendance collaborator and the [`AttendanceSummary`] tuple the
//! aggregator reduces them to.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How one calendar day was spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayStatus {
    /// The employee attended for the full day.
    Present,
    /// The employee was absent without approved leave.
    Absent,
    /// A full day of approved leave (paid).
    FullDayLeave,
    /// A half day of approved leave; the other half counts as worked.
    HalfDayLeave,
}

/// One day of attendance data for one employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceDay {
    /// The calendar date this record covers.
    pub date: NaiveDate,
    /// How the day was spent.
    pub status: DayStatus,
    /// Hours the employee arrived late, if any.
    #[serde(default)]
    pub late_hours: Decimal,
    /// Overtime worked on this day, in minutes.
    #[serde(default)]
    pub overtime_minutes: u32,
}

/// The aggregated attendance figures for one employee and period.
///
/// Produced by the attendance aggregator and consumed unchanged by the
/// salary calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceSummary {
    /// Calendar days in the period minus the weekly day off.
    pub working_days: u32,
    /// Days paid as worked; half-day leave contributes 0.5.
    pub present_days: Decimal,
    /// Days absent without approved leave.
    pub absent_days: Decimal,
    /// Total late hours across the period.
    pub late_hours: Decimal,
    /// Total overtime across the period, in minutes.
    pub overtime_minutes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_day_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&DayStatus::Present).unwrap(),
            "\"present\""
        );
        assert_eq!(
            serde_json::to_string(&DayStatus::FullDayLeave).unwrap(),
            "\"full_day_leave\""
        );
        assert_eq!(
            serde_json::to_string(&DayStatus::HalfDayLeave).unwrap(),
            "\"half_day_leave\""
        );
    }

    #[test]
    fn test_deserialize_attendance_day_with_defaults() {
        let json = r#"{
            "date": "2026-03-04",
            "status": "present"
        }"#;

        let day: AttendanceDay = serde_json::from_str(json).unwrap();
        assert_eq!(day.date, NaiveDate::from_ymd_opt(2026, 3, 4).unwrap());
        assert_eq!(day.status, DayStatus::Present);
        assert_eq!(day.late_hours, Decimal::ZERO);
        assert_eq!(day.overtime_minutes, 0);
    }

    #[test]
    fn test_deserialize_attendance_day_with_late_and_overtime() {
        let json = r#"{
            "date": "2026-03-05",
            "status": "present",
            "late_hours": "1.5",
            "overtime_minutes": 90
        }"#;

        let day: AttendanceDay = serde_json::from_str(json).unwrap();
        assert_eq!(day.late_hours, Decimal::from_str("1.5").unwrap());
        assert_eq!(day.overtime_minutes, 90);
    }

    #[test]
    fn test_summary_serde_round_trip() {
        let summary = AttendanceSummary {
            working_days: 26,
            present_days: Decimal::from_str("23.5").unwrap(),
            absent_days: Decimal::from(2),
            late_hours: Decimal::from_str("3.25").unwrap(),
            overtime_minutes: 240,
        };

        let json = serde_json::to_string(&summary).unwrap();
        let round_tripped: AttendanceSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(summary, round_tripped);
    }
}
