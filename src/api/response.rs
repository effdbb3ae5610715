//! Response types for the payroll API.
//!
//! This module defines the batch response shape and the error response
//! structures mapping [`PayrollError`] to HTTP statuses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::PayrollError;
use crate::models::{BatchOperationResult, TargetReport};

/// The response body for every bulk payroll operation.
///
/// Carries the aggregate counts alongside the per-target reports. Partial
/// failure is an expected outcome, so bulk endpoints return this with
/// `200 OK` even when some targets failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    /// How many targets the action was applied to.
    pub succeeded: usize,
    /// How many targets were intentionally left alone.
    pub skipped: usize,
    /// How many targets the action failed for.
    pub failed: usize,
    /// One report per target, in submission order.
    pub reports: Vec<TargetReport>,
}

impl From<BatchOperationResult> for BatchResponse {
    fn from(result: BatchOperationResult) -> Self {
        Self {
            succeeded: result.succeeded(),
            skipped: result.skipped(),
            failed: result.failed(),
            reports: result.reports,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<PayrollError> for ApiErrorResponse {
    fn from(error: PayrollError) -> Self {
        let (status, code) = match &error {
            PayrollError::InvalidPeriod { .. } => (StatusCode::BAD_REQUEST, "INVALID_PERIOD"),
            PayrollError::NegativeInput { .. } => (StatusCode::BAD_REQUEST, "NEGATIVE_INPUT"),
            PayrollError::AttendanceIncomplete { .. } => {
                (StatusCode::BAD_REQUEST, "ATTENDANCE_INCOMPLETE")
            }
            PayrollError::DuplicateRecord { .. } => (StatusCode::CONFLICT, "DUPLICATE_RECORD"),
            PayrollError::InvalidTransition { .. } => {
                (StatusCode::CONFLICT, "INVALID_TRANSITION")
            }
            PayrollError::InsufficientBalance { .. } => {
                (StatusCode::CONFLICT, "INSUFFICIENT_BALANCE")
            }
            PayrollError::RecordNotFound { .. } => (StatusCode::NOT_FOUND, "RECORD_NOT_FOUND"),
            PayrollError::AccountNotFound { .. } => (StatusCode::NOT_FOUND, "ACCOUNT_NOT_FOUND"),
            PayrollError::ConfigNotFound { .. } | PayrollError::ConfigParse { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR")
            }
            PayrollError::Calculation { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "CALCULATION_ERROR")
            }
        };

        ApiErrorResponse {
            status,
            error: ApiError::new(code, error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details")); // Should be skipped when None
    }

    #[test]
    fn test_api_error_with_details_serialization() {
        let error = ApiError::with_details("TEST_ERROR", "Test message", "Some details");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"details\":\"Some details\""));
    }

    #[test]
    fn test_invalid_period_maps_to_bad_request() {
        let api_error: ApiErrorResponse = PayrollError::InvalidPeriod { month: 13 }.into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_PERIOD");
    }

    #[test]
    fn test_duplicate_record_maps_to_conflict() {
        let api_error: ApiErrorResponse = PayrollError::DuplicateRecord {
            employee_id: "emp_001".to_string(),
            month: 1,
            year: 2026,
        }
        .into();
        assert_eq!(api_error.status, StatusCode::CONFLICT);
        assert_eq!(api_error.error.code, "DUPLICATE_RECORD");
    }

    #[test]
    fn test_record_not_found_maps_to_not_found() {
        let api_error: ApiErrorResponse = PayrollError::RecordNotFound {
            record_id: uuid::Uuid::nil(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::NOT_FOUND);
        assert_eq!(api_error.error.code, "RECORD_NOT_FOUND");
    }

    #[test]
    fn test_batch_response_carries_counts() {
        let mut result = BatchOperationResult::new();
        result.record_success("a");
        result.record_skipped("b", "already-paid");
        result.record_failure("c", "boom");

        let response: BatchResponse = result.into();
        assert_eq!(response.succeeded, 1);
        assert_eq!(response.skipped, 1);
        assert_eq!(response.failed, 1);
        assert_eq!(response.reports.len(), 3);
    }
}
