//! HTTP request handlers for the payroll API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::ledger::FinancialAccount;

use super::request::{
    ApproveRequest, CalculateRequest, DeleteRequest, PayRequest, PeriodQuery, PreviewRequest,
    RegisterAccountRequest,
};
use super::response::{ApiError, ApiErrorResponse, BatchResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/payroll/calculate", post(calculate_handler))
        .route("/payroll/preview", post(preview_handler))
        .route("/payroll/approve", post(approve_handler))
        .route("/payroll/pay", post(pay_handler))
        .route("/payroll/delete", post(delete_handler))
        .route("/payroll/records", get(records_handler))
        .route("/accounts", post(register_account_handler))
        .route("/accounts/:account_id/balance", get(balance_handler))
        .with_state(state)
}

/// Unpacks a JSON request body, converting rejections to error responses.
fn parse_json<T>(
    payload: Result<Json<T>, JsonRejection>,
    correlation_id: Uuid,
) -> Result<T, Response> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    // The body text carries the detailed error from serde
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    if body_text.contains("missing field") {
                        ApiError::new("VALIDATION_ERROR", body_text)
                    } else {
                        ApiError::malformed_json(body_text)
                    }
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => ApiError::new(
                    "MISSING_CONTENT_TYPE",
                    "Content-Type must be application/json",
                ),
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            Err((
                StatusCode::BAD_REQUEST,
                [(header::CONTENT_TYPE, "application/json")],
                Json(error),
            )
                .into_response())
        }
    }
}

fn json_ok<T: Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Handler for `POST /payroll/calculate`.
///
/// Runs a bulk salary calculation for one period and returns the
/// per-employee outcomes.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculateRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let as_of = request.as_of.unwrap_or_else(|| Utc::now().date_naive());
    info!(
        correlation_id = %correlation_id,
        month = request.month,
        year = request.year,
        employees = request.employees.len(),
        overwrite = request.overwrite,
        "Processing bulk calculation"
    );

    match state.engine().calculate_for_period(
        &request.employees,
        request.month,
        request.year,
        as_of,
        request.overwrite,
    ) {
        Ok(result) => json_ok(BatchResponse::from(result)),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "Bulk calculation rejected"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `POST /payroll/preview`.
///
/// Calculates a single employee's salary without persisting a record.
async fn preview_handler(
    State(state): State<AppState>,
    payload: Result<Json<PreviewRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let as_of = request.as_of.unwrap_or_else(|| Utc::now().date_naive());
    match state
        .engine()
        .preview(&request.employee, request.month, request.year, as_of)
    {
        Ok(breakdown) => json_ok(breakdown),
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                employee_id = %request.employee.profile.employee_id,
                error = %err,
                "Preview failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for `POST /payroll/approve`.
async fn approve_handler(
    State(state): State<AppState>,
    payload: Result<Json<ApproveRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    info!(
        correlation_id = %correlation_id,
        records = request.record_ids.len(),
        approved_by = %request.approved_by,
        "Processing bulk approval"
    );
    let result = state
        .engine()
        .bulk_approve(&request.record_ids, &request.approved_by);
    json_ok(BatchResponse::from(result))
}

/// Handler for `POST /payroll/pay`.
async fn pay_handler(
    State(state): State<AppState>,
    payload: Result<Json<PayRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    info!(
        correlation_id = %correlation_id,
        records = request.record_ids.len(),
        "Processing bulk payment"
    );
    let result = state.engine().bulk_pay(&request.record_ids, &request.mode);
    json_ok(BatchResponse::from(result))
}

/// Handler for `POST /payroll/delete`.
async fn delete_handler(
    State(state): State<AppState>,
    payload: Result<Json<DeleteRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    info!(
        correlation_id = %correlation_id,
        records = request.record_ids.len(),
        "Processing bulk deletion"
    );
    let result = state.engine().bulk_delete(&request.record_ids);
    json_ok(BatchResponse::from(result))
}

/// Handler for `GET /payroll/records?month=&year=`.
async fn records_handler(
    State(state): State<AppState>,
    Query(query): Query<PeriodQuery>,
) -> Response {
    match state.engine().records_for_period(query.month, query.year) {
        Ok(records) => json_ok(records),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}

/// Handler for `POST /accounts`.
///
/// Registers a financial account for the ledger payment path. Account
/// lifecycle belongs to the accounting collaborator; this is only the
/// seam it hands accounts through.
async fn register_account_handler(
    State(state): State<AppState>,
    payload: Result<Json<RegisterAccountRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    let request = match parse_json(payload, correlation_id) {
        Ok(request) => request,
        Err(response) => return response,
    };

    let account = FinancialAccount::from(request);
    info!(
        correlation_id = %correlation_id,
        account_id = %account.id,
        "Registering financial account"
    );
    state.engine().ledger().register_account(account.clone());
    (
        StatusCode::CREATED,
        [(header::CONTENT_TYPE, "application/json")],
        Json(account),
    )
        .into_response()
}

/// Handler for `GET /accounts/:account_id/balance`.
async fn balance_handler(
    State(state): State<AppState>,
    Path(account_id): Path<String>,
) -> Response {
    match state.engine().ledger().balance(&account_id) {
        Ok(balance) => json_ok(serde_json::json!({
            "account_id": account_id,
            "current_balance": balance,
        })),
        Err(err) => ApiErrorResponse::from(err).into_response(),
    }
}
