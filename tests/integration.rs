//! Integration tests for the payroll engine.
//!
//! This test suite drives the full flow over the HTTP surface:
//! - bulk calculation, including skips, duplicates and overwrite
//! - the pending → approved → paid lifecycle
//! - ledger and manual disbursement, including insufficient balance
//! - deletion rules for paid records
//! and exercises the concurrency guarantees of the ledger and the store
//! directly against the engine.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::str::FromStr;
use tower::ServiceExt;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::PayrollRules;
use payroll_engine::engine::{CalculationInput, PaymentMode, PayrollEngine};
use payroll_engine::models::{CompensationProfile, PayAdjustments, SalaryStatus};

// =============================================================================
// Test Helpers
// =============================================================================

fn create_test_state() -> AppState {
    AppState::new(PayrollEngine::new(PayrollRules::default()))
}

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

/// Parses a JSON decimal field, ignoring trailing-zero differences.
fn decimal_field(body: &Value, field: &str) -> Decimal {
    Decimal::from_str(body[field].as_str().unwrap()).unwrap()
}

async fn post(router: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();
    (status, json)
}

async fn get(router: Router, uri: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: Value = serde_json::from_slice(&body_bytes).unwrap();
    (status, json)
}

fn employee(id: &str, basic: &str, pf_percentage: &str, attendance: Vec<Value>) -> Value {
    json!({
        "profile": {
            "employee_id": id,
            "basic_salary": basic,
            "provident_fund_percentage": pf_percentage
        },
        "attendance": attendance
    })
}

fn absent(date: &str) -> Value {
    json!({"date": date, "status": "absent"})
}

fn calculate_request(employees: Vec<Value>) -> Value {
    json!({
        "month": 1,
        "year": 2026,
        "as_of": "2026-02-01",
        "employees": employees
    })
}

async fn register_account(state: &AppState, id: &str, balance: &str) {
    let (status, _) = post(
        create_router(state.clone()),
        "/accounts",
        json!({"id": id, "name": "Salary disbursement", "current_balance": balance}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

async fn record_ids(state: &AppState) -> Vec<String> {
    let (_, records) = get(
        create_router(state.clone()),
        "/payroll/records?month=1&year=2026",
    )
    .await;
    records
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_str().unwrap().to_string())
        .collect()
}

async fn approve_all(state: &AppState, ids: &[String]) {
    let (status, body) = post(
        create_router(state.clone()),
        "/payroll/approve",
        json!({"record_ids": ids, "approved_by": "hr_admin"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["failed"], 0);
}

// =============================================================================
// Calculation scenarios
// =============================================================================

/// Scenario: 20000 basic over 26 working days, two absences, 5% provident
/// fund, nothing else. The canonical worked example.
#[tokio::test]
async fn test_calculation_scenario_basic_with_absences() {
    let state = create_test_state();

    let (status, body) = post(
        create_router(state.clone()),
        "/payroll/calculate",
        calculate_request(vec![employee(
            "emp_001",
            "20000",
            "5",
            vec![absent("2026-01-05"), absent("2026-01-06")],
        )]),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["succeeded"], 1);

    let (_, records) = get(
        create_router(state),
        "/payroll/records?month=1&year=2026",
    )
    .await;
    let record = &records[0];

    assert_eq!(record["working_days"], 26);
    assert_eq!(decimal_field(record, "absent_days"), decimal("2"));
    assert_eq!(decimal_field(record, "provident_fund"), decimal("1000"));
    assert_eq!(decimal_field(record, "absent_deduction"), decimal("1538.46"));
    assert_eq!(decimal_field(record, "gross_salary"), decimal("20000"));
    assert_eq!(decimal_field(record, "net_salary"), decimal("17461.54"));
    assert_eq!(record["status"], "pending");
}

#[tokio::test]
async fn test_half_day_leave_counts_as_half_present_day() {
    let state = create_test_state();

    post(
        create_router(state.clone()),
        "/payroll/calculate",
        calculate_request(vec![employee(
            "emp_001",
            "20000",
            "0",
            vec![
                json!({"date": "2026-01-05", "status": "present"}),
                json!({"date": "2026-01-06", "status": "half_day_leave"}),
            ],
        )]),
    )
    .await;

    let (_, records) = get(
        create_router(state),
        "/payroll/records?month=1&year=2026",
    )
    .await;
    assert_eq!(decimal_field(&records[0], "present_days"), decimal("1.5"));
}

#[tokio::test]
async fn test_deductions_exceeding_gross_clamp_net_with_warning() {
    let state = create_test_state();

    let mut emp = employee("emp_001", "10000", "0", vec![]);
    emp["adjustments"] = json!({"other_deductions": "12000"});

    post(
        create_router(state.clone()),
        "/payroll/calculate",
        calculate_request(vec![emp]),
    )
    .await;

    let (_, records) = get(
        create_router(state),
        "/payroll/records?month=1&year=2026",
    )
    .await;
    let record = &records[0];

    assert_eq!(decimal_field(record, "net_salary"), Decimal::ZERO);
    let warnings = record["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0]["code"], "DEDUCTIONS_EXCEED_GROSS");
}

#[tokio::test]
async fn test_recalculating_without_overwrite_reports_duplicate() {
    let state = create_test_state();
    let request = calculate_request(vec![employee("emp_001", "20000", "5", vec![])]);

    post(
        create_router(state.clone()),
        "/payroll/calculate",
        request.clone(),
    )
    .await;
    let (status, body) = post(create_router(state), "/payroll/calculate", request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["failed"], 1);
    let reason = body["reports"][0]["reason"].as_str().unwrap();
    assert!(reason.contains("already exists"), "reason was: {}", reason);
}

#[tokio::test]
async fn test_recalculating_with_overwrite_replaces_exactly_once() {
    let state = create_test_state();

    post(
        create_router(state.clone()),
        "/payroll/calculate",
        calculate_request(vec![employee("emp_001", "20000", "0", vec![])]),
    )
    .await;
    let original_ids = record_ids(&state).await;

    let mut request = calculate_request(vec![employee("emp_001", "24000", "0", vec![])]);
    request["overwrite"] = json!(true);
    let (_, body) = post(create_router(state.clone()), "/payroll/calculate", request).await;
    assert_eq!(body["succeeded"], 1);

    let (_, records) = get(
        create_router(state),
        "/payroll/records?month=1&year=2026",
    )
    .await;
    assert_eq!(records.as_array().unwrap().len(), 1);
    assert_eq!(records[0]["id"].as_str().unwrap(), original_ids[0]);
    assert_eq!(decimal_field(&records[0], "basic_salary"), decimal("24000"));
}

#[tokio::test]
async fn test_finalized_records_are_skipped_by_recalculation() {
    let state = create_test_state();

    post(
        create_router(state.clone()),
        "/payroll/calculate",
        calculate_request(vec![employee("emp_001", "20000", "0", vec![])]),
    )
    .await;
    let ids = record_ids(&state).await;
    approve_all(&state, &ids).await;

    let mut request = calculate_request(vec![employee("emp_001", "24000", "0", vec![])]);
    request["overwrite"] = json!(true);
    let (_, body) = post(create_router(state), "/payroll/calculate", request).await;

    assert_eq!(body["skipped"], 1);
    assert_eq!(body["reports"][0]["reason"], "already-finalized");
}

#[tokio::test]
async fn test_one_failing_employee_does_not_abort_the_batch() {
    let state = create_test_state();

    let (_, body) = post(
        create_router(state.clone()),
        "/payroll/calculate",
        calculate_request(vec![
            employee("emp_001", "20000", "0", vec![]),
            employee("emp_002", "-500", "0", vec![]),
            employee("emp_003", "18000", "0", vec![]),
        ]),
    )
    .await;

    assert_eq!(body["succeeded"], 2);
    assert_eq!(body["failed"], 1);
    assert_eq!(body["reports"][1]["target"], "emp_002");

    let (_, records) = get(
        create_router(state),
        "/payroll/records?month=1&year=2026",
    )
    .await;
    assert_eq!(records.as_array().unwrap().len(), 2);
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn test_pending_record_cannot_be_paid_directly() {
    let state = create_test_state();

    post(
        create_router(state.clone()),
        "/payroll/calculate",
        calculate_request(vec![employee("emp_001", "20000", "0", vec![])]),
    )
    .await;
    let ids = record_ids(&state).await;

    let (status, body) = post(
        create_router(state.clone()),
        "/payroll/pay",
        json!({"record_ids": ids, "mode": "manual", "method": "cash"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["failed"], 1);
    let reason = body["reports"][0]["reason"].as_str().unwrap();
    assert!(reason.contains("pending"), "reason was: {}", reason);

    let (_, records) = get(
        create_router(state),
        "/payroll/records?month=1&year=2026",
    )
    .await;
    assert_eq!(records[0]["status"], "pending");
}

#[tokio::test]
async fn test_deleting_paid_record_fails_and_leaves_it_intact() {
    let state = create_test_state();
    register_account(&state, "acct_main", "100000").await;

    post(
        create_router(state.clone()),
        "/payroll/calculate",
        calculate_request(vec![employee("emp_001", "20000", "0", vec![])]),
    )
    .await;
    let ids = record_ids(&state).await;
    approve_all(&state, &ids).await;
    post(
        create_router(state.clone()),
        "/payroll/pay",
        json!({"record_ids": ids, "mode": "ledger", "account_id": "acct_main"}),
    )
    .await;

    let (status, body) = post(
        create_router(state.clone()),
        "/payroll/delete",
        json!({"record_ids": ids}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["failed"], 1);
    let reason = body["reports"][0]["reason"].as_str().unwrap();
    assert!(reason.contains("paid"), "reason was: {}", reason);

    let (_, records) = get(
        create_router(state),
        "/payroll/records?month=1&year=2026",
    )
    .await;
    let record = &records[0];
    assert_eq!(record["status"], "paid");
    assert_eq!(record["payment_method"], "bank_transfer");
    assert_eq!(record["payment_account_id"], "acct_main");
    assert!(record["transaction_reference"].as_str().is_some());
}

#[tokio::test]
async fn test_deleting_pending_record_succeeds() {
    let state = create_test_state();

    post(
        create_router(state.clone()),
        "/payroll/calculate",
        calculate_request(vec![employee("emp_001", "20000", "0", vec![])]),
    )
    .await;
    let ids = record_ids(&state).await;

    let (_, body) = post(
        create_router(state.clone()),
        "/payroll/delete",
        json!({"record_ids": ids}),
    )
    .await;
    assert_eq!(body["succeeded"], 1);

    let (_, records) = get(
        create_router(state),
        "/payroll/records?month=1&year=2026",
    )
    .await;
    assert!(records.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_reapproving_is_skipped_not_failed() {
    let state = create_test_state();

    post(
        create_router(state.clone()),
        "/payroll/calculate",
        calculate_request(vec![employee("emp_001", "20000", "0", vec![])]),
    )
    .await;
    let ids = record_ids(&state).await;
    approve_all(&state, &ids).await;

    let (_, body) = post(
        create_router(state),
        "/payroll/approve",
        json!({"record_ids": ids, "approved_by": "hr_admin"}),
    )
    .await;

    assert_eq!(body["skipped"], 1);
    assert_eq!(body["reports"][0]["reason"], "already-approved");
}

// =============================================================================
// Disbursement
// =============================================================================

/// Scenario: bulk pay of three approved records of 2000 each against an
/// account holding 5000. The third debit must fail and the balance must
/// land at exactly 1000.
#[tokio::test]
async fn test_bulk_pay_stops_debiting_at_insufficient_balance() {
    let state = create_test_state();
    register_account(&state, "acct_main", "5000").await;

    post(
        create_router(state.clone()),
        "/payroll/calculate",
        calculate_request(vec![
            employee("emp_001", "2000", "0", vec![]),
            employee("emp_002", "2000", "0", vec![]),
            employee("emp_003", "2000", "0", vec![]),
        ]),
    )
    .await;
    let ids = record_ids(&state).await;
    approve_all(&state, &ids).await;

    let (status, body) = post(
        create_router(state.clone()),
        "/payroll/pay",
        json!({"record_ids": ids, "mode": "ledger", "account_id": "acct_main"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["succeeded"], 2);
    assert_eq!(body["failed"], 1);
    let reason = body["reports"][2]["reason"].as_str().unwrap();
    assert!(
        reason.contains("Insufficient balance"),
        "reason was: {}",
        reason
    );

    let (_, balance) = get(
        create_router(state.clone()),
        "/accounts/acct_main/balance",
    )
    .await;
    assert_eq!(decimal_field(&balance, "current_balance"), decimal("1000"));

    // Two paid, one still approved and payable once the account is topped up.
    let (_, records) = get(
        create_router(state),
        "/payroll/records?month=1&year=2026",
    )
    .await;
    let statuses: Vec<&str> = records
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["status"].as_str().unwrap())
        .collect();
    assert_eq!(statuses.iter().filter(|s| **s == "paid").count(), 2);
    assert_eq!(statuses.iter().filter(|s| **s == "approved").count(), 1);
}

#[tokio::test]
async fn test_repaying_skips_and_never_double_debits() {
    let state = create_test_state();
    register_account(&state, "acct_main", "50000").await;

    post(
        create_router(state.clone()),
        "/payroll/calculate",
        calculate_request(vec![employee("emp_001", "20000", "0", vec![])]),
    )
    .await;
    let ids = record_ids(&state).await;
    approve_all(&state, &ids).await;

    let pay = json!({"record_ids": ids, "mode": "ledger", "account_id": "acct_main"});
    post(create_router(state.clone()), "/payroll/pay", pay.clone()).await;
    let (_, body) = post(create_router(state.clone()), "/payroll/pay", pay).await;

    assert_eq!(body["skipped"], 1);
    assert_eq!(body["reports"][0]["reason"], "already-paid");

    let (_, balance) = get(create_router(state), "/accounts/acct_main/balance").await;
    assert_eq!(decimal_field(&balance, "current_balance"), decimal("30000"));
}

#[tokio::test]
async fn test_manual_pay_records_payment_without_ledger() {
    let state = create_test_state();

    post(
        create_router(state.clone()),
        "/payroll/calculate",
        calculate_request(vec![employee("emp_001", "20000", "0", vec![])]),
    )
    .await;
    let ids = record_ids(&state).await;
    approve_all(&state, &ids).await;

    let (_, body) = post(
        create_router(state.clone()),
        "/payroll/pay",
        json!({
            "record_ids": ids,
            "mode": "manual",
            "method": "cheque",
            "reference": "CHQ-4471"
        }),
    )
    .await;
    assert_eq!(body["succeeded"], 1);

    let (_, records) = get(
        create_router(state),
        "/payroll/records?month=1&year=2026",
    )
    .await;
    let record = &records[0];
    assert_eq!(record["status"], "paid");
    assert_eq!(record["payment_method"], "cheque");
    assert_eq!(record["transaction_reference"], "CHQ-4471");
    assert!(record.get("payment_account_id").is_none());
}

// =============================================================================
// Concurrency
// =============================================================================

fn engine_input(id: &str, basic: &str) -> CalculationInput {
    CalculationInput {
        profile: CompensationProfile {
            employee_id: id.to_string(),
            basic_salary: decimal(basic),
            house_rent: Decimal::ZERO,
            medical_allowance: Decimal::ZERO,
            transport_allowance: Decimal::ZERO,
            other_allowance: Decimal::ZERO,
            provident_fund_percentage: Decimal::ZERO,
        },
        attendance: vec![],
        adjustments: PayAdjustments::default(),
    }
}

fn elapsed() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
}

#[test]
fn test_concurrent_bulk_pays_never_overdraw_one_account() {
    use payroll_engine::ledger::FinancialAccount;
    use std::sync::Arc;

    let engine = Arc::new(PayrollEngine::new(PayrollRules::default()));
    engine.ledger().register_account(FinancialAccount {
        id: "acct_main".to_string(),
        name: "Salary disbursement".to_string(),
        current_balance: decimal("7000"),
    });

    // Ten approved records of 2000 each against a 7000 balance: only
    // three can ever be funded, whatever the interleaving.
    let inputs: Vec<CalculationInput> = (0..10)
        .map(|i| engine_input(&format!("emp_{:03}", i), "2000"))
        .collect();
    engine
        .calculate_for_period(&inputs, 1, 2026, elapsed(), false)
        .unwrap();
    let ids: Vec<_> = engine
        .records_for_period(1, 2026)
        .unwrap()
        .iter()
        .map(|r| r.id)
        .collect();
    engine.bulk_approve(&ids, "hr_admin");

    let handles: Vec<_> = ids
        .iter()
        .map(|&id| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                let result = engine.bulk_pay(
                    &[id],
                    &PaymentMode::Ledger {
                        account_id: "acct_main".to_string(),
                    },
                );
                result.succeeded()
            })
        })
        .collect();

    let paid: usize = handles.into_iter().map(|h| h.join().unwrap_or(0)).sum();

    assert_eq!(paid, 3);
    assert_eq!(
        engine.ledger().balance("acct_main").unwrap(),
        decimal("1000")
    );
    let paid_records = engine
        .records_for_period(1, 2026)
        .unwrap()
        .iter()
        .filter(|r| r.status == SalaryStatus::Paid)
        .count();
    assert_eq!(paid_records, 3);
}

#[test]
fn test_concurrent_calculations_create_exactly_one_record() {
    use std::sync::Arc;

    let engine = Arc::new(PayrollEngine::new(PayrollRules::default()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                engine
                    .calculate_for_period(
                        &[engine_input("emp_001", "20000")],
                        1,
                        2026,
                        elapsed(),
                        false,
                    )
                    .map(|r| r.succeeded())
                    .unwrap_or(0)
            })
        })
        .collect();

    let successes: usize = handles.into_iter().map(|h| h.join().unwrap_or(0)).sum();

    assert_eq!(successes, 1);
    assert_eq!(engine.records_for_period(1, 2026).unwrap().len(), 1);
}

#[test]
fn test_concurrent_pay_of_one_record_debits_once() {
    use payroll_engine::ledger::FinancialAccount;
    use std::sync::Arc;

    let engine = Arc::new(PayrollEngine::new(PayrollRules::default()));
    engine.ledger().register_account(FinancialAccount {
        id: "acct_main".to_string(),
        name: "Salary disbursement".to_string(),
        current_balance: decimal("100000"),
    });
    engine
        .calculate_for_period(&[engine_input("emp_001", "20000")], 1, 2026, elapsed(), false)
        .unwrap();
    let id = engine.records_for_period(1, 2026).unwrap()[0].id;
    engine.bulk_approve(&[id], "hr_admin");

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            std::thread::spawn(move || {
                engine
                    .bulk_pay(
                        &[id],
                        &PaymentMode::Ledger {
                            account_id: "acct_main".to_string(),
                        },
                    )
                    .succeeded()
            })
        })
        .collect();

    let successes: usize = handles.into_iter().map(|h| h.join().unwrap_or(0)).sum();

    assert_eq!(successes, 1);
    // Debited exactly once.
    assert_eq!(
        engine.ledger().balance("acct_main").unwrap(),
        decimal("80000")
    );
}

// =============================================================================
// Preview
// =============================================================================

#[tokio::test]
async fn test_preview_mid_month_persists_nothing() {
    let state = create_test_state();

    let (status, body) = post(
        create_router(state.clone()),
        "/payroll/preview",
        json!({
            "month": 1,
            "year": 2026,
            "as_of": "2026-01-15",
            "employee": employee("emp_001", "20000", "5", vec![absent("2026-01-05")])
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal_field(&body, "provident_fund"), decimal("1000"));

    let (_, records) = get(
        create_router(state),
        "/payroll/records?month=1&year=2026",
    )
    .await;
    assert!(records.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_final_calculation_mid_month_is_rejected() {
    let state = create_test_state();
    let mut request = calculate_request(vec![employee("emp_001", "20000", "0", vec![])]);
    request["as_of"] = json!("2026-01-15");

    let (status, body) = post(create_router(state.clone()), "/payroll/calculate", request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "ATTENDANCE_INCOMPLETE");

    let (_, records) = get(
        create_router(state),
        "/payroll/records?month=1&year=2026",
    )
    .await;
    assert!(records.as_array().unwrap().is_empty());
}
