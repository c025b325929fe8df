//! End-to-end API tests
//!
//! Runs the full router against the sandbox bureau and in-memory stores,
//! driving applications through every workflow path over HTTP.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use uuid::Uuid;

use domain_application::IdentitySubmission;
use interface_api::create_router;
use test_utils::{fixtures, OriginationServiceBuilder};

fn server() -> TestServer {
    TestServer::new(create_router(OriginationServiceBuilder::new().build()))
        .expect("router is serviceable")
}

async fn create_application(server: &TestServer, amount_cents: i64) -> String {
    let response = server
        .post("/api/v1/loan-applications")
        .json(&json!({
            "merchant_id": test_utils::seed_merchant_id().as_uuid(),
            "requested_amount_cents": amount_cents,
            "currency": "USD",
        }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["next_step"], "identity");
    body["application_id"].as_str().unwrap().to_string()
}

fn identity_body(submission: &IdentitySubmission) -> Value {
    json!({
        "full_name": submission.full_name,
        "date_of_birth": submission.date_of_birth,
        "address": {
            "street1": submission.address.street1,
            "street2": submission.address.street2,
            "city": submission.address.city,
            "region1_code": submission.address.region1_code,
            "postal_code": submission.address.postal_code,
            "country_code": submission.address.country_code,
        },
        "ssn_last4": submission.ssn_last4,
    })
}

async fn submit_identity(server: &TestServer, id: &str, submission: &IdentitySubmission) -> Value {
    let response = server
        .post(&format!("/api/v1/loan-applications/{id}/identity"))
        .json(&identity_body(submission))
        .await;
    response.assert_status_ok();
    response.json()
}

#[tokio::test]
async fn test_health_check() {
    let server = server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("ok");
}

#[tokio::test]
async fn test_create_rejects_unknown_currency() {
    let server = server();
    let response = server
        .post("/api/v1/loan-applications")
        .json(&json!({
            "merchant_id": test_utils::seed_merchant_id().as_uuid(),
            "requested_amount_cents": 50000,
            "currency": "XYZ",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["field"], "currency");
}

#[tokio::test]
async fn test_create_rejects_non_usd() {
    let server = server();
    let response = server
        .post("/api/v1/loan-applications")
        .json(&json!({
            "merchant_id": test_utils::seed_merchant_id().as_uuid(),
            "requested_amount_cents": 50000,
            "currency": "CAD",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["field"], "currency");
}

#[tokio::test]
async fn test_create_rejects_unknown_merchant() {
    let server = server();
    let response = server
        .post("/api/v1/loan-applications")
        .json(&json!({
            "merchant_id": Uuid::new_v4(),
            "requested_amount_cents": 50000,
            "currency": "USD",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["field"], "merchant_id");
}

#[tokio::test]
async fn test_create_rejects_non_positive_amount() {
    let server = server();
    let response = server
        .post("/api/v1/loan-applications")
        .json(&json!({
            "merchant_id": test_utils::seed_merchant_id().as_uuid(),
            "requested_amount_cents": 0,
            "currency": "USD",
        }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["field"], "requested_amount_cents");
}

#[tokio::test]
async fn test_unknown_application_is_not_found() {
    let server = server();
    let response = server
        .post(&format!(
            "/api/v1/loan-applications/{}/ssn",
            Uuid::new_v4()
        ))
        .json(&json!({ "ssn": "987-65-1111" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_mid_band_income_workflow_through_confirmation() {
    let server = server();
    // $1,000.01 with a 575 score requires income
    let id = create_application(&server, 100_001).await;

    let body = submit_identity(&server, &id, &fixtures::june_castellano()).await;
    assert_eq!(body["outcome"], "pending");
    assert_eq!(body["next_step"], "income");
    assert_eq!(
        body["submit_url"],
        format!("/api/v1/loan-applications/{id}/income")
    );

    // $50,000.01 annualized clears the threshold
    let response = server
        .post(&format!("/api/v1/loan-applications/{id}/income"))
        .json(&json!({
            "amount_cents": 5_000_001,
            "currency": "USD",
            "frequency": "annual",
        }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["outcome"], "approved");
    assert_eq!(body["next_step"], "confirmation");

    let schedules = body["schedules"].as_array().unwrap();
    assert_eq!(schedules.len(), 1);
    let schedule = &schedules[0];
    assert_eq!(schedule["number_of_payments"], 3);
    assert_eq!(schedule["payments_total_cents"], 100_001);
    assert_eq!(schedule["first_payment_amount_cents"], 33_334);
    assert_eq!(schedule["last_payment_amount_cents"], 33_333);
    assert_eq!(schedule["payment_amount_display"], "$333.34");
    assert_eq!(schedule["apr_display"], "0.000% APR");

    let response = server
        .post(&format!("/api/v1/loan-applications/{id}/confirmation"))
        .json(&json!({ "schedule_id": schedule["schedule_id"] }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    let token = body["merchant_payment_token"].as_str().unwrap();
    assert!(token.starts_with("app-"));
}

#[tokio::test]
async fn test_mid_band_low_income_is_denied() {
    let server = server();
    let id = create_application(&server, 100_001).await;
    submit_identity(&server, &id, &fixtures::june_castellano()).await;

    let response = server
        .post(&format!("/api/v1/loan-applications/{id}/income"))
        .json(&json!({
            "amount_cents": 4_999_999,
            "currency": "USD",
            "frequency": "annual",
        }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["outcome"], "denied");
    assert_eq!(body["declination"]["header"], "We're sorry");
    assert_eq!(
        body["declination"]["message"],
        "We couldn't approve your application because you didn't match our credit criteria."
    );
}

#[tokio::test]
async fn test_thin_file_requires_full_ssn_then_approves() {
    let server = server();
    let id = create_application(&server, 50_000).await;

    let body = submit_identity(&server, &id, &fixtures::theo_brandt()).await;
    assert_eq!(body["outcome"], "pending");
    assert_eq!(body["next_step"], "ssn");
    assert_eq!(body["message"], "Please submit your full SSN to continue.");

    let response = server
        .post(&format!("/api/v1/loan-applications/{id}/ssn"))
        .json(&json!({ "ssn": fixtures::ssn::THEO_BRANDT }))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["outcome"], "approved");
    assert_eq!(body["state"], "approved");
}

#[tokio::test]
async fn test_frozen_file_is_denied() {
    let server = server();
    let id = create_application(&server, 50_000).await;

    let body = submit_identity(&server, &id, &fixtures::miriam_okafor()).await;
    assert_eq!(body["outcome"], "denied");
    assert_eq!(body["state"], "denied");
    assert_eq!(
        body["declination"]["message"],
        "We couldn't approve your application because we couldn't verify your identity."
    );
}

#[tokio::test]
async fn test_cleared_watchlist_hit_proceeds_to_approval() {
    let server = server();
    let id = create_application(&server, 50_000).await;

    // the seeded override store has already cleared this persona's hit
    let body = submit_identity(&server, &id, &fixtures::dorian_vasquez()).await;
    assert_eq!(body["outcome"], "approved");
}

#[tokio::test]
async fn test_fraud_victim_alert_exits_with_the_bureau_message() {
    let server = server();
    let id = create_application(&server, 50_000).await;

    let body = submit_identity(&server, &id, &fixtures::priya_raman()).await;
    assert_eq!(body["outcome"], "pending");
    assert_eq!(body["next_step"], "exit");

    let response = server
        .post(&format!("/api/v1/loan-applications/{id}/exit"))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["state"], "pending_identity");
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("identity theft victim"));
}

#[tokio::test]
async fn test_changing_submitted_fields_is_a_conflict() {
    let server = server();
    let id = create_application(&server, 50_000).await;
    submit_identity(&server, &id, &fixtures::june_castellano()).await;

    let mut changed = fixtures::june_castellano();
    changed.full_name = "Someone Else".to_string();
    let response = server
        .post(&format!("/api/v1/loan-applications/{id}/identity"))
        .json(&identity_body(&changed))
        .await;
    response.assert_status(StatusCode::CONFLICT);
}
