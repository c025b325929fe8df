//! Request/response bodies
//!
//! Amounts cross the wire as integer cents plus a currency code; the
//! display fields carry the strings a storefront can render verbatim.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use core_kernel::{Currency, Money};
use domain_terms::{PaymentFrequency, Schedule};
use domain_underwriting::{Address, IncomeFrequency};

use crate::error::ApiError;
use crate::service_view::{self, StepView};

#[derive(Debug, Deserialize)]
pub struct CreateApplicationRequest {
    pub merchant_id: Uuid,
    pub requested_amount_cents: i64,
    pub currency: String,
}

#[derive(Debug, Deserialize)]
pub struct AddressRequest {
    pub street1: String,
    pub street2: Option<String>,
    pub city: String,
    pub region1_code: String,
    pub postal_code: String,
    pub country_code: String,
}

impl From<AddressRequest> for Address {
    fn from(request: AddressRequest) -> Self {
        Address {
            street1: request.street1,
            street2: request.street2,
            city: request.city,
            region1_code: request.region1_code,
            postal_code: request.postal_code,
            country_code: request.country_code,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct IdentityRequest {
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub address: AddressRequest,
    pub ssn_last4: String,
}

#[derive(Debug, Deserialize)]
pub struct SsnRequest {
    pub ssn: String,
}

#[derive(Debug, Deserialize)]
pub struct IncomeRequest {
    pub amount_cents: i64,
    pub currency: String,
    pub frequency: IncomeFrequency,
}

#[derive(Debug, Deserialize)]
pub struct ConfirmationRequest {
    pub schedule_id: Uuid,
}

/// Parses a wire currency code, naming the offending field on failure
pub fn parse_currency(code: &str) -> Result<Currency, ApiError> {
    code.parse()
        .map_err(|_| ApiError::bad_request("currency", format!("unknown currency: {code}")))
}

#[derive(Debug, Serialize)]
pub struct ApplicationResponse {
    pub application_id: Uuid,
    pub state: String,
    pub next_step: String,
    pub submit_url: String,
}

#[derive(Debug, Serialize)]
pub struct DeclinationResponse {
    pub header: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub schedule_id: Uuid,
    pub payment_frequency: PaymentFrequency,
    pub number_of_payments: u32,
    pub currency: String,
    pub payment_amount_cents: i64,
    pub first_payment_amount_cents: i64,
    pub last_payment_amount_cents: i64,
    pub payments_total_cents: i64,
    pub first_payment_date: NaiveDate,
    /// e.g. "April 14, 2020"
    pub first_payment_date_display: String,
    /// e.g. "$333.33"
    pub payment_amount_display: String,
    /// e.g. "0.000% APR"
    pub apr_display: String,
}

impl ScheduleResponse {
    pub fn from_schedule(schedule: &Schedule) -> Self {
        Self {
            schedule_id: schedule
                .schedule_id
                .map(|id| *id.as_uuid())
                .unwrap_or_default(),
            payment_frequency: schedule.payment_frequency,
            number_of_payments: schedule.number_of_payments,
            currency: schedule.currency.code().to_string(),
            payment_amount_cents: schedule.payment_amount.to_minor(),
            first_payment_amount_cents: schedule.first_payment_amount.to_minor(),
            last_payment_amount_cents: schedule.last_payment_amount.to_minor(),
            payments_total_cents: schedule.payments_total.to_minor(),
            first_payment_date: schedule.first_payment_date,
            first_payment_date_display: schedule
                .first_payment_date
                .format("%B %-d, %Y")
                .to_string(),
            payment_amount_display: format_money(&schedule.payment_amount),
            apr_display: format!("{}% APR", schedule.apr),
        }
    }
}

pub fn format_money(money: &Money) -> String {
    money.to_string()
}

/// The response to every workflow step submission
#[derive(Debug, Serialize)]
pub struct StepResponse {
    pub application_id: Uuid,
    pub state: String,
    /// "approved", "denied", or "pending"
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_step: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submit_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedules: Option<Vec<ScheduleResponse>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declination: Option<DeclinationResponse>,
}

impl StepResponse {
    pub fn from_view(view: StepView) -> Self {
        let application_id = *view.application.application_id.as_uuid();
        Self {
            application_id,
            state: service_view::state_name(view.application.state).to_string(),
            outcome: view.outcome.to_string(),
            next_step: view
                .next_step
                .map(|step| service_view::step_name(step).to_string()),
            submit_url: view
                .next_step
                .map(|step| service_view::submit_url(application_id, step)),
            message: view.message,
            schedules: view
                .schedules
                .map(|schedules| schedules.iter().map(ScheduleResponse::from_schedule).collect()),
            declination: view.declination.map(|declination| DeclinationResponse {
                header: declination.header,
                message: declination.message,
            }),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ConfirmationResponse {
    pub application_id: Uuid,
    pub merchant_payment_token: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ExitResponse {
    pub application_id: Uuid,
    pub state: String,
    pub message: String,
}
