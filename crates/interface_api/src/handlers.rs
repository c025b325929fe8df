//! Loan application handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use core_kernel::{ApplicationId, MerchantId, Money, ScheduleId};
use domain_application::{IdentitySubmission, NextStep};
use domain_underwriting::{Decision, Income};

use crate::dto::{
    parse_currency, ApplicationResponse, ConfirmationRequest, ConfirmationResponse,
    CreateApplicationRequest, ExitResponse, IdentityRequest, IncomeRequest, SsnRequest,
    StepResponse,
};
use crate::error::ApiError;
use crate::service_view;
use crate::AppState;

/// Opens a new application
pub async fn create_application(
    State(state): State<AppState>,
    Json(request): Json<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<ApplicationResponse>), ApiError> {
    let currency = parse_currency(&request.currency)?;
    let requested_amount = Money::from_minor(request.requested_amount_cents, currency);
    if !requested_amount.is_positive() {
        return Err(ApiError::bad_request(
            "requested_amount_cents",
            "the requested amount must be positive",
        ));
    }

    let application = state
        .service
        .initialize(MerchantId::from_uuid(request.merchant_id), requested_amount)
        .await?;

    let application_id = *application.application_id.as_uuid();
    Ok((
        StatusCode::CREATED,
        Json(ApplicationResponse {
            application_id,
            state: service_view::state_name(application.state).to_string(),
            next_step: service_view::step_name(NextStep::Identity).to_string(),
            submit_url: service_view::submit_url(application_id, NextStep::Identity),
        }),
    ))
}

/// Identity step
pub async fn submit_identity(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<IdentityRequest>,
) -> Result<Json<StepResponse>, ApiError> {
    let outcome = state
        .service
        .submit_identity(
            ApplicationId::from_uuid(id),
            IdentitySubmission {
                full_name: request.full_name,
                date_of_birth: request.date_of_birth,
                address: request.address.into(),
                ssn_last4: request.ssn_last4,
            },
        )
        .await?;
    Ok(Json(StepResponse::from_view(service_view::from_outcome(
        outcome,
    ))))
}

/// Full-SSN step
pub async fn submit_ssn(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SsnRequest>,
) -> Result<Json<StepResponse>, ApiError> {
    let outcome = state
        .service
        .submit_ssn(ApplicationId::from_uuid(id), request.ssn)
        .await?;
    Ok(Json(StepResponse::from_view(service_view::from_outcome(
        outcome,
    ))))
}

/// Income step
pub async fn submit_income(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<IncomeRequest>,
) -> Result<Json<StepResponse>, ApiError> {
    let currency = parse_currency(&request.currency)?;
    let income = Income {
        amount: Money::from_minor(request.amount_cents, currency),
        frequency: request.frequency,
    };
    let outcome = state
        .service
        .submit_income(ApplicationId::from_uuid(id), income)
        .await?;
    Ok(Json(StepResponse::from_view(service_view::from_outcome(
        outcome,
    ))))
}

/// Confirmation step: the customer accepts one of the offered schedules
pub async fn confirm(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<ConfirmationRequest>,
) -> Result<Json<ConfirmationResponse>, ApiError> {
    let confirmation = state
        .service
        .confirm(
            ApplicationId::from_uuid(id),
            ScheduleId::from_uuid(request.schedule_id),
        )
        .await?;
    Ok(Json(ConfirmationResponse {
        application_id: id,
        merchant_payment_token: confirmation.merchant_payment_token.to_string(),
        message: confirmation.message,
    }))
}

/// Exit step: surfaces the closing message for an application that cannot
/// proceed online
pub async fn exit_application(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ExitResponse>, ApiError> {
    let application = state.service.get(ApplicationId::from_uuid(id)).await?;
    let message = match &application.final_decision {
        Some(Decision::Pending(pending)) => pending
            .message
            .clone()
            .unwrap_or_else(|| "Please call us at (888) 555-0111 to continue.".to_string()),
        Some(Decision::Denied(_)) => {
            "We couldn't approve your application at this time.".to_string()
        }
        _ => "Thanks for your interest.".to_string(),
    };
    Ok(Json(ExitResponse {
        application_id: id,
        state: service_view::state_name(application.state).to_string(),
        message,
    }))
}

/// Liveness probe
pub async fn health_check() -> &'static str {
    "ok"
}
