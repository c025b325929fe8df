//! Mapping from workflow outcomes to what the wire layer needs

use uuid::Uuid;

use domain_application::{
    Declination, LoanApplication, LoanApplicationState, NextStep, StepOutcome,
};
use domain_terms::Schedule;

/// A flattened step outcome, ready to serialize
pub struct StepView {
    pub application: LoanApplication,
    pub outcome: &'static str,
    pub next_step: Option<NextStep>,
    pub message: Option<String>,
    pub schedules: Option<Vec<Schedule>>,
    pub declination: Option<Declination>,
}

pub fn from_outcome(outcome: StepOutcome) -> StepView {
    match outcome {
        StepOutcome::Approved {
            application,
            schedules,
        } => StepView {
            application,
            outcome: "approved",
            next_step: Some(NextStep::Confirmation),
            message: None,
            schedules: Some(schedules),
            declination: None,
        },
        StepOutcome::Denied {
            application,
            declination,
        } => StepView {
            application,
            outcome: "denied",
            next_step: Some(NextStep::Exit),
            message: None,
            schedules: None,
            declination: Some(declination),
        },
        StepOutcome::Pending {
            application,
            next_step,
            message,
        } => StepView {
            application,
            outcome: "pending",
            next_step: Some(next_step),
            message: Some(message),
            schedules: None,
            declination: None,
        },
    }
}

pub fn state_name(state: LoanApplicationState) -> &'static str {
    match state {
        LoanApplicationState::PendingIdentity => "pending_identity",
        LoanApplicationState::PendingUnderwriting => "pending_underwriting",
        LoanApplicationState::Denied => "denied",
        LoanApplicationState::Approved => "approved",
        LoanApplicationState::Confirmed => "confirmed",
    }
}

pub fn step_name(step: NextStep) -> &'static str {
    match step {
        NextStep::Identity => "identity",
        NextStep::Ssn => "ssn",
        NextStep::Income => "income",
        NextStep::Confirmation => "confirmation",
        NextStep::Exit => "exit",
    }
}

pub fn submit_url(application_id: Uuid, step: NextStep) -> String {
    format!(
        "/api/v1/loan-applications/{application_id}/{}",
        step_name(step)
    )
}
