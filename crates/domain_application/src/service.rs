//! The origination workflow
//!
//! Drives an application through identity verification, credit
//! underwriting, schedule generation, and confirmation, delegating the
//! policy decisions to the underwriting crate and persistence to the ports.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use core_kernel::{ApplicationId, Currency, MerchantId, Money, ScheduleId};
use domain_terms::{Schedule, compute_schedule};
use domain_underwriting::{
    credit, identity, CreditDecision, CreditReportPull, IdentityClaim, IdentityDecision, Income,
    OverrideFlags, OverrideType, PendingReview, PendingState,
};

use crate::application::{LoanApplication, UserInput};
use crate::error::OriginationError;
use crate::ports::{
    ApplicationStore, CreditBureauPort, MerchantStore, OverrideStore, ScheduleStore,
};

/// What the applicant should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextStep {
    Identity,
    Ssn,
    Income,
    Confirmation,
    Exit,
}

/// Copy shown to a declined applicant
#[derive(Debug, Clone, PartialEq)]
pub struct Declination {
    pub header: String,
    pub message: String,
}

impl Declination {
    fn new(message: &str) -> Self {
        Self {
            header: "We're sorry".to_string(),
            message: message.to_string(),
        }
    }
}

/// Receipt for a confirmed loan
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation {
    /// Token the merchant redeems for payment, currently the application id
    pub merchant_payment_token: ApplicationId,
    pub message: String,
}

/// Identity-step fields as submitted by the applicant
#[derive(Debug, Clone)]
pub struct IdentitySubmission {
    pub full_name: String,
    pub date_of_birth: chrono::NaiveDate,
    pub address: domain_underwriting::Address,
    pub ssn_last4: String,
}

/// Result of a workflow step
#[derive(Debug, Clone)]
pub enum StepOutcome {
    Approved {
        application: LoanApplication,
        schedules: Vec<Schedule>,
    },
    Denied {
        application: LoanApplication,
        declination: Declination,
    },
    Pending {
        application: LoanApplication,
        next_step: NextStep,
        message: String,
    },
}

impl StepOutcome {
    pub fn application(&self) -> &LoanApplication {
        match self {
            Self::Approved { application, .. }
            | Self::Denied { application, .. }
            | Self::Pending { application, .. } => application,
        }
    }
}

/// Orchestrates the origination workflow over the injected ports
pub struct OriginationService {
    applications: Arc<dyn ApplicationStore>,
    schedules: Arc<dyn ScheduleStore>,
    merchants: Arc<dyn MerchantStore>,
    credit_bureau: Arc<dyn CreditBureauPort>,
    overrides: Arc<dyn OverrideStore>,
}

impl OriginationService {
    pub fn new(
        applications: Arc<dyn ApplicationStore>,
        schedules: Arc<dyn ScheduleStore>,
        merchants: Arc<dyn MerchantStore>,
        credit_bureau: Arc<dyn CreditBureauPort>,
        overrides: Arc<dyn OverrideStore>,
    ) -> Self {
        Self {
            applications,
            schedules,
            merchants,
            credit_bureau,
            overrides,
        }
    }

    /// Opens a new application for `requested_amount` at the merchant
    pub async fn initialize(
        &self,
        merchant_id: MerchantId,
        requested_amount: Money,
    ) -> Result<LoanApplication, OriginationError> {
        if requested_amount.currency() != Currency::USD {
            return Err(OriginationError::UnsupportedCurrency);
        }
        self.merchants
            .get(merchant_id)
            .await
            .ok_or(OriginationError::UnknownMerchant(merchant_id))?;

        let application = self.applications.create(merchant_id, requested_amount).await?;
        info!(
            application_id = %application.application_id,
            merchant_id = %merchant_id,
            amount = %requested_amount,
            "loan application initialized"
        );
        Ok(application)
    }

    pub async fn get(
        &self,
        application_id: ApplicationId,
    ) -> Result<LoanApplication, OriginationError> {
        Ok(self.applications.get(application_id).await?)
    }

    /// Identity step: records the claim and runs identity verification
    pub async fn submit_identity(
        &self,
        application_id: ApplicationId,
        submission: IdentitySubmission,
    ) -> Result<StepOutcome, OriginationError> {
        let input = UserInput::identity(
            submission.full_name,
            submission.date_of_birth,
            submission.address,
            submission.ssn_last4,
        );
        self.handle_user_input(application_id, input).await
    }

    /// Full-SSN step: re-runs identity verification with the full SSN
    pub async fn submit_ssn(
        &self,
        application_id: ApplicationId,
        ssn: String,
    ) -> Result<StepOutcome, OriginationError> {
        self.handle_user_input(application_id, UserInput::ssn(ssn))
            .await
    }

    /// Income step: re-runs underwriting with stated income
    pub async fn submit_income(
        &self,
        application_id: ApplicationId,
        income: Income,
    ) -> Result<StepOutcome, OriginationError> {
        self.handle_user_input(application_id, UserInput::income(income))
            .await
    }

    /// Confirmation step: locks in the selected schedule
    pub async fn confirm(
        &self,
        application_id: ApplicationId,
        schedule_id: ScheduleId,
    ) -> Result<Confirmation, OriginationError> {
        self.schedules
            .get(schedule_id)
            .await
            .ok_or(OriginationError::UnknownSchedule(schedule_id))?;

        self.applications
            .handle_user_input(application_id, UserInput::schedule(schedule_id))
            .await?;
        let application = self
            .applications
            .record_confirmation(application_id, schedule_id)
            .await?;
        info!(
            application_id = %application.application_id,
            schedule_id = %schedule_id,
            "loan confirmed"
        );
        Ok(Confirmation {
            merchant_payment_token: application.application_id,
            message: "Your loan is confirmed.".to_string(),
        })
    }

    /// Records `input` and re-evaluates the application end to end
    async fn handle_user_input(
        &self,
        application_id: ApplicationId,
        input: UserInput,
    ) -> Result<StepOutcome, OriginationError> {
        let application = self
            .applications
            .handle_user_input(application_id, input)
            .await?;

        let claim = application
            .user_input
            .identity_claim()
            .ok_or(OriginationError::IncompleteInput {
                step: "identity",
                field: "full_name",
            })?;

        let (identity_decision, pull) = self.verify_identity(&claim).await?;
        let application = self
            .applications
            .handle_decision(application_id, identity_decision.clone().into())
            .await?;
        info!(
            application_id = %application.application_id,
            decision = ?application.final_decision,
            "identity decision recorded"
        );

        match identity_decision {
            IdentityDecision::Approved(_) => self.underwrite(application, &pull).await,
            IdentityDecision::Denied(_) => Ok(StepOutcome::Denied {
                application,
                declination: Declination::new(
                    "We couldn't approve your application because we couldn't verify your identity.",
                ),
            }),
            IdentityDecision::Pending(pending) => {
                let (next_step, message) = pending_prompt(&pending);
                Ok(StepOutcome::Pending {
                    application,
                    next_step,
                    message,
                })
            }
        }
    }

    /// Pulls the bureau and runs the identity policy
    async fn verify_identity(
        &self,
        claim: &IdentityClaim,
    ) -> Result<(IdentityDecision, CreditReportPull), OriginationError> {
        let pull = self.credit_bureau.pull_credit_report(claim).await?;
        let overrides = match pull.report() {
            Some(report) => {
                let ssn = &report.identity_info.ssn;
                OverrideFlags {
                    watchlist_cleared: self
                        .overrides
                        .has_override(ssn, OverrideType::Watchlist)
                        .await,
                    extended_victim_cleared: self
                        .overrides
                        .has_override(ssn, OverrideType::ExtendedFraudVictim)
                        .await,
                }
            }
            None => OverrideFlags::default(),
        };

        let as_of = Utc::now().date_naive();
        let decision = identity::policy(as_of, claim, Some(&pull), overrides);
        Ok((decision, pull))
    }

    /// Runs credit policy against the identity-approved application
    async fn underwrite(
        &self,
        application: LoanApplication,
        pull: &CreditReportPull,
    ) -> Result<StepOutcome, OriginationError> {
        let address = application
            .user_input
            .address
            .clone()
            .ok_or(OriginationError::IncompleteInput {
                step: "underwriting",
                field: "address",
            })?;
        let decision = credit::decide(
            application.requested_amount,
            pull,
            &address,
            application.user_input.income.as_ref(),
        );
        let application = self
            .applications
            .handle_decision(application.application_id, decision.clone().into())
            .await?;
        info!(
            application_id = %application.application_id,
            decision = ?application.final_decision,
            "credit decision recorded"
        );

        match decision {
            CreditDecision::Approved(approval) => {
                let today = Utc::now().date_naive();
                let schedules: Vec<Schedule> = approval
                    .approved_plans
                    .iter()
                    .map(|plan| compute_schedule(plan, approval.amount, today))
                    .collect();
                let schedules = self.schedules.save(schedules).await?;
                Ok(StepOutcome::Approved {
                    application,
                    schedules,
                })
            }
            CreditDecision::Denied(_) => Ok(StepOutcome::Denied {
                application,
                declination: Declination::new(
                    "We couldn't approve your application because you didn't match our credit criteria.",
                ),
            }),
            CreditDecision::Pending(pending) => {
                let (next_step, message) = pending_prompt(&pending);
                Ok(StepOutcome::Pending {
                    application,
                    next_step,
                    message,
                })
            }
        }
    }
}

fn pending_prompt(pending: &PendingReview) -> (NextStep, String) {
    match pending.state {
        PendingState::NeedsSsn => (
            NextStep::Ssn,
            "Please submit your full SSN to continue.".to_string(),
        ),
        PendingState::NeedsIncome => (
            NextStep::Income,
            "Please submit your income information to continue.".to_string(),
        ),
        PendingState::WatchlistHit => (
            NextStep::Exit,
            "Please call us at (888) 555-0111 to verify your identity.".to_string(),
        ),
        PendingState::ExtendedFraudVictim => (
            NextStep::Exit,
            pending
                .message
                .clone()
                .unwrap_or_else(|| "Please call us at (888) 555-0111 to verify your identity.".to_string()),
        ),
    }
}
