//! Ports to the outside world
//!
//! The origination service depends on these traits only; adapters live in
//! the infrastructure crates.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use core_kernel::{ApplicationId, MerchantId, Money, PortError, ScheduleId};
use domain_terms::Schedule;
use domain_underwriting::{CreditReportPull, Decision, IdentityClaim, OverrideType};

use crate::application::{LoanApplication, UserInput};

/// Per-merchant origination settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantConfiguration {
    pub merchant_id: MerchantId,
    pub name: String,
    pub minimum_loan_amount: Money,
    pub maximum_loan_amount: Money,
}

/// Credit bureau integration
#[async_trait]
pub trait CreditBureauPort: Send + Sync {
    /// Pulls a credit report for the claimed identity. A pull that finds no
    /// matching file is a successful no-hit, not an error.
    async fn pull_credit_report(
        &self,
        claim: &IdentityClaim,
    ) -> Result<CreditReportPull, PortError>;
}

/// Manual review overrides, keyed by the SSN on the credit file
#[async_trait]
pub trait OverrideStore: Send + Sync {
    async fn has_override(&self, ssn: &str, override_type: OverrideType) -> bool;
}

#[async_trait]
pub trait MerchantStore: Send + Sync {
    async fn get(&self, merchant_id: MerchantId) -> Option<MerchantConfiguration>;
}

/// Persistence for loan applications
#[async_trait]
pub trait ApplicationStore: Send + Sync {
    async fn create(
        &self,
        merchant_id: MerchantId,
        requested_amount: Money,
    ) -> Result<LoanApplication, PortError>;

    async fn get(&self, application_id: ApplicationId) -> Result<LoanApplication, PortError>;

    /// Merges `input` into the stored application and appends it to the
    /// event trail
    async fn handle_user_input(
        &self,
        application_id: ApplicationId,
        input: UserInput,
    ) -> Result<LoanApplication, PortError>;

    /// Records `decision` and advances the application state
    async fn handle_decision(
        &self,
        application_id: ApplicationId,
        decision: Decision,
    ) -> Result<LoanApplication, PortError>;

    async fn record_confirmation(
        &self,
        application_id: ApplicationId,
        schedule_id: ScheduleId,
    ) -> Result<LoanApplication, PortError>;
}

/// Persistence for computed payment schedules
#[async_trait]
pub trait ScheduleStore: Send + Sync {
    /// Assigns ids and persists the schedules, returning them with ids set
    async fn save(&self, schedules: Vec<Schedule>) -> Result<Vec<Schedule>, PortError>;

    async fn get(&self, schedule_id: ScheduleId) -> Option<Schedule>;
}
