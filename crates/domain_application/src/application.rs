//! The loan application record
//!
//! Applications are immutable values: every transition (new user input, a new
//! decision) produces a fresh copy with the relevant event appended, never an
//! in-place mutation. The stores persist whole records keyed by id.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{ApplicationId, MerchantId, Money, ScheduleId};
use domain_underwriting::{
    Address, Decision, Income, IdentityClaim, PendingState,
};

/// Workflow states of an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanApplicationState {
    PendingIdentity,
    PendingUnderwriting,
    Denied,
    Approved,
    Confirmed,
}

/// Applicant-supplied fields, accumulated across workflow steps
///
/// Each submission carries only the fields for its step; the rest stay
/// `None` and are filled in by later submissions. A field that is already
/// set can be re-submitted with the same value but never changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserInput {
    pub full_name: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub address: Option<Address>,
    pub ssn_last4: Option<String>,
    pub ssn: Option<String>,
    pub income: Option<Income>,
    pub schedule_id: Option<ScheduleId>,
}

impl UserInput {
    /// Input for the identity step
    pub fn identity(
        full_name: String,
        date_of_birth: NaiveDate,
        address: Address,
        ssn_last4: String,
    ) -> Self {
        Self {
            full_name: Some(full_name),
            date_of_birth: Some(date_of_birth),
            address: Some(address),
            ssn_last4: Some(ssn_last4),
            ..Default::default()
        }
    }

    /// Input for the full-SSN step
    pub fn ssn(ssn: String) -> Self {
        Self {
            ssn: Some(ssn),
            ..Default::default()
        }
    }

    /// Input for the income step
    pub fn income(income: Income) -> Self {
        Self {
            income: Some(income),
            ..Default::default()
        }
    }

    /// Input for the confirmation step
    pub fn schedule(schedule_id: ScheduleId) -> Self {
        Self {
            schedule_id: Some(schedule_id),
            ..Default::default()
        }
    }

    /// Merges `update` into this input, field by field.
    ///
    /// Returns the name of the offending field if an already-set field would
    /// change value; that is a client protocol violation, not a recoverable
    /// user error.
    pub fn merged_with(&self, update: &UserInput) -> Result<UserInput, &'static str> {
        Ok(UserInput {
            full_name: merge_field(&self.full_name, &update.full_name, "full_name")?,
            date_of_birth: merge_field(&self.date_of_birth, &update.date_of_birth, "date_of_birth")?,
            address: merge_field(&self.address, &update.address, "address")?,
            ssn_last4: merge_field(&self.ssn_last4, &update.ssn_last4, "ssn_last4")?,
            ssn: merge_field(&self.ssn, &update.ssn, "ssn")?,
            income: merge_field(&self.income, &update.income, "income")?,
            schedule_id: merge_field(&self.schedule_id, &update.schedule_id, "schedule_id")?,
        })
    }

    /// The identity claim for policy evaluation, if the identity step has
    /// been submitted
    pub fn identity_claim(&self) -> Option<IdentityClaim> {
        Some(IdentityClaim {
            full_name: self.full_name.clone()?,
            date_of_birth: self.date_of_birth?,
            address: self.address.clone()?,
            ssn_last4: self.ssn_last4.clone()?,
            ssn: self.ssn.clone(),
        })
    }
}

fn merge_field<T: Clone + PartialEq>(
    current: &Option<T>,
    update: &Option<T>,
    field: &'static str,
) -> Result<Option<T>, &'static str> {
    match (current, update) {
        (Some(existing), Some(new)) if existing != new => Err(field),
        (Some(existing), _) => Ok(Some(existing.clone())),
        (None, other) => Ok(other.clone()),
    }
}

/// A consumer loan application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    pub application_id: ApplicationId,
    pub state: LoanApplicationState,
    pub merchant_id: MerchantId,
    pub requested_amount: Money,
    pub user_input: UserInput,
    /// Every user-input submission, in order
    pub user_input_events: Vec<UserInput>,
    pub final_decision: Option<Decision>,
    /// Every decision the workflow produced, in order
    pub decision_events: Vec<Decision>,
    pub selected_schedule_id: Option<ScheduleId>,
}

impl LoanApplication {
    /// A freshly initialized application, waiting on the identity step
    pub fn new(merchant_id: MerchantId, requested_amount: Money) -> Self {
        Self {
            application_id: ApplicationId::new_v7(),
            state: LoanApplicationState::PendingIdentity,
            merchant_id,
            requested_amount,
            user_input: UserInput::default(),
            user_input_events: vec![],
            final_decision: None,
            decision_events: vec![],
            selected_schedule_id: None,
        }
    }

    /// Copy with `update` merged into the accumulated user input and
    /// recorded on the event trail
    pub fn with_user_input(&self, update: UserInput) -> Result<Self, &'static str> {
        let merged = self.user_input.merged_with(&update)?;
        let mut user_input_events = self.user_input_events.clone();
        user_input_events.push(update);
        Ok(Self {
            user_input: merged,
            user_input_events,
            ..self.clone()
        })
    }

    /// Copy with `decision` recorded as the latest decision and the state
    /// advanced accordingly
    pub fn with_decision(&self, decision: Decision) -> Self {
        let state = state_after(&decision);
        let mut decision_events = self.decision_events.clone();
        decision_events.push(decision.clone());
        Self {
            state,
            final_decision: Some(decision),
            decision_events,
            ..self.clone()
        }
    }

    /// Copy marked confirmed with the selected schedule
    pub fn with_confirmation(&self, schedule_id: ScheduleId) -> Self {
        Self {
            state: LoanApplicationState::Confirmed,
            selected_schedule_id: Some(schedule_id),
            ..self.clone()
        }
    }
}

fn state_after(decision: &Decision) -> LoanApplicationState {
    match decision {
        Decision::IdentityApproved(_) => LoanApplicationState::PendingUnderwriting,
        Decision::Approved(_) => LoanApplicationState::Approved,
        Decision::Denied(_) => LoanApplicationState::Denied,
        Decision::Pending(pending) => match pending.state {
            PendingState::NeedsIncome => LoanApplicationState::PendingUnderwriting,
            PendingState::NeedsSsn
            | PendingState::WatchlistHit
            | PendingState::ExtendedFraudVictim => LoanApplicationState::PendingIdentity,
        },
    }
}
