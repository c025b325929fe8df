//! Decision sum types
//!
//! Policy outcomes are first-class values, never errors. The identity and
//! credit policies each return their own closed result type so that every
//! consumption site matches exhaustively; `Decision` is the union stored on
//! the application's audit trail.

use serde::{Deserialize, Serialize};

use core_kernel::Money;
use domain_terms::Plan;

use crate::credit_report::CreditReportPull;

/// Machine-readable reasons an application is denied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeniedReason {
    Geography,
    TooYoung,
    IdentityNotFound,
    CreditReportFrozen,
    IdentityMismatch,
    InsufficientCredit,
    AmountOverMax,
    AmountUnderMin,
}

/// Machine-readable states a pending application can be in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PendingState {
    NeedsSsn,
    NeedsIncome,
    WatchlistHit,
    ExtendedFraudVictim,
}

/// A terminal denial, optionally carrying a human-readable message
/// (e.g. the bureau's freeze notice)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Denial {
    pub reason: DeniedReason,
    pub message: Option<String>,
}

impl Denial {
    pub fn new(reason: DeniedReason) -> Self {
        Self {
            reason,
            message: None,
        }
    }

    pub fn with_message(reason: DeniedReason, message: impl Into<String>) -> Self {
        Self {
            reason,
            message: Some(message.into()),
        }
    }
}

/// A non-terminal hold: the application needs more input or manual review
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingReview {
    pub state: PendingState,
    pub message: Option<String>,
}

impl PendingReview {
    pub fn new(state: PendingState) -> Self {
        Self {
            state,
            message: None,
        }
    }

    pub fn with_message(state: PendingState, message: impl Into<String>) -> Self {
        Self {
            state,
            message: Some(message.into()),
        }
    }
}

/// Payload of a successful identity check: the pull that established the
/// identity, with its raw payload redacted for storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityApproval {
    pub credit_report_pull: CreditReportPull,
}

/// Payload of a credit approval
///
/// `approved_plans` may be empty: small mid-band approvals defer product
/// term selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditApproval {
    pub amount: Money,
    pub approved_plans: Vec<Plan>,
}

/// Outcome of the identity policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum IdentityDecision {
    Approved(IdentityApproval),
    Denied(Denial),
    Pending(PendingReview),
}

/// Outcome of the credit policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CreditDecision {
    Approved(CreditApproval),
    Denied(Denial),
    Pending(PendingReview),
}

/// Union of every decision the workflow can produce, as persisted on the
/// application's decision event trail
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Decision {
    IdentityApproved(IdentityApproval),
    Approved(CreditApproval),
    Denied(Denial),
    Pending(PendingReview),
}

impl From<IdentityDecision> for Decision {
    fn from(decision: IdentityDecision) -> Self {
        match decision {
            IdentityDecision::Approved(approval) => Decision::IdentityApproved(approval),
            IdentityDecision::Denied(denial) => Decision::Denied(denial),
            IdentityDecision::Pending(pending) => Decision::Pending(pending),
        }
    }
}

impl From<CreditDecision> for Decision {
    fn from(decision: CreditDecision) -> Self {
        match decision {
            CreditDecision::Approved(approval) => Decision::Approved(approval),
            CreditDecision::Denied(denial) => Decision::Denied(denial),
            CreditDecision::Pending(pending) => Decision::Pending(pending),
        }
    }
}
