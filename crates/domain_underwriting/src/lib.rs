//! Underwriting domain
//!
//! The decision engine for consumer loan applications: the identity policy,
//! the credit policy, and the value types they evaluate (addresses, bureau
//! reports, income, decisions). Both policies are pure functions; fetching
//! the data they consume is the orchestrator's job.

pub mod address;
pub mod credit;
pub mod credit_report;
pub mod decision;
pub mod identity;
pub mod income;

pub use address::Address;
pub use credit_report::{
    CreditBureau, CreditReport, CreditReportIdentityInfo, CreditReportPull, PullStatus, Watchlist,
};
pub use decision::{
    CreditApproval, CreditDecision, Decision, Denial, DeniedReason, IdentityApproval,
    IdentityDecision, PendingReview, PendingState,
};
pub use identity::{IdentityClaim, OverrideFlags, OverrideType};
pub use income::{Income, IncomeFrequency};
