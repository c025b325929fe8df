//! Identity verification policy
//!
//! Pure checks that vet the applicant's identity against bureau data: a mix
//! of compliance enforcement (geography, minimum age, sanctions screening)
//! and internal risk mitigation (name/SSN/DOB cohesion, fraud alerts). The
//! applicant ends up approved (identity established), denied (identity
//! cannot be established), or pending (more information required).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::credit_report::{CreditReportPull, PullStatus};
use crate::decision::{
    Denial, DeniedReason, IdentityApproval, IdentityDecision, PendingReview, PendingState,
};

/// Identity fields as supplied by the applicant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityClaim {
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub address: Address,
    pub ssn_last4: String,
    /// Full SSN, collected only when the last four digits did not produce a
    /// bureau hit
    pub ssn: Option<String>,
}

/// Identity checks that can be manually cleared for a specific SSN
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverrideType {
    Watchlist,
    ExtendedFraudVictim,
}

/// Manual override flags resolved for the applicant's SSN
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverrideFlags {
    pub watchlist_cleared: bool,
    pub extended_victim_cleared: bool,
}

/// Resolves the minimum eligible age for credit products in the applicant's
/// jurisdiction.
pub fn minimum_age(address: &Address) -> i32 {
    assert_eq!(address.country_code, "US", "only US addresses are supported");

    // Alabama law requires applicants to be at least 19 for credit products
    if address.region1_code == "AL" {
        19
    } else {
        // federal default: 18 or older
        18
    }
}

/// Age in whole years as of `as_of_date`, by exact month/day comparison.
fn compute_age(date_of_birth: NaiveDate, as_of_date: NaiveDate) -> i32 {
    assert!(as_of_date >= date_of_birth, "DOBs in the future disallowed");
    let years = as_of_date.year() - date_of_birth.year();
    let birthday_passed = date_of_birth.month() < as_of_date.month()
        || (date_of_birth.month() == as_of_date.month()
            && date_of_birth.day() <= as_of_date.day());
    if birthday_passed {
        years
    } else {
        years - 1
    }
}

/// Evaluates the identity policy. Rules run in a fixed order and the first
/// match wins.
///
/// This is a pure function: the current date, the bureau pull, and the
/// manual override flags are all fetched by the orchestrator and passed in.
pub fn policy(
    as_of_date: NaiveDate,
    claim: &IdentityClaim,
    credit_report_pull: Option<&CreditReportPull>,
    overrides: OverrideFlags,
) -> IdentityDecision {
    // loans are only available in the US (for now)
    if claim.address.country_code != "US" {
        return IdentityDecision::Denied(Denial::new(DeniedReason::Geography));
    }

    // minimum age requirement for the applicant's jurisdiction
    let age = compute_age(claim.date_of_birth, as_of_date);
    if age < minimum_age(&claim.address) {
        return IdentityDecision::Denied(Denial::new(DeniedReason::TooYoung));
    }

    // ensure we have a credit report. if there is none and the applicant has
    // not supplied a full SSN yet, ask for it; with a full SSN and still no
    // report, identity cannot be established
    let missing_report = !matches!(credit_report_pull, Some(pull) if pull.status == PullStatus::Hit);
    if missing_report {
        return if claim.ssn.is_none() {
            IdentityDecision::Pending(PendingReview::new(PendingState::NeedsSsn))
        } else {
            IdentityDecision::Denied(Denial::new(DeniedReason::IdentityNotFound))
        };
    }
    let pull = credit_report_pull.expect("a hit pull is present past the missing-report check");
    let report = pull
        .report()
        .expect("a hit pull always carries a credit report");

    // a short-term freeze on the file blocks the application
    if let Some(freeze_message) = &report.frozen_message_en {
        return IdentityDecision::Denied(Denial::with_message(
            DeniedReason::CreditReportFrozen,
            freeze_message.clone(),
        ));
    }

    // supplied name must match the report. strict case-insensitive match
    // (Unicode, names are not ASCII); conversion could be improved by
    // tolerating typos
    if claim.full_name.to_lowercase() != report.identity_info.full_name.to_lowercase() {
        return IdentityDecision::Denied(Denial::new(DeniedReason::IdentityMismatch));
    }

    // SSN cohesion: a full SSN must match exactly; otherwise the last four
    // digits are sufficient
    let ssn_matches = match &claim.ssn {
        Some(ssn) => ssn == &report.identity_info.ssn,
        None => claim.ssn_last4 == report.identity_info.ssn_last4(),
    };
    if !ssn_matches {
        return IdentityDecision::Denied(Denial::new(DeniedReason::IdentityMismatch));
    }

    // date of birth must match the report exactly
    if claim.date_of_birth != report.identity_info.date_of_birth {
        return IdentityDecision::Denied(Denial::new(DeniedReason::IdentityMismatch));
    }

    // sanctions screening (e.g. OFAC, OSFI). a manual review can clear a
    // spurious hit; until then the applicant must call in
    if !report.watchlist_hits.is_empty() && !overrides.watchlist_cleared {
        return IdentityDecision::Pending(PendingReview::new(PendingState::WatchlistHit));
    }

    // long-term identity-theft victim alert: the applicant must call in to
    // confirm it is really them, after which the check is manually cleared
    if !overrides.extended_victim_cleared {
        if let Some(victim_message) = &report.extended_fraud_victim_message_en {
            return IdentityDecision::Pending(PendingReview::with_message(
                PendingState::ExtendedFraudVictim,
                victim_message.clone(),
            ));
        }
    }

    // identity established. redact the raw bureau payload before the pull is
    // persisted with the application
    IdentityDecision::Approved(IdentityApproval {
        credit_report_pull: pull.redacted(),
    })
}
