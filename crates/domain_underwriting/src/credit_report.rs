//! Credit bureau report model
//!
//! Structured form of a bureau pull. The fetch/parse adapter lives in
//! `infra_mem`; the policies only ever see these denormalized values.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::address::Address;

/// Credit bureaus the system can pull from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditBureau {
    Equitrax,
}

/// Whether a pull matched a credit file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PullStatus {
    Hit,
    NoHit,
}

/// Government screening lists a report can match against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Watchlist {
    /// US Office of Foreign Assets Control sanctions list
    Ofac,
    /// Canadian OSFI consolidated list
    Osfi,
}

/// Identity fields as recorded by the bureau
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditReportIdentityInfo {
    pub full_name: String,
    pub date_of_birth: NaiveDate,
    pub ssn: String,
    pub address: Address,
}

impl CreditReportIdentityInfo {
    /// Last four characters of the SSN on file, or the whole SSN when it is
    /// shorter than four characters (a malformed bureau value must not panic)
    pub fn ssn_last4(&self) -> &str {
        let start = self
            .ssn
            .char_indices()
            .rev()
            .nth(3)
            .map_or(0, |(idx, _)| idx);
        &self.ssn[start..]
    }
}

/// A denormalized credit report
///
/// The freeze and extended-fraud-victim alerts are modeled as optional
/// messages: `Some` means the flag is set, so a message can never exist
/// without its flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditReport {
    pub bureau: CreditBureau,
    pub pull_date: NaiveDate,
    pub fico_score: u16,
    pub identity_info: CreditReportIdentityInfo,
    /// Watchlist matches, possibly empty
    pub watchlist_hits: Vec<Watchlist>,
    /// Present iff the consumer has placed a short-term freeze on the file
    pub frozen_message_en: Option<String>,
    /// Present iff the file carries a long-duration identity-theft alert
    pub extended_fraud_victim_message_en: Option<String>,
}

impl CreditReport {
    pub fn is_frozen(&self) -> bool {
        self.frozen_message_en.is_some()
    }

    pub fn has_extended_fraud_alert(&self) -> bool {
        self.extended_fraud_victim_message_en.is_some()
    }
}

/// The result of a bureau pull: a report when the pull hit, plus the raw
/// source payload for audit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditReportPull {
    pub status: PullStatus,
    /// Absent iff `status` is `NoHit`
    pub credit_report: Option<CreditReport>,
    pub raw_payload: String,
}

impl CreditReportPull {
    /// A pull that matched a credit file
    pub fn hit(credit_report: CreditReport, raw_payload: impl Into<String>) -> Self {
        Self {
            status: PullStatus::Hit,
            credit_report: Some(credit_report),
            raw_payload: raw_payload.into(),
        }
    }

    /// A pull that found no matching file
    pub fn no_hit(raw_payload: impl Into<String>) -> Self {
        Self {
            status: PullStatus::NoHit,
            credit_report: None,
            raw_payload: raw_payload.into(),
        }
    }

    pub fn report(&self) -> Option<&CreditReport> {
        self.credit_report.as_ref()
    }

    /// Copy with the raw source payload cleared, for storage hygiene
    pub fn redacted(&self) -> Self {
        Self {
            raw_payload: String::new(),
            ..self.clone()
        }
    }
}
