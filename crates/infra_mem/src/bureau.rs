//! Credit bureau adapters
//!
//! `SandboxCreditBureau` serves a fixed cast of personas for development
//! and testing. `LiveCreditBureau` is the placeholder for the real
//! integration and fails every pull until it is configured.

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use once_cell::sync::Lazy;
use tracing::debug;

use core_kernel::PortError;
use domain_application::CreditBureauPort;
use domain_underwriting::{
    Address, CreditBureau, CreditReport, CreditReportIdentityInfo, CreditReportPull,
    IdentityClaim, Watchlist,
};

struct Persona {
    report: CreditReport,
    /// Whether a last-four-digits search finds this file. Thin files need
    /// the full SSN.
    last4_searchable: bool,
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("persona dates are valid")
}

fn persona(
    full_name: &str,
    date_of_birth: NaiveDate,
    ssn: &str,
    fico_score: u16,
    region1_code: &str,
    city: &str,
) -> CreditReport {
    CreditReport {
        bureau: CreditBureau::Equitrax,
        pull_date: Utc::now().date_naive(),
        fico_score,
        identity_info: CreditReportIdentityInfo {
            full_name: full_name.to_string(),
            date_of_birth,
            ssn: ssn.to_string(),
            address: Address {
                street1: "1140 Broadway".to_string(),
                street2: None,
                city: city.to_string(),
                region1_code: region1_code.to_string(),
                postal_code: "10001".to_string(),
                country_code: "US".to_string(),
            },
        },
        watchlist_hits: vec![],
        frozen_message_en: None,
        extended_fraud_victim_message_en: None,
    }
}

static PERSONAS: Lazy<Vec<Persona>> = Lazy::new(|| {
    vec![
        // mid-band score, exercises the income path
        Persona {
            report: persona(
                "June Castellano",
                date(1962, 4, 9),
                "987-65-1111",
                575,
                "NY",
                "New York",
            ),
            last4_searchable: true,
        },
        // thin file, only found with the full SSN
        Persona {
            report: persona(
                "Theo Brandt",
                date(1988, 9, 21),
                "987-65-2222",
                803,
                "OH",
                "Columbus",
            ),
            last4_searchable: false,
        },
        Persona {
            report: CreditReport {
                frozen_message_en: Some(
                    "The consumer has placed a temporary security freeze on this file."
                        .to_string(),
                ),
                ..persona(
                    "Miriam Okafor",
                    date(1975, 1, 30),
                    "987-65-3333",
                    794,
                    "TX",
                    "Austin",
                )
            },
            last4_searchable: true,
        },
        Persona {
            report: CreditReport {
                watchlist_hits: vec![Watchlist::Ofac],
                ..persona(
                    "Dorian Vasquez",
                    date(1969, 7, 4),
                    "987-65-4444",
                    731,
                    "FL",
                    "Miami",
                )
            },
            last4_searchable: true,
        },
        Persona {
            report: CreditReport {
                extended_fraud_victim_message_en: Some(
                    "This consumer is an identity theft victim. Verify the applicant's \
                     identity by phone before extending credit."
                        .to_string(),
                ),
                ..persona(
                    "Priya Raman",
                    date(1991, 12, 2),
                    "987-65-5555",
                    768,
                    "WA",
                    "Seattle",
                )
            },
            last4_searchable: true,
        },
    ]
});

/// A bureau that answers pulls from the fixed persona cast. Any identity
/// outside the cast is a no-hit.
#[derive(Default)]
pub struct SandboxCreditBureau;

impl SandboxCreditBureau {
    pub fn new() -> Self {
        Self
    }

    fn find(claim: &IdentityClaim) -> Option<&'static CreditReport> {
        PERSONAS
            .iter()
            .find(|persona| match &claim.ssn {
                Some(ssn) => &persona.report.identity_info.ssn == ssn,
                None => {
                    persona.last4_searchable
                        && persona.report.identity_info.ssn_last4() == claim.ssn_last4
                }
            })
            .map(|persona| &persona.report)
    }
}

#[async_trait]
impl CreditBureauPort for SandboxCreditBureau {
    async fn pull_credit_report(
        &self,
        claim: &IdentityClaim,
    ) -> Result<CreditReportPull, PortError> {
        match Self::find(claim) {
            Some(report) => {
                debug!(ssn_last4 = %claim.ssn_last4, "sandbox pull hit");
                let raw_payload = serde_json::to_string(report)
                    .map_err(|err| PortError::transport(err.to_string()))?;
                Ok(CreditReportPull::hit(report.clone(), raw_payload))
            }
            None => {
                debug!(ssn_last4 = %claim.ssn_last4, "sandbox pull no-hit");
                Ok(CreditReportPull::no_hit("{\"status\":\"no_hit\"}"))
            }
        }
    }
}

/// The production bureau integration. Not wired up yet; every pull fails
/// loudly rather than silently falling back to sandbox data.
pub struct LiveCreditBureau;

#[async_trait]
impl CreditBureauPort for LiveCreditBureau {
    async fn pull_credit_report(
        &self,
        _claim: &IdentityClaim,
    ) -> Result<CreditReportPull, PortError> {
        Err(PortError::transport(
            "the live credit bureau integration is not configured",
        ))
    }
}
