//! Credit underwriting policy
//!
//! Inputs the requested amount, the applicant's credit report, address, and
//! (optionally) income, all fetched upstream, so the decision is a pure
//! function over its arguments.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Currency, Money};
use domain_terms::{PaymentFrequency, Plan};

use crate::address::Address;
use crate::credit_report::CreditReportPull;
use crate::decision::{
    CreditApproval, CreditDecision, Denial, DeniedReason, PendingReview, PendingState,
};
use crate::income::{Income, IncomeFrequency};

const MAX_LOAN_AMOUNT: Decimal = dec!(10000.00);
const MIN_LOAN_AMOUNT: Decimal = dec!(100.00);

/// Credit score floor below which applications are declined outright
const MIN_FICO_SCORE: u16 = 575;
/// Credit score at which applications are approved without income checks
const PRIME_FICO_SCORE: u16 = 720;

/// Annualized USD income required for mid-band approvals over $1,000
const INCOME_THRESHOLD: Decimal = dec!(50000.00);

/// The only product currently offered: three monthly payments, no interest
pub fn standard_plan() -> Plan {
    Plan {
        payment_frequency: PaymentFrequency::Monthly,
        number_of_payments: 3,
        apr: dec!(0.000),
    }
}

/// Point-in-time conversion rates to USD, snapshotted March 13, 2020.
// TODO: integrate a rates provider so these refresh automatically
fn conversion_to_usd(currency: Currency) -> Decimal {
    match currency {
        Currency::USD => dec!(1.0),
        Currency::CAD => dec!(0.72),
        Currency::GBP => dec!(1.23),
        Currency::EUR => dec!(1.11),
    }
}

/// Paychecks per year for each income frequency
fn annual_multiplier(frequency: IncomeFrequency) -> Decimal {
    match frequency {
        IncomeFrequency::Biweekly => dec!(26),
        IncomeFrequency::Monthly => dec!(12),
        IncomeFrequency::Annual => dec!(1),
    }
}

/// Converts applicant-stated income to an annualized USD amount
fn annualized_income_usd(income: &Income) -> Decimal {
    income.amount.amount()
        * conversion_to_usd(income.amount.currency())
        * annual_multiplier(income.frequency)
}

/// Evaluates the credit policy. Rules run in a fixed order and the first
/// match wins.
///
/// # Panics
///
/// Panics if the requested amount is not USD or the pull carries no report;
/// both are guaranteed upstream (currency validation at the boundary,
/// identity approval before underwriting), so hitting either here is a
/// programming error.
pub fn decide(
    requested_amount: Money,
    credit_report_pull: &CreditReportPull,
    address: &Address,
    income: Option<&Income>,
) -> CreditDecision {
    assert_eq!(
        requested_amount.currency(),
        Currency::USD,
        "only USD loans are supported"
    );
    let report = credit_report_pull
        .report()
        .expect("credit underwriting requires a bureau hit");

    // state-specific regulation: loans are not available in West Virginia
    // and Iowa
    if matches!(address.region1_code.as_str(), "WV" | "IA") {
        return CreditDecision::Denied(Denial::new(DeniedReason::Geography));
    }

    // amount limits: more than $10,000 or $100 and under is not offered
    let amount = requested_amount.amount();
    if amount > MAX_LOAN_AMOUNT {
        return CreditDecision::Denied(Denial::new(DeniedReason::AmountOverMax));
    }
    if amount <= MIN_LOAN_AMOUNT {
        return CreditDecision::Denied(Denial::new(DeniedReason::AmountUnderMin));
    }

    // below the score floor the risk is too high without a richer model
    if report.fico_score < MIN_FICO_SCORE {
        return CreditDecision::Denied(Denial::new(DeniedReason::InsufficientCredit));
    }

    // prime scores are approved with no further inputs
    if report.fico_score >= PRIME_FICO_SCORE {
        return CreditDecision::Approved(CreditApproval {
            amount: requested_amount,
            approved_plans: vec![standard_plan()],
        });
    }

    // mid-band scores: small amounts are approved with term selection
    // deferred; larger amounts require annualized income over the threshold
    if amount < dec!(1000.00) {
        CreditDecision::Approved(CreditApproval {
            amount: requested_amount,
            approved_plans: vec![],
        })
    } else if let Some(income) = income {
        if annualized_income_usd(income) > INCOME_THRESHOLD {
            CreditDecision::Approved(CreditApproval {
                amount: requested_amount,
                approved_plans: vec![standard_plan()],
            })
        } else {
            CreditDecision::Denied(Denial::new(DeniedReason::InsufficientCredit))
        }
    } else {
        CreditDecision::Pending(PendingReview::new(PendingState::NeedsIncome))
    }
}
