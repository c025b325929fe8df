//! Payment plan and schedule value types

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money, ScheduleId};

/// How often payments are due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentFrequency {
    /// Every two weeks
    Biweekly,
    /// Once a calendar month
    Monthly,
}

/// A repayment plan a customer can be approved for
///
/// Only zero-APR monthly plans are produced today; the other fields exist so
/// that approvals can carry richer products later without a model change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Payment cadence
    pub payment_frequency: PaymentFrequency,
    /// Number of payments that fully repay the loan
    pub number_of_payments: u32,
    /// Annual percentage rate, as a decimal percentage (0.000 = no interest)
    pub apr: Decimal,
}

/// A concrete amortization schedule: the payment amounts and dates that
/// fully repay a loan's principal and interest
///
/// Invariants (maintained by [`crate::schedule::compute_schedule`]):
/// - `payments_total = principal_total + interest_total`
/// - `first_payment_amount × (n − 1) + last_payment_amount = payments_total`
///   when `n > 1`; otherwise first = last = total
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Identifier, assigned when the schedule is persisted
    pub schedule_id: Option<ScheduleId>,
    /// Payment cadence
    pub payment_frequency: PaymentFrequency,
    /// Number of payments
    pub number_of_payments: u32,
    /// Currency for every amount below
    pub currency: Currency,
    /// Recurring payment amount (equals `first_payment_amount`)
    pub payment_amount: Money,
    /// Amount of every payment except the last
    pub first_payment_amount: Money,
    /// Final payment, which absorbs the rounding remainder
    pub last_payment_amount: Money,
    /// Sum of all payments
    pub payments_total: Money,
    /// Principal portion of the total
    pub principal_total: Money,
    /// Interest portion of the total
    pub interest_total: Money,
    /// Annual percentage rate of the underlying plan
    pub apr: Decimal,
    /// Date the loan starts
    pub loan_start_date: NaiveDate,
    /// Date the first payment is due
    pub first_payment_date: NaiveDate,
}

impl Schedule {
    /// Returns a copy carrying the identifier assigned at persistence time
    pub fn with_id(&self, id: ScheduleId) -> Self {
        Self {
            schedule_id: Some(id),
            ..self.clone()
        }
    }
}
