//! Amortization schedule calculation
//!
//! Pure arithmetic: a payment plan, a principal, and a start date go in; a
//! cent-exact schedule comes out. All money math uses exact base-10 decimals
//! so the schedule invariants hold to the cent.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use core_kernel::{Currency, Money};

use crate::plan::{PaymentFrequency, Plan, Schedule};

/// Computes the amortization schedule for a plan
///
/// # Panics
///
/// Panics on precondition violations: non-positive amount, non-USD currency,
/// a payment count outside `[1, 100)`, a non-zero APR, or a non-monthly
/// frequency. Callers validate user input upstream; reaching this function
/// with a bad plan is a programming error, not a recoverable condition.
pub fn compute_schedule(plan: &Plan, amount: Money, loan_start_date: NaiveDate) -> Schedule {
    assert!(amount.is_positive(), "loan amount must be positive");
    assert_eq!(
        amount.currency(),
        Currency::USD,
        "only USD loans are supported"
    );
    assert!(
        (1..100).contains(&plan.number_of_payments),
        "number of payments must be in [1, 100)"
    );
    assert_eq!(plan.apr, dec!(0), "interest-bearing loans are unsupported");
    assert_eq!(
        plan.payment_frequency,
        PaymentFrequency::Monthly,
        "only monthly plans are supported"
    );

    let principal_total = amount.amount();

    let (interest_total, first_payment_date) =
        total_interest_and_first_payment_date(plan.apr, loan_start_date);

    let payments_total = principal_total + interest_total;

    let (first_payment_amount, last_payment_amount) =
        payment_amounts(payments_total, plan.number_of_payments);

    Schedule {
        schedule_id: None,
        payment_frequency: plan.payment_frequency,
        number_of_payments: plan.number_of_payments,
        currency: amount.currency(),
        payment_amount: Money::new(first_payment_amount, amount.currency()),
        first_payment_amount: Money::new(first_payment_amount, amount.currency()),
        last_payment_amount: Money::new(last_payment_amount, amount.currency()),
        payments_total: Money::new(payments_total, amount.currency()),
        principal_total: Money::new(principal_total, amount.currency()),
        interest_total: Money::new(interest_total, amount.currency()),
        apr: plan.apr,
        loan_start_date,
        first_payment_date,
    }
}

/// Zero interest for now, plus the first payment date: one calendar month
/// after the start date, with the day clamped to 28 so billing never lands on
/// a day that some months lack (no February 30th).
fn total_interest_and_first_payment_date(
    apr: Decimal,
    loan_start_date: NaiveDate,
) -> (Decimal, NaiveDate) {
    assert_eq!(apr, dec!(0), "interest-bearing loans are unsupported");
    let interest_total = dec!(0);

    // bill only on the 1st through the 28th of the month
    let first_payment_day = if loan_start_date.day() >= 28 {
        28
    } else {
        loan_start_date.day()
    };

    let (first_payment_year, first_payment_month) = if loan_start_date.month() == 12 {
        (loan_start_date.year() + 1, 1)
    } else {
        (loan_start_date.year(), loan_start_date.month() + 1)
    };

    let first_payment_date =
        NaiveDate::from_ymd_opt(first_payment_year, first_payment_month, first_payment_day)
            .expect("a day of 28 or less is valid in every month");
    (interest_total, first_payment_date)
}

/// Splits the total into cent-exact payment amounts.
///
/// Strategy: round the total up by a few cents until it divides evenly into
/// `n` payments; every payment but the last is that even amount, and the last
/// payment gives the rounded cents back.
fn payment_amounts(payments_total: Decimal, number_of_payments: u32) -> (Decimal, Decimal) {
    // with only one payment, the first and last payments are equal
    if number_of_payments == 1 {
        return (payments_total, payments_total);
    }

    let n = Decimal::from(number_of_payments);

    // cents needed to round the total up to a multiple of n cents
    let cents_to_round = (n - (payments_total * dec!(100)) % n) % n;
    let rounded_total = payments_total + cents_to_round / dec!(100);
    let first_payment_amount = (rounded_total / n).round_dp(2);
    let last_payment_amount = first_payment_amount - cents_to_round / dec!(100);
    (first_payment_amount, last_payment_amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_amounts_even_split() {
        let (first, last) = payment_amounts(dec!(999.99), 3);
        assert_eq!(first, dec!(333.33));
        assert_eq!(last, dec!(333.33));
    }

    #[test]
    fn test_payment_amounts_last_absorbs_remainder() {
        let (first, last) = payment_amounts(dec!(1000.00), 3);
        assert_eq!(first, dec!(333.34));
        assert_eq!(last, dec!(333.32));
    }

    #[test]
    fn test_payment_amounts_single_payment() {
        let (first, last) = payment_amounts(dec!(250.00), 1);
        assert_eq!(first, dec!(250.00));
        assert_eq!(last, dec!(250.00));
    }

    #[test]
    fn test_first_payment_date_same_day_next_month() {
        let (_, date) =
            total_interest_and_first_payment_date(dec!(0), NaiveDate::from_ymd_opt(2020, 3, 14).unwrap());
        assert_eq!(date, NaiveDate::from_ymd_opt(2020, 4, 14).unwrap());
    }

    #[test]
    fn test_first_payment_date_clamps_to_28() {
        for day in [28, 29, 30, 31] {
            let (_, date) = total_interest_and_first_payment_date(
                dec!(0),
                NaiveDate::from_ymd_opt(2020, 1, day).unwrap(),
            );
            assert_eq!(date, NaiveDate::from_ymd_opt(2020, 2, 28).unwrap());
        }
    }

    #[test]
    fn test_first_payment_date_december_rolls_over() {
        let (_, date) =
            total_interest_and_first_payment_date(dec!(0), NaiveDate::from_ymd_opt(2020, 12, 5).unwrap());
        assert_eq!(date, NaiveDate::from_ymd_opt(2021, 1, 5).unwrap());
    }
}
