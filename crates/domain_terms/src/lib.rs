//! Loan terms domain
//!
//! Payment plans and the amortization schedule calculator. Everything here is
//! pure arithmetic over exact decimals; no I/O, no shared state.

pub mod plan;
pub mod schedule;

pub use plan::{PaymentFrequency, Plan, Schedule};
pub use schedule::compute_schedule;
