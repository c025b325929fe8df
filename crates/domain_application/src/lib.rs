//! Loan application domain
//!
//! The application record (an immutable value, copied on every transition),
//! the port traits the workflow depends on, and the origination service that
//! sequences identity verification, credit underwriting, and schedule
//! generation across them.

pub mod application;
pub mod error;
pub mod ports;
pub mod service;

pub use application::{LoanApplication, LoanApplicationState, UserInput};
pub use error::OriginationError;
pub use ports::{
    ApplicationStore, CreditBureauPort, MerchantConfiguration, MerchantStore, OverrideStore,
    ScheduleStore,
};
pub use service::{
    Confirmation, Declination, IdentitySubmission, NextStep, OriginationService, StepOutcome,
};
