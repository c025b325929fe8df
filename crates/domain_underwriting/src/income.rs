//! Applicant-reported income

use serde::{Deserialize, Serialize};

use core_kernel::Money;

/// How often the applicant receives the stated amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeFrequency {
    Biweekly,
    Monthly,
    Annual,
}

/// Income as stated by the applicant. May be in any supported currency;
/// the credit policy annualizes it to USD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Income {
    pub amount: Money,
    pub frequency: IncomeFrequency,
}
