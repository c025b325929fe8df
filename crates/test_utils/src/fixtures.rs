//! Identity fixtures matching the sandbox bureau personas
//!
//! Each submission matches the corresponding persona's credit file exactly,
//! so identity verification succeeds unless a test tampers with a field.

use chrono::NaiveDate;

use domain_application::IdentitySubmission;
use domain_underwriting::Address;

/// Full SSNs for the sandbox personas, for the full-SSN step
pub mod ssn {
    pub const JUNE_CASTELLANO: &str = "987-65-1111";
    pub const THEO_BRANDT: &str = "987-65-2222";
    pub const MIRIAM_OKAFOR: &str = "987-65-3333";
    pub const DORIAN_VASQUEZ: &str = "987-65-4444";
    pub const PRIYA_RAMAN: &str = "987-65-5555";
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("fixture dates are valid")
}

pub fn address(city: &str, region1_code: &str) -> Address {
    Address {
        street1: "1140 Broadway".to_string(),
        street2: None,
        city: city.to_string(),
        region1_code: region1_code.to_string(),
        postal_code: "10001".to_string(),
        country_code: "US".to_string(),
    }
}

/// Mid-band score (575); exercises the income path for amounts over $1,000
pub fn june_castellano() -> IdentitySubmission {
    IdentitySubmission {
        full_name: "June Castellano".to_string(),
        date_of_birth: date(1962, 4, 9),
        address: address("New York", "NY"),
        ssn_last4: "1111".to_string(),
    }
}

/// Prime score (803) on a thin file; only found with the full SSN
pub fn theo_brandt() -> IdentitySubmission {
    IdentitySubmission {
        full_name: "Theo Brandt".to_string(),
        date_of_birth: date(1988, 9, 21),
        address: address("Columbus", "OH"),
        ssn_last4: "2222".to_string(),
    }
}

/// Frozen credit file
pub fn miriam_okafor() -> IdentitySubmission {
    IdentitySubmission {
        full_name: "Miriam Okafor".to_string(),
        date_of_birth: date(1975, 1, 30),
        address: address("Austin", "TX"),
        ssn_last4: "3333".to_string(),
    }
}

/// OFAC watchlist hit; the seeded override store has cleared it
pub fn dorian_vasquez() -> IdentitySubmission {
    IdentitySubmission {
        full_name: "Dorian Vasquez".to_string(),
        date_of_birth: date(1969, 7, 4),
        address: address("Miami", "FL"),
        ssn_last4: "4444".to_string(),
    }
}

/// Extended fraud victim alert on file
pub fn priya_raman() -> IdentitySubmission {
    IdentitySubmission {
        full_name: "Priya Raman".to_string(),
        date_of_birth: date(1991, 12, 2),
        address: address("Seattle", "WA"),
        ssn_last4: "5555".to_string(),
    }
}
