//! Postal address value type

use serde::{Deserialize, Serialize};

/// A postal address as supplied by the applicant or recorded by a bureau.
/// Immutable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// First street line
    pub street1: String,
    /// Second street line (apartment, suite)
    pub street2: Option<String>,
    /// City
    pub city: String,
    /// Top-level region code, e.g. a US state code like "NY"
    pub region1_code: String,
    /// Postal code
    pub postal_code: String,
    /// ISO 3166-1 alpha-2 country code
    pub country_code: String,
}
