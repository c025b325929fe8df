//! Test Utilities Crate
//!
//! Shared fixtures and builders for the loan origination test suite.
//!
//! # Modules
//!
//! - `fixtures`: identity submissions matching the sandbox bureau personas
//! - `builders`: builder for a fully wired origination service

pub mod builders;
pub mod fixtures;

pub use builders::*;
pub use fixtures::*;
