//! Core Kernel - Foundational types for the loan origination system
//!
//! This crate provides the fundamental building blocks used across all domain
//! modules:
//! - Money types with precise decimal arithmetic
//! - Strongly-typed identifiers
//! - The shared error type for port adapters

pub mod identifiers;
pub mod money;
pub mod ports;

pub use identifiers::{ApplicationId, MerchantId, ScheduleId};
pub use money::{Currency, Money, MoneyError};
pub use ports::PortError;
