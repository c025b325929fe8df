//! In-memory infrastructure
//!
//! Adapter implementations for the origination ports, backed by
//! `tokio::sync::RwLock`-guarded maps. These are the adapters the server
//! runs with today; a database-backed crate can replace them without
//! touching the domain layer.

pub mod application;
pub mod bureau;
pub mod merchant;
pub mod overrides;
pub mod terms;

pub use application::InMemoryApplicationStore;
pub use bureau::{LiveCreditBureau, SandboxCreditBureau};
pub use merchant::{InMemoryMerchantStore, seed_merchant};
pub use overrides::InMemoryOverrideStore;
pub use terms::InMemoryScheduleStore;
