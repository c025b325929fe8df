//! Ports and adapters infrastructure
//!
//! Each domain defines its own port traits (credit bureau, stores) and
//! depends only on this crate for the shared error type. Adapters in
//! `infra_mem` implement those traits; the orchestration service receives
//! them as injected handles, so there is no process-global state.

use thiserror::Error;

/// Error type for port operations
///
/// Provides a unified error type that all port implementations must use,
/// ensuring consistent error handling across adapters.
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound { entity_type: String, id: String },

    /// The operation conflicts with existing data
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// A validation error occurred
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Transport to the external system failed or is not available
    #[error("Transport error: {message}")]
    Transport { message: String },
}

impl PortError {
    pub fn not_found(entity_type: impl Into<String>, id: impl ToString) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        PortError::Conflict {
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        PortError::Transport {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PortError::not_found("LoanApplication", "app-123");
        assert_eq!(err.to_string(), "Not found: LoanApplication with id app-123");

        let err = PortError::transport("live bureau integration is not available");
        assert!(err.to_string().starts_with("Transport error"));
    }
}
