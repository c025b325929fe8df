use core_kernel::{MerchantId, PortError, ScheduleId};
use thiserror::Error;

/// Errors surfaced by the origination workflow
#[derive(Debug, Error)]
pub enum OriginationError {
    #[error("loans are supported in USD only")]
    UnsupportedCurrency,

    #[error("unknown merchant: {0}")]
    UnknownMerchant(MerchantId),

    #[error("unknown schedule: {0}")]
    UnknownSchedule(ScheduleId),

    #[error("the {step} step requires the {field} field")]
    IncompleteInput {
        step: &'static str,
        field: &'static str,
    },

    #[error(transparent)]
    Port(#[from] PortError),
}

impl OriginationError {
    /// True when retrying the same request cannot succeed
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Port(PortError::Transport { .. }))
    }
}
