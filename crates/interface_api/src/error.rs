//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use core_kernel::PortError;
use domain_application::OriginationError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {message}")]
    BadRequest {
        /// The offending request field, when one can be named
        field: Option<&'static str>,
        message: String,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Upstream failure: {0}")]
    Upstream(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(field: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            field: Some(field),
            message: message.into(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<&'static str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, field, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", None, msg),
            ApiError::BadRequest { field, message } => {
                (StatusCode::BAD_REQUEST, "bad_request", field, message)
            }
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", None, msg),
            ApiError::Upstream(msg) => (StatusCode::BAD_GATEWAY, "upstream_error", None, msg),
            ApiError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None, msg)
            }
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            field,
        };

        (status, Json(body)).into_response()
    }
}

impl From<OriginationError> for ApiError {
    fn from(err: OriginationError) -> Self {
        match err {
            OriginationError::UnsupportedCurrency => {
                ApiError::bad_request("currency", err.to_string())
            }
            OriginationError::UnknownMerchant(_) => {
                ApiError::bad_request("merchant_id", err.to_string())
            }
            OriginationError::UnknownSchedule(_) => {
                ApiError::bad_request("schedule_id", err.to_string())
            }
            OriginationError::IncompleteInput { field, .. } => ApiError::BadRequest {
                field: Some(field),
                message: err.to_string(),
            },
            OriginationError::Port(port_err) => match port_err {
                PortError::NotFound { .. } => ApiError::NotFound(port_err.to_string()),
                PortError::Conflict { .. } => ApiError::Conflict(port_err.to_string()),
                PortError::Validation { .. } => ApiError::BadRequest {
                    field: None,
                    message: port_err.to_string(),
                },
                PortError::Transport { .. } => ApiError::Upstream(port_err.to_string()),
            },
        }
    }
}
