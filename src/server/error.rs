//! API error type for the control server.
//!
//! Every variant maps to a fixed, generic message. Computation detail is logged
//! server-side and never reaches the caller.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::gnc::SteeringError;
use crate::io::json::{ErrorBody, RequestError};

#[derive(Debug, Error)]
pub enum ApiError {
    /// Body missing or unreadable (400)
    #[error("malformed request")]
    Malformed,

    /// Required field missing or mistyped (400)
    #[error("incomplete request")]
    Incomplete,

    /// Body decoded as JSON but not into the request schema (500)
    #[error("request decoding failed: {detail}")]
    InvalidRequest { detail: String },

    /// Agent table is full (503)
    #[error("agent capacity exhausted ({limit} agents)")]
    CapacityExhausted { limit: usize },

    /// Fault inside the steering pipeline (500)
    #[error("steering computation failed for agent {agent_id}: {source}")]
    Computation {
        agent_id: String,
        #[source]
        source: SteeringError,
    },
}

impl From<RequestError> for ApiError {
    fn from(e: RequestError) -> Self {
        match e {
            RequestError::Malformed => ApiError::Malformed,
            RequestError::Incomplete => ApiError::Incomplete,
            RequestError::Invalid(detail) => ApiError::InvalidRequest { detail },
        }
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Malformed | Self::Incomplete => StatusCode::BAD_REQUEST,
            Self::CapacityExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::InvalidRequest { .. } | Self::Computation { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message returned to the caller.
    pub fn public_message(&self) -> &'static str {
        match self {
            Self::Malformed => "No data received",
            Self::Incomplete => "Incomplete data provided",
            Self::CapacityExhausted { .. } => "Agent capacity exhausted",
            Self::InvalidRequest { .. } | Self::Computation { .. } => "Internal Server Error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Computation { source, .. } => {
                tracing::error!(error = %self, cause = ?source, "error in /get_controls");
            }
            ApiError::InvalidRequest { .. } => {
                tracing::error!(error = %self, "error in /get_controls");
            }
            _ => {
                tracing::warn!(error = %self, "rejected request");
            }
        }

        let body = ErrorBody { error: self.public_message().to_string() };
        (self.status_code(), Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
