use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http_client::{HttpResponse, TransportError};

/// Error code the holdings endpoint uses for an account without holdings.
pub const NO_HOLDINGS_CODE: &str = "DH-1111";

/// Structured error body returned by the service on failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    #[serde(rename = "errorType", default)]
    pub kind: String,
    #[serde(rename = "errorCode", default)]
    pub code: String,
    #[serde(rename = "errorMessage", default)]
    pub message: String,
}

impl Display for ErrorPayload {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code: {}", self.message, self.code)?;
        if !self.kind.is_empty() {
            write!(f, ", type: {}", self.kind)?;
        }
        f.write_str(")")
    }
}

/// Local validation failures, raised before any network call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} must be an absolute http(s) url: '{value}'")]
    InvalidUrl { field: &'static str, value: String },

    #[error("{0} is not configured")]
    MissingCredential(&'static str),

    #[error("{0} must not be empty")]
    EmptyField(&'static str),

    #[error("market data request must include at least one security")]
    EmptyMarketInput,

    #[error("unknown {kind} '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("date must be formatted YYYY-MM-DD: '{value}'")]
    InvalidDate { value: String },

    #[error("from date {from} is after to date {to}")]
    InvertedDateRange { from: String, to: String },

    #[error("quantity must be greater than zero")]
    ZeroQuantity,

    #[error("field '{field}' must be finite and non-negative")]
    InvalidPrice { field: &'static str },
}

/// Top-level error type for client operations.
#[derive(Debug, Error)]
pub enum DhanError {
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("api error (status {status}): {payload}")]
    Remote { status: u16, payload: ErrorPayload },

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{0} is not supported by this client")]
    Unsupported(&'static str),
}

impl DhanError {
    /// Builds the error for a non-2xx response, preferring the structured
    /// payload when the body carries one.
    pub fn from_response(response: &HttpResponse) -> Self {
        match response.error_payload() {
            Some(payload) if !payload.code.is_empty() || !payload.message.is_empty() => {
                Self::Remote {
                    status: response.status,
                    payload,
                }
            }
            _ => Self::Status {
                status: response.status,
                body: response.text(),
            },
        }
    }

    pub fn payload(&self) -> Option<&ErrorPayload> {
        match self {
            Self::Remote { payload, .. } => Some(payload),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Remote { status, .. } | Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.payload().is_some_and(|payload| payload.code == code)
    }
}
