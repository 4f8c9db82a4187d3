//! # Response Envelope
//!
//! Every query answers with `{ok, data, error}`. The credentials-rejected
//! signal is reserved: it always carries status 401 and a fixed message,
//! so callers can distinguish "log the user out" from ordinary failures.

use land_ledger::{DataCodecError, LedgerError};
use land_store::StoreError;
use land_types::CoordinateError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const UNAUTHORIZED_STATUS: u16 = 401;
pub const UNAUTHORIZED_MESSAGE: &str = "Server rejected credentials. Logging out";

/// Why a query failed.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum QueryError {
    /// The backing service rejected the caller's credentials.
    #[error("{UNAUTHORIZED_MESSAGE}")]
    Unauthorized,

    /// The requested cell lies outside the valid-bounds rectangle.
    #[error("Coords ({x}, {y}) are outside of the valid bounds")]
    OutOfBounds { x: i64, y: i64 },

    /// Anything else: the message passes through, with an optional
    /// detail payload.
    #[error("{message}")]
    Failed {
        message: String,
        data: Option<serde_json::Value>,
    },
}

impl QueryError {
    pub fn failed(message: impl Into<String>) -> Self {
        QueryError::Failed {
            message: message.into(),
            data: None,
        }
    }
}

impl From<CoordinateError> for QueryError {
    fn from(error: CoordinateError) -> Self {
        QueryError::failed(error.to_string())
    }
}

impl From<LedgerError> for QueryError {
    fn from(error: LedgerError) -> Self {
        QueryError::failed(error.message)
    }
}

impl From<StoreError> for QueryError {
    fn from(error: StoreError) -> Self {
        QueryError::failed(error.to_string())
    }
}

impl From<DataCodecError> for QueryError {
    fn from(error: DataCodecError) -> Self {
        QueryError::failed(error.to_string())
    }
}

/// The error half of the envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl From<QueryError> for EnvelopeError {
    fn from(error: QueryError) -> Self {
        match error {
            QueryError::Unauthorized => EnvelopeError {
                status: Some(UNAUTHORIZED_STATUS),
                message: UNAUTHORIZED_MESSAGE.to_string(),
                data: None,
            },
            QueryError::OutOfBounds { .. } => EnvelopeError {
                status: None,
                message: error.to_string(),
                data: None,
            },
            QueryError::Failed { message, data } => EnvelopeError {
                status: None,
                message,
                data,
            },
        }
    }
}

/// The response shape of every query operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope<T> {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<EnvelopeError>,
}

impl<T> ResponseEnvelope<T> {
    pub fn success(data: T) -> Self {
        ResponseEnvelope {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: QueryError) -> Self {
        ResponseEnvelope {
            ok: false,
            data: None,
            error: Some(error.into()),
        }
    }

    /// Whether the caller's credentials were rejected and a logout is due.
    pub fn is_unauthorized(&self) -> bool {
        matches!(&self.error, Some(error) if error.status == Some(UNAUTHORIZED_STATUS))
    }
}

impl<T> From<Result<T, QueryError>> for ResponseEnvelope<T> {
    fn from(result: Result<T, QueryError>) -> Self {
        match result {
            Ok(data) => ResponseEnvelope::success(data),
            Err(error) => ResponseEnvelope::failure(error),
        }
    }
}
