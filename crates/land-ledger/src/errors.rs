//! Ledger failure types and classification.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Phrase signers embed in the rejection raised when the credential holder
/// declines to sign.
pub const USER_DENIED_PHRASE: &str = "User denied transaction signature";

/// Fixed user-facing message for a declined signature.
pub const USER_REJECTED_MESSAGE: &str = "Transaction rejected";

/// A ledger call failed. Carries the raw message from the node or signer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct LedgerError {
    pub message: String,
}

impl LedgerError {
    pub fn new(message: impl Into<String>) -> Self {
        LedgerError {
            message: message.into(),
        }
    }
}

/// Classified terminal failure of a mutating ledger operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LedgerFailure {
    /// The credential holder declined to sign.
    UserRejected,
    /// Anything else; the raw message passes through verbatim.
    Other(String),
}

impl LedgerFailure {
    pub fn classify(error: &LedgerError) -> Self {
        if error.message.contains(USER_DENIED_PHRASE) {
            LedgerFailure::UserRejected
        } else {
            LedgerFailure::Other(error.message.clone())
        }
    }

    /// The message surfaced to callers.
    pub fn message(&self) -> &str {
        match self {
            LedgerFailure::UserRejected => USER_REJECTED_MESSAGE,
            LedgerFailure::Other(message) => message,
        }
    }
}
