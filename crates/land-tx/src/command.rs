//! Command lifecycle records.

use land_ledger::LedgerFailure;
use land_types::{Address, LandData, Parcel, Transfer, TxHash};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What kind of mutating operation a command drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandKind {
    EditData,
    Transfer,
    Approve,
    Authorize,
    ConnectWallet,
}

/// What a command targets.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandTarget {
    Parcel { x: i64, y: i64 },
    Address(Address),
    Wallet,
}

/// Lifecycle status. Terminal states have no further transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandStatus {
    Requested,
    Submitted,
    Confirmed,
    Failed,
}

impl CommandStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, CommandStatus::Confirmed | CommandStatus::Failed)
    }
}

/// Result payload of a confirmed command.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum CommandOutcome {
    Edited { hash: TxHash, parcel: Parcel },
    Transferred(Transfer),
    Approved { hash: TxHash, amount: u64 },
    Authorized { hash: TxHash, authorized: bool },
    WalletConnected(crate::state::WalletSnapshot),
}

/// Transfer preconditions, checked before any ledger call is made.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransferValidationError {
    #[error("You can't transfer parcels to yourself")]
    SelfTransfer,
    #[error("Invalid ledger address")]
    InvalidAddress,
    #[error("No connected wallet address")]
    MissingOwner,
}

/// Why a command reached `Failed`.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandFailure {
    /// Rejected locally, before any external call.
    #[error("{0}")]
    Validation(TransferValidationError),
    /// The ledger call failed; message already classified.
    #[error("{}", .0.message())]
    Ledger(LedgerFailure),
}

impl CommandFailure {
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// The lifecycle record for one mutating ledger operation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LandCommand {
    pub kind: CommandKind,
    pub target: CommandTarget,
    pub status: CommandStatus,
    pub outcome: Option<CommandOutcome>,
    pub failure: Option<CommandFailure>,
    /// For failed parcel commands: the affected parcel resolved from
    /// current local state, for error context.
    pub context: Option<Parcel>,
    /// A newer latest-wins command was issued while this one was in
    /// flight; its effects were not applied to local state.
    pub superseded: bool,
}

impl LandCommand {
    pub fn requested(kind: CommandKind, target: CommandTarget) -> Self {
        LandCommand {
            kind,
            target,
            status: CommandStatus::Requested,
            outcome: None,
            failure: None,
            context: None,
            superseded: false,
        }
    }

    pub(crate) fn submitted(mut self) -> Self {
        debug_assert!(!self.status.is_terminal());
        self.status = CommandStatus::Submitted;
        self
    }

    pub(crate) fn confirmed(mut self, outcome: CommandOutcome) -> Self {
        debug_assert!(!self.status.is_terminal());
        self.status = CommandStatus::Confirmed;
        self.outcome = Some(outcome);
        self
    }

    pub(crate) fn failed(mut self, failure: CommandFailure) -> Self {
        debug_assert!(!self.status.is_terminal());
        self.status = CommandStatus::Failed;
        self.failure = Some(failure);
        self
    }

    pub(crate) fn with_context(mut self, context: Option<Parcel>) -> Self {
        self.context = context;
        self
    }

    pub fn is_confirmed(&self) -> bool {
        self.status == CommandStatus::Confirmed
    }

    pub fn is_failed(&self) -> bool {
        self.status == CommandStatus::Failed
    }
}

/// Convenience for edit commands: the data the caller asked to write.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditRequest {
    pub x: i64,
    pub y: i64,
    pub data: LandData,
}
