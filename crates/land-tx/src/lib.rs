//! # land-tx
//!
//! Transaction orchestration for mutating ledger operations.
//!
//! ## Role in System
//!
//! - **Lifecycle**: every mutating operation runs one command through
//!   `Requested → Submitted → {Confirmed | Failed}`; terminal states are
//!   final and a new user action starts a new command.
//! - **Optimistic Updates**: the intended effect is applied to
//!   caller-visible local state when the command is submitted and reverted
//!   if it fails.
//! - **Two Concurrency Disciplines**: fetches and edits run every request
//!   independently; transfers and wallet connects are latest-wins, driven
//!   by a generation counter that keeps stale in-flight results from being
//!   applied.

pub mod command;
pub mod events;
pub mod orchestrator;
pub mod state;

pub use command::{
    CommandFailure, CommandKind, CommandOutcome, CommandStatus, CommandTarget, LandCommand,
    TransferValidationError,
};
pub use events::CommandEvent;
pub use orchestrator::TransactionOrchestrator;
pub use state::WalletSnapshot;
