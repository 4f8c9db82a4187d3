//! Lifecycle events published for upstream consumers.
//!
//! Every command emits `Requested` and `Submitted`, then exactly one of
//! `Confirmed` or `Failed` — unless it was superseded by a newer
//! latest-wins command, in which case no terminal event is published.

use crate::command::{CommandFailure, CommandKind, CommandOutcome, CommandTarget};
use land_types::Parcel;

#[derive(Clone, Debug)]
pub enum CommandEvent {
    Requested {
        kind: CommandKind,
        target: CommandTarget,
    },
    Submitted {
        kind: CommandKind,
        target: CommandTarget,
    },
    Confirmed {
        kind: CommandKind,
        target: CommandTarget,
        outcome: CommandOutcome,
    },
    Failed {
        kind: CommandKind,
        target: CommandTarget,
        failure: CommandFailure,
        /// The affected parcel from local state, when the target is one.
        context: Option<Parcel>,
    },
}

impl CommandEvent {
    pub fn kind(&self) -> CommandKind {
        match self {
            CommandEvent::Requested { kind, .. }
            | CommandEvent::Submitted { kind, .. }
            | CommandEvent::Confirmed { kind, .. }
            | CommandEvent::Failed { kind, .. } => *kind,
        }
    }
}
