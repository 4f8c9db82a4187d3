//! Transaction orchestrator.

use crate::command::{
    CommandFailure, CommandKind, CommandOutcome, CommandTarget, LandCommand,
    TransferValidationError,
};
use crate::events::CommandEvent;
use crate::state::{LocalLandState, WalletSnapshot};
use land_ledger::{encode_land_data, LedgerError, LedgerFailure, LedgerGateway};
use land_types::{build_id, Address, LandData, Parcel, ParcelId, Transfer};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Buffered lifecycle events per subscriber.
const EVENT_CHANNEL_CAPACITY: usize = 64;

pub struct TransactionOrchestrator<G> {
    gateway: Arc<G>,
    /// The operator (marketplace) contract address: the spender for
    /// allowance approvals and the operator for authorizations.
    operator: Address,
    state: RwLock<LocalLandState>,
    events: broadcast::Sender<CommandEvent>,
    transfer_generation: AtomicU64,
    wallet_generation: AtomicU64,
}

impl<G: LedgerGateway> TransactionOrchestrator<G> {
    pub fn new(gateway: Arc<G>, operator: Address) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        TransactionOrchestrator {
            gateway,
            operator,
            state: RwLock::new(LocalLandState::default()),
            events,
            transfer_generation: AtomicU64::new(0),
            wallet_generation: AtomicU64::new(0),
        }
    }

    /// Subscribe to lifecycle events.
    pub fn subscribe(&self) -> broadcast::Receiver<CommandEvent> {
        self.events.subscribe()
    }

    /// Current caller-visible wallet state.
    pub fn wallet(&self) -> WalletSnapshot {
        self.state.read().wallet.clone()
    }

    /// Current caller-visible view of a tracked parcel.
    pub fn tracked_parcel(&self, id: &ParcelId) -> Option<Parcel> {
        self.state.read().parcels.get(id).cloned()
    }

    /// Seed the local overlay with parcels fetched elsewhere, so failed
    /// commands can resolve error context by coordinate.
    pub fn track_parcels(&self, parcels: impl IntoIterator<Item = Parcel>) {
        let mut state = self.state.write();
        for parcel in parcels {
            state.parcels.insert(parcel.id.clone(), parcel);
        }
    }

    fn emit(&self, event: CommandEvent) {
        // No subscribers is fine; events are advisory.
        let _ = self.events.send(event);
    }

    /// Edit a parcel's on-ledger metadata. Runs every request
    /// independently.
    pub async fn edit_parcel_data(&self, x: i64, y: i64, data: LandData) -> LandCommand {
        let target = CommandTarget::Parcel { x, y };
        let command = LandCommand::requested(CommandKind::EditData, target.clone());
        self.emit(CommandEvent::Requested {
            kind: command.kind,
            target: target.clone(),
        });

        let encoded = encode_land_data(&data);
        let overlay = self.state.write().apply_data(x, y, data);
        let command = command.submitted();
        self.emit(CommandEvent::Submitted {
            kind: command.kind,
            target: target.clone(),
        });

        match self.gateway.update_land_data(x, y, &encoded).await {
            Ok(hash) => {
                let id = build_id(x, y);
                let parcel = self
                    .state
                    .read()
                    .parcels
                    .get(&id)
                    .cloned()
                    .unwrap_or_else(|| Parcel::new(x, y));
                info!(x, y, %hash, "parcel data edit confirmed");

                let outcome = CommandOutcome::Edited { hash, parcel };
                self.emit(CommandEvent::Confirmed {
                    kind: command.kind,
                    target,
                    outcome: outcome.clone(),
                });
                command.confirmed(outcome)
            }
            Err(error) => {
                self.state.write().revert(overlay);
                let failure = CommandFailure::Ledger(LedgerFailure::classify(&error));
                let context = self.state.read().parcels.get(&build_id(x, y)).cloned();
                warn!(x, y, message = failure.message(), "parcel data edit failed");

                self.emit(CommandEvent::Failed {
                    kind: command.kind,
                    target,
                    failure: failure.clone(),
                    context: context.clone(),
                });
                command.failed(failure).with_context(context)
            }
        }
    }

    /// Transfer a parcel to a new owner. Latest-wins: a newer transfer
    /// request supersedes a pending one, whose result is then discarded.
    pub async fn transfer_parcel(&self, parcel: &Parcel, new_owner: Address) -> LandCommand {
        let (x, y) = (parcel.x, parcel.y);
        let target = CommandTarget::Parcel { x, y };
        let command = LandCommand::requested(CommandKind::Transfer, target.clone());
        self.emit(CommandEvent::Requested {
            kind: command.kind,
            target: target.clone(),
        });

        let generation = self.transfer_generation.fetch_add(1, Ordering::SeqCst) + 1;

        let old_owner = match self.validate_transfer(&new_owner) {
            Ok(old_owner) => old_owner,
            Err(validation) => {
                let failure = CommandFailure::Validation(validation);
                self.emit(CommandEvent::Failed {
                    kind: command.kind,
                    target,
                    failure: failure.clone(),
                    context: Some(parcel.clone()),
                });
                return command.failed(failure).with_context(Some(parcel.clone()));
            }
        };

        let overlay = self.state.write().apply_owner(x, y, new_owner.clone());
        let command = command.submitted();
        self.emit(CommandEvent::Submitted {
            kind: command.kind,
            target: target.clone(),
        });

        let result = self.gateway.transfer_to(x, y, &new_owner).await;

        if self.transfer_generation.load(Ordering::SeqCst) != generation {
            // Superseded while in flight: undo the optimistic effect and
            // publish nothing; local state reflects only the newest
            // generation.
            self.state.write().revert(overlay);
            debug!(x, y, "transfer superseded by a newer request; result discarded");

            let mut command = match result {
                Ok(hash) => command.confirmed(CommandOutcome::Transferred(Transfer {
                    hash,
                    old_owner,
                    new_owner,
                    x,
                    y,
                })),
                Err(error) => {
                    command.failed(CommandFailure::Ledger(LedgerFailure::classify(&error)))
                }
            };
            command.superseded = true;
            return command;
        }

        match result {
            Ok(hash) => {
                let transfer = Transfer {
                    hash,
                    old_owner,
                    new_owner,
                    x,
                    y,
                };
                info!(x, y, hash = %transfer.hash, "parcel transfer confirmed");

                let outcome = CommandOutcome::Transferred(transfer);
                self.emit(CommandEvent::Confirmed {
                    kind: command.kind,
                    target,
                    outcome: outcome.clone(),
                });
                command.confirmed(outcome)
            }
            Err(error) => {
                self.state.write().revert(overlay);
                let failure = CommandFailure::Ledger(LedgerFailure::classify(&error));
                warn!(x, y, message = failure.message(), "parcel transfer failed");

                self.emit(CommandEvent::Failed {
                    kind: command.kind,
                    target,
                    failure: failure.clone(),
                    context: Some(parcel.clone()),
                });
                command.failed(failure).with_context(Some(parcel.clone()))
            }
        }
    }

    /// Transfer preconditions, checked before any ledger call.
    fn validate_transfer(&self, new_owner: &Address) -> Result<Address, TransferValidationError> {
        let old_owner = self
            .state
            .read()
            .wallet
            .address
            .clone()
            .ok_or(TransferValidationError::MissingOwner)?;

        if old_owner.matches(new_owner) {
            return Err(TransferValidationError::SelfTransfer);
        }
        if !new_owner.is_valid_format() {
            return Err(TransferValidationError::InvalidAddress);
        }

        Ok(old_owner)
    }

    /// Approve the operator contract to spend `amount` tokens.
    pub async fn approve_allowance(&self, amount: u64) -> LandCommand {
        let target = CommandTarget::Address(self.operator.clone());
        let command = LandCommand::requested(CommandKind::Approve, target.clone());
        self.emit(CommandEvent::Requested {
            kind: command.kind,
            target: target.clone(),
        });

        let overlay = self.state.write().apply_approved_balance(amount);
        let command = command.submitted();
        self.emit(CommandEvent::Submitted {
            kind: command.kind,
            target: target.clone(),
        });

        match self.gateway.approve(&self.operator, amount).await {
            Ok(hash) => {
                info!(amount, %hash, "allowance approval confirmed");
                let outcome = CommandOutcome::Approved { hash, amount };
                self.emit(CommandEvent::Confirmed {
                    kind: command.kind,
                    target,
                    outcome: outcome.clone(),
                });
                command.confirmed(outcome)
            }
            Err(error) => {
                self.state.write().revert(overlay);
                let failure = CommandFailure::Ledger(LedgerFailure::classify(&error));
                warn!(amount, message = failure.message(), "allowance approval failed");

                self.emit(CommandEvent::Failed {
                    kind: command.kind,
                    target,
                    failure: failure.clone(),
                    context: None,
                });
                command.failed(failure)
            }
        }
    }

    /// Grant or revoke the operator contract's authorization over the
    /// holder's parcels.
    pub async fn authorize_operator(&self, authorized: bool) -> LandCommand {
        let target = CommandTarget::Address(self.operator.clone());
        let command = LandCommand::requested(CommandKind::Authorize, target.clone());
        self.emit(CommandEvent::Requested {
            kind: command.kind,
            target: target.clone(),
        });

        let overlay = self.state.write().apply_land_authorized(authorized);
        let command = command.submitted();
        self.emit(CommandEvent::Submitted {
            kind: command.kind,
            target: target.clone(),
        });

        match self.gateway.authorize_operator(&self.operator, authorized).await {
            Ok(hash) => {
                info!(authorized, %hash, "operator authorization confirmed");
                let outcome = CommandOutcome::Authorized { hash, authorized };
                self.emit(CommandEvent::Confirmed {
                    kind: command.kind,
                    target,
                    outcome: outcome.clone(),
                });
                command.confirmed(outcome)
            }
            Err(error) => {
                self.state.write().revert(overlay);
                let failure = CommandFailure::Ledger(LedgerFailure::classify(&error));
                warn!(authorized, message = failure.message(), "operator authorization failed");

                self.emit(CommandEvent::Failed {
                    kind: command.kind,
                    target,
                    failure: failure.clone(),
                    context: None,
                });
                command.failed(failure)
            }
        }
    }

    /// Connect the wallet: resolve the credential and read balance,
    /// allowance, and operator authorization concurrently. Latest-wins.
    pub async fn connect_wallet(&self) -> LandCommand {
        let target = CommandTarget::Wallet;
        let command = LandCommand::requested(CommandKind::ConnectWallet, target.clone());
        self.emit(CommandEvent::Requested {
            kind: command.kind,
            target: target.clone(),
        });

        let generation = self.wallet_generation.fetch_add(1, Ordering::SeqCst) + 1;
        let command = command.submitted();
        self.emit(CommandEvent::Submitted {
            kind: command.kind,
            target: target.clone(),
        });

        let result = self.read_wallet().await;

        if self.wallet_generation.load(Ordering::SeqCst) != generation {
            debug!("wallet connect superseded by a newer request; result discarded");
            let mut command = match result {
                Ok(snapshot) => command.confirmed(CommandOutcome::WalletConnected(snapshot)),
                Err(error) => {
                    command.failed(CommandFailure::Ledger(LedgerFailure::classify(&error)))
                }
            };
            command.superseded = true;
            return command;
        }

        match result {
            Ok(snapshot) => {
                self.state.write().wallet = snapshot.clone();
                info!(address = ?snapshot.address, "wallet connected");

                let outcome = CommandOutcome::WalletConnected(snapshot);
                self.emit(CommandEvent::Confirmed {
                    kind: command.kind,
                    target,
                    outcome: outcome.clone(),
                });
                command.confirmed(outcome)
            }
            Err(error) => {
                let failure = CommandFailure::Ledger(LedgerFailure::classify(&error));
                warn!(message = failure.message(), "wallet connect failed");

                self.emit(CommandEvent::Failed {
                    kind: command.kind,
                    target,
                    failure: failure.clone(),
                    context: None,
                });
                command.failed(failure)
            }
        }
    }

    async fn read_wallet(&self) -> Result<WalletSnapshot, LedgerError> {
        let address = self.gateway.connected_address().await?;
        let (balance, approved_balance, land_authorized) = tokio::try_join!(
            self.gateway.balance_of(&address),
            self.gateway.allowance_of(&address, &self.operator),
            self.gateway.is_operator_authorized(&self.operator, &address),
        )?;

        Ok(WalletSnapshot {
            address: Some(address),
            balance,
            approved_balance,
            land_authorized,
        })
    }
}
