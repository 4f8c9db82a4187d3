//! Caller-visible optimistic local state.
//!
//! The orchestrator reflects intended effects here when a command is
//! submitted and reverts them if the command fails. The cache proper is
//! untouched: this overlay is the only thing that changes before the
//! ledger confirms.

use land_types::{Address, LandData, Ownership, Parcel, ParcelId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Wallet-scoped state assembled on connect and adjusted optimistically by
/// approve/authorize commands.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletSnapshot {
    pub address: Option<Address>,
    pub balance: u64,
    pub approved_balance: u64,
    pub land_authorized: bool,
}

#[derive(Debug, Default)]
pub struct LocalLandState {
    pub wallet: WalletSnapshot,
    pub parcels: HashMap<ParcelId, Parcel>,
}

/// Undo record for one optimistic overlay.
///
/// Each record carries both the previous value and the value it wrote. A
/// revert only undoes its own write: a value a newer command has already
/// replaced is left alone.
#[derive(Debug)]
pub(crate) enum Overlay {
    /// An existing tracked parcel's data was replaced.
    ParcelData {
        id: ParcelId,
        previous: Option<LandData>,
        applied: LandData,
    },
    /// An existing tracked parcel's ownership was replaced.
    ParcelOwner {
        id: ParcelId,
        previous: Ownership,
        applied: Ownership,
    },
    /// The parcel was not tracked; a fresh entry was inserted.
    ParcelInserted { id: ParcelId, applied: Parcel },
    ApprovedBalance { previous: u64, applied: u64 },
    LandAuthorized { previous: bool, applied: bool },
}

impl LocalLandState {
    /// Optimistically reflect an intended metadata edit.
    pub(crate) fn apply_data(&mut self, x: i64, y: i64, data: LandData) -> Overlay {
        let id = land_types::build_id(x, y);
        match self.parcels.get_mut(&id) {
            Some(parcel) => {
                let previous = std::mem::replace(&mut parcel.data, Some(data.clone()));
                Overlay::ParcelData {
                    id,
                    previous,
                    applied: data,
                }
            }
            None => {
                let mut parcel = Parcel::new(x, y);
                parcel.data = Some(data);
                self.parcels.insert(id.clone(), parcel.clone());
                Overlay::ParcelInserted {
                    id,
                    applied: parcel,
                }
            }
        }
    }

    /// Optimistically reflect an intended ownership change.
    pub(crate) fn apply_owner(&mut self, x: i64, y: i64, new_owner: Address) -> Overlay {
        let id = land_types::build_id(x, y);
        let applied = Ownership::Owned(new_owner);
        match self.parcels.get_mut(&id) {
            Some(parcel) => Overlay::ParcelOwner {
                id,
                previous: std::mem::replace(&mut parcel.ownership, applied.clone()),
                applied,
            },
            None => {
                let mut parcel = Parcel::new(x, y);
                parcel.ownership = applied;
                self.parcels.insert(id.clone(), parcel.clone());
                Overlay::ParcelInserted {
                    id,
                    applied: parcel,
                }
            }
        }
    }

    pub(crate) fn apply_approved_balance(&mut self, amount: u64) -> Overlay {
        Overlay::ApprovedBalance {
            previous: std::mem::replace(&mut self.wallet.approved_balance, amount),
            applied: amount,
        }
    }

    pub(crate) fn apply_land_authorized(&mut self, authorized: bool) -> Overlay {
        Overlay::LandAuthorized {
            previous: std::mem::replace(&mut self.wallet.land_authorized, authorized),
            applied: authorized,
        }
    }

    /// Undo one optimistic overlay, unless its write was already replaced.
    pub(crate) fn revert(&mut self, overlay: Overlay) {
        match overlay {
            Overlay::ParcelData {
                id,
                previous,
                applied,
            } => {
                if let Some(parcel) = self.parcels.get_mut(&id) {
                    if parcel.data.as_ref() == Some(&applied) {
                        parcel.data = previous;
                    }
                }
            }
            Overlay::ParcelOwner {
                id,
                previous,
                applied,
            } => {
                if let Some(parcel) = self.parcels.get_mut(&id) {
                    if parcel.ownership == applied {
                        parcel.ownership = previous;
                    }
                }
            }
            Overlay::ParcelInserted { id, applied } => {
                if self.parcels.get(&id) == Some(&applied) {
                    self.parcels.remove(&id);
                }
            }
            Overlay::ApprovedBalance { previous, applied } => {
                if self.wallet.approved_balance == applied {
                    self.wallet.approved_balance = previous;
                }
            }
            Overlay::LandAuthorized { previous, applied } => {
                if self.wallet.land_authorized == applied {
                    self.wallet.land_authorized = previous;
                }
            }
        }
    }
}
