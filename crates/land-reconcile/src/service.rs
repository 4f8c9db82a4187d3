//! Reconciliation service.

use futures::future::join_all;
use land_ledger::{decode_land_data, DataCodecError, LedgerError, LedgerGateway};
use land_store::{ParcelStore, StoreError};
use land_types::{split_pairs, Address, LandData, Ownership, Parcel};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Why one parcel's metadata enrichment degraded.
#[derive(Debug, Error)]
enum EnrichError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Codec(#[from] DataCodecError),
}

pub struct ReconciliationService<G, S> {
    gateway: Arc<G>,
    store: Arc<S>,
}

impl<G: LedgerGateway, S: ParcelStore> ReconciliationService<G, S> {
    pub fn new(gateway: Arc<G>, store: Arc<S>) -> Self {
        ReconciliationService { gateway, store }
    }

    /// Attach ledger-reported ownership to each parcel via one batched
    /// lookup. Best-effort: if the batched call fails, the input comes
    /// back unchanged, ownership still unresolved.
    pub async fn add_owners(&self, parcels: Vec<Parcel>) -> Vec<Parcel> {
        if parcels.is_empty() {
            return parcels;
        }

        let split = split_pairs(&parcels);
        let owners = match self.gateway.owner_of_many(&split.x, &split.y).await {
            Ok(owners) => owners,
            Err(error) => {
                warn!(%error, "batched ownership lookup failed; returning parcels unenriched");
                return parcels;
            }
        };

        parcels
            .into_iter()
            .enumerate()
            .map(|(i, mut parcel)| {
                parcel.ownership = match owners.get(i).cloned().flatten() {
                    Some(owner) => Ownership::Owned(owner),
                    None => Ownership::Unowned,
                };
                parcel
            })
            .collect()
    }

    /// Whether `address` owns the cell at `(x, y)`. Unowned cells and
    /// mismatched addresses are `false`, not errors.
    pub async fn is_owner(&self, address: &Address, x: i64, y: i64) -> Result<bool, LedgerError> {
        let owner = self.gateway.owner_of(x, y).await?;
        Ok(matches!(owner, Some(owner) if owner.matches(address)))
    }

    /// Attach decoded on-ledger metadata to each parcel, reading all
    /// parcels concurrently. A failed read or decode degrades that one
    /// parcel to version-only metadata; siblings are unaffected.
    pub async fn add_land_data(&self, parcels: Vec<Parcel>) -> Vec<Parcel> {
        let enriched = parcels.into_iter().map(|parcel| self.with_land_data(parcel));
        join_all(enriched).await
    }

    async fn with_land_data(&self, mut parcel: Parcel) -> Parcel {
        parcel.data = Some(match self.read_land_data(parcel.x, parcel.y).await {
            Ok(data) => data,
            Err(error) => {
                debug!(x = parcel.x, y = parcel.y, %error, "land data degraded");
                LandData::degraded()
            }
        });
        parcel
    }

    async fn read_land_data(&self, x: i64, y: i64) -> Result<LandData, EnrichError> {
        let raw = self.gateway.get_data(x, y).await?;
        Ok(decode_land_data(&raw)?)
    }

    /// Merge stored columns onto each input coordinate, returning a new
    /// sequence. Inputs without a stored row pass through untouched.
    pub async fn add_db_data(&self, parcels: Vec<Parcel>) -> Result<Vec<Parcel>, StoreError> {
        let ids: Vec<_> = parcels.iter().map(|p| p.id.clone()).collect();
        let rows = self.store.find_by_ids(&ids).await?;
        let by_id: HashMap<_, _> = rows.into_iter().map(|row| (row.id.clone(), row)).collect();

        Ok(parcels
            .into_iter()
            .map(|mut parcel| {
                if let Some(row) = by_id.get(&parcel.id) {
                    parcel.name = row.name.clone();
                    parcel.description = row.description.clone();
                    parcel.price = row.price;
                    parcel.district_id = row.district_id.clone();
                }
                parcel
            })
            .collect())
    }

    /// All parcels the ledger reports as owned by `address`, each with its
    /// canonical id. Empty (not an error) when the gateway call fails.
    pub async fn get_land_of(&self, address: &Address) -> Vec<Parcel> {
        match self.gateway.land_of(address).await {
            Ok((xs, ys)) => xs
                .into_iter()
                .zip(ys)
                .map(|(x, y)| Parcel::new(x, y))
                .collect(),
            Err(error) => {
                warn!(%address, %error, "land lookup failed; returning no parcels");
                Vec::new()
            }
        }
    }
}
