//! Query service.
//!
//! The read-side entry point: composes the store, the reconciliation
//! service, and the narrow directory/contribution ports, and answers every
//! operation with a [`ResponseEnvelope`].

use crate::envelope::{QueryError, ResponseEnvelope};
use crate::ports::{Contribution, ContributionSource, District, DistrictDirectory};
use land_ledger::{decode_land_data, LedgerGateway};
use land_reconcile::ReconciliationService;
use land_store::ParcelStore;
use land_types::{parse_id, Address, GridBounds, LandData, Parcel};
use std::sync::Arc;
use tracing::debug;

pub struct QueryService<G, S, D, C> {
    gateway: Arc<G>,
    store: Arc<S>,
    reconciler: ReconciliationService<G, S>,
    districts: Arc<D>,
    contributions: Arc<C>,
    bounds: GridBounds,
}

impl<G, S, D, C> QueryService<G, S, D, C>
where
    G: LedgerGateway,
    S: ParcelStore,
    D: DistrictDirectory,
    C: ContributionSource,
{
    pub fn new(
        gateway: Arc<G>,
        store: Arc<S>,
        districts: Arc<D>,
        contributions: Arc<C>,
        bounds: GridBounds,
    ) -> Self {
        QueryService {
            reconciler: ReconciliationService::new(Arc::clone(&gateway), Arc::clone(&store)),
            gateway,
            store,
            districts,
            contributions,
            bounds,
        }
    }

    pub async fn fetch_districts(&self) -> ResponseEnvelope<Vec<District>> {
        self.districts.districts().await.into()
    }

    /// All stored parcels in the rectangle spanned by the two corner ids,
    /// with best-effort ownership enrichment.
    pub async fn fetch_parcels_in_range(&self, nw: &str, se: &str) -> ResponseEnvelope<Vec<Parcel>> {
        self.parcels_in_range(nw, se).await.into()
    }

    async fn parcels_in_range(&self, nw: &str, se: &str) -> Result<Vec<Parcel>, QueryError> {
        let (nw_x, nw_y) = parse_id(nw)?;
        let (se_x, se_y) = parse_id(se)?;

        let min = (nw_x.min(se_x), nw_y.min(se_y));
        let max = (nw_x.max(se_x), nw_y.max(se_y));

        let parcels = self.store.find_in_range(min, max).await?;
        debug!(?min, ?max, count = parcels.len(), "range query served");

        Ok(self.reconciler.add_owners(parcels).await)
    }

    /// Decoded on-ledger metadata for one cell, after a bounds check.
    pub async fn fetch_parcel_data(&self, x: i64, y: i64) -> ResponseEnvelope<LandData> {
        self.parcel_data(x, y).await.into()
    }

    async fn parcel_data(&self, x: i64, y: i64) -> Result<LandData, QueryError> {
        if !self.bounds.contains(x, y) {
            return Err(QueryError::OutOfBounds { x, y });
        }

        let raw = self.gateway.get_data(x, y).await?;
        Ok(decode_land_data(&raw)?)
    }

    /// All parcels the ledger attributes to `address`, merged with stored
    /// columns.
    pub async fn fetch_address_parcels(&self, address: &Address) -> ResponseEnvelope<Vec<Parcel>> {
        self.address_parcels(address).await.into()
    }

    async fn address_parcels(&self, address: &Address) -> Result<Vec<Parcel>, QueryError> {
        let land = self.reconciler.get_land_of(address).await;
        Ok(self.reconciler.add_db_data(land).await?)
    }

    pub async fn fetch_address_contributions(
        &self,
        address: &Address,
    ) -> ResponseEnvelope<Vec<Contribution>> {
        self.contributions.contributions_of(address).await.into()
    }
}
