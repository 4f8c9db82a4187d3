//! # Store Port
//!
//! Abstract interface over the parcel row store.
//!
//! Production backs this with a relational database; tests use
//! [`crate::adapters::InMemoryParcelStore`].

use crate::errors::StoreError;
use async_trait::async_trait;
use land_types::{Parcel, ParcelDraft, ParcelId};

#[async_trait]
pub trait ParcelStore: Send + Sync {
    /// Insert a new parcel row. The canonical id is derived from the
    /// draft's axes before writing; a duplicate id is a
    /// [`StoreError::Conflict`].
    async fn insert(&self, draft: ParcelDraft) -> Result<Parcel, StoreError>;

    /// Batched point lookup. An empty input yields an empty output
    /// without touching the backend.
    async fn find_by_ids(&self, ids: &[ParcelId]) -> Result<Vec<Parcel>, StoreError>;

    /// All rows with `min.x <= x <= max.x` and `min.y <= y <= max.y`,
    /// inclusive on both axes, in row-major order (ascending x, then
    /// ascending y).
    async fn find_in_range(
        &self,
        min: (i64, i64),
        max: (i64, i64),
    ) -> Result<Vec<Parcel>, StoreError>;

    /// Stored price of a cell, or `0` when the cell is absent. Absence is
    /// not an error.
    async fn price_of(&self, x: i64, y: i64) -> Result<u64, StoreError>;
}
