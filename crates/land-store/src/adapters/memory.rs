//! In-memory parcel store.
//!
//! Backs unit tests and single-process deployments. Keying the map by
//! `(x, y)` makes the BTreeMap iteration order the row-major order the
//! range query promises.

use crate::errors::StoreError;
use crate::ports::ParcelStore;
use async_trait::async_trait;
use land_types::{Parcel, ParcelDraft, ParcelId};
use parking_lot::RwLock;
use std::collections::BTreeMap;

#[derive(Default)]
pub struct InMemoryParcelStore {
    cells: RwLock<BTreeMap<(i64, i64), Parcel>>,
}

impl InMemoryParcelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cells.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.read().is_empty()
    }
}

#[async_trait]
impl ParcelStore for InMemoryParcelStore {
    async fn insert(&self, draft: ParcelDraft) -> Result<Parcel, StoreError> {
        let parcel = draft.build()?;
        let mut cells = self.cells.write();

        if cells.contains_key(&(parcel.x, parcel.y)) {
            return Err(StoreError::Conflict {
                id: parcel.id.clone(),
            });
        }

        cells.insert((parcel.x, parcel.y), parcel.clone());
        Ok(parcel)
    }

    async fn find_by_ids(&self, ids: &[ParcelId]) -> Result<Vec<Parcel>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let cells = self.cells.read();
        let mut found = Vec::with_capacity(ids.len());
        for id in ids {
            if let Ok(key) = id.coords() {
                if let Some(parcel) = cells.get(&key) {
                    found.push(parcel.clone());
                }
            }
        }
        Ok(found)
    }

    async fn find_in_range(
        &self,
        min: (i64, i64),
        max: (i64, i64),
    ) -> Result<Vec<Parcel>, StoreError> {
        let cells = self.cells.read();
        let rows = cells
            .range((min.0, i64::MIN)..=(max.0, i64::MAX))
            .filter(|((_, y), _)| *y >= min.1 && *y <= max.1)
            .map(|(_, parcel)| parcel.clone())
            .collect();
        Ok(rows)
    }

    async fn price_of(&self, x: i64, y: i64) -> Result<u64, StoreError> {
        Ok(self
            .cells
            .read()
            .get(&(x, y))
            .map(|parcel| parcel.price)
            .unwrap_or(0))
    }
}
