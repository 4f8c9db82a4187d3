//! # Matrix Seeder
//!
//! Bulk-materializes a rectangular region of parcels into the store.
//!
//! Seeding is safe to re-run over partially seeded regions: duplicate-key
//! conflicts from individual inserts are swallowed, while any other insert
//! failure fails the batch.

use crate::errors::StoreError;
use crate::ports::ParcelStore;
use futures::future::join_all;
use land_types::ParcelDraft;
use std::sync::Arc;
use tracing::info;

/// Outcome of one seeding run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Cells newly inserted by this run.
    pub inserted: usize,
    /// Cells skipped because they already existed.
    pub skipped: usize,
}

pub struct MatrixSeeder<S> {
    store: Arc<S>,
}

impl<S: ParcelStore> MatrixSeeder<S> {
    pub fn new(store: Arc<S>) -> Self {
        MatrixSeeder { store }
    }

    /// Insert every integer cell in the inclusive rectangle, row-major,
    /// one concurrent insert per cell.
    pub async fn insert_matrix(
        &self,
        min_x: i64,
        min_y: i64,
        max_x: i64,
        max_y: i64,
    ) -> Result<SeedReport, StoreError> {
        let inserts = (min_x..=max_x).flat_map(|x| {
            (min_y..=max_y).map(move |y| self.store.insert(ParcelDraft::new(x, y)))
        });

        let mut report = SeedReport::default();
        for result in join_all(inserts).await {
            match result {
                Ok(_) => report.inserted += 1,
                Err(StoreError::Conflict { .. }) => report.skipped += 1,
                Err(other) => return Err(other),
            }
        }

        info!(
            min_x,
            min_y,
            max_x,
            max_y,
            inserted = report.inserted,
            skipped = report.skipped,
            "matrix seeding finished"
        );
        Ok(report)
    }
}
