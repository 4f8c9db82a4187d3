use land_types::{CoordinateError, ParcelId};
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Duplicate primary key on insert. Call sites decide whether this is
    /// fatal (direct insert) or absorbed (matrix seeding).
    #[error("parcel already exists: {id}")]
    Conflict { id: ParcelId },

    /// The inserted row failed coordinate validation.
    #[error(transparent)]
    Coordinates(#[from] CoordinateError),

    /// Backing store failure.
    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::Conflict { .. })
    }
}
