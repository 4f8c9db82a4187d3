//! # Shared Types Crate
//!
//! Domain types shared by every LandGrid crate: the canonical coordinate
//! codec, parcel entities, ledger addresses, and coordinate validation
//! errors.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: a parcel id is always derived from its
//!   coordinates through [`coordinates::build_id`]; no other code path may
//!   mint ids.
//! - **Transient Enrichment**: ownership and decoded metadata are attached
//!   by reconciliation and never persisted. [`entities::Ownership`] keeps
//!   "never looked up" distinguishable from "ledger reports unowned".

pub mod coordinates;
pub mod entities;
pub mod errors;

pub use coordinates::{
    build_id, check_is_valid, parse_id, split_pairs, try_build_id, CoordinateInput, GridCell,
    ParcelId, SplitCoordinates,
};
pub use entities::*;
pub use errors::*;
