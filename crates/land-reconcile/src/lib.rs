//! # land-reconcile
//!
//! Merges cached parcel rows with authoritative ledger reads to produce
//! enriched, ephemeral parcel views.
//!
//! ## Role in System
//!
//! - **Enrichment, not persistence**: ownership and decoded metadata are
//!   attached to views and never written back to the store.
//! - **Best-effort degradation**: a gateway failure degrades the result
//!   (unchanged input, empty list, version-only metadata) instead of
//!   propagating. One parcel's failure never affects its batch siblings.

pub mod service;

pub use service::ReconciliationService;
