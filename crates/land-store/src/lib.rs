//! # land-store
//!
//! Keyed persistent store of parcel rows plus the matrix seeder.
//!
//! ## Role in System
//!
//! - **Local Cache**: serves point, batch, and inclusive rectangular range
//!   queries over parcel rows keyed by canonical id.
//! - **Seeding**: bulk-materializes rectangular regions, tolerating
//!   partially pre-existing state.
//!
//! The store holds only the persisted row shape (`id, x, y, name,
//! description, price, district_id`). Ownership and metadata enrichment
//! happen downstream in reconciliation and are never written back here.

pub mod adapters;
pub mod errors;
pub mod ports;
pub mod seeder;

pub use adapters::InMemoryParcelStore;
pub use errors::StoreError;
pub use ports::ParcelStore;
pub use seeder::{MatrixSeeder, SeedReport};
