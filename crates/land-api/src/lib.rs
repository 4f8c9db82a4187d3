//! # land-api
//!
//! The read-side query surface: every operation composes the store, the
//! reconciliation service, and narrow backing-service ports, and answers
//! with a uniform `{ok, data, error}` envelope.
//!
//! ## Role in System
//!
//! - **Envelope**: successes carry `data`; failures carry a message and an
//!   optional detail payload.
//! - **Credential Rejection**: a reserved signal with fixed status 401 and
//!   a fixed message, distinguishable from every ordinary failure so the
//!   embedding application knows to log the user out.
//! - **Bounds Checking**: point metadata reads are validated against the
//!   configured [`land_types::GridBounds`] before touching the ledger.

pub mod adapters;
pub mod envelope;
pub mod ports;
pub mod service;

pub use adapters::InMemoryCatalog;
pub use envelope::{
    EnvelopeError, QueryError, ResponseEnvelope, UNAUTHORIZED_MESSAGE, UNAUTHORIZED_STATUS,
};
pub use ports::{Contribution, ContributionSource, District, DistrictDirectory};
pub use service::QueryService;
