//! # land-ledger
//!
//! Outbound port to the external ledger that is the authoritative system
//! of record for parcel ownership and on-ledger metadata.
//!
//! ## Role in System
//!
//! - **Fixed Method Surface**: ownership lookup (single and batched),
//!   metadata read/write, ownership transfer, allowance approval, and
//!   operator authorization. Consensus and contract semantics belong to
//!   the ledger itself and are opaque here.
//! - **Failure Classification**: raw ledger failures split into holder
//!   signature rejections (fixed user-facing message) and everything else
//!   (message passed through verbatim).
//! - **Wire Codec**: the metadata string format the ledger stores per cell.

pub mod adapters;
pub mod data;
pub mod errors;
pub mod ports;

pub use adapters::MockLedger;
pub use data::{decode_land_data, encode_land_data, DataCodecError};
pub use errors::{LedgerError, LedgerFailure, USER_DENIED_PHRASE, USER_REJECTED_MESSAGE};
pub use ports::LedgerGateway;
