//! # Domain Entities
//!
//! Parcels, ledger addresses, transfers, and grid bounds.
//!
//! ## Persistence Boundary
//!
//! The persisted row shape of a parcel is `id, x, y, name, description,
//! price, district_id`. Everything else on [`Parcel`] (`ownership`, `data`)
//! is ledger-sourced enrichment that only lives in ephemeral views: the
//! cache becomes stale the moment a mutation confirms on the ledger and is
//! refreshed by the next reconciliation read.

use crate::coordinates::{self, GridCell, ParcelId};
use crate::errors::CoordinateError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Current version of the on-ledger metadata format.
pub const CURRENT_DATA_VERSION: u8 = 0;

/// Holder credential on the external ledger, as a hex string.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(String);

impl Address {
    pub fn new(raw: impl Into<String>) -> Self {
        Address(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Ledger addresses compare case-insensitively.
    pub fn matches(&self, other: &Address) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }

    /// Address-format validation: `0x` followed by 40 hex digits.
    pub fn is_valid_format(&self) -> bool {
        match self.0.strip_prefix("0x") {
            Some(hex) => hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit()),
            None => false,
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Address {
    fn from(raw: &str) -> Self {
        Address::new(raw)
    }
}

/// Handle of a submitted ledger transaction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxHash(String);

impl TxHash {
    pub fn new(raw: impl Into<String>) -> Self {
        TxHash(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ledger-reported ownership of a cell. Transient, never persisted.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ownership {
    /// No ownership enrichment ran, or the last one failed.
    #[default]
    Unresolved,
    /// The ledger reports no owner for this cell.
    Unowned,
    /// The ledger reports this holder.
    Owned(Address),
}

impl Ownership {
    pub fn is_unresolved(&self) -> bool {
        matches!(self, Ownership::Unresolved)
    }

    pub fn owner(&self) -> Option<&Address> {
        match self {
            Ownership::Owned(address) => Some(address),
            _ => None,
        }
    }
}

/// Decoded on-ledger metadata. Transient, never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandData {
    pub version: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ipns: Option<String>,
}

impl LandData {
    /// Fallback carrying only the current format version, used when a
    /// metadata read or decode fails for one parcel.
    pub fn degraded() -> Self {
        LandData {
            version: CURRENT_DATA_VERSION,
            name: None,
            description: None,
            ipns: None,
        }
    }
}

/// One grid cell as served by the cache, optionally enriched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parcel {
    pub id: ParcelId,
    pub x: i64,
    pub y: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub price: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub district_id: Option<String>,
    #[serde(default, skip_serializing_if = "Ownership::is_unresolved")]
    pub ownership: Ownership,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<LandData>,
}

impl Parcel {
    /// A bare parcel at `(x, y)` with its canonical id and defaults.
    pub fn new(x: i64, y: i64) -> Self {
        Parcel {
            id: coordinates::build_id(x, y),
            x,
            y,
            name: None,
            description: None,
            price: 0,
            district_id: None,
            ownership: Ownership::Unresolved,
            data: None,
        }
    }
}

impl GridCell for Parcel {
    fn x(&self) -> i64 {
        self.x
    }

    fn y(&self) -> i64 {
        self.y
    }
}

/// Loosely-shaped parcel input for insertion paths.
///
/// `build` validates the axes; a draft missing either axis is malformed.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ParcelDraft {
    pub x: Option<i64>,
    pub y: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<u64>,
    #[serde(default)]
    pub district_id: Option<String>,
}

impl ParcelDraft {
    pub fn new(x: i64, y: i64) -> Self {
        ParcelDraft {
            x: Some(x),
            y: Some(y),
            ..ParcelDraft::default()
        }
    }

    pub fn with_price(mut self, price: u64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Validate the draft and derive its canonical id.
    pub fn build(self) -> Result<Parcel, CoordinateError> {
        let id = coordinates::try_build_id(self.x, self.y)?;
        let (x, y) = id.coords()?;

        Ok(Parcel {
            id,
            x,
            y,
            name: self.name,
            description: self.description,
            price: self.price.unwrap_or(0),
            district_id: self.district_id,
            ownership: Ownership::Unresolved,
            data: None,
        })
    }
}

/// A completed ownership change on the ledger. Immutable once constructed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub hash: TxHash,
    pub old_owner: Address,
    pub new_owner: Address,
    pub x: i64,
    pub y: i64,
}

/// Valid-bounds rectangle supplied by the embedding application.
///
/// Consulted as a validation input only; the grid itself is unbounded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridBounds {
    pub min_x: i64,
    pub min_y: i64,
    pub max_x: i64,
    pub max_y: i64,
}

impl GridBounds {
    pub fn new(min_x: i64, min_y: i64, max_x: i64, max_y: i64) -> Self {
        GridBounds {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

impl Default for GridBounds {
    fn default() -> Self {
        GridBounds::new(-150, -150, 150, 150)
    }
}
