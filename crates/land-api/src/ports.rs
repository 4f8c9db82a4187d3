//! Narrow read ports for the non-ledger backing services.
//!
//! Districts and contributions live in external services this crate only
//! reads. The ports return [`QueryError`] directly so a credential
//! rejection from either service surfaces through the envelope unchanged.

use crate::envelope::QueryError;
use async_trait::async_trait;
use land_types::Address;
use serde::{Deserialize, Serialize};

/// A named community district parcels may reference.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct District {
    pub id: String,
    pub name: String,
}

/// A holder's contribution of land to one district.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    pub address: Address,
    pub district_id: String,
    pub land_count: u64,
}

#[async_trait]
pub trait DistrictDirectory: Send + Sync {
    async fn districts(&self) -> Result<Vec<District>, QueryError>;
}

#[async_trait]
pub trait ContributionSource: Send + Sync {
    async fn contributions_of(&self, address: &Address) -> Result<Vec<Contribution>, QueryError>;
}
