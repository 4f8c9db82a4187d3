//! In-memory backing-service stand-ins for tests.

use crate::envelope::QueryError;
use crate::ports::{Contribution, ContributionSource, District, DistrictDirectory};
use async_trait::async_trait;
use land_types::Address;
use parking_lot::RwLock;

/// Serves districts and contributions from memory. Can be scripted to
/// reject credentials, which is how logout propagation is exercised.
#[derive(Default)]
pub struct InMemoryCatalog {
    districts: RwLock<Vec<District>>,
    contributions: RwLock<Vec<Contribution>>,
    reject_credentials: RwLock<bool>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_district(self, id: impl Into<String>, name: impl Into<String>) -> Self {
        self.districts.write().push(District {
            id: id.into(),
            name: name.into(),
        });
        self
    }

    pub fn with_contribution(
        self,
        address: Address,
        district_id: impl Into<String>,
        land_count: u64,
    ) -> Self {
        self.contributions.write().push(Contribution {
            address,
            district_id: district_id.into(),
            land_count,
        });
        self
    }

    /// Script every call to fail with the credentials-rejected signal.
    pub fn reject_credentials(self) -> Self {
        *self.reject_credentials.write() = true;
        self
    }

    fn check_credentials(&self) -> Result<(), QueryError> {
        if *self.reject_credentials.read() {
            Err(QueryError::Unauthorized)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DistrictDirectory for InMemoryCatalog {
    async fn districts(&self) -> Result<Vec<District>, QueryError> {
        self.check_credentials()?;
        Ok(self.districts.read().clone())
    }
}

#[async_trait]
impl ContributionSource for InMemoryCatalog {
    async fn contributions_of(&self, address: &Address) -> Result<Vec<Contribution>, QueryError> {
        self.check_credentials()?;
        Ok(self
            .contributions
            .read()
            .iter()
            .filter(|c| c.address.matches(address))
            .cloned()
            .collect())
    }
}
