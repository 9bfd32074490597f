use serde::{Deserialize, Serialize};

use crate::domains::providers::models::ProviderBranch;

/// Branch as exchanged with the API. On write the provider id comes from
/// the path and any `providerId` in the body is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BranchData {
    pub id: String,
    pub provider_id: String,
    pub kind: Option<String>,
    pub name: Option<String>,
    pub country: Option<String>,
    pub state: Option<String>,
    pub municipality: Option<String>,
    pub locality: Option<String>,
    pub street: Option<String>,
    pub neighborhood: Option<String>,
    pub postal_code: Option<String>,
    pub exterior_number: Option<String>,
    pub interior_number: Option<String>,
    pub neighborhood_code: Option<String>,
    pub locality_code: Option<String>,
}

impl From<ProviderBranch> for BranchData {
    fn from(branch: ProviderBranch) -> Self {
        Self {
            id: branch.id,
            provider_id: branch.provider_id,
            kind: branch.kind,
            name: branch.name,
            country: branch.country,
            state: branch.state,
            municipality: branch.municipality,
            locality: branch.locality,
            street: branch.street,
            neighborhood: branch.neighborhood,
            postal_code: branch.postal_code,
            exterior_number: branch.exterior_number,
            interior_number: branch.interior_number,
            neighborhood_code: branch.neighborhood_code,
            locality_code: branch.locality_code,
        }
    }
}

impl BranchData {
    pub fn into_model(self, provider_id: &str) -> ProviderBranch {
        ProviderBranch {
            id: self.id.trim().to_string(),
            provider_id: provider_id.to_string(),
            kind: self.kind,
            name: self.name,
            country: self.country,
            state: self.state,
            municipality: self.municipality,
            locality: self.locality,
            street: self.street,
            neighborhood: self.neighborhood,
            postal_code: self.postal_code,
            exterior_number: self.exterior_number,
            interior_number: self.interior_number,
            neighborhood_code: self.neighborhood_code,
            locality_code: self.locality_code,
        }
    }
}
