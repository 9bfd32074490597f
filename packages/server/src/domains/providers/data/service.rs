use serde::{Deserialize, Serialize};

use crate::domains::providers::models::{CreateService, ProviderService};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceData {
    pub id: i64,
    pub provider_id: String,
    pub service_name: Option<String>,
    pub description: Option<String>,
    pub catalog_id: Option<i64>,
}

impl From<ProviderService> for ServiceData {
    fn from(service: ProviderService) -> Self {
        Self {
            id: service.id,
            provider_id: service.provider_id,
            service_name: service.service_name,
            description: service.description,
            catalog_id: service.catalog_id,
        }
    }
}

/// Body of `POST /api/providers/:id/services`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateServiceInput {
    pub service_name: Option<String>,
    pub description: Option<String>,
    pub catalog_id: Option<i64>,
}

impl CreateServiceInput {
    /// `None` when the service name is missing or blank.
    pub fn to_model(&self) -> Option<CreateService> {
        let service_name = self
            .service_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())?;
        Some(CreateService {
            service_name: service_name.to_string(),
            description: self.description.clone(),
            catalog_id: self.catalog_id,
        })
    }
}

/// Response carrying the engine-generated id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatedService {
    pub id: i64,
}
