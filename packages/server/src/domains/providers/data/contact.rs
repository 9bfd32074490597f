use serde::{Deserialize, Serialize};

use crate::domains::providers::models::ProviderContact;

/// Contact as exchanged with the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactData {
    pub id: String,
    pub provider_id: String,
    pub area: Option<String>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub extension: Option<String>,
    pub email: Option<String>,
    pub extra1: Option<String>,
    pub extra2: Option<String>,
}

impl From<ProviderContact> for ContactData {
    fn from(contact: ProviderContact) -> Self {
        Self {
            id: contact.id,
            provider_id: contact.provider_id,
            area: contact.area,
            name: contact.name,
            phone: contact.phone,
            extension: contact.extension,
            email: contact.email,
            extra1: contact.extra1,
            extra2: contact.extra2,
        }
    }
}

impl ContactData {
    pub fn into_model(self, provider_id: &str) -> ProviderContact {
        ProviderContact {
            id: self.id.trim().to_string(),
            provider_id: provider_id.to_string(),
            area: self.area,
            name: self.name,
            phone: self.phone,
            extension: self.extension,
            email: self.email,
            extra1: self.extra1,
            extra2: self.extra2,
        }
    }
}
