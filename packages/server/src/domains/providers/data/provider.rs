use serde::{Deserialize, Serialize};

use crate::domains::providers::models::{Provider, SaveProvider};

/// Provider as returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderData {
    pub id: String,
    pub code: Option<String>,
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub address: Option<String>,
    pub active: bool,
    pub registered_at: Option<String>,
}

impl From<Provider> for ProviderData {
    fn from(provider: Provider) -> Self {
        Self {
            id: provider.id,
            code: provider.code,
            name: provider.name,
            tax_id: provider.tax_id,
            address: provider.address,
            active: provider.active,
            registered_at: provider.registered_at,
        }
    }
}

/// Body of `POST /api/providers`. Without an id a new one is generated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveProviderInput {
    pub id: Option<String>,
    pub code: Option<String>,
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub active: bool,
    pub registered_at: Option<String>,
}

impl SaveProviderInput {
    /// Caller-supplied id, if present and not blank.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }

    /// Missing strings become empty text; a missing timestamp becomes now.
    pub fn to_model(&self) -> SaveProvider {
        SaveProvider {
            code: self.code.clone().unwrap_or_default(),
            name: self.name.clone().unwrap_or_default(),
            tax_id: self.tax_id.clone().unwrap_or_default(),
            address: self.address.clone().unwrap_or_default(),
            active: self.active,
            registered_at: self
                .registered_at
                .clone()
                .filter(|at| !at.trim().is_empty())
                .unwrap_or_else(SaveProvider::now),
        }
    }
}

/// Response of `POST /api/providers`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedProvider {
    pub id: String,
    pub registered_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_is_camel_case() {
        let input: SaveProviderInput = serde_json::from_value(serde_json::json!({
            "code": "A1",
            "name": "Acme",
            "taxId": "ACM010101AAA",
            "active": true,
            "registeredAt": "2024-01-01T00:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(input.id(), None);
        let model = input.to_model();
        assert_eq!(model.tax_id, "ACM010101AAA");
        assert_eq!(model.address, "");
        assert!(model.active);
        assert_eq!(model.registered_at, "2024-01-01T00:00:00.000Z");
    }

    #[test]
    fn blank_id_and_timestamp_are_treated_as_missing() {
        let input = SaveProviderInput {
            id: Some("  ".into()),
            registered_at: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(input.id(), None);
        assert!(!input.to_model().registered_at.is_empty());
        assert!(!input.to_model().active);
    }
}
