use serde::{Deserialize, Serialize};

use crate::domains::clients::models::{Client, SaveClient};
use crate::domains::providers::models::SaveProvider;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientData {
    pub id: String,
    pub code: Option<String>,
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub address: Option<String>,
    pub active: bool,
    pub registered_at: Option<String>,
}

impl From<Client> for ClientData {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            code: client.code,
            name: client.name,
            tax_id: client.tax_id,
            address: client.address,
            active: client.active,
            registered_at: client.registered_at,
        }
    }
}

/// Body of `POST /api/clients`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveClientInput {
    pub id: Option<String>,
    pub code: Option<String>,
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub active: bool,
    pub registered_at: Option<String>,
}

impl SaveClientInput {
    /// Validate required fields and fill defaults.
    pub fn to_model(&self) -> Result<SaveClient, &'static str> {
        let required = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        match (required(&self.id), required(&self.code), required(&self.name)) {
            (Some(id), Some(code), Some(name)) => Ok(SaveClient {
                id,
                code,
                name,
                tax_id: self.tax_id.clone().unwrap_or_default(),
                address: self.address.clone().unwrap_or_default(),
                active: self.active,
                registered_at: self
                    .registered_at
                    .clone()
                    .filter(|at| !at.trim().is_empty())
                    .unwrap_or_else(SaveProvider::now),
            }),
            _ => Err("id, code and name are required"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedClient {
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_fields_are_rejected() {
        let input = SaveClientInput {
            id: Some("CLI-1".into()),
            name: Some("Beta".into()),
            ..Default::default()
        };
        assert!(input.to_model().is_err());

        let input = SaveClientInput {
            code: Some(" ".into()),
            ..input
        };
        assert!(input.to_model().is_err());
    }

    #[test]
    fn optional_fields_default_to_empty() {
        let input = SaveClientInput {
            id: Some("CLI-1".into()),
            code: Some("B1".into()),
            name: Some("Beta".into()),
            active: true,
            ..Default::default()
        };
        let client = input.to_model().unwrap();
        assert_eq!(client.tax_id, "");
        assert!(client.active);
        assert!(!client.registered_at.is_empty());
    }
}
