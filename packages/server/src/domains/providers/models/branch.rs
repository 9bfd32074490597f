use serde::{Deserialize, Serialize};

use crate::domains::schema::PROVIDER_BRANCHES;
use crate::kernel::database::{DbError, FromRecord, Query, QueryRouter, Row, UpsertByKey};

/// Branch (postal address) of a provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderBranch {
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

impl FromRecord for ProviderBranch {
    fn from_record(row: &Row) -> Result<Self, DbError> {
        Ok(Self {
            id: row.required_text("id")?,
            provider_id: row.required_text("provider_id")?,
            kind: row.text("kind")?,
            name: row.text("name")?,
            country: row.text("country")?,
            state: row.text("state")?,
            municipality: row.text("municipality")?,
            locality: row.text("locality")?,
            street: row.text("street")?,
            neighborhood: row.text("neighborhood")?,
            postal_code: row.text("postal_code")?,
            exterior_number: row.text("exterior_number")?,
            interior_number: row.text("interior_number")?,
            neighborhood_code: row.text("neighborhood_code")?,
            locality_code: row.text("locality_code")?,
        })
    }
}

impl ProviderBranch {
    pub async fn find_for_provider(
        provider_id: &str,
        db: &QueryRouter,
    ) -> Result<Vec<Self>, DbError> {
        let sql = format!("SELECT * FROM {PROVIDER_BRANCHES} WHERE provider_id = ? ORDER BY id");
        db.fetch_all(Query::new(PROVIDER_BRANCHES, sql).bind(provider_id))
            .await?
            .iter()
            .map(Self::from_record)
            .collect()
    }

    /// Insert or replace this branch under its id.
    pub async fn upsert(&self, db: &QueryRouter) -> Result<u64, DbError> {
        let upsert = UpsertByKey::new(PROVIDER_BRANCHES, "id", &self.id)
            .set("provider_id", &self.provider_id)
            .set("kind", self.kind.clone())
            .set("name", self.name.clone())
            .set("country", self.country.clone())
            .set("state", self.state.clone())
            .set("municipality", self.municipality.clone())
            .set("locality", self.locality.clone())
            .set("street", self.street.clone())
            .set("neighborhood", self.neighborhood.clone())
            .set("postal_code", self.postal_code.clone())
            .set("exterior_number", self.exterior_number.clone())
            .set("interior_number", self.interior_number.clone())
            .set("neighborhood_code", self.neighborhood_code.clone())
            .set("locality_code", self.locality_code.clone());
        db.upsert(upsert).await
    }

    pub async fn delete(provider_id: &str, branch_id: &str, db: &QueryRouter) -> Result<u64, DbError> {
        let sql = format!("DELETE FROM {PROVIDER_BRANCHES} WHERE id = ? AND provider_id = ?");
        db.write(
            Query::new(PROVIDER_BRANCHES, sql)
                .bind(branch_id)
                .bind(provider_id),
        )
        .await
    }
}
