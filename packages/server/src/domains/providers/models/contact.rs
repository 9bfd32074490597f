use serde::{Deserialize, Serialize};

use crate::domains::schema::PROVIDER_CONTACTS;
use crate::kernel::database::{DbError, FromRecord, Query, QueryRouter, Row, UpsertByKey};

/// Agenda entry: a person to reach at a provider
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderContact {
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

impl FromRecord for ProviderContact {
    fn from_record(row: &Row) -> Result<Self, DbError> {
        Ok(Self {
            id: row.required_text("id")?,
            provider_id: row.required_text("provider_id")?,
            area: row.text("area")?,
            name: row.text("name")?,
            phone: row.text("phone")?,
            extension: row.text("extension")?,
            email: row.text("email")?,
            extra1: row.text("extra1")?,
            extra2: row.text("extra2")?,
        })
    }
}

impl ProviderContact {
    pub async fn find_for_provider(
        provider_id: &str,
        db: &QueryRouter,
    ) -> Result<Vec<Self>, DbError> {
        let sql = format!("SELECT * FROM {PROVIDER_CONTACTS} WHERE provider_id = ? ORDER BY id");
        db.fetch_all(Query::new(PROVIDER_CONTACTS, sql).bind(provider_id))
            .await?
            .iter()
            .map(Self::from_record)
            .collect()
    }

    pub async fn upsert(&self, db: &QueryRouter) -> Result<u64, DbError> {
        let upsert = UpsertByKey::new(PROVIDER_CONTACTS, "id", &self.id)
            .set("provider_id", &self.provider_id)
            .set("area", self.area.clone())
            .set("name", self.name.clone())
            .set("phone", self.phone.clone())
            .set("extension", self.extension.clone())
            .set("email", self.email.clone())
            .set("extra1", self.extra1.clone())
            .set("extra2", self.extra2.clone());
        db.upsert(upsert).await
    }

    pub async fn delete(provider_id: &str, contact_id: &str, db: &QueryRouter) -> Result<u64, DbError> {
        let sql = format!("DELETE FROM {PROVIDER_CONTACTS} WHERE id = ? AND provider_id = ?");
        db.write(
            Query::new(PROVIDER_CONTACTS, sql)
                .bind(contact_id)
                .bind(provider_id),
        )
        .await
    }
}
