use serde::{Deserialize, Serialize};

use crate::domains::schema::PROVIDER_SERVICES;
use crate::kernel::database::{DbError, FromRecord, InsertWithIdentity, Query, QueryRouter, Row};

/// Service a provider offers, optionally linked to a catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderService {
    pub id: i64,
    pub provider_id: String,
    pub service_name: Option<String>,
    pub description: Option<String>,
    pub catalog_id: Option<i64>,
}

/// Input for adding a service to a provider
#[derive(Debug, Clone, Default)]
pub struct CreateService {
    pub service_name: String,
    pub description: Option<String>,
    pub catalog_id: Option<i64>,
}

impl FromRecord for ProviderService {
    fn from_record(row: &Row) -> Result<Self, DbError> {
        Ok(Self {
            id: row.required_integer("id")?,
            provider_id: row.required_text("provider_id")?,
            service_name: row.text("service_name")?,
            description: row.text("description")?,
            catalog_id: row.integer("catalog_id")?,
        })
    }
}

impl ProviderService {
    pub async fn find_for_provider(
        provider_id: &str,
        db: &QueryRouter,
    ) -> Result<Vec<Self>, DbError> {
        let sql = format!(
            "SELECT id, provider_id, service_name, description, catalog_id \
             FROM {PROVIDER_SERVICES} WHERE provider_id = ? ORDER BY id"
        );
        db.fetch_all(Query::new(PROVIDER_SERVICES, sql).bind(provider_id))
            .await?
            .iter()
            .map(Self::from_record)
            .collect()
    }

    /// Insert and return the generated id. `catalog_id` is left out of the
    /// statement when absent so the column keeps its NULL default.
    pub async fn create(
        provider_id: &str,
        input: &CreateService,
        db: &QueryRouter,
    ) -> Result<i64, DbError> {
        let mut insert = InsertWithIdentity::new(PROVIDER_SERVICES, "id")
            .value("provider_id", provider_id)
            .value("service_name", &input.service_name)
            .value("description", input.description.clone());
        if let Some(catalog_id) = input.catalog_id {
            insert = insert.value("catalog_id", catalog_id);
        }
        db.insert_with_identity(insert).await
    }

    /// Delete one service, only if it belongs to `provider_id`.
    pub async fn delete(provider_id: &str, service_id: i64, db: &QueryRouter) -> Result<u64, DbError> {
        let sql = format!("DELETE FROM {PROVIDER_SERVICES} WHERE id = ? AND provider_id = ?");
        db.write(
            Query::new(PROVIDER_SERVICES, sql)
                .bind(service_id)
                .bind(provider_id),
        )
        .await
    }
}
