use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domains::schema::{PROVIDERS, PROVIDER_SERVICES, SERVICE_CATALOG};
use crate::kernel::database::{
    DbError, FromRecord, IdentitySequence, Query, QueryRouter, Row, UpsertByKey,
};

/// Issues `PROV-0001`, `PROV-0002`, ... for providers created without an id.
pub const PROVIDER_IDS: IdentitySequence = IdentitySequence::new(PROVIDERS, "id", "PROV", 4);

/// Attempts at a generated id before the unique violation is returned.
const MAX_ID_ATTEMPTS: u32 = 3;

const COLUMNS: &str = "id, code, name, tax_id, address, active, registered_at";

/// Provider fiscal record - the parent of services, branches and contacts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: String,
    pub code: Option<String>,
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub address: Option<String>,
    pub active: bool,
    pub registered_at: Option<String>,
}

/// Writable attributes of a provider; the id travels separately.
#[derive(Debug, Clone, Default)]
pub struct SaveProvider {
    pub code: String,
    pub name: String,
    pub tax_id: String,
    pub address: String,
    pub active: bool,
    pub registered_at: String,
}

impl SaveProvider {
    /// Registration timestamp for records that arrive without one.
    pub fn now() -> String {
        Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl FromRecord for Provider {
    fn from_record(row: &Row) -> Result<Self, DbError> {
        Ok(Self {
            id: row.required_text("id")?,
            code: row.text("code")?,
            name: row.text("name")?,
            tax_id: row.text("tax_id")?,
            address: row.text("address")?,
            active: row.flag("active")?,
            registered_at: row.text("registered_at")?,
        })
    }
}

impl Provider {
    pub async fn find_all(db: &QueryRouter) -> Result<Vec<Self>, DbError> {
        let sql = format!("SELECT {COLUMNS} FROM {PROVIDERS} ORDER BY id");
        db.fetch_all(Query::new(PROVIDERS, sql))
            .await?
            .iter()
            .map(Self::from_record)
            .collect()
    }

    pub async fn find_by_id(id: &str, db: &QueryRouter) -> Result<Option<Self>, DbError> {
        let sql = format!("SELECT {COLUMNS} FROM {PROVIDERS} WHERE id = ?");
        db.fetch_optional(Query::new(PROVIDERS, sql).bind(id))
            .await?
            .as_ref()
            .map(Self::from_record)
            .transpose()
    }

    /// Active providers offering a catalog service, either linked by
    /// `catalog_id` or whose service name equals the entry's sub-module.
    pub async fn find_active_by_catalog(
        catalog_id: i64,
        db: &QueryRouter,
    ) -> Result<Vec<Self>, DbError> {
        let sql = format!(
            r#"
            SELECT DISTINCT p.id, p.code, p.name, p.tax_id, p.address, p.active, p.registered_at
            FROM {PROVIDERS} p
            JOIN {PROVIDER_SERVICES} s ON s.provider_id = p.id
            WHERE p.active = 1
              AND (s.catalog_id = ?
                   OR s.service_name IN (SELECT sub_module FROM {SERVICE_CATALOG} WHERE id = ?))
            ORDER BY p.id
            "#
        );
        db.fetch_all(Query::new(PROVIDERS, sql).bind(catalog_id).bind(catalog_id))
            .await?
            .iter()
            .map(Self::from_record)
            .collect()
    }

    /// Insert or replace the provider stored under `id`.
    pub async fn upsert(id: &str, input: &SaveProvider, db: &QueryRouter) -> Result<u64, DbError> {
        let upsert = UpsertByKey::new(PROVIDERS, "id", id)
            .set("code", &input.code)
            .set("name", &input.name)
            .set("tax_id", &input.tax_id)
            .set("address", &input.address)
            .set("active", input.active)
            .set("registered_at", &input.registered_at);
        db.upsert(upsert).await
    }

    /// Plain insert; fails with a unique violation if `id` is taken.
    pub async fn insert(id: &str, input: &SaveProvider, db: &QueryRouter) -> Result<u64, DbError> {
        let sql = format!("INSERT INTO {PROVIDERS} ({COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?)");
        let query = Query::new(PROVIDERS, sql)
            .bind(id)
            .bind(&input.code)
            .bind(&input.name)
            .bind(&input.tax_id)
            .bind(&input.address)
            .bind(input.active)
            .bind(&input.registered_at);
        db.write(query).await
    }

    /// Store a new provider under the next generated id and return that id.
    ///
    /// Two concurrent callers can compute the same id; the loser sees a
    /// unique violation and allocates again instead of overwriting.
    pub async fn create_with_generated_id(
        input: &SaveProvider,
        db: &QueryRouter,
    ) -> Result<String, DbError> {
        let mut attempt = 1;
        loop {
            let id = PROVIDER_IDS.next(db).await?;
            match Self::insert(&id, input, db).await {
                Ok(_) => return Ok(id),
                Err(e) if e.is_unique_violation() && attempt < MAX_ID_ATTEMPTS => {
                    warn!(id = %id, attempt, "Generated provider id already taken, retrying");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Delete a provider; services, branches and contacts cascade.
    pub async fn delete(id: &str, db: &QueryRouter) -> Result<u64, DbError> {
        let sql = format!("DELETE FROM {PROVIDERS} WHERE id = ?");
        db.write(Query::new(PROVIDERS, sql).bind(id)).await
    }
}
