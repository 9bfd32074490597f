use serde::{Deserialize, Serialize};

use crate::domains::schema::CLIENTS;
use crate::kernel::database::{DbError, FromRecord, Query, QueryRouter, Row, UpsertByKey};

/// Client fiscal record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,
    pub code: Option<String>,
    pub name: Option<String>,
    pub tax_id: Option<String>,
    pub address: Option<String>,
    pub active: bool,
    pub registered_at: Option<String>,
}

/// Input for saving a client; `id`, `code` and `name` are validated upstream.
#[derive(Debug, Clone)]
pub struct SaveClient {
    pub id: String,
    pub code: String,
    pub name: String,
    pub tax_id: String,
    pub address: String,
    pub active: bool,
    pub registered_at: String,
}

impl FromRecord for Client {
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

impl Client {
    pub async fn find_all(db: &QueryRouter) -> Result<Vec<Self>, DbError> {
        let sql = format!(
            "SELECT id, code, name, tax_id, address, active, registered_at FROM {CLIENTS} ORDER BY id"
        );
        db.fetch_all(Query::new(CLIENTS, sql))
            .await?
            .iter()
            .map(Self::from_record)
            .collect()
    }

    pub async fn upsert(input: &SaveClient, db: &QueryRouter) -> Result<u64, DbError> {
        let upsert = UpsertByKey::new(CLIENTS, "id", &input.id)
            .set("code", &input.code)
            .set("name", &input.name)
            .set("tax_id", &input.tax_id)
            .set("address", &input.address)
            .set("active", input.active)
            .set("registered_at", &input.registered_at);
        db.upsert(upsert).await
    }

    pub async fn delete(id: &str, db: &QueryRouter) -> Result<u64, DbError> {
        let sql = format!("DELETE FROM {CLIENTS} WHERE id = ?");
        db.write(Query::new(CLIENTS, sql).bind(id)).await
    }
}
