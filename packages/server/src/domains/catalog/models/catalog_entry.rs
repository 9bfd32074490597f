use serde::{Deserialize, Serialize};

use crate::domains::schema::SERVICE_CATALOG;
use crate::kernel::database::{DbError, FromRecord, Query, QueryRouter, Row};

/// Module/sub-module pair providers can be linked to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: i64,
    pub module: String,
    pub sub_module: String,
}

impl FromRecord for CatalogEntry {
    fn from_record(row: &Row) -> Result<Self, DbError> {
        Ok(Self {
            id: row.required_integer("id")?,
            module: row.required_text("module")?,
            sub_module: row.required_text("sub_module")?,
        })
    }
}

impl CatalogEntry {
    pub async fn find_all(db: &QueryRouter) -> Result<Vec<Self>, DbError> {
        let sql = format!("SELECT id, module, sub_module FROM {SERVICE_CATALOG} ORDER BY module, sub_module");
        db.fetch_all(Query::new(SERVICE_CATALOG, sql))
            .await?
            .iter()
            .map(Self::from_record)
            .collect()
    }
}
