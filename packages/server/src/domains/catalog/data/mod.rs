use serde::{Deserialize, Serialize};

use crate::domains::catalog::models::CatalogEntry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntryData {
    pub id: i64,
    pub module: String,
    pub sub_module: String,
}

impl From<CatalogEntry> for CatalogEntryData {
    fn from(entry: CatalogEntry) -> Self {
        Self {
            id: entry.id,
            module: entry.module,
            sub_module: entry.sub_module,
        }
    }
}
