use axum::{extract::Extension, Json};

use crate::domains::catalog::{CatalogEntry, CatalogEntryData};
use crate::server::app::AppState;
use crate::server::error::ApiResult;

pub async fn list_catalog(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<Vec<CatalogEntryData>>> {
    let entries = CatalogEntry::find_all(&state.db).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}
