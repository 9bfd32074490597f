//! Provider fiscal records and their services, branches and contacts.

use axum::{
    extract::{Extension, Path},
    Json,
};
use serde_json::{json, Value};
use tracing::info;

use crate::domains::providers::{
    BranchData, ContactData, CreateServiceInput, CreatedService, Provider, ProviderBranch,
    ProviderContact, ProviderData, ProviderService, SaveProviderInput, SavedProvider, ServiceData,
};
use crate::server::app::AppState;
use crate::server::error::{deleted, ApiError, ApiResult};

pub async fn list_providers(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<Vec<ProviderData>>> {
    let providers = Provider::find_all(&state.db).await?;
    Ok(Json(providers.into_iter().map(Into::into).collect()))
}

/// Upsert by id, or create under a generated `PROV-nnnn` id when none is given.
pub async fn save_provider(
    Extension(state): Extension<AppState>,
    Json(input): Json<SaveProviderInput>,
) -> ApiResult<Json<SavedProvider>> {
    let provider = input.to_model();

    let id = match input.id() {
        Some(id) => {
            Provider::upsert(id, &provider, &state.db).await?;
            id.to_string()
        }
        None => {
            let id = Provider::create_with_generated_id(&provider, &state.db).await?;
            info!(provider_id = %id, "Provider created");
            id
        }
    };

    Ok(Json(SavedProvider {
        id,
        registered_at: provider.registered_at,
    }))
}

pub async fn delete_provider(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    deleted(Provider::delete(&id, &state.db).await?, "Provider")
}

pub async fn providers_by_service(
    Extension(state): Extension<AppState>,
    Path(catalog_id): Path<i64>,
) -> ApiResult<Json<Vec<ProviderData>>> {
    let providers = Provider::find_active_by_catalog(catalog_id, &state.db).await?;
    Ok(Json(providers.into_iter().map(Into::into).collect()))
}

pub async fn list_services(
    Extension(state): Extension<AppState>,
    Path(provider_id): Path<String>,
) -> ApiResult<Json<Vec<ServiceData>>> {
    let services = ProviderService::find_for_provider(&provider_id, &state.db).await?;
    Ok(Json(services.into_iter().map(Into::into).collect()))
}

pub async fn create_service(
    Extension(state): Extension<AppState>,
    Path(provider_id): Path<String>,
    Json(input): Json<CreateServiceInput>,
) -> ApiResult<Json<CreatedService>> {
    let service = input
        .to_model()
        .ok_or_else(|| ApiError::BadRequest("serviceName is required".into()))?;
    let id = ProviderService::create(&provider_id, &service, &state.db).await?;
    Ok(Json(CreatedService { id }))
}

pub async fn delete_service(
    Extension(state): Extension<AppState>,
    Path((provider_id, service_id)): Path<(String, i64)>,
) -> ApiResult<Json<Value>> {
    deleted(
        ProviderService::delete(&provider_id, service_id, &state.db).await?,
        "Service",
    )
}

pub async fn list_branches(
    Extension(state): Extension<AppState>,
    Path(provider_id): Path<String>,
) -> ApiResult<Json<Vec<BranchData>>> {
    let branches = ProviderBranch::find_for_provider(&provider_id, &state.db).await?;
    Ok(Json(branches.into_iter().map(Into::into).collect()))
}

pub async fn save_branch(
    Extension(state): Extension<AppState>,
    Path(provider_id): Path<String>,
    Json(input): Json<BranchData>,
) -> ApiResult<Json<Value>> {
    let branch = input.into_model(&provider_id);
    if branch.id.is_empty() {
        return Err(ApiError::BadRequest("id is required".into()));
    }
    branch.upsert(&state.db).await?;
    Ok(Json(json!({ "id": branch.id })))
}

pub async fn delete_branch(
    Extension(state): Extension<AppState>,
    Path((provider_id, branch_id)): Path<(String, String)>,
) -> ApiResult<Json<Value>> {
    deleted(
        ProviderBranch::delete(&provider_id, &branch_id, &state.db).await?,
        "Branch",
    )
}

pub async fn list_contacts(
    Extension(state): Extension<AppState>,
    Path(provider_id): Path<String>,
) -> ApiResult<Json<Vec<ContactData>>> {
    let contacts = ProviderContact::find_for_provider(&provider_id, &state.db).await?;
    Ok(Json(contacts.into_iter().map(Into::into).collect()))
}

pub async fn save_contact(
    Extension(state): Extension<AppState>,
    Path(provider_id): Path<String>,
    Json(input): Json<ContactData>,
) -> ApiResult<Json<Value>> {
    let contact = input.into_model(&provider_id);
    if contact.id.is_empty() {
        return Err(ApiError::BadRequest("id is required".into()));
    }
    contact.upsert(&state.db).await?;
    Ok(Json(json!({ "id": contact.id })))
}

pub async fn delete_contact(
    Extension(state): Extension<AppState>,
    Path((provider_id, contact_id)): Path<(String, String)>,
) -> ApiResult<Json<Value>> {
    deleted(
        ProviderContact::delete(&provider_id, &contact_id, &state.db).await?,
        "Contact",
    )
}
