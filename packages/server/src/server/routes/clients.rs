use axum::{
    extract::{Extension, Path},
    Json,
};
use serde_json::Value;

use crate::domains::clients::{Client, ClientData, SaveClientInput, SavedClient};
use crate::server::app::AppState;
use crate::server::error::{deleted, ApiError, ApiResult};

pub async fn list_clients(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<Vec<ClientData>>> {
    let clients = Client::find_all(&state.db).await?;
    Ok(Json(clients.into_iter().map(Into::into).collect()))
}

pub async fn save_client(
    Extension(state): Extension<AppState>,
    Json(input): Json<SaveClientInput>,
) -> ApiResult<Json<SavedClient>> {
    let client = input
        .to_model()
        .map_err(|message| ApiError::BadRequest(message.to_string()))?;
    Client::upsert(&client, &state.db).await?;
    Ok(Json(SavedClient { id: client.id }))
}

pub async fn delete_client(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    deleted(Client::delete(&id, &state.db).await?, "Client")
}
