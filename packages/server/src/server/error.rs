//! HTTP-edge errors.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::kernel::database::DbError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Database(#[from] DbError),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            // Dangling references are the caller's mistake.
            ApiError::Database(e) if e.is_foreign_key_violation() => StatusCode::BAD_REQUEST,
            ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::BadRequest(m) | ApiError::NotFound(m) => m.clone(),
            ApiError::Database(e) if status == StatusCode::BAD_REQUEST => {
                format!("Referenced record does not exist ({})", display_intent(e))
            }
            ApiError::Database(e) => {
                error!(error = %e, "Database error");
                "Database error".to_string()
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

fn display_intent(e: &DbError) -> String {
    e.intent()
        .map(|intent| intent.to_string())
        .unwrap_or_else(|| "unknown statement".to_string())
}

/// 404 when a delete touched nothing.
pub fn deleted(count: u64, what: &str) -> ApiResult<Json<serde_json::Value>> {
    if count == 0 {
        return Err(ApiError::NotFound(format!("{} not found", what)));
    }
    Ok(Json(json!({ "deleted": count })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(
            ApiError::BadRequest("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn translation_failures_are_server_errors() {
        let err = ApiError::from(DbError::Translation("bad".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn zero_deletions_is_not_found() {
        assert!(matches!(deleted(0, "Provider"), Err(ApiError::NotFound(_))));
        assert_eq!(deleted(2, "Provider").unwrap().0, json!({ "deleted": 2 }));
    }
}
