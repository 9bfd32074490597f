//! Application setup and server configuration.

use axum::{
    extract::Extension,
    http::{header::CONTENT_TYPE, Method},
    routing::{delete, get},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::database::QueryRouter;
use crate::server::routes::{catalog, clients, health_handler, providers};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: QueryRouter,
}

/// Build the Axum application router over an already-bootstrapped database.
pub fn build_app(db: QueryRouter) -> Router {
    let app_state = AppState { db };

    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        // Providers and their children
        .route(
            "/api/providers",
            get(providers::list_providers).post(providers::save_provider),
        )
        .route("/api/providers/:id", delete(providers::delete_provider))
        .route(
            "/api/providers/by-service/:catalog_id",
            get(providers::providers_by_service),
        )
        .route(
            "/api/providers/:id/services",
            get(providers::list_services).post(providers::create_service),
        )
        .route(
            "/api/providers/:id/services/:service_id",
            delete(providers::delete_service),
        )
        .route(
            "/api/providers/:id/branches",
            get(providers::list_branches).post(providers::save_branch),
        )
        .route(
            "/api/providers/:id/branches/:branch_id",
            delete(providers::delete_branch),
        )
        .route(
            "/api/providers/:id/contacts",
            get(providers::list_contacts).post(providers::save_contact),
        )
        .route(
            "/api/providers/:id/contacts/:contact_id",
            delete(providers::delete_contact),
        )
        // Reference data
        .route("/api/catalog/services", get(catalog::list_catalog))
        // Clients
        .route(
            "/api/clients",
            get(clients::list_clients).post(clients::save_client),
        )
        .route("/api/clients/:id", delete(clients::delete_client))
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
