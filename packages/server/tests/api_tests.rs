//! HTTP routes driven through the router with an in-memory embedded engine.

mod common;

use crate::common::{catalog_id, create_provider, send, EnterpriseHarness, TestHarness};
use axum::http::{Method, StatusCode};
use serde_json::json;
use test_context::test_context;

// =============================================================================
// Health
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn health_reports_engine_and_pool(ctx: &TestHarness) {
    let (status, body) = ctx.get("/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["engine"], "embedded");
    assert_eq!(body["database"]["status"], "ok");
    assert_eq!(body["connection_pool"]["max_connections"], 1);
}

// =============================================================================
// Providers
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn provider_upsert_then_generated_id(ctx: &TestHarness) {
    let (status, body) = ctx
        .post(
            "/api/providers",
            json!({ "id": "PROV-0001", "code": "A1", "name": "Acme", "active": true }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "PROV-0001");
    assert!(body["registeredAt"].as_str().is_some_and(|at| !at.is_empty()));

    let (status, _) = ctx
        .post(
            "/api/providers",
            json!({ "id": "PROV-0001", "code": "A1", "name": "Acme", "active": false }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, providers) = ctx.get("/api/providers").await;
    let providers = providers.as_array().unwrap();
    assert_eq!(providers.len(), 1);
    assert_eq!(providers[0]["active"], false);
    assert_eq!(providers[0]["taxId"], "");

    let (status, body) = ctx
        .post("/api/providers", json!({ "code": "B1", "name": "Beta", "active": true }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "PROV-0002");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn deleting_a_missing_provider_is_not_found(ctx: &TestHarness) {
    let (status, body) = ctx.delete("/api/providers/PROV-9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());

    create_provider(&ctx.db, "PROV-0001", "Acme", true).await.unwrap();
    let (status, body) = ctx.delete("/api/providers/PROV-0001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "deleted": 1 }));
}

// =============================================================================
// Services
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn services_roundtrip_through_routes(ctx: &TestHarness) {
    create_provider(&ctx.db, "PROV-0001", "Acme", true).await.unwrap();
    let fletes = catalog_id(&ctx.db, "FLETES").await.unwrap();

    let (status, created) = ctx
        .post(
            "/api/providers/PROV-0001/services",
            json!({ "serviceName": "FLETES", "description": "Local", "catalogId": fletes }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let service_id = created["id"].as_i64().unwrap();

    let (_, services) = ctx.get("/api/providers/PROV-0001/services").await;
    assert_eq!(services[0]["id"], service_id);
    assert_eq!(services[0]["providerId"], "PROV-0001");
    assert_eq!(services[0]["catalogId"], fletes);

    let (_, by_service) = ctx
        .get(&format!("/api/providers/by-service/{}", fletes))
        .await;
    assert_eq!(by_service.as_array().unwrap().len(), 1);
    assert_eq!(by_service[0]["id"], "PROV-0001");

    let (status, _) = ctx
        .delete(&format!("/api/providers/PROV-0002/services/{}", service_id))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = ctx
        .delete(&format!("/api/providers/PROV-0001/services/{}", service_id))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn service_validation_and_dangling_provider(ctx: &TestHarness) {
    let (status, _) = ctx
        .post("/api/providers/PROV-0001/services", json!({ "serviceName": " " }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = ctx
        .post("/api/providers/PROV-0404/services", json!({ "serviceName": "FLETES" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("provider_services"));
}

// =============================================================================
// Branches and contacts
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn branches_use_the_path_provider(ctx: &TestHarness) {
    create_provider(&ctx.db, "PROV-0001", "Acme", true).await.unwrap();

    let (status, body) = ctx
        .post(
            "/api/providers/PROV-0001/branches",
            json!({
                "id": "SUC-1",
                "providerId": "PROV-0999",
                "kind": "FISCAL",
                "postalCode": "06600",
                "exteriorNumber": "222"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "SUC-1");

    let (_, branches) = ctx.get("/api/providers/PROV-0001/branches").await;
    assert_eq!(branches[0]["providerId"], "PROV-0001");
    assert_eq!(branches[0]["postalCode"], "06600");
    assert_eq!(branches[0]["interiorNumber"], serde_json::Value::Null);

    let (status, _) = ctx
        .post("/api/providers/PROV-0001/branches", json!({ "kind": "FISCAL" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx.delete("/api/providers/PROV-0001/branches/SUC-1").await;
    assert_eq!(status, StatusCode::OK);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn contacts_upsert_by_id(ctx: &TestHarness) {
    create_provider(&ctx.db, "PROV-0001", "Acme", true).await.unwrap();

    for phone in ["555-0100", "555-0199"] {
        let (status, _) = ctx
            .post(
                "/api/providers/PROV-0001/contacts",
                json!({ "id": "AG-1", "name": "Ana", "phone": phone, "extension": "12" }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, contacts) = ctx.get("/api/providers/PROV-0001/contacts").await;
    let contacts = contacts.as_array().unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0]["phone"], "555-0199");
    assert_eq!(contacts[0]["extension"], "12");

    let (status, _) = ctx.delete("/api/providers/PROV-0001/contacts/AG-2").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn blank_child_ids_are_rejected(ctx: &TestHarness) {
    create_provider(&ctx.db, "PROV-0001", "Acme", true).await.unwrap();

    for uri in ["/api/providers/PROV-0001/branches", "/api/providers/PROV-0001/contacts"] {
        let (status, body) = ctx.post(uri, json!({ "id": "   ", "name": "Blank" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "id is required");
    }

    let (_, branches) = ctx.get("/api/providers/PROV-0001/branches").await;
    assert!(branches.as_array().unwrap().is_empty());
    let (_, contacts) = ctx.get("/api/providers/PROV-0001/contacts").await;
    assert!(contacts.as_array().unwrap().is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn generated_ids_continue_past_four_digits(ctx: &TestHarness) {
    create_provider(&ctx.db, "PROV-9999", "Last", true).await.unwrap();

    for expected in ["PROV-10000", "PROV-10001"] {
        let (status, body) = ctx
            .post("/api/providers", json!({ "code": "W", "name": "Wide", "active": true }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], expected);
    }
}

// =============================================================================
// Catalog and clients
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn catalog_lists_seeded_entries(ctx: &TestHarness) {
    let (status, catalog) = ctx.get("/api/catalog/services").await;
    assert_eq!(status, StatusCode::OK);

    let entries = catalog.as_array().unwrap();
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0]["module"], "LOGISTICA");
    assert_eq!(entries[0]["subModule"], "ADUANA");
}

#[test_context(TestHarness)]
#[tokio::test]
async fn clients_require_id_code_and_name(ctx: &TestHarness) {
    let (status, body) = ctx
        .post("/api/clients", json!({ "id": "CLI-1", "name": "Beta" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "id, code and name are required");

    let (status, body) = ctx
        .post(
            "/api/clients",
            json!({ "id": "CLI-1", "code": "B1", "name": "Beta", "active": true }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "CLI-1");

    let (_, clients) = ctx.get("/api/clients").await;
    assert_eq!(clients[0]["active"], true);

    let (status, body) = ctx.delete("/api/clients/CLI-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], 1);
}

// =============================================================================
// Enterprise engine (requires Docker)
// =============================================================================

#[test_context(EnterpriseHarness)]
#[tokio::test]
#[ignore = "requires Docker"]
async fn enterprise_provider_routes(ctx: &EnterpriseHarness) {
    let (status, body) = send(
        ctx.app(),
        Method::POST,
        "/api/providers",
        Some(json!({ "code": "A1", "name": "Acme", "active": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "PROV-0001");

    let (status, health) = send(ctx.app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["engine"], "enterprise");
    assert_eq!(
        health["connection_pool"]["max_connections"],
        ctx.config.pool_size
    );

    let (_, providers) = send(ctx.app(), Method::GET, "/api/providers", None).await;
    assert_eq!(providers[0]["active"], true);
}
