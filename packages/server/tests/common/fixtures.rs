//! Test fixtures for creating records directly through the models.

use catalog_core::domains::providers::{
    CreateService, Provider, ProviderBranch, ProviderContact, ProviderService, SaveProvider,
};
use catalog_core::kernel::database::{DbError, Query, QueryRouter};

pub fn provider_input(name: &str, active: bool) -> SaveProvider {
    SaveProvider {
        code: format!("C-{}", name.to_uppercase()),
        name: name.to_string(),
        tax_id: "XAXX010101000".to_string(),
        address: format!("{} street 1", name),
        active,
        registered_at: "2024-01-01T00:00:00.000Z".to_string(),
    }
}

pub async fn create_provider(
    db: &QueryRouter,
    id: &str,
    name: &str,
    active: bool,
) -> Result<(), DbError> {
    Provider::upsert(id, &provider_input(name, active), db).await?;
    Ok(())
}

pub async fn create_service(
    db: &QueryRouter,
    provider_id: &str,
    service_name: &str,
    catalog_id: Option<i64>,
) -> Result<i64, DbError> {
    let input = CreateService {
        service_name: service_name.to_string(),
        description: Some(format!("{} service", service_name)),
        catalog_id,
    };
    ProviderService::create(provider_id, &input, db).await
}

pub async fn create_branch(db: &QueryRouter, provider_id: &str, id: &str) -> Result<(), DbError> {
    let branch = ProviderBranch {
        id: id.to_string(),
        provider_id: provider_id.to_string(),
        name: Some(format!("Branch {}", id)),
        country: Some("MX".to_string()),
        ..Default::default()
    };
    branch.upsert(db).await?;
    Ok(())
}

pub async fn create_contact(db: &QueryRouter, provider_id: &str, id: &str) -> Result<(), DbError> {
    let contact = ProviderContact {
        id: id.to_string(),
        provider_id: provider_id.to_string(),
        name: Some(format!("Contact {}", id)),
        email: Some(format!("{}@example.com", id.to_lowercase())),
        ..Default::default()
    };
    contact.upsert(db).await?;
    Ok(())
}

/// Id of the catalog entry with the given sub-module.
pub async fn catalog_id(db: &QueryRouter, sub_module: &str) -> Result<i64, DbError> {
    let row = db
        .fetch_optional(
            Query::new("service_catalog", "SELECT id FROM service_catalog WHERE sub_module = ?")
                .bind(sub_module),
        )
        .await?
        .ok_or_else(|| DbError::Translation(format!("no catalog entry {}", sub_module)))?;
    row.required_integer("id")
}

pub async fn count_where(db: &QueryRouter, table: &str, provider_id: &str) -> Result<i64, DbError> {
    let sql = format!("SELECT COUNT(*) AS total FROM {} WHERE provider_id = ?", table);
    let row = db
        .fetch_optional(Query::new(table, sql).bind(provider_id))
        .await?;
    match row {
        Some(row) => row.required_integer("total"),
        None => Ok(0),
    }
}
