//! Schema bootstrap against both engines.

mod common;

use crate::common::{bootstrap, EnterpriseHarness, TestHarness};
use catalog_core::domains::catalog::CatalogEntry;
use catalog_core::domains::schema::{catalog_schema, SERVICE_CATALOG};
use catalog_core::kernel::database::{row_count, Query, QueryRouter};
use test_context::test_context;

fn table_count() -> usize {
    catalog_schema().tables.len()
}

async fn assert_second_run_is_a_no_op(db: &QueryRouter) {
    let before = row_count(db, SERVICE_CATALOG).await.unwrap();

    let report = bootstrap(db).await;
    assert!(report.is_clean(), "second run failed: {:?}", report);
    assert!(report.columns_added.is_empty());
    assert_eq!(report.rows_seeded, 0);
    assert_eq!(row_count(db, SERVICE_CATALOG).await.unwrap(), before);
}

// =============================================================================
// Embedded engine
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn fresh_database_gets_every_table_column_and_seed(ctx: &TestHarness) {
    let report = &ctx.bootstrap;

    assert!(report.is_clean(), "{:?}", report);
    assert_eq!(report.tables_ensured.len(), table_count());
    assert_eq!(
        report.columns_added,
        vec!["provider_services.catalog_id".to_string()]
    );
    assert_eq!(report.rows_seeded, 4);

    let entries = CatalogEntry::find_all(&ctx.db).await.unwrap();
    let sub_modules: Vec<&str> = entries.iter().map(|e| e.sub_module.as_str()).collect();
    assert_eq!(sub_modules, vec!["ADUANA", "CUSTODIAS", "FLETES", "SEGURO"]);
    assert!(entries.iter().all(|e| e.module == "LOGISTICA"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn bootstrap_twice_changes_nothing(ctx: &TestHarness) {
    assert_second_run_is_a_no_op(&ctx.db).await;
}

#[test_context(TestHarness)]
#[tokio::test]
async fn partially_emptied_catalog_is_not_reseeded(ctx: &TestHarness) {
    ctx.db
        .write(
            Query::new(SERVICE_CATALOG, "DELETE FROM service_catalog WHERE sub_module = ?")
                .bind("SEGURO"),
        )
        .await
        .unwrap();

    let report = bootstrap(&ctx.db).await;
    assert_eq!(report.rows_seeded, 0);
    assert_eq!(row_count(&ctx.db, SERVICE_CATALOG).await.unwrap(), 3);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn emptied_catalog_is_seeded_again(ctx: &TestHarness) {
    ctx.db
        .write(Query::new(SERVICE_CATALOG, "DELETE FROM service_catalog"))
        .await
        .unwrap();

    let report = bootstrap(&ctx.db).await;
    assert_eq!(report.rows_seeded, 4);
}

// =============================================================================
// Enterprise engine (requires Docker)
// =============================================================================

#[test_context(EnterpriseHarness)]
#[tokio::test]
#[ignore = "requires Docker"]
async fn enterprise_fresh_database_gets_every_table(ctx: &EnterpriseHarness) {
    let report = &ctx.bootstrap;

    assert!(report.is_clean(), "{:?}", report);
    assert_eq!(report.tables_ensured.len(), table_count());
    assert!(report.tables_already_present.is_empty());
    assert_eq!(report.rows_seeded, 4);
}

#[test_context(EnterpriseHarness)]
#[tokio::test]
#[ignore = "requires Docker"]
async fn enterprise_second_run_tolerates_existing_tables(ctx: &EnterpriseHarness) {
    assert_second_run_is_a_no_op(&ctx.db).await;

    let report = bootstrap(&ctx.db).await;
    assert_eq!(report.tables_already_present.len(), table_count());
    assert!(report.tables_ensured.is_empty());
}
