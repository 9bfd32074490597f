//! Test harnesses for the two engines.
//!
//! `TestHarness` runs against a private in-memory embedded database and needs
//! nothing external. `EnterpriseHarness` starts one shared Postgres container
//! on first use and gives every test its own freshly created database in it.

use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::{Context, Result};
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use catalog_core::domains::schema::catalog_schema;
use catalog_core::kernel::database::{BootstrapReport, QueryRouter, SchemaBootstrapper};
use catalog_core::server::build_app;
use catalog_core::{DatabaseConfig, EnterpriseConfig};
use serde_json::Value;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;
use tower::ServiceExt;

fn init_tracing() {
    // Run tests with: RUST_LOG=debug cargo test -- --nocapture
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Embedded-engine harness with the catalog schema already bootstrapped.
///
/// ```ignore
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let (status, body) = ctx.get("/api/providers").await;
/// }
/// ```
pub struct TestHarness {
    pub db: QueryRouter,
    /// Report of the bootstrap run performed during setup.
    pub bootstrap: BootstrapReport,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        init_tracing();
        let db = QueryRouter::in_memory()
            .await
            .context("Failed to open in-memory database")?;
        let bootstrap = bootstrap(&db).await;
        Ok(Self { db, bootstrap })
    }

    pub fn app(&self) -> Router {
        build_app(self.db.clone())
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        send(self.app(), Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        send(self.app(), Method::POST, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        send(self.app(), Method::DELETE, uri, None).await
    }
}

pub async fn bootstrap(db: &QueryRouter) -> BootstrapReport {
    let plan = catalog_schema();
    SchemaBootstrapper::new(db, &plan).run().await
}

/// Drive one request through the router and decode the JSON reply.
pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("valid request");

    let response = app.oneshot(request).await.expect("infallible router");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, value)
}

/// Shared Postgres container, started once for the whole test binary.
struct SharedPostgres {
    host: String,
    port: u16,
    // Keep the container alive for the entire test run
    _postgres: ContainerAsync<Postgres>,
}

static SHARED_POSTGRES: OnceCell<SharedPostgres> = OnceCell::const_new();
static DATABASE_COUNTER: AtomicUsize = AtomicUsize::new(0);

impl SharedPostgres {
    async fn init() -> Result<Self> {
        init_tracing();
        let postgres = Postgres::default()
            .with_tag("16")
            .start()
            .await
            .context("Failed to start Postgres container")?;

        let host = postgres.get_host().await?.to_string();
        let port = postgres.get_host_port_ipv4(5432).await?;
        Ok(Self {
            host,
            port,
            _postgres: postgres,
        })
    }

    async fn get() -> &'static Self {
        SHARED_POSTGRES
            .get_or_init(|| async {
                Self::init()
                    .await
                    .expect("Failed to start shared Postgres container")
            })
            .await
    }

    fn config(&self, database: &str) -> EnterpriseConfig {
        EnterpriseConfig {
            url: None,
            host: self.host.clone(),
            port: self.port,
            database: database.to_string(),
            user: "postgres".to_string(),
            password: "postgres".to_string(),
            pool_size: 5,
        }
    }
}

/// Enterprise-engine harness: a fresh, bootstrapped Postgres database per test.
pub struct EnterpriseHarness {
    pub db: QueryRouter,
    pub config: EnterpriseConfig,
    pub bootstrap: BootstrapReport,
}

impl AsyncTestContext for EnterpriseHarness {
    async fn setup() -> Self {
        Self::new()
            .await
            .expect("Failed to create enterprise test harness")
    }
}

impl EnterpriseHarness {
    pub async fn new() -> Result<Self> {
        let shared = SharedPostgres::get().await;

        let name = format!(
            "catalog_test_{}_{}",
            std::process::id(),
            DATABASE_COUNTER.fetch_add(1, Ordering::SeqCst)
        );
        let admin = sqlx::PgPool::connect(&format!(
            "postgresql://postgres:postgres@{}:{}/postgres",
            shared.host, shared.port
        ))
        .await
        .context("Failed to connect to admin database")?;
        sqlx::query(&format!("CREATE DATABASE {name}"))
            .execute(&admin)
            .await
            .context("Failed to create test database")?;
        admin.close().await;

        let config = shared.config(&name);
        let db = QueryRouter::connect(&DatabaseConfig::Enterprise(config.clone()))
            .await
            .context("Failed to connect to test database")?;
        let bootstrap = bootstrap(&db).await;
        Ok(Self {
            db,
            config,
            bootstrap,
        })
    }

    pub fn app(&self) -> Router {
        build_app(self.db.clone())
    }
}
