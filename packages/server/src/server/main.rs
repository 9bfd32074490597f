// Main entry point for the catalog API server

use anyhow::{Context, Result};
use catalog_core::{
    domains::schema::catalog_schema,
    kernel::database::{QueryRouter, SchemaBootstrapper},
    server::build_app,
    Config, DatabaseConfig,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,catalog_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting supplier catalog API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    match &config.database {
        DatabaseConfig::Embedded { path } => {
            tracing::info!(path = %path.display(), "Using embedded database")
        }
        DatabaseConfig::Enterprise(enterprise) => {
            tracing::info!(pool_size = enterprise.pool_size, "Using enterprise database")
        }
    }

    // Connect to database
    let db = QueryRouter::connect(&config.database)
        .await
        .context("Failed to connect to database")?;

    // Ensure schema and reference data before accepting requests
    let plan = catalog_schema();
    let report = SchemaBootstrapper::new(&db, &plan).run().await;
    if !report.is_clean() {
        tracing::warn!(
            failed = ?report.tables_failed,
            "Schema bootstrap incomplete, continuing"
        );
    }

    // Build application
    let app = build_app(db);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
