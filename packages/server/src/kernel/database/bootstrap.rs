//! Startup schema bootstrap: create tables, add late columns, seed reference data.
//!
//! Every step is best-effort. Conditions that only mean "already done" are
//! swallowed; anything else is logged and reported, never fatal.

use tracing::{debug, error, info, warn};

use super::dialect::Dialect;
use super::error::DbError;
use super::router::QueryRouter;
use super::schema::{SchemaPlan, SeedSet};
use super::statement::Query;

/// What a bootstrap run did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    /// Tables whose create statement succeeded. On the embedded engine this
    /// includes tables that already existed.
    pub tables_ensured: Vec<String>,
    /// Tables the enterprise engine reported as already present.
    pub tables_already_present: Vec<String>,
    pub tables_failed: Vec<String>,
    /// `table.column` entries added by this run.
    pub columns_added: Vec<String>,
    pub rows_seeded: usize,
}

impl BootstrapReport {
    pub fn is_clean(&self) -> bool {
        self.tables_failed.is_empty()
    }
}

pub struct SchemaBootstrapper<'a> {
    router: &'a QueryRouter,
    plan: &'a SchemaPlan,
}

impl<'a> SchemaBootstrapper<'a> {
    pub fn new(router: &'a QueryRouter, plan: &'a SchemaPlan) -> Self {
        Self { router, plan }
    }

    /// Tables, then added columns, then seeds.
    pub async fn run(&self) -> BootstrapReport {
        let mut report = BootstrapReport::default();

        self.create_tables(&mut report).await;
        self.add_columns(&mut report).await;
        for seed in &self.plan.seeds {
            match self.seed_if_empty(seed).await {
                Ok(inserted) => report.rows_seeded += inserted,
                Err(e) => warn!(table = seed.table, error = %e, "Seeding failed"),
            }
        }

        info!(
            dialect = %self.router.dialect(),
            ensured = report.tables_ensured.len(),
            already_present = report.tables_already_present.len(),
            failed = report.tables_failed.len(),
            columns_added = report.columns_added.len(),
            rows_seeded = report.rows_seeded,
            "Schema verified"
        );
        report
    }

    async fn create_tables(&self, report: &mut BootstrapReport) {
        let dialect = self.router.dialect();

        for table in &self.plan.tables {
            let ddl = match dialect.render_create_table(table) {
                Ok(ddl) => ddl,
                Err(e) => {
                    error!(table = table.name, error = %e, "Invalid table definition");
                    report.tables_failed.push(table.name.to_string());
                    continue;
                }
            };

            match self.router.execute_ddl(table.name, &ddl).await {
                Ok(_) => report.tables_ensured.push(table.name.to_string()),
                Err(e) if dialect == Dialect::Enterprise && e.is_already_exists() => {
                    debug!(table = table.name, "Table already exists");
                    report.tables_already_present.push(table.name.to_string());
                }
                Err(e) => {
                    error!(table = table.name, error = %e, "Error creating table");
                    report.tables_failed.push(table.name.to_string());
                }
            }
        }
    }

    /// Errors are swallowed: the column may already exist, or the engine may
    /// not accept this ALTER shape.
    async fn add_columns(&self, report: &mut BootstrapReport) {
        let dialect = self.router.dialect();

        for added in &self.plan.added_columns {
            let ddl = match dialect.render_add_column(added.table, &added.column) {
                Ok(ddl) => ddl,
                Err(e) => {
                    error!(table = added.table, column = added.column.name, error = %e, "Invalid column definition");
                    continue;
                }
            };

            match self.router.execute_ddl(added.table, &ddl).await {
                Ok(_) => {
                    info!(table = added.table, column = added.column.name, "Column added");
                    report
                        .columns_added
                        .push(format!("{}.{}", added.table, added.column.name));
                }
                Err(e) => {
                    debug!(table = added.table, column = added.column.name, error = %e, "Column not added");
                }
            }
        }
    }

    /// Insert the seed rows one at a time iff the table is empty.
    async fn seed_if_empty(&self, seed: &SeedSet) -> Result<usize, DbError> {
        let existing = row_count(self.router, seed.table).await?;
        if existing != 0 {
            debug!(table = seed.table, existing, "Seed skipped, table not empty");
            return Ok(0);
        }

        let placeholders = vec!["?"; seed.columns.len()].join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            seed.table,
            seed.columns.join(", "),
            placeholders
        );

        let mut inserted = 0;
        for values in &seed.rows {
            let query = values
                .iter()
                .cloned()
                .fold(Query::new(seed.table, sql.as_str()), Query::bind);
            self.router.write(query).await?;
            inserted += 1;
        }

        info!(table = seed.table, rows = inserted, "Seeded reference data");
        Ok(inserted)
    }
}

/// `SELECT COUNT(*)` on `table`.
pub async fn row_count(router: &QueryRouter, table: &str) -> Result<i64, DbError> {
    let sql = format!("SELECT COUNT(*) AS total FROM {}", table);
    let row = router.fetch_optional(Query::new(table, sql)).await?;
    match row {
        Some(row) => Ok(row.integer("total")?.unwrap_or(0)),
        None => Ok(0),
    }
}
