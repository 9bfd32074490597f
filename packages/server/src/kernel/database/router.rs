//! The single entry point for executing statements.

use std::sync::Arc;

use tracing::{debug, error};

use super::backend::{Backend, PoolStatus};
use super::dialect::{Dialect, Rendered};
use super::embedded::EmbeddedBackend;
use super::enterprise::EnterpriseBackend;
use super::error::{DbError, Intent, Operation};
use super::statement::{InsertWithIdentity, Query, Statement, UpsertByKey};
use super::value::Row;
use crate::config::DatabaseConfig;

/// Result of executing a [`Statement`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Rows(Vec<Row>),
    Affected(u64),
    Identity(i64),
}

/// Routes typed statements through the dialect of the configured engine.
///
/// Cheap to clone; clones share the same backend.
#[derive(Clone)]
pub struct QueryRouter {
    backend: Arc<dyn Backend>,
}

impl QueryRouter {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Open the backend selected by configuration.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, DbError> {
        let backend: Arc<dyn Backend> = match config {
            DatabaseConfig::Embedded { path } => Arc::new(EmbeddedBackend::open(path).await?),
            DatabaseConfig::Enterprise(enterprise) => {
                Arc::new(EnterpriseBackend::connect(enterprise).await?)
            }
        };
        Ok(Self::new(backend))
    }

    /// Router over a private in-memory embedded database.
    pub async fn in_memory() -> Result<Self, DbError> {
        Ok(Self::new(Arc::new(EmbeddedBackend::open_in_memory().await?)))
    }

    pub fn dialect(&self) -> Dialect {
        self.backend.dialect()
    }

    pub fn pool_status(&self) -> PoolStatus {
        self.backend.pool_status()
    }

    pub async fn execute(&self, statement: Statement) -> Result<Outcome, DbError> {
        match statement {
            Statement::Read(query) => self.fetch_all(query).await.map(Outcome::Rows),
            Statement::Write(query) => self.write(query).await.map(Outcome::Affected),
            Statement::UpsertByKey(upsert) => self.upsert(upsert).await.map(Outcome::Affected),
            Statement::InsertWithIdentity(insert) => self
                .insert_with_identity(insert)
                .await
                .map(Outcome::Identity),
        }
    }

    pub async fn fetch_all(&self, query: Query) -> Result<Vec<Row>, DbError> {
        let intent = intent(Operation::Read, &query.table);
        let rendered = self.translate(&intent, self.dialect().render_query(&query))?;
        self.backend
            .fetch_all(&rendered.sql, &rendered.params)
            .await
            .map_err(|source| failed(intent, source))
    }

    pub async fn fetch_optional(&self, query: Query) -> Result<Option<Row>, DbError> {
        Ok(self.fetch_all(query).await?.into_iter().next())
    }

    /// Plain insert/update/delete; returns rows affected.
    pub async fn write(&self, query: Query) -> Result<u64, DbError> {
        let intent = intent(Operation::Write, &query.table);
        let rendered = self.translate(&intent, self.dialect().render_query(&query))?;
        self.backend
            .execute(&rendered.sql, &rendered.params)
            .await
            .map_err(|source| failed(intent, source))
    }

    pub async fn upsert(&self, upsert: UpsertByKey) -> Result<u64, DbError> {
        let intent = intent(Operation::Upsert, &upsert.table);
        let rendered = self.translate(&intent, self.dialect().render_upsert(&upsert))?;
        self.backend
            .execute(&rendered.sql, &rendered.params)
            .await
            .map_err(|source| failed(intent, source))
    }

    /// Insert and return the engine-generated integer key.
    pub async fn insert_with_identity(&self, insert: InsertWithIdentity) -> Result<i64, DbError> {
        let intent = intent(Operation::InsertWithIdentity, &insert.table);
        let rendered = self.translate(&intent, self.dialect().render_insert(&insert))?;
        self.backend
            .insert_returning_identity(&rendered.sql, &rendered.params)
            .await
            .map_err(|source| failed(intent, source))
    }

    /// Greatest `key_column` value starting with `prefix-`.
    pub async fn latest_key(
        &self,
        table: &str,
        key_column: &str,
        prefix: &str,
    ) -> Result<Option<String>, DbError> {
        let intent = intent(Operation::Read, table);
        let rendered = self.translate(
            &intent,
            self.dialect().render_latest_key(table, key_column, prefix),
        )?;
        let rows = self
            .backend
            .fetch_all(&rendered.sql, &rendered.params)
            .await
            .map_err(|source| failed(intent, source))?;

        match rows.first() {
            Some(row) => row.text(key_column),
            None => Ok(None),
        }
    }

    /// Execute DDL produced by the dialect. Used by the bootstrapper only.
    pub(crate) async fn execute_ddl(&self, table: &str, sql: &str) -> Result<u64, DbError> {
        let intent = intent(Operation::Write, table);
        self.backend
            .execute(sql, &[])
            .await
            .map_err(|source| failed(intent, source))
    }

    /// Round-trip a trivial query.
    pub async fn ping(&self) -> Result<(), DbError> {
        self.fetch_all(Query::new("health", "SELECT 1 AS ok")).await?;
        Ok(())
    }

    fn translate(
        &self,
        intent: &Intent,
        rendered: Result<Rendered, DbError>,
    ) -> Result<Rendered, DbError> {
        rendered.inspect_err(|err| {
            error!(
                operation = %intent.operation,
                table = %intent.table,
                dialect = %self.dialect(),
                error = %err,
                "Statement cannot be translated"
            );
        })
    }
}

fn intent(operation: Operation, table: &str) -> Intent {
    Intent {
        operation,
        table: table.to_string(),
    }
}

fn failed(intent: Intent, source: sqlx::Error) -> DbError {
    debug!(
        operation = %intent.operation,
        table = %intent.table,
        error = %source,
        "Statement failed"
    );
    DbError::Execution { intent, source }
}
