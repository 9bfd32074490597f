//! Connection providers for the two supported engines.

use async_trait::async_trait;
use serde::Serialize;

use super::dialect::Dialect;
use super::value::{Row, SqlValue};

/// Connection pool utilization, reported by the health endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PoolStatus {
    pub size: u32,
    pub idle_connections: usize,
    pub max_connections: u32,
}

/// Owns the live handle(s) to one engine and executes already-rendered SQL.
///
/// Exactly two implementations exist: [`EmbeddedBackend`] and
/// [`EnterpriseBackend`]. The query router holds one of them for the
/// lifetime of the process.
///
/// [`EmbeddedBackend`]: super::embedded::EmbeddedBackend
/// [`EnterpriseBackend`]: super::enterprise::EnterpriseBackend
#[async_trait]
pub trait Backend: Send + Sync {
    fn dialect(&self) -> Dialect;

    /// Run a statement that yields rows.
    async fn fetch_all(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, sqlx::Error>;

    /// Run a statement for its effect; returns rows affected.
    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<u64, sqlx::Error>;

    /// Run an insert and return the generated integer key, as one unit of
    /// work on one connection.
    async fn insert_returning_identity(
        &self,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<i64, sqlx::Error>;

    fn pool_status(&self) -> PoolStatus;
}
