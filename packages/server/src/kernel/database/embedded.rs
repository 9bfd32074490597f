//! Embedded engine: one SQLite connection shared by the whole process.

use std::path::Path;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{ConnectOptions, Sqlite};
use tokio::sync::Mutex;
use tracing::info;

use super::backend::{Backend, PoolStatus};
use super::dialect::Dialect;
use super::error::DbError;
use super::value::{Row, SqlValue};

const ENGINE: &str = "embedded";

type SqliteQuery<'q> = sqlx::query::Query<'q, Sqlite, SqliteArguments<'q>>;

/// The single handle serializes every statement, so the two steps of an
/// identity insert (insert, read last rowid) can never interleave with
/// another caller's write.
pub struct EmbeddedBackend {
    conn: Mutex<SqliteConnection>,
}

impl EmbeddedBackend {
    /// Open (creating if missing) the database file at `path`.
    pub async fn open(path: &Path) -> Result<Self, DbError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| DbError::Connect {
                engine: ENGINE,
                source: sqlx::Error::Io(e),
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true);
        let backend = Self::connect_with(options).await?;
        info!(path = %path.display(), "Opened embedded database");
        Ok(backend)
    }

    /// Private in-memory database, gone when the backend is dropped.
    pub async fn open_in_memory() -> Result<Self, DbError> {
        let options = SqliteConnectOptions::new()
            .in_memory(true)
            .foreign_keys(true);
        Self::connect_with(options).await
    }

    async fn connect_with(options: SqliteConnectOptions) -> Result<Self, DbError> {
        let conn = options
            .connect()
            .await
            .map_err(|source| DbError::Connect {
                engine: ENGINE,
                source,
            })?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }
}

#[async_trait]
impl Backend for EmbeddedBackend {
    fn dialect(&self) -> Dialect {
        Dialect::Embedded
    }

    async fn fetch_all(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, sqlx::Error> {
        let mut conn = self.conn.lock().await;
        let rows = bind_params(sqlx::query(sql), params)
            .fetch_all(&mut *conn)
            .await?;
        rows.iter().map(normalize_row).collect()
    }

    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<u64, sqlx::Error> {
        let mut conn = self.conn.lock().await;
        let result = bind_params(sqlx::query(sql), params)
            .execute(&mut *conn)
            .await?;
        Ok(result.rows_affected())
    }

    async fn insert_returning_identity(
        &self,
        sql: &str,
        params: &[SqlValue],
    ) -> Result<i64, sqlx::Error> {
        // Lock held across the insert and the rowid read.
        let mut conn = self.conn.lock().await;
        let result = bind_params(sqlx::query(sql), params)
            .execute(&mut *conn)
            .await?;
        Ok(result.last_insert_rowid())
    }

    fn pool_status(&self) -> PoolStatus {
        let idle = usize::from(self.conn.try_lock().is_ok());
        PoolStatus {
            size: 1,
            idle_connections: idle,
            max_connections: 1,
        }
    }
}

fn bind_params<'q>(mut query: SqliteQuery<'q>, params: &[SqlValue]) -> SqliteQuery<'q> {
    for param in params {
        query = match param {
            SqlValue::Null => query.bind(Option::<String>::None),
            SqlValue::Integer(v) => query.bind(*v),
            SqlValue::Real(v) => query.bind(*v),
            SqlValue::Text(v) => query.bind(v.clone()),
            SqlValue::Bool(v) => query.bind(i64::from(*v)),
        };
    }
    query
}

/// Decode by the value's storage class rather than the declared column type;
/// aggregates and expressions carry no declared type.
fn normalize_row(row: &SqliteRow) -> Result<Row, sqlx::Error> {
    use sqlx::{Column, Row as _, TypeInfo, ValueRef};

    let mut columns = Vec::with_capacity(row.len());
    let mut values = Vec::with_capacity(row.len());

    for (index, column) in row.columns().iter().enumerate() {
        let raw = row.try_get_raw(index)?;
        let value = if raw.is_null() {
            SqlValue::Null
        } else {
            let storage = raw.type_info().name().to_string();
            match storage.as_str() {
                "INTEGER" | "BOOLEAN" => SqlValue::Integer(row.try_get_unchecked::<i64, _>(index)?),
                "REAL" | "NUMERIC" => SqlValue::Real(row.try_get_unchecked::<f64, _>(index)?),
                "BLOB" => {
                    let bytes = row.try_get_unchecked::<Vec<u8>, _>(index)?;
                    SqlValue::Text(String::from_utf8_lossy(&bytes).into_owned())
                }
                _ => SqlValue::Text(row.try_get_unchecked::<String, _>(index)?),
            }
        };
        columns.push(column.name().to_string());
        values.push(value);
    }

    Ok(Row::new(columns, values))
}
