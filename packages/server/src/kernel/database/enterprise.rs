//! Enterprise engine: pooled PostgreSQL connections.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::postgres::{PgArguments, PgConnectOptions, PgPool, PgPoolOptions, PgRow};
use sqlx::Postgres;
use tracing::info;

use super::backend::{Backend, PoolStatus};
use super::dialect::Dialect;
use super::error::DbError;
use super::value::{Row, SqlValue};
use crate::config::EnterpriseConfig;

const ENGINE: &str = "enterprise";

type PgQuery<'q> = sqlx::query::Query<'q, Postgres, PgArguments>;

/// Each call acquires one pooled connection for its statement and returns it
/// on drop, error or not.
pub struct EnterpriseBackend {
    pool: PgPool,
}

impl EnterpriseBackend {
    pub async fn connect(config: &EnterpriseConfig) -> Result<Self, DbError> {
        let options = match &config.url {
            Some(url) => PgConnectOptions::from_str(url).map_err(|source| DbError::Connect {
                engine: ENGINE,
                source,
            })?,
            None => PgConnectOptions::new()
                .host(&config.host)
                .port(config.port)
                .database(&config.database)
                .username(&config.user)
                .password(&config.password),
        };

        let pool = PgPoolOptions::new()
            .max_connections(config.pool_size)
            .connect_with(options)
            .await
            .map_err(|source| DbError::Connect {
                engine: ENGINE,
                source,
            })?;

        info!(pool_size = config.pool_size, "Connected to enterprise database");
        Ok(Self { pool })
    }
}

#[async_trait]
impl Backend for EnterpriseBackend {
    fn dialect(&self) -> Dialect {
        Dialect::Enterprise
    }

    async fn fetch_all(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<Row>, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
        let rows = bind_params(sqlx::query(sql), params)
            .fetch_all(&mut *conn)
            .await?;
        rows.iter().map(normalize_row).collect()
    }

    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<u64, sqlx::Error> {
        let mut conn = self.pool.acquire().await?;
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
        let mut conn = self.pool.acquire().await?;
        let row = bind_params(sqlx::query(sql), params)
            .fetch_one(&mut *conn)
            .await?;
        decode_integer(&row, 0)
    }

    fn pool_status(&self) -> PoolStatus {
        PoolStatus {
            size: self.pool.size(),
            idle_connections: self.pool.num_idle(),
            max_connections: self.pool.options().get_max_connections(),
        }
    }
}

fn bind_params<'q>(mut query: PgQuery<'q>, params: &[SqlValue]) -> PgQuery<'q> {
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

fn decode_integer(row: &PgRow, index: usize) -> Result<i64, sqlx::Error> {
    use sqlx::{Column, Row as _, TypeInfo};

    let type_name = row.columns()[index].type_info().name().to_string();
    match type_name.as_str() {
        "INT2" => Ok(i64::from(row.try_get::<i16, _>(index)?)),
        "INT4" => Ok(i64::from(row.try_get::<i32, _>(index)?)),
        _ => row.try_get::<i64, _>(index),
    }
}

fn normalize_row(row: &PgRow) -> Result<Row, sqlx::Error> {
    use sqlx::{Column, Row as _, TypeInfo, ValueRef};

    let mut columns = Vec::with_capacity(row.len());
    let mut values = Vec::with_capacity(row.len());

    for (index, column) in row.columns().iter().enumerate() {
        let value = if row.try_get_raw(index)?.is_null() {
            SqlValue::Null
        } else {
            match column.type_info().name() {
                "INT2" | "INT4" | "INT8" => SqlValue::Integer(decode_integer(row, index)?),
                "BOOL" => SqlValue::Bool(row.try_get::<bool, _>(index)?),
                "FLOAT4" => SqlValue::Real(f64::from(row.try_get::<f32, _>(index)?)),
                "FLOAT8" => SqlValue::Real(row.try_get::<f64, _>(index)?),
                _ => SqlValue::Text(row.try_get::<String, _>(index)?),
            }
        };
        columns.push(column.name().to_string());
        values.push(value);
    }

    Ok(Row::new(columns, values))
}
