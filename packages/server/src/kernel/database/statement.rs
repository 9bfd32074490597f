//! Typed statement shapes accepted by the query router.
//!
//! Callers build one of these instead of engine-specific SQL. Plain reads and
//! writes carry SQL with `?` placeholders; upserts and identity inserts carry
//! only table/column/value structure and are rendered per engine.

use super::error::{DbError, Intent, Operation};
use super::value::SqlValue;

/// Plain SQL with positional `?` placeholders.
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    pub(crate) table: String,
    pub(crate) sql: String,
    pub(crate) params: Vec<SqlValue>,
}

impl Query {
    /// `table` is the primary table touched, reported when the statement fails.
    pub fn new(table: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    pub fn bind(mut self, value: impl Into<SqlValue>) -> Self {
        self.params.push(value.into());
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }
}

/// Insert-or-update keyed on a single-column primary key.
#[derive(Debug, Clone, PartialEq)]
pub struct UpsertByKey {
    pub(crate) table: String,
    pub(crate) key_column: String,
    pub(crate) key: SqlValue,
    pub(crate) columns: Vec<(String, SqlValue)>,
}

impl UpsertByKey {
    pub fn new(
        table: impl Into<String>,
        key_column: impl Into<String>,
        key: impl Into<SqlValue>,
    ) -> Self {
        Self {
            table: table.into(),
            key_column: key_column.into(),
            key: key.into(),
            columns: Vec::new(),
        }
    }

    /// Non-key column written on both the matched and unmatched branch.
    pub fn set(mut self, column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.columns.push((column.into(), value.into()));
        self
    }

    /// Build from the doubled parameter list of a two-branch merge, for call
    /// sites that still assemble the legacy merge parameter list instead of
    /// using [`UpsertByKey::set`].
    ///
    /// `params` holds `key, values...` once for the matched branch and once
    /// for the unmatched branch. The list must split into two equal halves;
    /// the second half is bound.
    pub fn from_merge_parameters(
        table: impl Into<String>,
        key_column: impl Into<String>,
        columns: &[&str],
        params: Vec<SqlValue>,
    ) -> Result<Self, DbError> {
        let table = table.into();
        if params.len() % 2 != 0 {
            return Err(DbError::Translation(format!(
                "merge into {} has an odd parameter count ({})",
                table,
                params.len()
            )));
        }
        let half = params.len() / 2;
        if half != columns.len() + 1 {
            return Err(DbError::Translation(format!(
                "merge into {} expects {} parameters per branch, got {}",
                table,
                columns.len() + 1,
                half
            )));
        }

        let mut single = params.into_iter().skip(half);
        let key = single.next().unwrap_or(SqlValue::Null);
        let mut upsert = Self::new(table, key_column, key);
        for (column, value) in columns.iter().zip(single) {
            upsert = upsert.set(*column, value);
        }
        Ok(upsert)
    }

    pub fn key(&self) -> &SqlValue {
        &self.key
    }

    pub fn columns(&self) -> &[(String, SqlValue)] {
        &self.columns
    }
}

/// Insert whose engine-generated integer key is needed immediately.
#[derive(Debug, Clone, PartialEq)]
pub struct InsertWithIdentity {
    pub(crate) table: String,
    pub(crate) identity_column: String,
    pub(crate) columns: Vec<(String, SqlValue)>,
}

impl InsertWithIdentity {
    pub fn new(table: impl Into<String>, identity_column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            identity_column: identity_column.into(),
            columns: Vec::new(),
        }
    }

    pub fn value(mut self, column: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.columns.push((column.into(), value.into()));
        self
    }

    pub fn columns(&self) -> &[(String, SqlValue)] {
        &self.columns
    }
}

/// The statement shapes the compatibility layer understands.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Read(Query),
    Write(Query),
    UpsertByKey(UpsertByKey),
    InsertWithIdentity(InsertWithIdentity),
}

impl Statement {
    pub fn intent(&self) -> Intent {
        let (operation, table) = match self {
            Statement::Read(q) => (Operation::Read, &q.table),
            Statement::Write(q) => (Operation::Write, &q.table),
            Statement::UpsertByKey(u) => (Operation::Upsert, &u.table),
            Statement::InsertWithIdentity(i) => (Operation::InsertWithIdentity, &i.table),
        };
        Intent {
            operation,
            table: table.clone(),
        }
    }
}

impl From<UpsertByKey> for Statement {
    fn from(upsert: UpsertByKey) -> Self {
        Statement::UpsertByKey(upsert)
    }
}

impl From<InsertWithIdentity> for Statement {
    fn from(insert: InsertWithIdentity) -> Self {
        Statement::InsertWithIdentity(insert)
    }
}
