//! Per-engine rendering of the neutral statement shapes.
//!
//! Embedded engine (SQLite): `?` placeholders, `INSERT … ON CONFLICT` upserts,
//! identity read back from the connection's last-insert-rowid, `LIMIT 1`,
//! natively idempotent `CREATE TABLE IF NOT EXISTS`.
//!
//! Enterprise engine (PostgreSQL): `$n` placeholders, two-branch `MERGE`
//! against a single-row constant source, `RETURNING` for identities,
//! `FETCH FIRST 1 ROWS ONLY`, plain `CREATE TABLE` whose "already exists"
//! failures are tolerated by the bootstrapper.

use std::fmt;

use super::error::DbError;
use super::schema::{ColumnDef, ColumnType, OnDelete, TableDef};
use super::statement::{InsertWithIdentity, Query, UpsertByKey};
use super::value::SqlValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Embedded,
    Enterprise,
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dialect::Embedded => write!(f, "embedded"),
            Dialect::Enterprise => write!(f, "enterprise"),
        }
    }
}

/// SQL text ready for a specific engine plus the parameters to bind, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Rendered {
    pub sql: String,
    pub params: Vec<SqlValue>,
}

impl Dialect {
    /// Plain read/write: placeholder normalization only.
    pub fn render_query(&self, query: &Query) -> Result<Rendered, DbError> {
        let (sql, placeholders) = rewrite_placeholders(&query.sql, *self == Dialect::Enterprise);
        if placeholders != query.params.len() {
            return Err(DbError::Translation(format!(
                "statement on {} has {} placeholders but {} parameters",
                query.table,
                placeholders,
                query.params.len()
            )));
        }
        Ok(Rendered {
            sql,
            params: query.params.clone(),
        })
    }

    pub fn render_upsert(&self, upsert: &UpsertByKey) -> Result<Rendered, DbError> {
        check_identifier(&upsert.table)?;
        check_identifier(&upsert.key_column)?;
        if upsert.columns.is_empty() {
            return Err(DbError::Translation(format!(
                "upsert into {} has no columns besides the key",
                upsert.table
            )));
        }
        if upsert.key.is_null() {
            return Err(DbError::Translation(format!(
                "upsert into {} has a NULL key",
                upsert.table
            )));
        }
        check_columns(&upsert.table, &upsert.key_column, &upsert.columns)?;

        let table = &upsert.table;
        let key = &upsert.key_column;
        let names: Vec<&str> = upsert.columns.iter().map(|(c, _)| c.as_str()).collect();
        let values: Vec<SqlValue> = upsert.columns.iter().map(|(_, v)| v.clone()).collect();

        match self {
            Dialect::Embedded => {
                let assignments = names
                    .iter()
                    .map(|c| format!("{c} = excluded.{c}"))
                    .collect::<Vec<_>>()
                    .join(", ");
                let sql = format!(
                    "INSERT INTO {table} ({key}, {columns}) VALUES ({placeholders}) \
                     ON CONFLICT({key}) DO UPDATE SET {assignments}",
                    columns = names.join(", "),
                    placeholders = placeholder_list(*self, 1, names.len() + 1),
                );

                let mut params = Vec::with_capacity(values.len() + 1);
                params.push(upsert.key.clone());
                params.extend(values);
                Ok(Rendered { sql, params })
            }
            Dialect::Enterprise => {
                // $1 = key for the source row, then one value per column for
                // the matched branch, then key + values for the unmatched branch.
                let assignments = names
                    .iter()
                    .enumerate()
                    .map(|(i, c)| format!("{c} = {}", self.placeholder(i + 2)))
                    .collect::<Vec<_>>()
                    .join(", ");
                let insert_start = names.len() + 2;
                let sql = format!(
                    "MERGE INTO {table} AS tgt \
                     USING (SELECT {source} AS {key}) AS src \
                     ON (tgt.{key} = src.{key}) \
                     WHEN MATCHED THEN UPDATE SET {assignments} \
                     WHEN NOT MATCHED THEN INSERT ({key}, {columns}) VALUES ({placeholders})",
                    source = self.placeholder(1),
                    columns = names.join(", "),
                    placeholders = placeholder_list(*self, insert_start, names.len() + 1),
                );

                let mut params = Vec::with_capacity(2 * values.len() + 2);
                params.push(upsert.key.clone());
                params.extend(values.iter().cloned());
                params.push(upsert.key.clone());
                params.extend(values);
                Ok(Rendered { sql, params })
            }
        }
    }

    /// Insert returning a generated key. The embedded rendering carries no
    /// returning clause; the backend reads the connection's last rowid instead.
    pub fn render_insert(&self, insert: &InsertWithIdentity) -> Result<Rendered, DbError> {
        check_identifier(&insert.table)?;
        check_identifier(&insert.identity_column)?;
        if insert.columns.is_empty() {
            return Err(DbError::Translation(format!(
                "insert into {} has no columns",
                insert.table
            )));
        }
        check_columns(&insert.table, &insert.identity_column, &insert.columns)?;

        let names: Vec<&str> = insert.columns.iter().map(|(c, _)| c.as_str()).collect();
        let mut sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            insert.table,
            names.join(", "),
            placeholder_list(*self, 1, names.len())
        );
        if *self == Dialect::Enterprise {
            sql.push_str(&format!(" RETURNING {}", insert.identity_column));
        }

        Ok(Rendered {
            sql,
            params: insert.columns.iter().map(|(_, v)| v.clone()).collect(),
        })
    }

    /// Greatest numeric key starting with `prefix-`, at most one row. The
    /// prefix match is case-sensitive on both engines and longer keys rank
    /// first, so `PROV-10000` sorts above `PROV-9999`.
    pub fn render_latest_key(
        &self,
        table: &str,
        key_column: &str,
        prefix: &str,
    ) -> Result<Rendered, DbError> {
        check_identifier(table)?;
        check_identifier(key_column)?;

        let head_text = format!("{prefix}-");
        let len = head_text.chars().count();
        let numeric_tail = match self {
            Dialect::Embedded => format!("SUBSTR({key_column}, {}) NOT GLOB '*[^0-9]*'", len + 1),
            Dialect::Enterprise => format!("SUBSTR({key_column}, {}) ~ '^[0-9]+$'", len + 1),
        };
        let head = format!(
            "SELECT {key} FROM {table} WHERE SUBSTR({key}, 1, {len}) = {p} AND {numeric_tail} \
             ORDER BY LENGTH({key}) DESC, {key} DESC",
            key = key_column,
            p = self.placeholder(1)
        );
        let sql = match self {
            Dialect::Embedded => format!("{head} LIMIT 1"),
            Dialect::Enterprise => format!("{head} FETCH FIRST 1 ROWS ONLY"),
        };
        Ok(Rendered {
            sql,
            params: vec![SqlValue::Text(head_text)],
        })
    }

    pub fn render_create_table(&self, table: &TableDef) -> Result<String, DbError> {
        check_identifier(table.name)?;
        if table.columns.is_empty() {
            return Err(DbError::Translation(format!("table {} has no columns", table.name)));
        }
        let columns = table
            .columns
            .iter()
            .map(|c| self.column_definition(c))
            .collect::<Result<Vec<_>, _>>()?;

        let create = match self {
            Dialect::Embedded => "CREATE TABLE IF NOT EXISTS",
            Dialect::Enterprise => "CREATE TABLE",
        };
        Ok(format!("{create} {} ({})", table.name, columns.join(", ")))
    }

    pub fn render_add_column(&self, table: &str, column: &ColumnDef) -> Result<String, DbError> {
        check_identifier(table)?;
        if column.ty == ColumnType::Identity || column.primary_key {
            return Err(DbError::Translation(format!(
                "cannot add key column {} to existing table {}",
                column.name, table
            )));
        }
        Ok(format!(
            "ALTER TABLE {table} ADD COLUMN {}",
            self.column_definition(column)?
        ))
    }

    fn column_definition(&self, column: &ColumnDef) -> Result<String, DbError> {
        check_identifier(column.name)?;

        let mut definition = format!("{} ", column.name);
        match (column.ty, self) {
            (ColumnType::Identity, Dialect::Embedded) => {
                definition.push_str("INTEGER PRIMARY KEY AUTOINCREMENT");
            }
            (ColumnType::Identity, Dialect::Enterprise) => {
                definition.push_str("INTEGER GENERATED BY DEFAULT AS IDENTITY PRIMARY KEY");
            }
            (ColumnType::Text(len), _) => definition.push_str(&format!("VARCHAR({len})")),
            (ColumnType::LongText, _) => definition.push_str("TEXT"),
            (ColumnType::SmallInt, _) => definition.push_str("SMALLINT"),
            (ColumnType::Integer, _) => definition.push_str("INTEGER"),
        }

        if column.ty != ColumnType::Identity {
            if column.not_null {
                definition.push_str(" NOT NULL");
            }
            if column.primary_key {
                definition.push_str(" PRIMARY KEY");
            }
        }

        if let Some(fk) = column.references {
            check_identifier(fk.table)?;
            check_identifier(fk.column)?;
            let action = match fk.on_delete {
                OnDelete::Cascade => "CASCADE",
                OnDelete::SetNull => "SET NULL",
            };
            definition.push_str(&format!(
                " REFERENCES {}({}) ON DELETE {action}",
                fk.table, fk.column
            ));
        }

        Ok(definition)
    }

    fn placeholder(&self, position: usize) -> String {
        match self {
            Dialect::Embedded => "?".to_string(),
            Dialect::Enterprise => format!("${position}"),
        }
    }
}

fn placeholder_list(dialect: Dialect, start: usize, count: usize) -> String {
    (start..start + count)
        .map(|position| dialect.placeholder(position))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Count `?` placeholders outside quoted text, optionally renumbering them
/// to `$1..$n`.
fn rewrite_placeholders(sql: &str, numbered: bool) -> (String, usize) {
    let mut out = String::with_capacity(sql.len() + 8);
    let mut count = 0;
    let mut quote: Option<char> = None;

    for ch in sql.chars() {
        match quote {
            Some(q) => {
                if ch == q {
                    quote = None;
                }
                out.push(ch);
            }
            None => match ch {
                '\'' | '"' => {
                    quote = Some(ch);
                    out.push(ch);
                }
                '?' => {
                    count += 1;
                    if numbered {
                        out.push('$');
                        out.push_str(&count.to_string());
                    } else {
                        out.push('?');
                    }
                }
                _ => out.push(ch),
            },
        }
    }

    (out, count)
}

fn check_identifier(name: &str) -> Result<(), DbError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };
    if valid {
        Ok(())
    } else {
        Err(DbError::Translation(format!("'{}' is not a plain SQL identifier", name)))
    }
}

fn check_columns(
    table: &str,
    key_column: &str,
    columns: &[(String, SqlValue)],
) -> Result<(), DbError> {
    for (index, (column, _)) in columns.iter().enumerate() {
        check_identifier(column)?;
        if column.eq_ignore_ascii_case(key_column) {
            return Err(DbError::Translation(format!(
                "statement on {} lists key column {} among its values",
                table, key_column
            )));
        }
        if columns[..index]
            .iter()
            .any(|(earlier, _)| earlier.eq_ignore_ascii_case(column))
        {
            return Err(DbError::Translation(format!(
                "statement on {} lists column {} twice",
                table, column
            )));
        }
    }
    Ok(())
}
