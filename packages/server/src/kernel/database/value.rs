//! Engine-neutral parameter values and result rows.

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::error::DbError;

/// Value type for statement parameters and result columns.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    /// Booleans are persisted as 0/1 integers on every engine.
    Bool(bool),
}

impl SqlValue {
    pub fn is_null(&self) -> bool {
        matches!(self, SqlValue::Null)
    }
}

impl From<i32> for SqlValue {
    fn from(v: i32) -> Self {
        SqlValue::Integer(v as i64)
    }
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Integer(v)
    }
}

impl From<f64> for SqlValue {
    fn from(v: f64) -> Self {
        SqlValue::Real(v)
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<&String> for SqlValue {
    fn from(v: &String) -> Self {
        SqlValue::Text(v.clone())
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

impl<T: Into<SqlValue>> From<Option<T>> for SqlValue {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(val) => val.into(),
            None => SqlValue::Null,
        }
    }
}

impl Serialize for SqlValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SqlValue::Null => serializer.serialize_none(),
            SqlValue::Integer(v) => serializer.serialize_i64(*v),
            SqlValue::Real(v) => serializer.serialize_f64(*v),
            SqlValue::Text(v) => serializer.serialize_str(v),
            SqlValue::Bool(v) => serializer.serialize_bool(*v),
        }
    }
}

/// One result row in the common shape both engines are normalized to.
///
/// Column names are lower-cased so lookups behave the same whether the
/// engine folds unquoted identifiers or preserves them.
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    columns: Vec<String>,
    values: Vec<SqlValue>,
}

impl Row {
    pub fn new(columns: Vec<String>, values: Vec<SqlValue>) -> Self {
        let columns = columns
            .into_iter()
            .map(|c| c.to_ascii_lowercase())
            .collect();
        Self { columns, values }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw value by column name.
    pub fn get(&self, column: &str) -> Result<&SqlValue, DbError> {
        let wanted = column.to_ascii_lowercase();
        self.columns
            .iter()
            .position(|c| *c == wanted)
            .and_then(|index| self.values.get(index))
            .ok_or_else(|| DbError::decode(column, "column not present in result"))
    }

    /// Nullable text column. Integers are rendered as text.
    pub fn text(&self, column: &str) -> Result<Option<String>, DbError> {
        match self.get(column)? {
            SqlValue::Null => Ok(None),
            SqlValue::Text(v) => Ok(Some(v.clone())),
            SqlValue::Integer(v) => Ok(Some(v.to_string())),
            other => Err(DbError::decode(column, format!("expected text, found {:?}", other))),
        }
    }

    /// Non-null text column.
    pub fn required_text(&self, column: &str) -> Result<String, DbError> {
        self.text(column)?
            .ok_or_else(|| DbError::decode(column, "unexpected NULL"))
    }

    /// Nullable integer column.
    pub fn integer(&self, column: &str) -> Result<Option<i64>, DbError> {
        match self.get(column)? {
            SqlValue::Null => Ok(None),
            SqlValue::Integer(v) => Ok(Some(*v)),
            SqlValue::Bool(v) => Ok(Some(i64::from(*v))),
            SqlValue::Text(v) => v
                .trim()
                .parse()
                .map(Some)
                .map_err(|_| DbError::decode(column, format!("'{}' is not an integer", v))),
            SqlValue::Real(v) => Err(DbError::decode(column, format!("expected integer, found {}", v))),
        }
    }

    /// Non-null integer column.
    pub fn required_integer(&self, column: &str) -> Result<i64, DbError> {
        self.integer(column)?
            .ok_or_else(|| DbError::decode(column, "unexpected NULL"))
    }

    /// 0/1 flag column surfaced as a boolean. NULL reads as false.
    pub fn flag(&self, column: &str) -> Result<bool, DbError> {
        match self.get(column)? {
            SqlValue::Bool(v) => Ok(*v),
            _ => Ok(self.integer(column)?.unwrap_or(0) != 0),
        }
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (column, value) in self.columns.iter().zip(&self.values) {
            map.serialize_entry(column, value)?;
        }
        map.end()
    }
}

/// Conversion from a normalized row into a typed record.
pub trait FromRecord: Sized {
    fn from_record(row: &Row) -> Result<Self, DbError>;
}
