use std::fmt;

use thiserror::Error;

/// SQLSTATE codes that mean "the object is already there".
/// 42P07 duplicate_table, 42701 duplicate_column, 42710 duplicate_object.
const ALREADY_EXISTS_CODES: &[&str] = &["42P07", "42701", "42710"];

/// Message fragments used when an engine reports no usable code.
const ALREADY_EXISTS_FRAGMENTS: &[&str] = &["already exist", "duplicate column name"];

/// Kind of work a statement performs, used to annotate failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
    Upsert,
    InsertWithIdentity,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Read => write!(f, "read"),
            Operation::Write => write!(f, "write"),
            Operation::Upsert => write!(f, "upsert"),
            Operation::InsertWithIdentity => write!(f, "insert-with-identity"),
        }
    }
}

/// What a statement was trying to do. Errors carry this instead of SQL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    pub operation: Operation,
    pub table: String,
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} on {}", self.operation, self.table)
    }
}

/// Errors from the data-access layer.
#[derive(Debug, Error)]
pub enum DbError {
    /// The statement cannot be expressed for the active engine. Caller bug.
    #[error("Untranslatable statement: {0}")]
    Translation(String),

    #[error("{intent} failed: {source}")]
    Execution {
        intent: Intent,
        #[source]
        source: sqlx::Error,
    },

    #[error("Failed to open {engine} database: {source}")]
    Connect {
        engine: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("Column '{column}': {message}")]
    Decode { column: String, message: String },
}

impl DbError {
    pub(crate) fn decode(column: &str, message: impl Into<String>) -> Self {
        DbError::Decode {
            column: column.to_string(),
            message: message.into(),
        }
    }

    /// The statement intent, when the error came from executing one.
    pub fn intent(&self) -> Option<&Intent> {
        match self {
            DbError::Execution { intent, .. } => Some(intent),
            _ => None,
        }
    }

    fn database_error(&self) -> Option<&(dyn sqlx::error::DatabaseError + 'static)> {
        match self {
            DbError::Execution {
                source: sqlx::Error::Database(err),
                ..
            } => Some(err.as_ref()),
            _ => None,
        }
    }

    /// Primary key or unique constraint rejected the write.
    pub fn is_unique_violation(&self) -> bool {
        self.database_error()
            .is_some_and(|err| err.is_unique_violation())
    }

    /// Write referenced a parent row that does not exist.
    pub fn is_foreign_key_violation(&self) -> bool {
        self.database_error()
            .is_some_and(|err| err.is_foreign_key_violation())
    }

    /// DDL failed because the table or column is already present.
    pub fn is_already_exists(&self) -> bool {
        match self.database_error() {
            Some(err) => is_already_exists(err.code().as_deref(), err.message()),
            None => false,
        }
    }
}

/// Classify an engine error as "object already exists".
///
/// SQLSTATE codes are checked first; the message match covers engines and
/// driver versions that report no code.
pub fn is_already_exists(code: Option<&str>, message: &str) -> bool {
    if code.is_some_and(|code| ALREADY_EXISTS_CODES.contains(&code)) {
        return true;
    }
    let message = message.to_ascii_lowercase();
    ALREADY_EXISTS_FRAGMENTS
        .iter()
        .any(|fragment| message.contains(fragment))
}
