//! Dual-engine data access.
//!
//! Callers describe statements with the neutral shapes in [`statement`] and
//! hand them to the [`QueryRouter`], which renders them for whichever engine
//! was configured at startup and normalizes the rows that come back.

pub mod backend;
pub mod bootstrap;
pub mod dialect;
pub mod embedded;
pub mod enterprise;
pub mod error;
pub mod identity;
pub mod router;
pub mod schema;
pub mod statement;
pub mod value;

pub use backend::{Backend, PoolStatus};
pub use bootstrap::{row_count, BootstrapReport, SchemaBootstrapper};
pub use dialect::{Dialect, Rendered};
pub use embedded::EmbeddedBackend;
pub use enterprise::EnterpriseBackend;
pub use error::{DbError, Intent, Operation};
pub use identity::IdentitySequence;
pub use router::{Outcome, QueryRouter};
pub use schema::{AddedColumn, ColumnDef, ColumnType, OnDelete, SchemaPlan, SeedSet, TableDef};
pub use statement::{InsertWithIdentity, Query, Statement, UpsertByKey};
pub use value::{FromRecord, Row, SqlValue};
